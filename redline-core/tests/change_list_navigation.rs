//! Integration tests for cross-file cursor movement and viewport reconciliation.
//!
//! Exercises: ChangeList::scan, move_cursor (including multi-file jumps and
//! clamping), move_one_file, preview centring, pager focus, update_viewport.

use std::fs;
use std::path::PathBuf;

use redline_core::{ChangeList, ItemAddress, MalformedPolicy, Pattern, Scan};
use tempfile::TempDir;

/// Writes `files` into a fresh temp dir and returns the dir guard plus paths in order.
fn write_files(files: &[(&str, &str)]) -> (TempDir, Vec<PathBuf>) {
    let dir = TempDir::new().unwrap();
    let paths = files
        .iter()
        .map(|(name, content)| {
            let path = dir.path().join(name);
            fs::write(&path, content).unwrap();
            path
        })
        .collect();
    (dir, paths)
}

fn preview_list(pattern: &str, paths: &[PathBuf]) -> Option<ChangeList> {
    let pattern = Pattern::new(pattern).unwrap();
    let scan = Scan {
        pattern: &pattern,
        substitution: None,
        policy: MalformedPolicy::Abort,
    };
    ChangeList::scan(&scan, paths).unwrap()
}

fn addr(file_index: usize, local_index: usize) -> ItemAddress {
    ItemAddress { file_index, local_index }
}

/// a.txt has three matches (preview rows 3, 5, 6), b.txt none, c.txt two.
fn sample() -> (TempDir, ChangeList) {
    let (dir, paths) = write_files(&[
        ("a.txt", "foo\nfoo\nfoo\nx\nfoo\nx\nx\n"),
        ("b.txt", "nothing here\n"),
        ("c.txt", "x\nx\n"),
    ]);
    let list = preview_list("x", &paths).expect("two files match");
    (dir, list)
}

#[test]
fn files_without_matches_are_dropped() {
    let (_dir, list) = sample();
    assert_eq!(list.files().len(), 2, "b.txt has no match and must be excluded");
    assert!(list.files()[0].path().ends_with("a.txt"));
    assert!(list.files()[1].path().ends_with("c.txt"));
    assert_eq!(list.change_count(), 5);
    // a: header + 3, c: header + 2, one separator row between them.
    assert_eq!(list.total_rows(), 8);
}

#[test]
fn no_matches_anywhere_is_no_list() {
    let (_dir, paths) = write_files(&[("a.txt", "abc\n"), ("b.txt", "")]);
    assert!(preview_list("zzz", &paths).is_none());
}

#[test]
fn cursor_crosses_file_boundaries_one_row_at_a_time() {
    let (_dir, mut list) = sample();
    assert_eq!(list.address(), addr(0, 0));

    for _ in 0..3 {
        list.move_cursor(1);
    }
    assert_eq!(list.address(), addr(0, 3));

    list.move_cursor(1);
    assert_eq!(list.address(), addr(1, 0), "past the tail lands on the next header");
    assert_eq!(list.cursor_row(), 5);

    list.move_cursor(-1);
    assert_eq!(list.address(), addr(0, 3), "past the head lands on the previous tail");
}

#[test]
fn large_jump_spans_files_in_one_move() {
    let (_dir, mut list) = sample();
    list.move_cursor(6);
    assert_eq!(list.address(), addr(1, 2));
    assert_eq!(list.cursor_row(), 7);

    // Motion counts items; the blank separator row between files is not one.
    list.move_cursor(-5);
    assert_eq!(list.address(), addr(0, 1));
}

#[test]
fn cursor_clamps_at_both_ends() {
    let (_dir, mut list) = sample();
    list.set_viewport(3, 4);

    list.move_cursor(2);
    assert!(list.preview_scroll() > 0);
    list.move_cursor(-100);
    assert_eq!(list.address(), addr(0, 0));
    assert_eq!(list.preview_scroll(), 0, "clamping resets the preview");
    assert_eq!(list.list_scroll(), 0);

    list.move_cursor(100);
    assert_eq!(list.address(), addr(1, 2));
    assert_eq!(list.preview_scroll(), 0);

    list.move_cursor(1);
    assert_eq!(list.address(), addr(1, 2), "never overflows past the last item");
}

#[test]
fn preview_centres_on_focused_change() {
    let (_dir, mut list) = sample();
    list.set_viewport(10, 4);

    list.move_cursor(2);
    let change = list.focused_change().expect("item 2 is a change");
    assert_eq!(change.line_number, 6);
    assert_eq!(change.preview_row, 5);
    assert_eq!(list.preview_scroll(), 3);

    list.move_cursor(-1);
    // preview_row 3 minus half the pane height.
    assert_eq!(list.preview_scroll(), 1);
}

#[test]
fn list_viewport_scrolls_minimally() {
    let (_dir, mut list) = sample();
    list.set_viewport(2, 4);

    list.move_cursor(2);
    assert_eq!(list.list_scroll(), 1);

    list.move_cursor(2);
    assert_eq!(list.cursor_row(), 5);
    assert_eq!(list.list_scroll(), 4);

    list.move_cursor(-1);
    assert_eq!(list.cursor_row(), 3);
    assert_eq!(list.list_scroll(), 3);

    list.move_cursor(-100);
    assert_eq!(list.list_scroll(), 0);
}

#[test]
fn pager_focus_scrolls_preview_only() {
    let (_dir, mut list) = sample();
    list.set_viewport(10, 4);
    list.set_pager_focused(true);

    list.move_cursor(2);
    assert_eq!(list.address(), addr(0, 0), "cursor does not move while the pager has focus");
    assert_eq!(list.preview_scroll(), 2);

    list.move_cursor(100);
    assert_eq!(list.preview_scroll(), 6, "clamped to the last preview row");
    list.move_cursor(-100);
    assert_eq!(list.preview_scroll(), 0);

    list.move_one_file(false);
    assert_eq!(list.address(), addr(0, 0));
}

#[test]
fn move_one_file_lands_on_headers() {
    let (_dir, mut list) = sample();
    list.set_viewport(10, 4);
    list.move_cursor(2);

    list.move_one_file(false);
    assert_eq!(list.address(), addr(1, 0));
    assert_eq!(list.preview_scroll(), 0);

    list.move_one_file(false);
    assert_eq!(list.address(), addr(1, 0), "no file after the last one");

    list.move_one_file(true);
    assert_eq!(list.address(), addr(0, 0));
}

#[test]
fn header_toggle_disables_then_reenables_all() {
    let (_dir, mut list) = sample();
    assert_eq!(list.enabled_count(), 5);

    list.toggle_focused();
    assert_eq!(list.files()[0].enabled_count(), 0);
    assert_eq!(list.enabled_count(), 2, "other files are untouched");

    list.toggle_focused();
    assert_eq!(list.files()[0].enabled_count(), 3);

    list.toggle_at(addr(1, 2));
    assert!(!list.files()[1].changes()[1].enabled);
    assert!(list.files()[1].changes()[0].enabled);
}
