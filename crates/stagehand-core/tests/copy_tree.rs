use std::fs;
use std::path::Path;

use tempfile::TempDir;

use stagehand_core::ops::copy_tree;

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn mirrors_a_nested_tree() {
    let temp = TempDir::new().unwrap();
    let origin = temp.path().join("origin");
    let dest = temp.path().join("dest");

    write(&origin.join("a.txt"), "a");
    write(&origin.join("sub/b.txt"), "b");
    write(&origin.join("sub/deep/c.txt"), "c");

    let stats = copy_tree(&origin, &dest).unwrap();

    assert_eq!(stats.copied, 3);
    assert_eq!(stats.failed, 0);
    assert_eq!(fs::read_to_string(dest.join("a.txt")).unwrap(), "a");
    assert_eq!(fs::read_to_string(dest.join("sub/b.txt")).unwrap(), "b");
    assert_eq!(fs::read_to_string(dest.join("sub/deep/c.txt")).unwrap(), "c");
}

#[test]
fn overwrites_existing_destination_files() {
    let temp = TempDir::new().unwrap();
    let origin = temp.path().join("origin");
    let dest = temp.path().join("dest");

    write(&origin.join("a.txt"), "new");
    write(&dest.join("a.txt"), "old");

    copy_tree(&origin, &dest).unwrap();

    assert_eq!(fs::read_to_string(dest.join("a.txt")).unwrap(), "new");
}

#[test]
fn missing_origin_is_a_fatal_operation_error() {
    let temp = TempDir::new().unwrap();

    let err = copy_tree(&temp.path().join("no-such-dir"), &temp.path().join("dest")).unwrap_err();

    assert_eq!(err.exit_code(), 100002);
}

#[test]
fn one_failing_file_does_not_abort_the_rest() {
    let temp = TempDir::new().unwrap();
    let origin = temp.path().join("origin");
    let dest = temp.path().join("dest");

    for name in ["a.txt", "b.txt", "c.txt", "d.txt", "e.txt"] {
        write(&origin.join(name), name);
    }
    // A directory squatting on one target filename makes that single
    // copy fail regardless of process privileges.
    fs::create_dir_all(dest.join("c.txt")).unwrap();

    let stats = copy_tree(&origin, &dest).unwrap();

    assert_eq!(stats.copied, 4);
    assert_eq!(stats.failed, 1);
    for name in ["a.txt", "b.txt", "d.txt", "e.txt"] {
        assert_eq!(fs::read_to_string(dest.join(name)).unwrap(), name);
    }
}
