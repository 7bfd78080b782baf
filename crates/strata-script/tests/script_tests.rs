//! Tests for scripts that touch the file system.

use std::fs;

use strata_codec::read_image;
use strata_core::{Image, PatternGenerator};
use strata_script::{Interpreter, ScriptError};

#[test]
fn test_export_then_import() {
    let dir = tempfile::tempdir().unwrap();
    let ppm = dir.path().join("board.ppm");
    let png = dir.path().join("board.png");

    let script = format!(
        "checkerboard 8 8 2\nexport {}\nexport {}\nimport {}\nnum layers\n",
        ppm.display(),
        png.display(),
        png.display()
    );
    let mut interpreter = Interpreter::new();
    let replies = interpreter.run(script.as_bytes()).unwrap();

    assert_eq!(replies[1], format!("file writing to {} successful", ppm.display()));
    assert_eq!(replies[3], format!("imported {} successfully!", png.display()));
    assert_eq!(replies[4], "num layers 2");

    let stack = interpreter.stack();
    assert_eq!(stack.name_at(1), Some("board"));
    assert_eq!(stack.current_layer(), Some(1));
    assert_eq!(stack.image_at(0).unwrap(), stack.image_at(1).unwrap());

    let expected = strata_core::Checkerboard::new(8, 8, 2).unwrap().generate();
    assert_eq!(read_image(&ppm).unwrap(), expected);
}

#[test]
fn test_import_renames_with_uniqueness() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tile.ppm");
    fs::write(&path, "P3\n2 2\n255\n1 2 3 4 5 6\n7 8 9 10 11 12\n").unwrap();

    let line = format!("import {}", path.display());
    let mut interpreter = Interpreter::new();
    interpreter.execute(&line);
    interpreter.execute(&line);

    let names: Vec<_> = interpreter.stack().names().into_values().collect();
    assert_eq!(names, vec!["tile", "tile-copy"]);
    let first = interpreter.stack().image_at(0).unwrap();
    assert_eq!(first.pixel_at(1, 1).unwrap().rgb(), [10, 11, 12]);
}

#[test]
fn test_import_failures_are_reported() {
    let dir = tempfile::tempdir().unwrap();
    let mut interpreter = Interpreter::new();

    let missing = interpreter.execute(&format!("import {}", dir.path().join("gone.ppm").display()));
    assert!(missing[0].starts_with("Command failed: i/o error"));

    let unsupported = interpreter.execute("import picture.gif");
    assert_eq!(unsupported, vec!["Command failed: unsupported image format: gif"]);
    assert!(interpreter.stack().is_empty());
}

#[test]
fn test_export_without_layers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.ppm");
    let mut interpreter = Interpreter::new();
    assert_eq!(
        interpreter.execute(&format!("export {}", path.display())),
        vec!["no layers present"]
    );
    assert!(!path.exists());
}

#[test]
fn test_batch_runs_nested_script() {
    let dir = tempfile::tempdir().unwrap();
    let inner = dir.path().join("inner.bat");
    let outer = dir.path().join("outer.txt");
    fs::write(&inner, "# inner script\nadd blank\ngreyscale # no-op on white\n").unwrap();
    fs::write(&outer, format!("add blank\nbatch {}\nnum layers\n", inner.display())).unwrap();

    let mut interpreter = Interpreter::new();
    let replies = interpreter.run_file(&outer).unwrap();
    assert_eq!(
        replies,
        vec![
            "add blank performed. created blank layer #1",
            "add blank performed. created blank layer #2",
            "applied greyscale on layer #2",
            "batch reading successful",
            "num layers 2",
        ]
    );
}

#[test]
fn test_batch_rejects_other_extensions() {
    let mut interpreter = Interpreter::new();
    let replies = interpreter.execute("batch script.sh");
    assert!(replies[0].starts_with("Command failed: invalid script file"));
}

#[test]
fn test_recursive_batch_is_bounded() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("loop.txt");
    fs::write(&path, format!("add blank\nbatch {}\n", path.display())).unwrap();

    let mut interpreter = Interpreter::new();
    let replies = interpreter.run_file(&path).unwrap();
    assert_eq!(interpreter.stack().layer_count(), strata_script::MAX_BATCH_DEPTH + 1);
    assert!(replies.iter().any(|reply| reply.contains("nesting depth")));
}

#[test]
fn test_close_inside_batch_stops_everything() {
    let dir = tempfile::tempdir().unwrap();
    let inner = dir.path().join("inner.txt");
    fs::write(&inner, "add blank\nclose program\nadd blank\n").unwrap();

    let mut interpreter = Interpreter::new();
    let script = format!("batch {}\nadd blank\n", inner.display());
    let replies = interpreter.run(script.as_bytes()).unwrap();
    assert_eq!(interpreter.stack().layer_count(), 1);
    assert!(interpreter.is_closed());
    assert_eq!(replies.last().map(String::as_str), Some("batch reading successful"));
}

#[test]
fn test_missing_script_file() {
    let mut interpreter = Interpreter::new();
    assert!(matches!(
        interpreter.run_file("does/not/exist.txt"),
        Err(ScriptError::Io { .. })
    ));
}

#[test]
fn test_seeded_mosaic_is_reproducible() {
    let script = "checkerboard 12 12 3\nmosaic\n";
    let mut a = Interpreter::new().with_seed(9);
    let mut b = Interpreter::new().with_seed(9);
    a.run(script.as_bytes()).unwrap();
    b.run(script.as_bytes()).unwrap();
    let image: Image = a.stack().image_at(0).unwrap();
    assert_eq!(image, b.stack().image_at(0).unwrap());
}
