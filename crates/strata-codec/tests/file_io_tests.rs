//! Tests for reading and writing image files.

use strata_codec::{CodecError, ImageFormat, file_stem, read_image, write_image};
use strata_core::{Checkerboard, Image, PatternGenerator};

fn sample() -> Image {
    Checkerboard::new(8, 6, 2).unwrap().generate()
}

#[test]
fn test_ppm_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("board.ppm");
    write_image(&path, &sample()).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("P3\n8 6\n255\n"));
    assert_eq!(text.lines().count(), 3 + 6);
    assert_eq!(read_image(&path).unwrap(), sample());
}

#[test]
fn test_png_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("board.PNG");
    write_image(&path, &sample()).unwrap();
    assert_eq!(read_image(&path).unwrap(), sample());
}

#[test]
fn test_jpeg_file_keeps_size() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("board.jpeg");
    write_image(&path, &sample()).unwrap();
    assert_eq!(read_image(&path).unwrap().dimensions(), (8, 6));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.ppm");
    match read_image(&path) {
        Err(CodecError::Io { path: failed, .. }) => assert_eq!(failed, path),
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn test_unsupported_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("board.bmp");
    assert!(matches!(
        write_image(&path, &sample()),
        Err(CodecError::UnsupportedFormat(_))
    ));
    assert!(!path.exists());
}

#[test]
fn test_decoding_by_format() {
    let bytes = b"# hand written\nP3\n1 1\n255\n10 20 30\n";
    let image = ImageFormat::Ppm.codec().decode(bytes).unwrap();
    assert_eq!(image.pixel_at(0, 0).unwrap().rgb(), [10, 20, 30]);
}

#[test]
fn test_file_stem() {
    assert_eq!(file_stem("images/koala.ppm").as_deref(), Some("koala"));
    assert_eq!(file_stem("archive.tar.gz").as_deref(), Some("archive.tar"));
    assert_eq!(file_stem("").as_deref(), None);
}
