use std::io::Write;

use lyra_core::error::LyraError;
use lyra_core::names::StarNames;

fn write_table(contents: &str) -> tempfile::NamedTempFile {
    let mut f = tempfile::NamedTempFile::new().expect("create temp file");
    f.write_all(contents.as_bytes()).expect("write name table");
    f.flush().expect("flush");
    f
}

#[test]
fn test_header_row_is_skipped_and_lookup_shifts_by_one() {
    let f = write_table("name\nSol\nSirius\nCanopus\n");
    let names = StarNames::load(f.path()).unwrap();

    // Catalog index 0 must resolve past the leading Sol row.
    assert_eq!(names.get(0), Some("Sirius"));
    assert_eq!(names.get(1), Some("Canopus"));
}

#[test]
fn test_quoted_names_are_unwrapped() {
    let f = write_table("name\n\"Sol\"\n\"Alpha Centauri\"\nVega\n");
    let names = StarNames::load(f.path()).unwrap();
    assert_eq!(names.get(0), Some("Alpha Centauri"));
    assert_eq!(names.get(1), Some("Vega"));
}

#[test]
fn test_lookup_past_table_end_is_none() {
    let f = write_table("name\nSol\nSirius\n");
    let names = StarNames::load(f.path()).unwrap();
    assert_eq!(names.get(0), Some("Sirius"));
    assert_eq!(names.get(1), None);
}

#[test]
fn test_empty_file_is_rejected() {
    let f = write_table("");
    let err = StarNames::load(f.path()).unwrap_err();
    assert!(matches!(err, LyraError::InvalidNameTable(_)), "got: {err}");
}

#[test]
fn test_builtin_table_matches_catalog_order() {
    let names = StarNames::builtin();
    // Row 0 is Sol; catalog index 0 (the brightest entry) is Sirius.
    assert_eq!(names.get(0), Some("Sirius"));
    assert_eq!(names.get(1), Some("Canopus"));
    assert_eq!(names.len(), lyra_core::catalog::bright_stars().len() + 1);
}
