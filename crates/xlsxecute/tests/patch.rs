//! Tests for writing parameters into a workbook copy

mod common;

use common::{cell_formula, cell_number, cell_value, write_model};
use pretty_assertions::assert_eq;
use xlsxecute::{patch_workbook, Error, ParamValue, Parameters};

/// Patching a formula cell leaves a literal and touches nothing else
#[test]
fn test_patch_replaces_formula_with_literal() {
    let tmp = tempfile::tempdir().unwrap();
    let source = write_model(tmp.path(), "model.xlsx");
    let destination = tmp.path().join("runs").join("1").join("model.xlsx");

    let params: Parameters = [("Sheet1.A3", "42")].into_iter().collect();
    let written = patch_workbook(&source, &params, &destination).unwrap();

    assert_eq!(written, 1);
    assert_eq!(cell_value(&destination, "Sheet1", (1, 3)).as_deref(), Some("42"));
    assert_eq!(cell_formula(&destination, "Sheet1", (1, 3)), None);

    // Everything else is unchanged
    assert_eq!(cell_number(&destination, "Sheet1", (1, 1)), Some(10.0));
    assert_eq!(cell_number(&destination, "Sheet1", (1, 2)), Some(20.0));
    assert_eq!(cell_value(&destination, "Sheet1", (2, 1)).as_deref(), Some("total"));
    assert_eq!(
        cell_formula(&destination, "Summary", (2, 1)).as_deref(),
        Some("Sheet1!A3*2")
    );

    // The source keeps its formula
    assert_eq!(cell_formula(&source, "Sheet1", (1, 3)).as_deref(), Some("A1+A2"));
}

/// A new cell can be written and values keep their types
#[test]
fn test_patch_writes_typed_values() {
    let tmp = tempfile::tempdir().unwrap();
    let source = write_model(tmp.path(), "model.xlsx");
    let destination = tmp.path().join("patched.xlsx");

    let mut params = Parameters::new();
    params.insert("Sheet1.B2", ParamValue::text("42"));
    params.insert("Sheet1.A1", ParamValue::Number(2.5));
    params.insert("Summary.$C$4", ParamValue::Boolean(true));
    patch_workbook(&source, &params, &destination).unwrap();

    assert_eq!(cell_value(&destination, "Sheet1", (2, 2)).as_deref(), Some("42"));
    assert_eq!(cell_number(&destination, "Sheet1", (1, 1)), Some(2.5));
    assert_eq!(cell_value(&destination, "Summary", (3, 4)).as_deref(), Some("TRUE"));
}

/// No parameters still produces a full copy
#[test]
fn test_patch_without_parameters_copies_workbook() {
    let tmp = tempfile::tempdir().unwrap();
    let source = write_model(tmp.path(), "model.xlsx");
    let destination = tmp.path().join("copy.xlsx");

    let written = patch_workbook(&source, &Parameters::new(), &destination).unwrap();

    assert_eq!(written, 0);
    assert_eq!(cell_formula(&destination, "Sheet1", (1, 3)).as_deref(), Some("A1+A2"));
}

#[test]
fn test_patch_unknown_sheet() {
    let tmp = tempfile::tempdir().unwrap();
    let source = write_model(tmp.path(), "model.xlsx");
    let destination = tmp.path().join("patched.xlsx");

    let params: Parameters = [("Missing.A1", "1")].into_iter().collect();
    match patch_workbook(&source, &params, &destination) {
        Err(Error::SheetNotFound(name)) => assert_eq!(name, "Missing"),
        other => panic!("expected SheetNotFound, got {other:?}"),
    }
    assert!(!destination.exists());
}

#[test]
fn test_patch_bad_locations() {
    let tmp = tempfile::tempdir().unwrap();
    let source = write_model(tmp.path(), "model.xlsx");
    let destination = tmp.path().join("patched.xlsx");

    let params: Parameters = [("Sheet1A1", "1")].into_iter().collect();
    assert!(matches!(
        patch_workbook(&source, &params, &destination),
        Err(Error::InvalidLocation(key)) if key == "Sheet1A1"
    ));

    let params: Parameters = [("Sheet1.A0", "1")].into_iter().collect();
    assert!(matches!(
        patch_workbook(&source, &params, &destination),
        Err(Error::CellOutOfRange { .. })
    ));

    assert!(!destination.exists());
}

#[test]
fn test_patch_missing_source() {
    let tmp = tempfile::tempdir().unwrap();
    let result = patch_workbook(
        &tmp.path().join("nope.xlsx"),
        &Parameters::new(),
        &tmp.path().join("out.xlsx"),
    );
    match result {
        Err(Error::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
        other => panic!("expected NotFound, got {other:?}"),
    }
}
