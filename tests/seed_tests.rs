use std::fs;

use sheetgrid::state::cell::{CellKind, CellValue};
use sheetgrid::state::seed::{SeedConfig, SeedError};
use tempfile::tempdir;

const SMALL_SEED: &str = r#"{
    "min_rows": 4,
    "columns": [
        { "name": "Task" },
        { "name": "State", "kind": "status" },
        { "name": "Hours", "kind": "number" }
    ],
    "header_groups": [
        { "label": "Work", "color": "green", "columns": ["Task", "State"] }
    ],
    "tabs": [
        { "id": "todo", "name": "To Do", "rows": [["Write docs", "Pending", 3], ["Ship", null, 1.5]] }
    ]
}"#;

#[test]
fn test_embedded_seed_parses() {
    let seed = SeedConfig::embedded().expect("embedded seed");
    assert_eq!(seed.min_rows, 25);
    assert_eq!(seed.header_rows, 2);
    assert_eq!(seed.columns.len(), 9);
    assert_eq!(seed.column_index("Priority"), Some(6));
    assert_eq!(seed.tabs.len(), 4);
    assert!(seed
        .header_groups
        .iter()
        .all(|group| group.columns.iter().all(|c| seed.column_index(c).is_some())));
}

#[test]
fn test_parse_applies_defaults() {
    let seed = SeedConfig::parse(SMALL_SEED).expect("valid seed");
    assert_eq!(seed.header_rows, 1);
    assert_eq!(seed.columns[0].kind, CellKind::Text);
    assert_eq!(seed.columns[2].kind, CellKind::Number);
    assert_eq!(seed.column_names(), vec!["Task", "State", "Hours"]);

    let rows = &seed.tabs[0].rows;
    assert_eq!(rows[0][2], CellValue::Number(3.0));
    assert_eq!(rows[1][1], CellValue::Empty);
}

#[test]
fn test_unknown_group_column_is_rejected() {
    let source = r#"{
        "columns": [{ "name": "Task" }],
        "header_groups": [{ "label": "Work", "columns": ["Task", "Owner"] }]
    }"#;
    match SeedConfig::parse(source) {
        Err(SeedError::UnknownGroupColumn { group, column }) => {
            assert_eq!(group, "Work");
            assert_eq!(column, "Owner");
        }
        other => panic!("expected unknown column error, got {other:?}"),
    }
}

#[test]
fn test_malformed_json_is_parse_error() {
    assert!(matches!(SeedConfig::parse("{ not json"), Err(SeedError::Parse(_))));
}

#[test]
fn test_load_from_file() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("seed.json");
    fs::write(&path, SMALL_SEED).expect("write seed");

    let seed = SeedConfig::load(&path).expect("load seed");
    assert_eq!(seed.tabs[0].name, "To Do");
    assert_eq!(seed.min_rows, 4);
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = tempdir().expect("tempdir");
    let result = SeedConfig::load(&dir.path().join("missing.json"));
    assert!(matches!(result, Err(SeedError::Io(_))));
}
