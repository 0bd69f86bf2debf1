use super::*;

fn descriptor(version: u32, name: &str, has_up: bool, has_down: bool) -> MigrationDescriptor {
    MigrationDescriptor {
        version,
        name: name.to_string(),
        has_up,
        has_down,
    }
}

#[test]
fn test_parse_ignores_unrelated_entries() {
    let catalog = parse_filenames([
        "0002_second.up.sql",
        "ignored",
        "0001_first.down.sql",
        "0001_ignored.sql",
        "0002_second.down.sql",
        "9999_asfjkgsdhsl.up.txt",
        "README.md",
        "0001_first.up.sql",
    ])
    .unwrap();

    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.get(1), Some(&descriptor(1, "first", true, true)));
    assert_eq!(catalog.get(2), Some(&descriptor(2, "second", true, true)));
}

#[test]
fn test_parse_records_missing_down() {
    let catalog = parse_filenames(["0001_v1.up.sql", "0001_v1.down.sql", "0002_v2.up.sql"]).unwrap();
    assert_eq!(catalog.get(2), Some(&descriptor(2, "v2", true, false)));
}

#[test]
fn test_parse_down_only_version() {
    let catalog = parse_filenames(["0001_only_down.down.sql"]).unwrap();
    assert_eq!(
        catalog.get(1),
        Some(&descriptor(1, "only_down", false, true))
    );
}

#[test]
fn test_parse_name_keeps_underscores_and_dots() {
    let catalog = parse_filenames(["0007_add_index.v2.up.sql"]).unwrap();
    assert_eq!(catalog.get(7).unwrap().name, "add_index.v2");
}

#[test]
fn test_parse_empty_listing() {
    let catalog = parse_filenames(Vec::<String>::new()).unwrap();
    assert!(catalog.is_empty());
}

#[test]
fn test_name_mismatch_down_first() {
    let err = parse_filenames(["0001_name_b.down.sql", "0001_name_a.up.sql"]).unwrap_err();
    match err {
        MigrateError::NameMismatch {
            version,
            up_name,
            down_name,
        } => {
            assert_eq!(version, 1);
            assert_eq!(up_name, "name_a");
            assert_eq!(down_name, "name_b");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_name_mismatch_up_first() {
    let err = parse_filenames(["0001_name_a.up.sql", "0001_name_b.down.sql"]).unwrap_err();
    match err {
        MigrateError::NameMismatch {
            up_name, down_name, ..
        } => {
            assert_eq!(up_name, "name_a");
            assert_eq!(down_name, "name_b");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_duplicate_direction_is_tolerated() {
    let catalog =
        parse_filenames(["0001_first.up.sql", "0001_first.up.sql", "0001_first.down.sql"]).unwrap();
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.get(1), Some(&descriptor(1, "first", true, true)));
}

#[test]
fn test_unparsable_version() {
    let err = parse_filenames(["abcd_first.up.sql"]).unwrap_err();
    match err {
        MigrateError::BadFilename { filename, expected } => {
            assert_eq!(filename, "abcd_first.up.sql");
            assert_eq!(expected, "0001_name.up.sql");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_signed_version_rejected() {
    assert!(matches!(
        parse_filenames(["+001_first.up.sql"]),
        Err(MigrateError::BadFilename { .. })
    ));
    assert!(matches!(
        parse_filenames(["-001_first.up.sql"]),
        Err(MigrateError::BadFilename { .. })
    ));
}

#[test]
fn test_missing_separator() {
    let err = parse_filenames(["0001.up.sql"]).unwrap_err();
    assert!(matches!(err, MigrateError::BadFilename { .. }));
}

#[test]
fn test_not_enough_zeroes_suggests_canonical_name() {
    let err = parse_filenames(["01_notEnoughZeroes.up.sql"]).unwrap_err();
    match err {
        MigrateError::BadFilename { filename, expected } => {
            assert_eq!(filename, "01_notEnoughZeroes.up.sql");
            assert_eq!(expected, "0001_notEnoughZeroes.up.sql");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_parse_filename_single() {
    assert_eq!(
        parse_filename("0012_users.down.sql").unwrap(),
        Some((12, "users".to_string(), Direction::Down))
    );
    assert_eq!(parse_filename("notes.txt").unwrap(), None);
}
