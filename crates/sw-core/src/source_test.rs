use super::*;

#[test]
fn test_dir_source_lists_files_only() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("0001_first.up.sql"), "SELECT 1;").unwrap();
    fs::write(dir.path().join("notes.txt"), "").unwrap();
    fs::create_dir(dir.path().join("0002_dir.up.sql")).unwrap();

    let source = DirSource::new(dir.path());
    let mut names = source.list_entries().unwrap();
    names.sort();
    assert_eq!(names, vec!["0001_first.up.sql", "notes.txt"]);
}

#[test]
fn test_dir_source_missing_dir_lists_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let source = DirSource::new(dir.path().join("absent"));
    assert!(source.list_entries().unwrap().is_empty());
}

#[test]
fn test_dir_source_path_is_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("migrations");
    fs::write(&file, "").unwrap();

    let source = DirSource::new(&file);
    assert!(matches!(
        source.list_entries(),
        Err(MigrateError::BadSourcePath { .. })
    ));
    assert!(matches!(
        source.ensure_location(),
        Err(MigrateError::BadSourcePath { .. })
    ));
}

#[test]
fn test_dir_source_read_script() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("0001_first.up.sql"), "CREATE TABLE t (id INT);").unwrap();

    let source = DirSource::new(dir.path());
    assert_eq!(
        source.read_script("0001_first.up.sql").unwrap(),
        "CREATE TABLE t (id INT);"
    );
    assert!(matches!(
        source.read_script("0002_missing.up.sql"),
        Err(MigrateError::Io { .. })
    ));
}

#[test]
fn test_dir_source_ensure_location_creates_dir() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("db").join("migrations");

    let source = DirSource::new(&target);
    source.ensure_location().unwrap();
    assert!(target.is_dir());
    // second call is a no-op
    source.ensure_location().unwrap();
}

#[test]
fn test_dir_source_create_script() {
    let dir = tempfile::tempdir().unwrap();
    let source = DirSource::new(dir.path());

    let path = source.create_script(3, "add_users", Direction::Down).unwrap();
    assert_eq!(path, dir.path().join("0003_add_users.down.sql"));
    assert_eq!(fs::read_to_string(&path).unwrap(), "");

    // refuses to clobber an existing script
    assert!(source.create_script(3, "add_users", Direction::Down).is_err());
}

#[test]
fn test_static_source() {
    let source = StaticSource::new([
        ("0001_first.up.sql", "CREATE TABLE a (id INT);"),
        ("0001_first.down.sql", "DROP TABLE a;"),
    ]);
    assert_eq!(source.list_entries().unwrap().len(), 2);
    assert_eq!(
        source.read_script("0001_first.down.sql").unwrap(),
        "DROP TABLE a;"
    );
    assert!(source.read_script("0002_other.up.sql").is_err());
}
