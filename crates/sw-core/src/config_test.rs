use super::*;

#[test]
fn test_parse_empty_config_uses_defaults() {
    let config: Config = serde_yaml::from_str("{}").unwrap();
    assert_eq!(config.migrations_dir, "migrations");
    assert_eq!(config.database.path, "stepwise.duckdb");
    assert_eq!(config.ledger.table, "migration_version");
    assert_eq!(config.ledger.schema, None);
    assert_eq!(config.ledger.param_style, ParamStyle::QuestionMark);
    assert!(config.transactions);
}

#[test]
fn test_parse_full_config() {
    let yaml = r#"
migrations_dir: db/migrations
database:
  path: ./app.duckdb
ledger:
  table: schema_migrations
  schema: ops
  param_style: dollar_sign
transactions: false
"#;
    let config: Config = serde_yaml::from_str(yaml).unwrap();
    config.validate().unwrap();
    assert_eq!(config.migrations_dir, "db/migrations");
    assert_eq!(config.database.path, "./app.duckdb");
    assert_eq!(config.ledger.table, "schema_migrations");
    assert_eq!(config.ledger.schema.as_deref(), Some("ops"));
    assert_eq!(config.ledger.param_style, ParamStyle::DollarSign);
    assert!(!config.transactions);
}

#[test]
fn test_unknown_field_rejected() {
    let result: Result<Config, _> = serde_yaml::from_str("migration_dir: typo");
    assert!(result.is_err());
}

#[test]
fn test_validate_empty_table() {
    let config: Config = serde_yaml::from_str("ledger:\n  table: \"\"").unwrap();
    assert!(matches!(
        config.validate(),
        Err(MigrateError::ConfigInvalid { .. })
    ));
}

#[test]
fn test_load_from_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("stepwise.yaml"), "migrations_dir: sql\n").unwrap();

    let config = Config::load_from_dir(dir.path()).unwrap();
    assert_eq!(config.migrations_dir, "sql");
    assert_eq!(
        config.migrations_dir_absolute(dir.path()),
        dir.path().join("sql")
    );
}

#[test]
fn test_load_from_dir_missing() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        Config::load_from_dir(dir.path()),
        Err(MigrateError::ConfigNotFound { .. })
    ));
    let config = Config::load_from_dir_or_default(dir.path()).unwrap();
    assert_eq!(config.migrations_dir, "migrations");
}

#[test]
fn test_load_invalid_yaml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stepwise.yml");
    std::fs::write(&path, "transactions: [not, a, bool]").unwrap();
    assert!(matches!(
        Config::load(&path),
        Err(MigrateError::ConfigParse(_))
    ));
}
