/// Inline SQL migrations for the option store schema.
///
/// We use simple inline migrations rather than sqlx migration files
/// because the schema is small and self-contained.

pub const MIGRATIONS: &[&str] = &[
    // Migration 1: options table
    r#"
CREATE TABLE IF NOT EXISTS options (
    option_name TEXT PRIMARY KEY,
    option_value BLOB NOT NULL DEFAULT x'',
    autoload INTEGER NOT NULL DEFAULT 1
);
"#,
    // Migration 2: autoload lookups
    r#"
CREATE INDEX IF NOT EXISTS idx_options_autoload ON options(autoload);
"#,
];
