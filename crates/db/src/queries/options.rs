//! Option table seeding.

use crate::{Database, DbResult};

impl Database {
    /// Insert or replace an option. Used to load fixtures and snapshots into
    /// a local database before auditing it.
    pub async fn upsert_option(&self, name: &str, value: &[u8], autoload: bool) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO options (option_name, option_value, autoload)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(option_name) DO UPDATE SET
                option_value = excluded.option_value,
                autoload = excluded.autoload
            "#,
        )
        .bind(name)
        .bind(value)
        .bind(autoload)
        .execute(self.pool())
        .await?;
        Ok(())
    }
}
