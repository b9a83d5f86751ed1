use sqlx::PgPool;

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS contributions (
    id                   UUID PRIMARY KEY,
    publication_type     TEXT NOT NULL,
    conference_sub_type  TEXT,
    status               TEXT NOT NULL DEFAULT 'draft',
    indexing_categories  JSONB NOT NULL DEFAULT '[]'::jsonb,
    fields               JSONB NOT NULL DEFAULT '{}'::jsonb
);

CREATE TABLE IF NOT EXISTS suggestions (
    id               UUID PRIMARY KEY,
    contribution_id  UUID NOT NULL REFERENCES contributions(id),
    field_name       TEXT NOT NULL,
    original_value   TEXT NOT NULL DEFAULT '',
    suggested_value  TEXT NOT NULL DEFAULT '',
    suggestion_note  TEXT,
    reviewer_id      UUID NOT NULL,
    status           TEXT NOT NULL DEFAULT 'pending'
);

CREATE INDEX IF NOT EXISTS idx_suggestions_contribution
    ON suggestions (contribution_id, status);

-- At most one open suggestion per field of a contribution; resolved
-- rows stay behind as the audit trail and do not count.
CREATE UNIQUE INDEX IF NOT EXISTS uniq_suggestions_pending_field
    ON suggestions (contribution_id, field_name)
    WHERE status = 'pending';
"#;

/// Applies the schema in a single transaction. Idempotent; safe to run on
/// every startup.
pub async fn init_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    sqlx::raw_sql(SCHEMA_SQL).execute(&mut *tx).await?;
    tx.commit().await?;
    Ok(())
}
