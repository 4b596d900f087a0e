use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS meetings (
            id UUID PRIMARY KEY,
            title TEXT NOT NULL,
            candidate_dates DATE[] NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT has_candidate_dates CHECK (cardinality(candidate_dates) > 0)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // One row per participant; position preserves submission order.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS votes (
            meeting_id UUID NOT NULL REFERENCES meetings(id) ON DELETE CASCADE,
            participant_name TEXT NOT NULL,
            slots JSONB NOT NULL DEFAULT '[]'::jsonb,
            submitted_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            position INTEGER NOT NULL,
            PRIMARY KEY (meeting_id, participant_name)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Widen columns created as VARCHAR(255) by older versions.
    sqlx::query(
        r#"
        ALTER TABLE meetings ALTER COLUMN title TYPE TEXT;
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        ALTER TABLE votes ALTER COLUMN participant_name TYPE TEXT;
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_votes_meeting_position ON votes(meeting_id, position);
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
