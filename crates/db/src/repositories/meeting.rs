use crate::models::DbMeeting;
use eyre::Result;
use sqlx::{Executor, Postgres};
use uuid::Uuid;
use whenmeet_core::models::Meeting;

pub async fn insert_meeting<'e, E>(executor: E, meeting: &Meeting) -> Result<DbMeeting>
where
    E: Executor<'e, Database = Postgres>,
{
    tracing::debug!(
        "Creating meeting: id={}, title={}, dates={}",
        meeting.id,
        meeting.title,
        meeting.candidate_dates.len()
    );

    let row = sqlx::query_as::<_, DbMeeting>(
        r#"
        INSERT INTO meetings (id, title, candidate_dates, created_at)
        VALUES ($1, $2, $3, $4)
        RETURNING id, title, candidate_dates, created_at
        "#,
    )
    .bind(meeting.id)
    .bind(&meeting.title)
    .bind(&meeting.candidate_dates)
    .bind(meeting.created_at)
    .fetch_one(executor)
    .await?;

    Ok(row)
}

pub async fn get_meeting_by_id<'e, E>(executor: E, id: Uuid) -> Result<Option<DbMeeting>>
where
    E: Executor<'e, Database = Postgres>,
{
    tracing::debug!("Getting meeting by id: {}", id);

    let row = sqlx::query_as::<_, DbMeeting>(
        r#"
        SELECT id, title, candidate_dates, created_at
        FROM meetings
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    if row.is_none() {
        tracing::debug!("Meeting not found: id={}", id);
    }

    Ok(row)
}

/// Same as [`get_meeting_by_id`], but row-locks the meeting until the
/// surrounding transaction ends. Concurrent vote writers queue here.
pub async fn get_meeting_for_update<'e, E>(executor: E, id: Uuid) -> Result<Option<DbMeeting>>
where
    E: Executor<'e, Database = Postgres>,
{
    let row = sqlx::query_as::<_, DbMeeting>(
        r#"
        SELECT id, title, candidate_dates, created_at
        FROM meetings
        WHERE id = $1
        FOR UPDATE
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(row)
}

/// Inserts the meeting row, or overwrites title and dates when it exists.
pub async fn upsert_meeting<'e, E>(executor: E, meeting: &Meeting) -> Result<()>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query(
        r#"
        INSERT INTO meetings (id, title, candidate_dates, created_at)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (id) DO UPDATE
        SET title = EXCLUDED.title, candidate_dates = EXCLUDED.candidate_dates
        "#,
    )
    .bind(meeting.id)
    .bind(&meeting.title)
    .bind(&meeting.candidate_dates)
    .bind(meeting.created_at)
    .execute(executor)
    .await?;

    Ok(())
}
