use crate::models::DbVote;
use eyre::Result;
use sqlx::{types::Json, Executor, Postgres};
use uuid::Uuid;
use whenmeet_core::models::{TimeSlot, Vote};

pub async fn insert_vote<'e, E>(
    executor: E,
    meeting_id: Uuid,
    vote: &Vote,
    position: i32,
) -> Result<()>
where
    E: Executor<'e, Database = Postgres>,
{
    let slots: Vec<TimeSlot> = vote.slots.as_slice().to_vec();

    sqlx::query(
        r#"
        INSERT INTO votes (meeting_id, participant_name, slots, submitted_at, position)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(meeting_id)
    .bind(&vote.participant_name)
    .bind(Json(slots))
    .bind(vote.submitted_at)
    .bind(position)
    .execute(executor)
    .await?;

    Ok(())
}

/// Writes one participant's vote and moves it to the end of the submission
/// order. Other rows of the meeting are not touched.
pub async fn upsert_vote<'e, E>(executor: E, meeting_id: Uuid, vote: &Vote) -> Result<()>
where
    E: Executor<'e, Database = Postgres>,
{
    let slots: Vec<TimeSlot> = vote.slots.as_slice().to_vec();

    sqlx::query(
        r#"
        INSERT INTO votes (meeting_id, participant_name, slots, submitted_at, position)
        VALUES (
            $1, $2, $3, $4,
            (SELECT COALESCE(MAX(position) + 1, 0) FROM votes WHERE meeting_id = $1)
        )
        ON CONFLICT (meeting_id, participant_name) DO UPDATE
        SET slots = EXCLUDED.slots,
            submitted_at = EXCLUDED.submitted_at,
            position = EXCLUDED.position
        "#,
    )
    .bind(meeting_id)
    .bind(&vote.participant_name)
    .bind(Json(slots))
    .bind(vote.submitted_at)
    .execute(executor)
    .await?;

    Ok(())
}

pub async fn get_votes_by_meeting_id<'e, E>(executor: E, meeting_id: Uuid) -> Result<Vec<DbVote>>
where
    E: Executor<'e, Database = Postgres>,
{
    let votes = sqlx::query_as::<_, DbVote>(
        r#"
        SELECT meeting_id, participant_name, slots, submitted_at, position
        FROM votes
        WHERE meeting_id = $1
        ORDER BY position ASC
        "#,
    )
    .bind(meeting_id)
    .fetch_all(executor)
    .await?;

    Ok(votes)
}

pub async fn delete_votes_by_meeting_id<'e, E>(executor: E, meeting_id: Uuid) -> Result<()>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query(
        r#"
        DELETE FROM votes
        WHERE meeting_id = $1
        "#,
    )
    .bind(meeting_id)
    .execute(executor)
    .await?;

    Ok(())
}
