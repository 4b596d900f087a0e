use eyre::{Result, WrapErr};
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;
use whenmeet_core::{
    aggregate::{top_slots, AvailabilityGrid},
    errors::PollError,
    models::{time_slot::MAX_HOUR, Meeting, TimeSlot},
    reconcile::normalize_participant,
    selection::VotingSession,
    service,
    store::MeetingStore,
};

use crate::commands::Command;

pub mod render;

/// Runs one command against the store and returns what should be printed.
pub async fn execute(command: Command, store: &dyn MeetingStore, json: bool) -> Result<String> {
    debug!(?command, "Executing command");

    match command {
        Command::Create { title, dates } => {
            let meeting = store.create(&title, &dates).await?;
            info!(meeting_id = %meeting.id, "Meeting created");
            Ok(format!(
                "Created \"{}\" ({} candidate dates)\nid: {}",
                meeting.title,
                meeting.candidate_dates.len(),
                meeting.id
            ))
        }
        Command::Vote { id, name, slots } => {
            let name = resolve_name(store, name).await?;
            let meeting = service::cast_vote(store, id, &name, slots).await?;
            Ok(vote_summary(&meeting, &name))
        }
        Command::Toggle { id, name, slots } => handle_toggle(store, id, name, slots).await,
        Command::Show {
            id,
            name,
            from_hour,
            to_hour,
        } => {
            if from_hour > to_hour || to_hour > MAX_HOUR {
                return Err(PollError::Validation(format!(
                    "invalid hour range {from_hour}..={to_hour}"
                ))
                .into());
            }
            let meeting = service::load_meeting(store, id).await?;
            let viewer = match name {
                Some(name) => Some(name),
                None => store.recall_identity().await?,
            };
            let grid = AvailabilityGrid::build(&meeting, from_hour..=to_hour, viewer.as_deref());
            if json {
                return to_json(&grid);
            }
            let session = VotingSession::open(&meeting, viewer.as_deref());
            Ok(render::grid(&grid, session.mode(), viewer.as_deref()))
        }
        Command::Top { id, count } => {
            let meeting = service::load_meeting(store, id).await?;
            let ranked = top_slots(&meeting, count);
            if json {
                return to_json(&ranked);
            }
            Ok(render::ranking(&ranked, meeting.votes().len()))
        }
        Command::Whoami => Ok(match store.recall_identity().await? {
            Some(name) => name,
            None => "No identity remembered on this device".to_string(),
        }),
    }
}

/// Flips each given slot of the participant's current vote, then submits the
/// result as a full replacement.
async fn handle_toggle(
    store: &dyn MeetingStore,
    id: Uuid,
    name: Option<String>,
    slots: Vec<TimeSlot>,
) -> Result<String> {
    let name = resolve_name(store, name).await?;
    let meeting = service::load_meeting(store, id).await?;

    let mut session = VotingSession::open(&meeting, Some(&name));
    session.edit();
    for slot in &slots {
        session.toggle(slot.day(), slot.hour())?;
    }

    let submitted = session.submit(&meeting, &name)?;
    let vote = whenmeet_core::find_vote(&submitted, &name)
        .cloned()
        .ok_or_else(|| eyre::eyre!("vote for {} missing after submit", name.trim()))?;

    // Only this participant's vote is written back.
    let updated = service::store_vote(store, id, vote).await?;
    store.remember_identity(normalize_participant(&name)?).await?;

    Ok(vote_summary(&updated, &name))
}

/// An explicit name wins; otherwise fall back to the device identity.
async fn resolve_name(store: &dyn MeetingStore, name: Option<String>) -> Result<String> {
    if let Some(name) = name {
        return Ok(name);
    }
    store.recall_identity().await?.ok_or_else(|| {
        PollError::InvalidParticipant(
            "no --name given and no identity remembered on this device".to_string(),
        )
        .into()
    })
}

fn vote_summary(meeting: &Meeting, name: &str) -> String {
    let slots: Vec<String> = whenmeet_core::find_vote(meeting, name)
        .map(|vote| vote.slots.iter().map(ToString::to_string).collect())
        .unwrap_or_default();

    if slots.is_empty() {
        format!("Saved an empty vote for {} on \"{}\"", name.trim(), meeting.title)
    } else {
        format!(
            "Saved {} slot(s) for {} on \"{}\": {}",
            slots.len(),
            name.trim(),
            meeting.title,
            slots.join(", ")
        )
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).wrap_err("Failed to encode output")
}
