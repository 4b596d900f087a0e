use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use tempfile::TempDir;
use uuid::Uuid;
use whenmeet_cli::{commands::Command, handlers::execute};
use whenmeet_core::{
    errors::PollError,
    find_vote,
    models::{Meeting, TimeSlot},
    service,
    store::MeetingStore,
};
use whenmeet_db::FileMeetingStore;

fn date(d: &str) -> NaiveDate {
    d.parse().unwrap()
}

fn slot(d: &str, hour: u8) -> TimeSlot {
    TimeSlot::new(date(d), hour).unwrap()
}

async fn setup() -> (TempDir, FileMeetingStore, Meeting) {
    let dir = TempDir::new().unwrap();
    let store = FileMeetingStore::new(dir.path().join("store.json"));
    let meeting = store
        .create("Team lunch", &[date("2024-03-01"), date("2024-03-02")])
        .await
        .unwrap();
    (dir, store, meeting)
}

fn poll_error(err: &eyre::Report) -> &PollError {
    err.downcast_ref::<PollError>()
        .unwrap_or_else(|| panic!("expected a PollError, got {err:?}"))
}

#[tokio::test]
async fn test_create_prints_id() {
    let dir = TempDir::new().unwrap();
    let store = FileMeetingStore::new(dir.path().join("store.json"));

    let output = execute(
        Command::Create {
            title: "Offsite".to_string(),
            dates: vec![date("2024-05-01")],
        },
        &store,
        false,
    )
    .await
    .unwrap();

    let id: Uuid = output
        .lines()
        .find_map(|line| line.strip_prefix("id: "))
        .unwrap()
        .parse()
        .unwrap();
    let meeting = store.fetch(id).await.unwrap().unwrap();
    assert_eq!(meeting.title, "Offsite");
}

#[tokio::test]
async fn test_vote_remembers_identity() {
    let (_dir, store, meeting) = setup().await;

    execute(
        Command::Vote {
            id: meeting.id,
            name: Some("  Ana ".to_string()),
            slots: vec![slot("2024-03-01", 9)],
        },
        &store,
        false,
    )
    .await
    .unwrap();

    assert_eq!(store.recall_identity().await.unwrap().as_deref(), Some("Ana"));
    let whoami = execute(Command::Whoami, &store, false).await.unwrap();
    assert_eq!(whoami, "Ana");
}

#[tokio::test]
async fn test_vote_without_name_or_identity_fails() {
    let (_dir, store, meeting) = setup().await;

    let err = execute(
        Command::Vote {
            id: meeting.id,
            name: None,
            slots: vec![slot("2024-03-01", 9)],
        },
        &store,
        false,
    )
    .await
    .unwrap_err();

    assert!(matches!(poll_error(&err), PollError::InvalidParticipant(_)));
    let stored = service::load_meeting(&store, meeting.id).await.unwrap();
    assert!(stored.votes().is_empty());
}

#[tokio::test]
async fn test_toggle_flips_existing_vote() {
    let (_dir, store, meeting) = setup().await;
    service::cast_vote(
        &store,
        meeting.id,
        "Ana",
        vec![slot("2024-03-01", 9), slot("2024-03-01", 10)],
    )
    .await
    .unwrap();

    // Name falls back to the remembered identity.
    execute(
        Command::Toggle {
            id: meeting.id,
            name: None,
            slots: vec![slot("2024-03-01", 10), slot("2024-03-02", 14)],
        },
        &store,
        false,
    )
    .await
    .unwrap();

    let stored = service::load_meeting(&store, meeting.id).await.unwrap();
    let vote = find_vote(&stored, "Ana").unwrap();
    assert_eq!(stored.votes().len(), 1);
    assert!(vote.covers(&slot("2024-03-01", 9)));
    assert!(!vote.covers(&slot("2024-03-01", 10)));
    assert!(vote.covers(&slot("2024-03-02", 14)));
}

#[tokio::test]
async fn test_toggle_twice_restores_selection() {
    let (_dir, store, meeting) = setup().await;
    let toggle = || Command::Toggle {
        id: meeting.id,
        name: Some("Ben".to_string()),
        slots: vec![slot("2024-03-02", 11)],
    };

    execute(toggle(), &store, false).await.unwrap();
    execute(toggle(), &store, false).await.unwrap();

    let stored = service::load_meeting(&store, meeting.id).await.unwrap();
    let vote = find_vote(&stored, "Ben").unwrap();
    assert!(vote.slots.is_empty());
}

#[tokio::test]
async fn test_show_marks_own_cells() {
    let (_dir, store, meeting) = setup().await;
    service::cast_vote(&store, meeting.id, "Ana", vec![slot("2024-03-01", 9)])
        .await
        .unwrap();
    service::record_vote(&store, meeting.id, "Ben", vec![slot("2024-03-01", 9)])
        .await
        .unwrap();

    let output = execute(
        Command::Show {
            id: meeting.id,
            name: None,
            from_hour: 9,
            to_hour: 10,
        },
        &store,
        false,
    )
    .await
    .unwrap();

    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines[0], "Team lunch");
    assert!(lines[1].contains("Ana"));
    assert!(lines.iter().any(|l| l.starts_with("09:00") && l.contains("2*")));
    assert!(lines.iter().any(|l| l.starts_with("10:00") && !l.contains('*')));
    assert_eq!(*lines.last().unwrap(), "Responded (2): Ana, Ben");
}

#[tokio::test]
async fn test_show_rejects_bad_hour_range() {
    let (_dir, store, meeting) = setup().await;

    let err = execute(
        Command::Show {
            id: meeting.id,
            name: None,
            from_hour: 12,
            to_hour: 9,
        },
        &store,
        false,
    )
    .await
    .unwrap_err();

    assert!(matches!(poll_error(&err), PollError::Validation(_)));
}

#[tokio::test]
async fn test_top_json() {
    let (_dir, store, meeting) = setup().await;
    for (name, hour) in [("Ana", 9), ("Ben", 9), ("Cy", 15)] {
        service::record_vote(&store, meeting.id, name, vec![slot("2024-03-01", hour)])
            .await
            .unwrap();
    }

    let output = execute(Command::Top { id: meeting.id, count: 1 }, &store, true)
        .await
        .unwrap();

    let ranked: serde_json::Value = serde_json::from_str(&output).unwrap();
    let ranked = ranked.as_array().unwrap();
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0]["count"], 2);
}

#[tokio::test]
async fn test_unknown_meeting() {
    let dir = TempDir::new().unwrap();
    let store = FileMeetingStore::new(dir.path().join("store.json"));
    let id = Uuid::new_v4();

    let err = execute(Command::Top { id, count: 3 }, &store, false)
        .await
        .unwrap_err();

    assert!(matches!(poll_error(&err), PollError::MeetingNotFound(missing) if *missing == id));
}
