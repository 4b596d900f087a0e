use chrono::{NaiveDate, Utc};
use pretty_assertions::assert_eq;
use tempfile::TempDir;
use uuid::Uuid;
use whenmeet_core::{
    aggregate::slot_vote_count,
    errors::PollError,
    models::TimeSlot,
    reconcile::{find_vote, new_vote, submit_vote},
    store::MeetingStore,
};
use whenmeet_db::{FileMeetingStore, MemoryMeetingStore};

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn slot(d: &str, hour: u8) -> TimeSlot {
    TimeSlot::new(day(d), hour).unwrap()
}

/// Behaviour every backend must share.
async fn exercise_store(store: &dyn MeetingStore) {
    let created = store
        .create("Dinner", &[day("2024-06-02"), day("2024-06-01")])
        .await
        .expect("create should succeed");
    assert_eq!(created.candidate_dates, vec![day("2024-06-01"), day("2024-06-02")]);
    assert!(created.votes().is_empty());

    let fetched = store.fetch(created.id).await.unwrap().expect("meeting should exist");
    assert_eq!(fetched, created);

    let voted = submit_vote(&fetched, "Ana", vec![slot("2024-06-01", 18)]).unwrap();
    let voted = submit_vote(&voted, "Bob", vec![slot("2024-06-01", 18), slot("2024-06-02", 19)]).unwrap();
    store.persist(&voted).await.expect("persist should succeed");

    let reloaded = store.fetch(created.id).await.unwrap().unwrap();
    assert_eq!(reloaded, voted);
    assert_eq!(slot_vote_count(&reloaded, day("2024-06-01"), 18), 2);

    let revoted = submit_vote(&reloaded, "Ana", Vec::new()).unwrap();
    store.persist(&revoted).await.unwrap();
    let reloaded = store.fetch(created.id).await.unwrap().unwrap();
    assert_eq!(reloaded.votes().len(), 2);
    assert!(find_vote(&reloaded, "Ana").unwrap().slots.is_empty());

    assert!(store.fetch(Uuid::new_v4()).await.unwrap().is_none());

    // Applying one vote leaves everyone else's alone and moves the voter last.
    let vote = new_vote(" Ana ", vec![slot("2024-06-02", 19)], Utc::now()).unwrap();
    let applied = store.apply_vote(created.id, vote).await.unwrap();
    let names: Vec<&str> = applied
        .votes()
        .iter()
        .map(|v| v.participant_name.as_str())
        .collect();
    assert_eq!(names, vec!["Bob", "Ana"]);
    assert_eq!(store.fetch(created.id).await.unwrap().unwrap(), applied);

    let missing = Uuid::new_v4();
    let vote = new_vote("Ana", Vec::new(), Utc::now()).unwrap();
    let result = store.apply_vote(missing, vote).await;
    assert!(matches!(result, Err(PollError::MeetingNotFound(id)) if id == missing));

    // No backend imposes a length limit on titles or names.
    let long_title = "t".repeat(300);
    let long_name = "n".repeat(300);
    let roomy = store.create(&long_title, &[day("2024-06-01")]).await.unwrap();
    let vote = new_vote(&long_name, vec![slot("2024-06-01", 8)], Utc::now()).unwrap();
    let roomy = store.apply_vote(roomy.id, vote).await.unwrap();
    let reloaded = store.fetch(roomy.id).await.unwrap().unwrap();
    assert_eq!(reloaded.title, long_title);
    assert!(find_vote(&reloaded, &long_name).is_some());

    assert_eq!(store.recall_identity().await.unwrap(), None);
    store.remember_identity("Ana").await.unwrap();
    assert_eq!(store.recall_identity().await.unwrap(), Some("Ana".to_string()));
}

#[tokio::test]
async fn test_memory_store_contract() {
    let store = MemoryMeetingStore::new();
    exercise_store(&store).await;
    assert_eq!(store.len().await, 2);
}

#[tokio::test]
async fn test_file_store_contract() {
    let dir = TempDir::new().unwrap();
    let store = FileMeetingStore::new(dir.path().join("whenmeet.json"));
    exercise_store(&store).await;
}

#[rstest::rstest]
#[case("")]
#[case("   ")]
#[tokio::test]
async fn test_create_rejects_blank_title(#[case] title: &str) {
    let store = MemoryMeetingStore::new();
    let result = store.create(title, &[day("2024-06-01")]).await;

    assert!(matches!(result, Err(PollError::Validation(_))));
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_file_store_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("whenmeet.json");

    let id = {
        let store = FileMeetingStore::new(&path);
        let meeting = store.create("Dinner", &[day("2024-06-01")]).await.unwrap();
        let meeting = submit_vote(&meeting, "Ana", vec![slot("2024-06-01", 20)]).unwrap();
        store.persist(&meeting).await.unwrap();
        store.remember_identity("Ana").await.unwrap();
        meeting.id
    };

    let reopened = FileMeetingStore::new(&path);
    let meeting = reopened.fetch(id).await.unwrap().expect("meeting should survive");
    assert!(find_vote(&meeting, "Ana").is_some());
    assert_eq!(reopened.recall_identity().await.unwrap(), Some("Ana".to_string()));
    assert!(!path.with_extension("json.tmp").exists());
}

#[tokio::test]
async fn test_file_store_missing_file_is_empty() {
    let dir = TempDir::new().unwrap();
    let store = FileMeetingStore::new(dir.path().join("absent.json"));

    assert!(store.fetch(Uuid::new_v4()).await.unwrap().is_none());
    assert_eq!(store.recall_identity().await.unwrap(), None);
}

#[tokio::test]
async fn test_file_store_reports_corrupt_document() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("whenmeet.json");
    std::fs::write(&path, b"{ not json").unwrap();

    let store = FileMeetingStore::new(&path);
    let result = store.fetch(Uuid::new_v4()).await;
    assert!(matches!(result, Err(PollError::Store(_))));
}

#[tokio::test]
async fn test_file_store_persist_failure_keeps_previous_document() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("whenmeet.json");
    let store = FileMeetingStore::new(&path);
    let meeting = store.create("Dinner", &[day("2024-06-01")]).await.unwrap();
    let before = std::fs::read(&path).unwrap();

    // A directory squatting on the temp path makes the write fail.
    std::fs::create_dir(path.with_extension("json.tmp")).unwrap();
    let voted = submit_vote(&meeting, "Ana", vec![slot("2024-06-01", 18)]).unwrap();
    let result = store.persist(&voted).await;

    assert!(matches!(result, Err(PollError::StoreWriteFailure(_))));
    assert_eq!(std::fs::read(&path).unwrap(), before);
}

#[tokio::test]
async fn test_file_store_concurrent_votes_are_all_kept() {
    let dir = TempDir::new().unwrap();
    let store = FileMeetingStore::new(dir.path().join("whenmeet.json"));
    let meeting = store.create("Dinner", &[day("2024-06-01")]).await.unwrap();

    let vote = |name: &str| new_vote(name, vec![slot("2024-06-01", 18)], Utc::now()).unwrap();
    let (ana, bob, cy) = tokio::join!(
        store.apply_vote(meeting.id, vote("Ana")),
        store.apply_vote(meeting.id, vote("Bob")),
        store.apply_vote(meeting.id, vote("Cy")),
    );
    ana.unwrap();
    bob.unwrap();
    cy.unwrap();

    let stored = store.fetch(meeting.id).await.unwrap().unwrap();
    assert_eq!(stored.votes().len(), 3);
    assert_eq!(slot_vote_count(&stored, day("2024-06-01"), 18), 3);
}
