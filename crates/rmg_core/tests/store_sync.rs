use pretty_assertions::assert_eq;

use rmg_core::domain::{
    AuthUser, Category, Incident, IncidentId, OwnerRef, Principal, Priority, Status,
};
use rmg_core::error::{codes, AppError};
use rmg_core::repo::memory::MemoryRepository;
use rmg_core::store::IncidentListStore;

fn principal() -> Principal {
    Principal::from_auth(AuthUser {
        id: Some(7),
        username: Some("avery".to_string()),
    })
    .expect("identity is complete")
}

fn incident(incident_id: &str, owner: i64, status: Status) -> Incident {
    Incident {
        id: None,
        incident_id: IncidentId::new(incident_id),
        reporter_name: "avery".to_string(),
        category: Category::Enterprise,
        details: "fiber cut".to_string(),
        priority: Priority::Low,
        status,
        reported_at: Some("2026-03-01T08:00:00Z".to_string()),
        owner: Some(OwnerRef { id: owner }),
    }
}

#[test]
fn load_all_replaces_the_working_copy() {
    let repo = MemoryRepository::new();
    repo.seed(vec![
        incident("RMG111112026", 7, Status::Open),
        incident("RMG222222026", 7, Status::Closed),
        incident("RMG999992026", 8, Status::Open),
    ]);

    let mut store = IncidentListStore::new();
    store.load_all(&repo, &principal()).expect("load");
    assert_eq!(store.incidents().len(), 2);

    repo.seed(vec![incident("RMG333332026", 7, Status::Open)]);
    store.load_all(&repo, &principal()).expect("reload");
    assert_eq!(store.incidents().len(), 3);
}

#[test]
fn delete_is_allowed_regardless_of_status() {
    let repo = MemoryRepository::new();
    repo.seed(vec![incident("RMG222222026", 7, Status::Closed)]);

    let mut store = IncidentListStore::new();
    store.load_all(&repo, &principal()).expect("load");

    let target = IncidentId::new("RMG222222026");
    store.delete(&repo, &target).expect("closed incidents can be deleted");
    assert!(store.incidents().is_empty());

    // A fresh fetch never reproduces the deleted record.
    store.load_all(&repo, &principal()).expect("reload");
    assert!(store.incidents().is_empty());
}

#[test]
fn a_failed_delete_leaves_the_sequence() {
    let repo = MemoryRepository::new();
    repo.seed(vec![incident("RMG111112026", 7, Status::Open)]);

    let mut store = IncidentListStore::new();
    store.load_all(&repo, &principal()).expect("load");
    let before = store.incidents().to_vec();

    repo.fail_next(AppError::new(codes::REMOTE_UNAVAILABLE, "connection refused").with_retryable(true));
    let err = store
        .delete(&repo, &IncidentId::new("RMG111112026"))
        .unwrap_err();
    assert!(err.is(codes::REMOTE_UNAVAILABLE));
    assert_eq!(store.incidents(), before.as_slice());
}

#[test]
fn deleting_a_missing_incident_reports_not_found() {
    let repo = MemoryRepository::new();
    repo.seed(vec![incident("RMG111112026", 7, Status::Open)]);

    let mut store = IncidentListStore::new();
    store.load_all(&repo, &principal()).expect("load");

    let err = store
        .delete(&repo, &IncidentId::new("RMG000002026"))
        .unwrap_err();
    assert!(err.is(codes::NOT_FOUND));
    assert_eq!(store.incidents().len(), 1);
}

#[test]
fn update_replaces_the_matching_entry_and_stamps_the_owner() {
    let repo = MemoryRepository::new();
    repo.seed(vec![
        incident("RMG111112026", 7, Status::Open),
        incident("RMG222222026", 7, Status::Open),
    ]);

    let mut store = IncidentListStore::new();
    store.load_all(&repo, &principal()).expect("load");

    let mut record = store.incidents()[0].clone();
    record.details = "rerouted traffic".to_string();
    record.priority = Priority::Medium;
    record.owner = None; // the store stamps the owner reference itself

    let updated = store.update(&repo, &record, &principal()).expect("update");
    assert_eq!(updated.owner, Some(OwnerRef { id: 7 }));
    assert_eq!(store.incidents()[0].details, "rerouted traffic");
    assert_eq!(store.incidents()[0].priority, Priority::Medium);
    assert_eq!(store.incidents()[1].details, "fiber cut");
}

#[test]
fn a_failed_update_leaves_the_sequence() {
    let repo = MemoryRepository::new();
    repo.seed(vec![incident("RMG111112026", 7, Status::Open)]);

    let mut store = IncidentListStore::new();
    store.load_all(&repo, &principal()).expect("load");
    let before = store.incidents().to_vec();

    let mut record = before[0].clone();
    record.details = "never lands".to_string();

    repo.fail_next(AppError::new(codes::REMOTE_UNAVAILABLE, "connection refused").with_retryable(true));
    let err = store.update(&repo, &record, &principal()).unwrap_err();
    assert!(err.is(codes::REMOTE_UNAVAILABLE));
    assert_eq!(store.incidents(), before.as_slice());
}

#[test]
fn update_without_a_server_id_is_rejected_locally() {
    let repo = MemoryRepository::new();
    let mut store = IncidentListStore::new();
    store.load_all(&repo, &principal()).expect("load");
    let calls_before = repo.call_count();

    let record = incident("RMG111112026", 7, Status::Open); // id: None
    let err = store.update(&repo, &record, &principal()).unwrap_err();
    assert!(err.is(codes::VALIDATION_FAILED));
    assert_eq!(repo.call_count(), calls_before);
}
