use laurel_core::db::open_db_in_memory;
use laurel_core::{
    ConflictDeclaration, ConflictType, ConnectivityProbe, OfflineRepository, RubricScores,
    ScoreDraft, SqliteOfflineRepository, SyncTransport, Synchronizer, TransportError,
    TransportResult,
};
use std::cell::RefCell;
use std::collections::HashSet;

struct FixedProbe {
    online: bool,
}

impl ConnectivityProbe for FixedProbe {
    fn is_online(&self) -> bool {
        self.online
    }
}

/// Transport that fails the configured application ids and counts calls.
struct ScriptedTransport {
    failing_scores: HashSet<String>,
    fail_conflict: bool,
    score_calls: RefCell<Vec<String>>,
    conflict_calls: RefCell<u32>,
}

impl ScriptedTransport {
    fn accepting_all() -> Self {
        Self {
            failing_scores: HashSet::new(),
            fail_conflict: false,
            score_calls: RefCell::new(Vec::new()),
            conflict_calls: RefCell::new(0),
        }
    }

    fn failing(ids: &[&str], fail_conflict: bool) -> Self {
        Self {
            failing_scores: ids.iter().map(|id| id.to_string()).collect(),
            fail_conflict,
            score_calls: RefCell::new(Vec::new()),
            conflict_calls: RefCell::new(0),
        }
    }

    fn total_calls(&self) -> usize {
        self.score_calls.borrow().len() + *self.conflict_calls.borrow() as usize
    }
}

impl SyncTransport for ScriptedTransport {
    fn transport_id(&self) -> &str {
        "scripted"
    }

    fn push_score(&self, draft: &ScoreDraft) -> TransportResult<()> {
        self.score_calls
            .borrow_mut()
            .push(draft.application_id.clone());
        if self.failing_scores.contains(&draft.application_id) {
            return Err(TransportError::new(
                "http_502",
                "award service unavailable",
                true,
            ));
        }
        Ok(())
    }

    fn push_conflict(&self, _declaration: &ConflictDeclaration) -> TransportResult<()> {
        *self.conflict_calls.borrow_mut() += 1;
        if self.fail_conflict {
            return Err(TransportError::new(
                "rejected",
                "declaration rejected by service",
                false,
            ));
        }
        Ok(())
    }
}

fn sample_scores() -> RubricScores {
    RubricScores {
        innovation: 15,
        market_traction: 10,
        impact: 20,
        financial_health: 8,
        inclusion: 5,
        scalability: 7,
    }
}

#[test]
fn attempt_sync_while_offline_reports_error_and_leaves_queue_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteOfflineRepository::try_new(&conn).unwrap();
    repo.save_score_draft("APP-001", sample_scores()).unwrap();

    let probe = FixedProbe { online: false };
    let transport = ScriptedTransport::accepting_all();
    let report = Synchronizer::new(&probe, &transport).attempt_sync(&repo);

    assert!(!report.success);
    assert_eq!(report.synced_items, 0);
    assert_eq!(report.failed_items, 0);
    assert!(!report.errors.is_empty());
    assert_eq!(transport.total_calls(), 0);
    assert_eq!(repo.pending_entries().unwrap().len(), 1);
    assert!(!repo.get_score_draft("APP-001").unwrap().unwrap().synced);
}

#[test]
fn attempt_sync_flushes_all_queued_entries_on_success() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteOfflineRepository::try_new(&conn).unwrap();
    repo.save_score_draft("APP-001", sample_scores()).unwrap();
    repo.save_conflict_declaration(&ConflictDeclaration::new(
        true,
        Some(ConflictType::Financial),
        "holds shares",
        1_700_000_000_000,
    ))
    .unwrap();

    let probe = FixedProbe { online: true };
    let transport = ScriptedTransport::accepting_all();
    let report = Synchronizer::new(&probe, &transport).attempt_sync(&repo);

    assert!(report.success);
    assert_eq!(report.synced_items, 2);
    assert_eq!(report.failed_items, 0);
    assert!(report.errors.is_empty());
    assert!(repo.pending_entries().unwrap().is_empty());
    assert!(repo.get_score_draft("APP-001").unwrap().unwrap().synced);
    assert!(repo.get_conflict_declaration().unwrap().unwrap().synced);
}

#[test]
fn partial_failure_keeps_failed_entry_queued_and_reports_both_outcomes() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteOfflineRepository::try_new(&conn).unwrap();
    repo.save_score_draft("APP-001", sample_scores()).unwrap();
    repo.save_score_draft("APP-002", sample_scores()).unwrap();

    let probe = FixedProbe { online: true };
    let transport = ScriptedTransport::failing(&["APP-001"], false);
    let report = Synchronizer::new(&probe, &transport).attempt_sync(&repo);

    assert!(!report.success);
    assert_eq!(report.synced_items, 1);
    assert_eq!(report.failed_items, 1);
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].contains("APP-001"));

    let pending = repo.pending_entries().unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].ref_id, "APP-001");
    assert!(!repo.get_score_draft("APP-001").unwrap().unwrap().synced);
    assert!(repo.get_score_draft("APP-002").unwrap().unwrap().synced);
}

#[test]
fn each_attempt_makes_one_remote_call_per_queued_entry() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteOfflineRepository::try_new(&conn).unwrap();
    repo.save_score_draft("APP-001", sample_scores()).unwrap();
    repo.save_score_draft("APP-002", sample_scores()).unwrap();

    let probe = FixedProbe { online: true };
    let transport = ScriptedTransport::failing(&["APP-001", "APP-002"], false);
    let synchronizer = Synchronizer::new(&probe, &transport);

    let first = synchronizer.attempt_sync(&repo);
    assert_eq!(first.failed_items, 2);
    assert_eq!(transport.total_calls(), 2);

    // Nothing synced, so a second manual attempt retries both entries.
    let second = synchronizer.attempt_sync(&repo);
    assert_eq!(second.failed_items, 2);
    assert_eq!(transport.total_calls(), 4);
}

#[test]
fn successive_attempts_get_distinct_attempt_ids() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteOfflineRepository::try_new(&conn).unwrap();

    let probe = FixedProbe { online: true };
    let transport = ScriptedTransport::accepting_all();
    let synchronizer = Synchronizer::new(&probe, &transport);

    let first = synchronizer.attempt_sync(&repo);
    let second = synchronizer.attempt_sync(&repo);
    assert_ne!(first.attempt_id, second.attempt_id);
}

#[test]
fn failed_conflict_push_keeps_declaration_queued() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteOfflineRepository::try_new(&conn).unwrap();
    repo.save_conflict_declaration(&ConflictDeclaration::none(1_700_000_000_000))
        .unwrap();

    let probe = FixedProbe { online: true };
    let transport = ScriptedTransport::failing(&[], true);
    let report = Synchronizer::new(&probe, &transport).attempt_sync(&repo);

    assert!(!report.success);
    assert_eq!(report.synced_items, 0);
    assert_eq!(report.failed_items, 1);
    assert!(report.errors[0].contains("conflict declaration"));
    assert_eq!(repo.pending_entries().unwrap().len(), 1);
    assert!(!repo.get_conflict_declaration().unwrap().unwrap().synced);
}

#[test]
fn queued_entry_without_local_payload_is_reported_and_left_queued() {
    let conn = open_db_in_memory().unwrap();

    // A queue blob referencing a draft that was never written locally.
    conn.execute(
        "INSERT INTO offline_blobs (key, value, updated_at) VALUES ('sync_queue', ?1, 1);",
        [r#"[{"kind":"score","refId":"APP-GHOST","queuedAt":1}]"#],
    )
    .unwrap();
    let repo = SqliteOfflineRepository::try_new(&conn).unwrap();

    let probe = FixedProbe { online: true };
    let transport = ScriptedTransport::accepting_all();
    let report = Synchronizer::new(&probe, &transport).attempt_sync(&repo);

    assert!(!report.success);
    assert_eq!(report.synced_items, 0);
    assert_eq!(report.failed_items, 1);
    assert!(report.errors[0].contains("no local draft"));
    assert_eq!(transport.total_calls(), 0);
    assert_eq!(repo.pending_entries().unwrap().len(), 1);
}
