use laurel_core::{
    ConflictDeclaration, ConflictType, RubricDimension, RubricScores, ScoreDraft, SyncKind,
    SyncQueueEntry,
};

#[test]
fn score_draft_new_sets_defaults() {
    let draft = ScoreDraft::new("APP-001", RubricScores::default(), 1_700_000_000_000);

    assert_eq!(draft.application_id, "APP-001");
    assert_eq!(draft.scores, RubricScores::default());
    assert_eq!(draft.saved_at, 1_700_000_000_000);
    assert!(!draft.synced);
    assert!(draft.is_pending());
}

#[test]
fn mark_synced_flips_pending_state() {
    let mut draft = ScoreDraft::new("APP-001", RubricScores::default(), 1_700_000_000_000);

    draft.mark_synced();
    assert!(draft.synced);
    assert!(!draft.is_pending());
}

#[test]
fn score_draft_serialization_uses_expected_wire_fields() {
    let scores = RubricScores {
        innovation: 15,
        market_traction: 10,
        impact: 20,
        financial_health: 8,
        inclusion: 5,
        scalability: 7,
    };
    let draft = ScoreDraft::new("APP-042", scores, 1_700_000_360_000);

    let json = serde_json::to_value(&draft).unwrap();
    assert_eq!(json["applicationId"], "APP-042");
    assert_eq!(json["savedAt"], 1_700_000_360_000_i64);
    assert_eq!(json["synced"], false);
    assert_eq!(json["scores"]["innovation"], 15);
    assert_eq!(json["scores"]["marketTraction"], 10);
    assert_eq!(json["scores"]["impact"], 20);
    assert_eq!(json["scores"]["financialHealth"], 8);
    assert_eq!(json["scores"]["inclusion"], 5);
    assert_eq!(json["scores"]["scalability"], 7);

    let decoded: ScoreDraft = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, draft);
}

#[test]
fn conflict_declaration_serialization_uses_expected_wire_fields() {
    let declaration = ConflictDeclaration::new(
        true,
        Some(ConflictType::Business),
        "co-owned a venture with the applicant",
        1_700_000_000_000,
    );

    let json = serde_json::to_value(&declaration).unwrap();
    assert_eq!(json["hasConflict"], true);
    assert_eq!(json["conflictType"], "business");
    assert_eq!(json["details"], "co-owned a venture with the applicant");
    assert_eq!(json["declaredAt"], 1_700_000_000_000_i64);
    assert_eq!(json["synced"], false);

    let decoded: ConflictDeclaration = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, declaration);
}

#[test]
fn conflict_declaration_none_has_no_type() {
    let declaration = ConflictDeclaration::none(1_700_000_000_000);

    assert!(!declaration.has_conflict);
    assert_eq!(declaration.conflict_type, None);
    assert_eq!(declaration.details, "");

    let json = serde_json::to_value(&declaration).unwrap();
    assert_eq!(json["conflictType"], serde_json::Value::Null);
}

#[test]
fn sync_queue_entry_serialization_uses_expected_wire_fields() {
    let entry = SyncQueueEntry {
        kind: SyncKind::Score,
        ref_id: "APP-042".to_string(),
        queued_at: 1_700_000_000_000,
    };

    let json = serde_json::to_value(&entry).unwrap();
    assert_eq!(json["kind"], "score");
    assert_eq!(json["refId"], "APP-042");
    assert_eq!(json["queuedAt"], 1_700_000_000_000_i64);

    let decoded: SyncQueueEntry = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, entry);
}

#[test]
fn rubric_dimension_caps_match_published_rubric() {
    assert_eq!(RubricDimension::Innovation.max(), 20);
    assert_eq!(RubricDimension::MarketTraction.max(), 20);
    assert_eq!(RubricDimension::Impact.max(), 25);
    assert_eq!(RubricDimension::FinancialHealth.max(), 15);
    assert_eq!(RubricDimension::Inclusion.max(), 10);
    assert_eq!(RubricDimension::Scalability.max(), 10);
}

#[test]
fn rubric_total_sums_all_six_dimensions() {
    let scores = RubricScores {
        innovation: 15,
        market_traction: 10,
        impact: 20,
        financial_health: 8,
        inclusion: 5,
        scalability: 7,
    };

    assert_eq!(scores.total(), 65);
}
