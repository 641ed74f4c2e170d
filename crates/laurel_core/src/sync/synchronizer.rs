//! Opportunistic queue flushing against the remote award service.
//!
//! # Responsibility
//! - Push every currently-queued entry once per attempt when connectivity
//!   is present, marking items synced on acknowledged success.
//!
//! # Invariants
//! - A single attempt makes at most one remote call per queued entry.
//! - The batch never fails atomically; partial success is reported through
//!   counts and per-item errors.
//! - No retry or backoff here; callers decide when to attempt again.

use crate::repo::offline_repo::OfflineRepository;
use crate::sync::queue::SyncKind;
use crate::sync::transport::{ConnectivityProbe, SyncTransport};
use log::{info, warn};
use uuid::Uuid;

/// Outcome of one [`Synchronizer::attempt_sync`] call.
///
/// Sync failures are surfaced as data, never as an `Err`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// Identifier stamped into log events for this attempt.
    pub attempt_id: Uuid,
    /// True only when every attempted entry synced.
    pub success: bool,
    pub synced_items: u32,
    pub failed_items: u32,
    /// One message per failed entry, in queue order.
    pub errors: Vec<String>,
}

impl SyncReport {
    fn empty() -> Self {
        Self {
            attempt_id: Uuid::new_v4(),
            success: false,
            synced_items: 0,
            failed_items: 0,
            errors: Vec::new(),
        }
    }
}

/// Flushes the pending-sync queue through a transport behind a
/// connectivity probe.
pub struct Synchronizer<'a, P: ConnectivityProbe, T: SyncTransport> {
    probe: &'a P,
    transport: &'a T,
}

impl<'a, P: ConnectivityProbe, T: SyncTransport> Synchronizer<'a, P, T> {
    pub fn new(probe: &'a P, transport: &'a T) -> Self {
        Self { probe, transport }
    }

    /// Attempts to push every currently-queued entry to the remote service.
    ///
    /// Checks connectivity first; when absent, returns immediately without
    /// touching the queue. Otherwise iterates a snapshot of the queue
    /// (saves made during the attempt land in a later pass), performing one
    /// remote call per entry. Success marks the item synced, which also
    /// dequeues it; failure leaves the entry queued and records an error.
    pub fn attempt_sync<R: OfflineRepository>(&self, repo: &R) -> SyncReport {
        let mut report = SyncReport::empty();
        info!(
            "event=sync_attempt module=sync status=start attempt_id={} transport={}",
            report.attempt_id,
            self.transport.transport_id()
        );

        if !self.probe.is_online() {
            report
                .errors
                .push("no network connectivity; nothing was synced".to_string());
            warn!(
                "event=sync_attempt module=sync status=offline attempt_id={}",
                report.attempt_id
            );
            return report;
        }

        let snapshot = match repo.pending_entries() {
            Ok(entries) => entries,
            Err(err) => {
                report.errors.push(format!("pending queue unavailable: {err}"));
                return report;
            }
        };

        for entry in &snapshot {
            let outcome = match entry.kind {
                SyncKind::Score => self.push_one_score(repo, &entry.ref_id),
                SyncKind::Conflict => self.push_conflict(repo),
            };
            match outcome {
                Ok(()) => report.synced_items += 1,
                Err(message) => {
                    report.failed_items += 1;
                    report.errors.push(message);
                }
            }
        }

        report.success = report.errors.is_empty();
        info!(
            "event=sync_attempt module=sync status={} attempt_id={} synced={} failed={}",
            if report.success { "ok" } else { "partial" },
            report.attempt_id,
            report.synced_items,
            report.failed_items
        );
        report
    }

    fn push_one_score<R: OfflineRepository>(
        &self,
        repo: &R,
        application_id: &str,
    ) -> Result<(), String> {
        let draft = repo
            .get_score_draft(application_id)
            .map_err(|err| format!("score {application_id}: {err}"))?
            .ok_or_else(|| format!("score {application_id}: no local draft for queued entry"))?;

        self.transport
            .push_score(&draft)
            .map_err(|err| format!("score {application_id}: {err}"))?;
        repo.mark_score_synced(application_id)
            .map_err(|err| format!("score {application_id}: delivered but not marked: {err}"))
    }

    fn push_conflict<R: OfflineRepository>(&self, repo: &R) -> Result<(), String> {
        let declaration = repo
            .get_conflict_declaration()
            .map_err(|err| format!("conflict declaration: {err}"))?
            .ok_or_else(|| "conflict declaration: no local record for queued entry".to_string())?;

        self.transport
            .push_conflict(&declaration)
            .map_err(|err| format!("conflict declaration: {err}"))?;
        repo.mark_conflict_synced()
            .map_err(|err| format!("conflict declaration: delivered but not marked: {err}"))
    }
}
