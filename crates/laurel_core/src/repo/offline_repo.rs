//! Offline draft store contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist judge score drafts, the conflict declaration and the
//!   pending-sync queue as three wholesale JSON blobs.
//! - Keep SQL and JSON encoding details inside the persistence boundary.
//!
//! # Invariants
//! - At most one draft per application id (last-write-wins overwrite).
//! - The queue holds at most one entry per (kind, refId) pair.
//! - Every local edit marks the touched item unsynced and re-queues it.
//! - Mark-synced operations are idempotent; absent items are a no-op.

use crate::db::DbError;
use crate::model::conflict::ConflictDeclaration;
use crate::model::draft::ScoreDraft;
use crate::model::rubric::RubricScores;
use crate::sync::queue::{SyncKind, SyncQueue, SyncQueueEntry, CONFLICT_REF_ID};
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

/// Blob key holding the draft collection (JSON object keyed by application id).
pub const SCORE_DRAFTS_KEY: &str = "score_drafts";
/// Blob key holding the single conflict declaration record.
pub const CONFLICT_DECLARATION_KEY: &str = "conflict_declaration";
/// Blob key holding the pending-sync entry array.
pub const SYNC_QUEUE_KEY: &str = "sync_queue";

/// Advisory capacity ceiling reported by [`OfflineRepository::storage_info`].
///
/// Mirrors the same-device storage ceiling of the portal; never enforced.
pub const OFFLINE_CAPACITY_BYTES: u64 = 5 * 1024 * 1024;

pub type StoreResult<T> = Result<T, StoreError>;

/// Offline store error for persistence and query operations.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    CorruptBlob {
        key: &'static str,
        message: String,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open connections through db::open_db"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table missing: {table}"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column missing: {table}.{column}")
            }
            Self::CorruptBlob { key, message } => {
                write!(f, "corrupt persisted blob `{key}`: {message}")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Approximate storage usage for UI display; advisory only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageInfo {
    pub used_bytes: u64,
    pub capacity_bytes: u64,
    /// Whole-percent usage, floored.
    pub percent_used: u8,
}

/// Current wall-clock time in Unix epoch milliseconds.
///
/// Returns 0 if the system clock reads before the epoch.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or_default()
}

/// Durable, synchronous, same-device persistence of in-progress judge work.
pub trait OfflineRepository {
    /// Overwrites any existing draft for the application, marks it unsynced,
    /// stamps the current time and re-queues the sync entry.
    ///
    /// Accepts any numeric record; rubric caps are an input-seam concern.
    fn save_score_draft(
        &self,
        application_id: &str,
        scores: RubricScores,
    ) -> StoreResult<ScoreDraft>;

    /// Returns the draft for the application, or `None` when absent.
    fn get_score_draft(&self, application_id: &str) -> StoreResult<Option<ScoreDraft>>;

    /// Overwrites the single global declaration slot, marks it unsynced and
    /// re-queues the conflict sync entry.
    fn save_conflict_declaration(
        &self,
        declaration: &ConflictDeclaration,
    ) -> StoreResult<ConflictDeclaration>;

    /// Returns the current declaration, or `None` when never declared.
    fn get_conflict_declaration(&self) -> StoreResult<Option<ConflictDeclaration>>;

    /// Flips the draft's `synced` flag and dequeues its entry.
    ///
    /// Calling on an already-synced or absent draft is a no-op.
    fn mark_score_synced(&self, application_id: &str) -> StoreResult<()>;

    /// Flips the declaration's `synced` flag and dequeues its entry.
    ///
    /// Calling on an already-synced or absent declaration is a no-op.
    fn mark_conflict_synced(&self) -> StoreResult<()>;

    /// Unconditionally erases drafts, declaration and queue in one atomic
    /// statement. Intended for logout; irreversible.
    fn clear_all_offline_data(&self) -> StoreResult<()>;

    /// Approximate bytes used vs. the fixed capacity ceiling.
    fn storage_info(&self) -> StoreResult<StorageInfo>;

    /// Whether any sync entry is still queued.
    fn has_unsynced_items(&self) -> StoreResult<bool>;

    /// Number of drafts not yet accepted by the remote service.
    fn unsynced_scores_count(&self) -> StoreResult<u32>;

    /// Snapshot of the queue in stored order.
    fn pending_entries(&self) -> StoreResult<Vec<SyncQueueEntry>>;
}

/// SQLite-backed offline store over the `offline_blobs` table.
pub struct SqliteOfflineRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteOfflineRepository<'conn> {
    /// Wraps a bootstrapped connection after verifying the schema.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations have not been applied.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the blob
    ///   table does not match what this binary expects.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        let expected_version = crate::db::migrations::latest_version();
        let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        if actual_version != expected_version {
            return Err(StoreError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        let table_exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
            );",
            ["offline_blobs"],
            |row| row.get(0),
        )?;
        if table_exists == 0 {
            return Err(StoreError::MissingRequiredTable("offline_blobs"));
        }

        let mut stmt = conn.prepare("SELECT name FROM pragma_table_info('offline_blobs');")?;
        let mut rows = stmt.query([])?;
        let mut columns = Vec::new();
        while let Some(row) = rows.next()? {
            columns.push(row.get::<_, String>(0)?);
        }
        for required in ["key", "value", "updated_at"] {
            if !columns.iter().any(|column| column == required) {
                return Err(StoreError::MissingRequiredColumn {
                    table: "offline_blobs",
                    column: required,
                });
            }
        }

        Ok(Self { conn })
    }

    fn read_blob(&self, key: &'static str) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM offline_blobs WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .map_err(|err| {
                error!("event=blob_read module=repo status=error key={key} error={err}");
                StoreError::from(err)
            })?;
        Ok(value)
    }

    fn write_blob(&self, key: &'static str, value: &str) -> StoreResult<()> {
        self.conn
            .execute(
                "INSERT INTO offline_blobs (key, value, updated_at)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = excluded.updated_at;",
                params![key, value, now_epoch_ms()],
            )
            .map_err(|err| {
                error!("event=blob_write module=repo status=error key={key} error={err}");
                StoreError::from(err)
            })?;
        Ok(())
    }

    fn decode<T: serde::de::DeserializeOwned>(
        key: &'static str,
        raw: &str,
    ) -> StoreResult<T> {
        serde_json::from_str(raw).map_err(|err| {
            error!("event=blob_decode module=repo status=error key={key} error={err}");
            StoreError::CorruptBlob {
                key,
                message: err.to_string(),
            }
        })
    }

    fn encode<T: serde::Serialize>(key: &'static str, value: &T) -> StoreResult<String> {
        serde_json::to_string(value).map_err(|err| StoreError::CorruptBlob {
            key,
            message: err.to_string(),
        })
    }

    fn load_drafts(&self) -> StoreResult<BTreeMap<String, ScoreDraft>> {
        match self.read_blob(SCORE_DRAFTS_KEY)? {
            Some(raw) => Self::decode(SCORE_DRAFTS_KEY, &raw),
            None => Ok(BTreeMap::new()),
        }
    }

    fn store_drafts(&self, drafts: &BTreeMap<String, ScoreDraft>) -> StoreResult<()> {
        let raw = Self::encode(SCORE_DRAFTS_KEY, drafts)?;
        self.write_blob(SCORE_DRAFTS_KEY, &raw)
    }

    fn load_queue(&self) -> StoreResult<SyncQueue> {
        match self.read_blob(SYNC_QUEUE_KEY)? {
            Some(raw) => Self::decode(SYNC_QUEUE_KEY, &raw),
            None => Ok(SyncQueue::new()),
        }
    }

    fn store_queue(&self, queue: &SyncQueue) -> StoreResult<()> {
        let raw = Self::encode(SYNC_QUEUE_KEY, queue)?;
        self.write_blob(SYNC_QUEUE_KEY, &raw)
    }
}

impl OfflineRepository for SqliteOfflineRepository<'_> {
    fn save_score_draft(
        &self,
        application_id: &str,
        scores: RubricScores,
    ) -> StoreResult<ScoreDraft> {
        let saved_at = now_epoch_ms();
        let draft = ScoreDraft::new(application_id, scores, saved_at);

        let mut drafts = self.load_drafts()?;
        drafts.insert(application_id.to_string(), draft.clone());
        let mut queue = self.load_queue()?;
        queue.enqueue(SyncKind::Score, application_id, saved_at);

        let tx = self.conn.unchecked_transaction()?;
        self.store_drafts(&drafts)?;
        self.store_queue(&queue)?;
        tx.commit()?;

        info!(
            "event=draft_save module=repo status=ok application_id={application_id} total={}",
            draft.scores.total()
        );
        Ok(draft)
    }

    fn get_score_draft(&self, application_id: &str) -> StoreResult<Option<ScoreDraft>> {
        let drafts = self.load_drafts()?;
        Ok(drafts.get(application_id).cloned())
    }

    fn save_conflict_declaration(
        &self,
        declaration: &ConflictDeclaration,
    ) -> StoreResult<ConflictDeclaration> {
        let mut stored = declaration.clone();
        stored.synced = false;

        let raw = Self::encode(CONFLICT_DECLARATION_KEY, &stored)?;
        let mut queue = self.load_queue()?;
        queue.enqueue(SyncKind::Conflict, CONFLICT_REF_ID, now_epoch_ms());

        let tx = self.conn.unchecked_transaction()?;
        self.write_blob(CONFLICT_DECLARATION_KEY, &raw)?;
        self.store_queue(&queue)?;
        tx.commit()?;

        info!(
            "event=conflict_save module=repo status=ok has_conflict={}",
            stored.has_conflict
        );
        Ok(stored)
    }

    fn get_conflict_declaration(&self) -> StoreResult<Option<ConflictDeclaration>> {
        match self.read_blob(CONFLICT_DECLARATION_KEY)? {
            Some(raw) => Ok(Some(Self::decode(CONFLICT_DECLARATION_KEY, &raw)?)),
            None => Ok(None),
        }
    }

    fn mark_score_synced(&self, application_id: &str) -> StoreResult<()> {
        let mut drafts = self.load_drafts()?;
        let mut queue = self.load_queue()?;

        let flipped = match drafts.get_mut(application_id) {
            Some(draft) if draft.is_pending() => {
                draft.mark_synced();
                true
            }
            _ => false,
        };
        let dequeued = queue.dequeue(SyncKind::Score, application_id);

        if flipped || dequeued {
            let tx = self.conn.unchecked_transaction()?;
            if flipped {
                self.store_drafts(&drafts)?;
            }
            if dequeued {
                self.store_queue(&queue)?;
            }
            tx.commit()?;
        }
        Ok(())
    }

    fn mark_conflict_synced(&self) -> StoreResult<()> {
        let declaration = self.get_conflict_declaration()?;
        let mut queue = self.load_queue()?;

        let flipped = match declaration {
            Some(mut stored) if !stored.synced => {
                stored.mark_synced();
                Some(Self::encode(CONFLICT_DECLARATION_KEY, &stored)?)
            }
            _ => None,
        };
        let dequeued = queue.dequeue(SyncKind::Conflict, CONFLICT_REF_ID);

        if flipped.is_some() || dequeued {
            let tx = self.conn.unchecked_transaction()?;
            if let Some(raw) = flipped {
                self.write_blob(CONFLICT_DECLARATION_KEY, &raw)?;
            }
            if dequeued {
                self.store_queue(&queue)?;
            }
            tx.commit()?;
        }
        Ok(())
    }

    fn clear_all_offline_data(&self) -> StoreResult<()> {
        self.conn
            .execute("DELETE FROM offline_blobs;", [])
            .map_err(|err| {
                error!("event=offline_clear module=repo status=error error={err}");
                StoreError::from(err)
            })?;
        info!("event=offline_clear module=repo status=ok");
        Ok(())
    }

    fn storage_info(&self) -> StoreResult<StorageInfo> {
        let used: i64 = self.conn.query_row(
            "SELECT COALESCE(SUM(LENGTH(key) + LENGTH(CAST(value AS BLOB))), 0)
             FROM offline_blobs;",
            [],
            |row| row.get(0),
        )?;
        let used_bytes = used.max(0) as u64;
        let percent_used = ((used_bytes * 100) / OFFLINE_CAPACITY_BYTES).min(100) as u8;
        Ok(StorageInfo {
            used_bytes,
            capacity_bytes: OFFLINE_CAPACITY_BYTES,
            percent_used,
        })
    }

    fn has_unsynced_items(&self) -> StoreResult<bool> {
        Ok(!self.load_queue()?.is_empty())
    }

    fn unsynced_scores_count(&self) -> StoreResult<u32> {
        let drafts = self.load_drafts()?;
        Ok(drafts.values().filter(|draft| draft.is_pending()).count() as u32)
    }

    fn pending_entries(&self) -> StoreResult<Vec<SyncQueueEntry>> {
        Ok(self.load_queue()?.entries().to_vec())
    }
}
