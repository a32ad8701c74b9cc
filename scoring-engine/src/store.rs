//! Persistence seam for calculated scores

use crate::types::ScoreRecord;
use crate::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;
use uuid::Uuid;

/// Append-only score store.
///
/// The engine treats the store as an external collaborator: rows are
/// keyed by (user id, timestamp), written once and never updated or
/// deleted. Implementations must serialize per-row writes themselves.
#[async_trait]
pub trait ScoreStore: Send + Sync {
    /// Append a score record
    async fn save(&self, record: &ScoreRecord) -> Result<()>;

    /// All records for a user, descending by calculation time
    async fn find_history(&self, user_id: Uuid) -> Result<Vec<ScoreRecord>>;

    /// Most recent record for a user, if any
    async fn find_latest(&self, user_id: Uuid) -> Result<Option<ScoreRecord>>;
}

/// In-memory score store for tests and embedded use
pub struct MemoryScoreStore {
    rows: DashMap<Uuid, Vec<ScoreRecord>>,
}

impl MemoryScoreStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            rows: DashMap::new(),
        }
    }

    /// Total rows across all users
    pub fn len(&self) -> usize {
        self.rows.iter().map(|entry| entry.value().len()).sum()
    }

    /// Whether the store holds no rows
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryScoreStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ScoreStore for MemoryScoreStore {
    async fn save(&self, record: &ScoreRecord) -> Result<()> {
        self.rows
            .entry(record.user_id)
            .or_insert_with(Vec::new)
            .push(record.clone());
        debug!(user_id = %record.user_id, "Score record appended");
        Ok(())
    }

    async fn find_history(&self, user_id: Uuid) -> Result<Vec<ScoreRecord>> {
        let mut records = self
            .rows
            .get(&user_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default();

        records.sort_by(|a, b| b.calculated_at.cmp(&a.calculated_at));
        Ok(records)
    }

    async fn find_latest(&self, user_id: Uuid) -> Result<Option<ScoreRecord>> {
        Ok(self.find_history(user_id).await?.into_iter().next())
    }
}
