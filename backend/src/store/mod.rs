// Statistics store adapters
pub mod memory_store;
pub mod redis_store;

#[cfg(test)]
pub mod test_support;

pub use memory_store::MemoryStatsStore;
pub use redis_store::RedisStatsStore;

use crate::models::{GlobalAggregate, PlayerRecord};
use async_trait::async_trait;
use thiserror::Error;

/// Sorted aggregates ranking players by each counter
pub const WINS_BOARD: &str = "rps-wins";
pub const LOSSES_BOARD: &str = "rps-losses";
pub const DRAWS_BOARD: &str = "rps-draws";
/// Hash holding the best winner and worst loser
pub const MAX_STATS_KEY: &str = "max-stats";

/// Key of the per-player hash record
pub fn player_key(player: &str) -> String {
    format!("user-{}", player)
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Malformed record {key}: {reason}")]
    Malformed { key: String, reason: String },

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Counters after a decided match has been recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecidedTotals {
    pub winner_wins: u64,
    pub loser_losses: u64,
}

/// Persistence for player statistics.
///
/// The match coordinator is the only writer, so implementations need not guard
/// against concurrent read-modify-write from elsewhere. Each `record_*` call must
/// apply all of its counter changes as one step.
#[async_trait]
pub trait StatsStore: Send + Sync {
    /// Add a win to `winner` and a loss to `loser`, returning their new totals
    async fn record_decided(&self, winner: &str, loser: &str) -> Result<DecidedTotals, StoreError>;

    /// Add a draw to both players
    async fn record_draw(&self, first: &str, second: &str) -> Result<(), StoreError>;

    async fn player_record(&self, player: &str) -> Result<PlayerRecord, StoreError>;

    async fn global_aggregate(&self) -> Result<GlobalAggregate, StoreError>;

    async fn set_best_winner(&self, player: &str, wins: u64) -> Result<(), StoreError>;

    async fn set_worst_loser(&self, player: &str, losses: u64) -> Result<(), StoreError>;

    /// Cheap liveness probe
    async fn ping(&self) -> Result<(), StoreError>;
}
