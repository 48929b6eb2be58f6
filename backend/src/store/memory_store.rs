use crate::models::{GlobalAggregate, PlayerRecord};
use crate::store::{DecidedTotals, StatsStore, StoreError};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

#[derive(Debug, Default)]
struct Inner {
    players: HashMap<String, PlayerRecord>,
    aggregate: GlobalAggregate,
}

/// In-process store with the same semantics as the Redis adapter.
/// Used by tests and for local runs without Redis.
#[derive(Debug, Default)]
pub struct MemoryStatsStore {
    inner: Mutex<Inner>,
}

impl MemoryStatsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of players with a record
    pub async fn player_count(&self) -> usize {
        self.inner.lock().await.players.len()
    }
}

#[async_trait]
impl StatsStore for MemoryStatsStore {
    async fn record_decided(&self, winner: &str, loser: &str) -> Result<DecidedTotals, StoreError> {
        let mut inner = self.inner.lock().await;

        let winner_wins = {
            let record = inner.players.entry(winner.to_string()).or_default();
            record.wins += 1;
            record.wins
        };
        let loser_losses = {
            let record = inner.players.entry(loser.to_string()).or_default();
            record.losses += 1;
            record.losses
        };

        Ok(DecidedTotals {
            winner_wins,
            loser_losses,
        })
    }

    async fn record_draw(&self, first: &str, second: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        inner.players.entry(first.to_string()).or_default().draws += 1;
        inner.players.entry(second.to_string()).or_default().draws += 1;
        Ok(())
    }

    async fn player_record(&self, player: &str) -> Result<PlayerRecord, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner.players.get(player).copied().unwrap_or_default())
    }

    async fn global_aggregate(&self) -> Result<GlobalAggregate, StoreError> {
        Ok(self.inner.lock().await.aggregate.clone())
    }

    async fn set_best_winner(&self, player: &str, wins: u64) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        inner.aggregate.best_winner = Some(player.to_string());
        inner.aggregate.best_wins = wins;
        Ok(())
    }

    async fn set_worst_loser(&self, player: &str, losses: u64) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        inner.aggregate.worst_loser = Some(player.to_string());
        inner.aggregate.worst_losses = losses;
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
