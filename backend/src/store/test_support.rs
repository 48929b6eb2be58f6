use crate::models::{GlobalAggregate, PlayerRecord};
use crate::store::{DecidedTotals, StatsStore, StoreError};
use async_trait::async_trait;

/// Store whose every command fails, as if Redis were down
pub struct UnreachableStore;

fn refused() -> StoreError {
    StoreError::Unavailable("connection refused".to_string())
}

#[async_trait]
impl StatsStore for UnreachableStore {
    async fn record_decided(&self, _: &str, _: &str) -> Result<DecidedTotals, StoreError> {
        Err(refused())
    }

    async fn record_draw(&self, _: &str, _: &str) -> Result<(), StoreError> {
        Err(refused())
    }

    async fn player_record(&self, _: &str) -> Result<PlayerRecord, StoreError> {
        Err(refused())
    }

    async fn global_aggregate(&self) -> Result<GlobalAggregate, StoreError> {
        Err(refused())
    }

    async fn set_best_winner(&self, _: &str, _: u64) -> Result<(), StoreError> {
        Err(refused())
    }

    async fn set_worst_loser(&self, _: &str, _: u64) -> Result<(), StoreError> {
        Err(refused())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(refused())
    }
}
