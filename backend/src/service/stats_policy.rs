use crate::models::Outcome;
use crate::store::{DecidedTotals, StatsStore, StoreError};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Applies the result of one settled match to the statistics store.
///
/// Decided matches add a win and a loss; draws add a draw to both players and
/// never touch wins, losses or the leaderboard. When leaderboard tracking is on,
/// the `max-stats` entries are replaced only on a strict increase.
pub struct StatsPolicy {
    store: Arc<dyn StatsStore>,
    track_leaderboard: bool,
}

impl StatsPolicy {
    pub fn new(store: Arc<dyn StatsStore>, track_leaderboard: bool) -> Self {
        Self {
            store,
            track_leaderboard,
        }
    }

    /// Record the match and return the winner's identifier, `None` for a draw.
    ///
    /// Store failures are logged and swallowed: the game result stands even when
    /// statistics could not be written.
    pub async fn record(&self, first: &str, second: &str, first_outcome: Outcome) -> Option<String> {
        let (winner, loser) = match first_outcome {
            Outcome::Win => (first, second),
            Outcome::Lose => (second, first),
            Outcome::Draw => {
                if let Err(e) = self.store.record_draw(first, second).await {
                    error!(error = %e, first = %first, second = %second, "Failed to record draw");
                }
                return None;
            }
        };

        if let Err(e) = self.record_decided(winner, loser).await {
            error!(error = %e, winner = %winner, loser = %loser, "Failed to record match statistics");
        }

        Some(winner.to_string())
    }

    async fn record_decided(&self, winner: &str, loser: &str) -> Result<(), StoreError> {
        let totals = self.store.record_decided(winner, loser).await?;

        if self.track_leaderboard {
            self.update_leaderboard(winner, loser, totals).await?;
        }

        Ok(())
    }

    async fn update_leaderboard(
        &self,
        winner: &str,
        loser: &str,
        totals: DecidedTotals,
    ) -> Result<(), StoreError> {
        let current = self.store.global_aggregate().await?;

        // Ties keep the existing entry. A failed winner write skips the loser check.
        if totals.winner_wins > current.best_wins {
            self.store.set_best_winner(winner, totals.winner_wins).await?;
            info!(player = %winner, wins = totals.winner_wins, "New best winner");
        }

        if totals.loser_losses > current.worst_losses {
            self.store.set_worst_loser(loser, totals.loser_losses).await?;
            info!(player = %loser, losses = totals.loser_losses, "New worst loser");
        }

        debug!(
            best_wins = current.best_wins.max(totals.winner_wins),
            worst_losses = current.worst_losses.max(totals.loser_losses),
            "Leaderboard checked"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GlobalAggregate, PlayerRecord};
    use crate::store::MemoryStatsStore;
    use async_trait::async_trait;

    /// Memory store that refuses to write the best winner
    struct WinnerWriteFails(MemoryStatsStore);

    #[async_trait]
    impl StatsStore for WinnerWriteFails {
        async fn record_decided(&self, winner: &str, loser: &str) -> Result<DecidedTotals, StoreError> {
            self.0.record_decided(winner, loser).await
        }

        async fn record_draw(&self, first: &str, second: &str) -> Result<(), StoreError> {
            self.0.record_draw(first, second).await
        }

        async fn player_record(&self, player: &str) -> Result<PlayerRecord, StoreError> {
            self.0.player_record(player).await
        }

        async fn global_aggregate(&self) -> Result<GlobalAggregate, StoreError> {
            self.0.global_aggregate().await
        }

        async fn set_best_winner(&self, _: &str, _: u64) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("write refused".to_string()))
        }

        async fn set_worst_loser(&self, player: &str, losses: u64) -> Result<(), StoreError> {
            self.0.set_worst_loser(player, losses).await
        }

        async fn ping(&self) -> Result<(), StoreError> {
            self.0.ping().await
        }
    }

    fn policy(track_leaderboard: bool) -> (StatsPolicy, Arc<MemoryStatsStore>) {
        let store = Arc::new(MemoryStatsStore::new());
        (StatsPolicy::new(store.clone(), track_leaderboard), store)
    }

    #[tokio::test]
    async fn test_decided_match_updates_only_participants() {
        let (policy, store) = policy(true);
        store.record_draw("bystander", "bystander").await.unwrap();

        let winner = policy.record("alice", "bob", Outcome::Lose).await;
        assert_eq!(winner.as_deref(), Some("bob"));

        assert_eq!(
            store.player_record("bob").await.unwrap(),
            PlayerRecord { wins: 1, losses: 0, draws: 0 }
        );
        assert_eq!(
            store.player_record("alice").await.unwrap(),
            PlayerRecord { wins: 0, losses: 1, draws: 0 }
        );
        assert_eq!(
            store.player_record("bystander").await.unwrap(),
            PlayerRecord { wins: 0, losses: 0, draws: 2 }
        );
    }

    #[tokio::test]
    async fn test_draw_leaves_wins_and_losses() {
        let (policy, store) = policy(true);

        let winner = policy.record("alice", "bob", Outcome::Draw).await;
        assert!(winner.is_none());

        for player in ["alice", "bob"] {
            let record = store.player_record(player).await.unwrap();
            assert_eq!(record, PlayerRecord { wins: 0, losses: 0, draws: 1 });
        }
        assert_eq!(store.global_aggregate().await.unwrap(), GlobalAggregate::default());
    }

    #[tokio::test]
    async fn test_leaderboard_requires_strict_increase() {
        let (policy, store) = policy(true);

        policy.record("alice", "bob", Outcome::Win).await;
        let aggregate = store.global_aggregate().await.unwrap();
        assert_eq!(aggregate.best_winner.as_deref(), Some("alice"));
        assert_eq!(aggregate.best_wins, 1);
        assert_eq!(aggregate.worst_loser.as_deref(), Some("bob"));
        assert_eq!(aggregate.worst_losses, 1);

        // carol ties alice at one win, dave ties bob at one loss
        policy.record("carol", "dave", Outcome::Win).await;
        let aggregate = store.global_aggregate().await.unwrap();
        assert_eq!(aggregate.best_winner.as_deref(), Some("alice"));
        assert_eq!(aggregate.worst_loser.as_deref(), Some("bob"));

        policy.record("dave", "carol", Outcome::Lose).await;
        let aggregate = store.global_aggregate().await.unwrap();
        assert_eq!(aggregate.best_winner.as_deref(), Some("carol"));
        assert_eq!(aggregate.best_wins, 2);
        assert_eq!(aggregate.worst_loser.as_deref(), Some("dave"));
        assert_eq!(aggregate.worst_losses, 2);
    }

    #[tokio::test]
    async fn test_leaderboard_disabled() {
        let (policy, store) = policy(false);

        policy.record("alice", "bob", Outcome::Win).await;

        assert_eq!(store.player_record("alice").await.unwrap().wins, 1);
        assert_eq!(store.global_aggregate().await.unwrap(), GlobalAggregate::default());
    }

    #[tokio::test]
    async fn test_failed_winner_write_stops_leaderboard_update() {
        let store = Arc::new(WinnerWriteFails(MemoryStatsStore::new()));
        let policy = StatsPolicy::new(store.clone(), true);

        let winner = policy.record("alice", "bob", Outcome::Win).await;
        assert_eq!(winner.as_deref(), Some("alice"));

        // Counters were written before the leaderboard step failed
        assert_eq!(store.player_record("alice").await.unwrap().wins, 1);
        assert_eq!(store.player_record("bob").await.unwrap().losses, 1);
        assert_eq!(store.global_aggregate().await.unwrap(), GlobalAggregate::default());
    }
}
