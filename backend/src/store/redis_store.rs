use crate::models::{GlobalAggregate, PlayerRecord};
use crate::store::{
    player_key, DecidedTotals, StatsStore, StoreError, DRAWS_BOARD, LOSSES_BOARD, MAX_STATS_KEY,
    WINS_BOARD,
};
use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands};
use std::collections::HashMap;
use tracing::{debug, info};

/// Statistics store backed by Redis hashes and sorted sets.
///
/// Layout:
/// - `rps-wins`, `rps-losses`, `rps-draws`: sorted sets scored by counter, member = player
/// - `user-<player>`: hash with `wins`, `losses`, `draws`
/// - `max-stats`: hash with `winner`, `wins`, `loser`, `losses`
#[derive(Clone)]
pub struct RedisStatsStore {
    redis: ConnectionManager,
}

impl RedisStatsStore {
    pub fn new(redis: ConnectionManager) -> Self {
        Self { redis }
    }

    /// Open a managed connection to `url`
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let client = redis::Client::open(url)?;
        let redis = ConnectionManager::new(client).await?;
        info!(url = %url, "Connected to Redis statistics store");
        Ok(Self::new(redis))
    }
}

#[async_trait]
impl StatsStore for RedisStatsStore {
    async fn record_decided(&self, winner: &str, loser: &str) -> Result<DecidedTotals, StoreError> {
        let mut conn = self.redis.clone();

        let (winner_wins, loser_losses): (u64, u64) = redis::pipe()
            .atomic()
            .cmd("ZINCRBY")
            .arg(WINS_BOARD)
            .arg(1)
            .arg(winner)
            .ignore()
            .cmd("ZINCRBY")
            .arg(LOSSES_BOARD)
            .arg(1)
            .arg(loser)
            .ignore()
            .cmd("HINCRBY")
            .arg(player_key(winner))
            .arg("wins")
            .arg(1)
            .cmd("HINCRBY")
            .arg(player_key(loser))
            .arg("losses")
            .arg(1)
            .query_async(&mut conn)
            .await?;

        debug!(winner = %winner, loser = %loser, winner_wins, loser_losses, "Recorded decided match");

        Ok(DecidedTotals {
            winner_wins,
            loser_losses,
        })
    }

    async fn record_draw(&self, first: &str, second: &str) -> Result<(), StoreError> {
        let mut conn = self.redis.clone();

        let _: () = redis::pipe()
            .atomic()
            .cmd("ZINCRBY")
            .arg(DRAWS_BOARD)
            .arg(1)
            .arg(first)
            .ignore()
            .cmd("ZINCRBY")
            .arg(DRAWS_BOARD)
            .arg(1)
            .arg(second)
            .ignore()
            .cmd("HINCRBY")
            .arg(player_key(first))
            .arg("draws")
            .arg(1)
            .ignore()
            .cmd("HINCRBY")
            .arg(player_key(second))
            .arg("draws")
            .arg(1)
            .ignore()
            .query_async(&mut conn)
            .await?;

        debug!(first = %first, second = %second, "Recorded draw");

        Ok(())
    }

    async fn player_record(&self, player: &str) -> Result<PlayerRecord, StoreError> {
        let mut conn = self.redis.clone();

        let (wins, losses, draws): (Option<u64>, Option<u64>, Option<u64>) = redis::cmd("HMGET")
            .arg(player_key(player))
            .arg("wins")
            .arg("losses")
            .arg("draws")
            .query_async(&mut conn)
            .await?;

        Ok(PlayerRecord {
            wins: wins.unwrap_or(0),
            losses: losses.unwrap_or(0),
            draws: draws.unwrap_or(0),
        })
    }

    async fn global_aggregate(&self) -> Result<GlobalAggregate, StoreError> {
        let mut conn = self.redis.clone();
        let fields: HashMap<String, String> = conn.hgetall(MAX_STATS_KEY).await?;
        parse_aggregate(&fields)
    }

    async fn set_best_winner(&self, player: &str, wins: u64) -> Result<(), StoreError> {
        let mut conn = self.redis.clone();
        let _: () = conn
            .hset_multiple(
                MAX_STATS_KEY,
                &[("winner", player.to_string()), ("wins", wins.to_string())],
            )
            .await?;
        Ok(())
    }

    async fn set_worst_loser(&self, player: &str, losses: u64) -> Result<(), StoreError> {
        let mut conn = self.redis.clone();
        let _: () = conn
            .hset_multiple(
                MAX_STATS_KEY,
                &[("loser", player.to_string()), ("losses", losses.to_string())],
            )
            .await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let mut conn = self.redis.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }
}

/// Build the aggregate from a `max-stats` hash. Missing fields mean no entry yet.
fn parse_aggregate(fields: &HashMap<String, String>) -> Result<GlobalAggregate, StoreError> {
    let count = |field: &str| -> Result<u64, StoreError> {
        match fields.get(field) {
            None => Ok(0),
            Some(raw) => raw.parse().map_err(|_| StoreError::Malformed {
                key: MAX_STATS_KEY.to_string(),
                reason: format!("field {} is not a count: {:?}", field, raw),
            }),
        }
    };

    Ok(GlobalAggregate {
        best_winner: fields.get("winner").cloned(),
        best_wins: count("wins")?,
        worst_loser: fields.get("loser").cloned(),
        worst_losses: count("losses")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_empty_aggregate() {
        let aggregate = parse_aggregate(&HashMap::new()).unwrap();
        assert_eq!(aggregate, GlobalAggregate::default());
    }

    #[test]
    fn test_parse_full_aggregate() {
        let aggregate = parse_aggregate(&fields(&[
            ("winner", "alice"),
            ("wins", "7"),
            ("loser", "bob"),
            ("losses", "3"),
        ]))
        .unwrap();

        assert_eq!(aggregate.best_winner.as_deref(), Some("alice"));
        assert_eq!(aggregate.best_wins, 7);
        assert_eq!(aggregate.worst_loser.as_deref(), Some("bob"));
        assert_eq!(aggregate.worst_losses, 3);
    }

    #[test]
    fn test_parse_rejects_bad_count() {
        let result = parse_aggregate(&fields(&[("winner", "alice"), ("wins", "lots")]));
        assert!(matches!(result, Err(StoreError::Malformed { .. })));
    }

    #[test]
    fn test_player_key_format() {
        assert_eq!(player_key("tester1"), "user-tester1");
    }
}
