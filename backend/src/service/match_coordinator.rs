use crate::models::{play, MatchReport, Move, Outcome, Participant};
use crate::service::stats_policy::StatsPolicy;
use crate::store::StatsStore;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoordinatorError {
    #[error("Match coordinator is not running")]
    Stopped,

    #[error("Submission was dropped before a result was delivered")]
    Abandoned,
}

/// Single-use channel back to the request waiting on a submission.
/// Delivering consumes the handle, so a result is written at most once.
#[derive(Debug)]
pub struct ReplyHandle(oneshot::Sender<Outcome>);

impl ReplyHandle {
    /// Returns false when the waiting request has already gone away
    pub fn deliver(self, outcome: Outcome) -> bool {
        self.0.send(outcome).is_ok()
    }
}

/// One player's request to play a move
#[derive(Debug)]
pub struct Submission {
    pub player: String,
    pub chosen: Move,
    pub reply: ReplyHandle,
}

impl Submission {
    pub fn new(player: impl Into<String>, chosen: Move) -> (Self, oneshot::Receiver<Outcome>) {
        let (tx, rx) = oneshot::channel();
        let submission = Self {
            player: player.into(),
            chosen,
            reply: ReplyHandle(tx),
        };
        (submission, rx)
    }

    fn participant(&self) -> Participant {
        Participant {
            player: self.player.clone(),
            chosen: self.chosen,
        }
    }
}

/// Producer side of the coordinator queue, shared by every request handler
#[derive(Debug, Clone)]
pub struct CoordinatorHandle {
    queue: mpsc::UnboundedSender<Submission>,
}

impl CoordinatorHandle {
    /// Queue a move and wait for the opponent. There is no timeout: without a
    /// second submission this never resolves.
    pub async fn submit(
        &self,
        player: impl Into<String>,
        chosen: Move,
    ) -> Result<Outcome, CoordinatorError> {
        let (submission, result) = Submission::new(player, chosen);
        self.enqueue(submission)?;
        result.await.map_err(|_| CoordinatorError::Abandoned)
    }

    /// Hand a submission to the coordinator without waiting for its result
    pub fn enqueue(&self, submission: Submission) -> Result<(), CoordinatorError> {
        debug!(player = %submission.player, chosen = %submission.chosen, "Submission queued");
        self.queue
            .send(submission)
            .map_err(|_| CoordinatorError::Stopped)
    }

    pub fn is_running(&self) -> bool {
        !self.queue.is_closed()
    }
}

/// Pairs submissions in arrival order and settles each pair.
///
/// This is the only writer to the statistics store. Matches are settled one at a
/// time, so two matches never race on the same player record.
pub struct MatchCoordinator {
    queue: mpsc::UnboundedReceiver<Submission>,
    stats: StatsPolicy,
    matches_settled: u64,
}

impl MatchCoordinator {
    pub fn new(store: Arc<dyn StatsStore>, track_leaderboard: bool) -> (Self, CoordinatorHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let coordinator = Self {
            queue: rx,
            stats: StatsPolicy::new(store, track_leaderboard),
            matches_settled: 0,
        };
        (coordinator, CoordinatorHandle { queue: tx })
    }

    /// Main loop. Runs until every `CoordinatorHandle` has been dropped and the
    /// queue is drained, then returns the number of matches settled.
    pub async fn run(mut self) -> u64 {
        info!("Match coordinator started");

        loop {
            let Some(first) = self.queue.recv().await else {
                break;
            };
            let Some(second) = self.queue.recv().await else {
                // Dropping the reply handle releases the waiting request
                warn!(player = %first.player, chosen = %first.chosen, "Submission left unpaired at shutdown");
                break;
            };

            self.settle(first, second).await;
        }

        info!(matches_settled = self.matches_settled, "Match coordinator stopped");
        self.matches_settled
    }

    /// Resolve one match: compute outcomes, record statistics, then reply to both players
    async fn settle(&mut self, first: Submission, second: Submission) -> MatchReport {
        let (first_outcome, second_outcome) = play(first.chosen, second.chosen);

        let winner = self
            .stats
            .record(&first.player, &second.player, first_outcome)
            .await;

        let report = MatchReport::new(first.participant(), second.participant(), winner);

        for (submission, outcome) in [(first, first_outcome), (second, second_outcome)] {
            let player = submission.player;
            if !submission.reply.deliver(outcome) {
                warn!(player = %player, outcome = ?outcome, "Player left before the result was delivered");
            }
        }

        self.matches_settled += 1;

        info!(
            match_id = %report.id,
            competitor_1 = %report.first.player,
            weapon_1 = %report.first.chosen,
            competitor_2 = %report.second.player,
            weapon_2 = %report.second.chosen,
            winner = %report.winner_label(),
            "A grand battle has occurred"
        );

        report
    }
}
