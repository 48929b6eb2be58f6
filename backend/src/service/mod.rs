// Service layer: matchmaking and statistics settlement
pub mod match_coordinator;
pub mod stats_policy;


pub use match_coordinator::{CoordinatorError, CoordinatorHandle, MatchCoordinator, Submission};
pub use stats_policy::StatsPolicy;
