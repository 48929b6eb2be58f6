use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A move a player can submit
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Rock,
    Paper,
    Scissors,
}

impl Move {
    pub const ALL: [Move; 3] = [Move::Rock, Move::Paper, Move::Scissors];

    pub fn as_str(&self) -> &'static str {
        match self {
            Move::Rock => "rock",
            Move::Paper => "paper",
            Move::Scissors => "scissors",
        }
    }

    fn index(self) -> usize {
        match self {
            Move::Rock => 0,
            Move::Paper => 1,
            Move::Scissors => 2,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown move: {0}")]
pub struct UnknownMove(pub String);

impl FromStr for Move {
    type Err = UnknownMove;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rock" => Ok(Move::Rock),
            "paper" => Ok(Move::Paper),
            "scissors" => Ok(Move::Scissors),
            _ => Err(UnknownMove(s.to_string())),
        }
    }
}

/// Result of a match, always from the point of view of one player
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Lose,
    Draw,
}

impl Outcome {
    /// The same result seen from the opponent's side
    pub fn opposite(self) -> Outcome {
        match self {
            Outcome::Win => Outcome::Lose,
            Outcome::Lose => Outcome::Win,
            Outcome::Draw => Outcome::Draw,
        }
    }
}

use Outcome::{Draw, Lose, Win};

/// `RESULTS[a][b]` is the outcome for the player who chose `a` against `b`.
/// Rows and columns follow rock, paper, scissors.
const RESULTS: [[Outcome; 3]; 3] = [
    [Draw, Lose, Win],
    [Win, Draw, Lose],
    [Lose, Win, Draw],
];

/// Settle two moves, returning (outcome for `first`, outcome for `second`)
pub fn play(first: Move, second: Move) -> (Outcome, Outcome) {
    (
        RESULTS[first.index()][second.index()],
        RESULTS[second.index()][first.index()],
    )
}
