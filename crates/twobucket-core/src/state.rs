//! Bucket levels and the moves between them

use serde::{Deserialize, Serialize};

use crate::types::{Bucket, Liters, Problem};

/// Current levels of both buckets
///
/// The move count that produced a state is tracked by the search, not here,
/// so two paths to the same levels compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct State {
    pub one: Liters,
    pub two: Liters,
}

impl State {
    pub fn new(one: Liters, two: Liters) -> Self {
        Self { one, two }
    }

    /// Start bucket full, other bucket empty
    pub fn initial(problem: &Problem) -> Self {
        match problem.start {
            Bucket::One => Self::new(problem.capacity_one, 0),
            Bucket::Two => Self::new(0, problem.capacity_two),
        }
    }

    pub fn level(self, bucket: Bucket) -> Liters {
        match bucket {
            Bucket::One => self.one,
            Bucket::Two => self.two,
        }
    }

    /// Which bucket holds `goal`, with the other bucket's level.
    /// Bucket one wins when both do.
    pub fn goal_holder(self, goal: Liters) -> Option<(Bucket, Liters)> {
        if self.one == goal {
            Some((Bucket::One, self.two))
        } else if self.two == goal {
            Some((Bucket::Two, self.one))
        } else {
            None
        }
    }

    /// The start bucket is empty while the other one is full.
    /// The puzzle rules never allow this position.
    pub fn is_forbidden(self, problem: &Problem) -> bool {
        let other = problem.start.other();
        self.level(problem.start) == 0 && self.level(other) == problem.capacity(other)
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.one, self.two)
    }
}

/// A single puzzle move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Move {
    FillOne,
    FillTwo,
    EmptyOne,
    EmptyTwo,
    PourOneIntoTwo,
    PourTwoIntoOne,
}

impl Move {
    /// Successor generation order. Ties within a BFS layer go to the
    /// earliest move in this list.
    pub const ALL: [Move; 6] = [
        Move::FillOne,
        Move::FillTwo,
        Move::EmptyOne,
        Move::EmptyTwo,
        Move::PourOneIntoTwo,
        Move::PourTwoIntoOne,
    ];

    pub fn fill(bucket: Bucket) -> Self {
        match bucket {
            Bucket::One => Move::FillOne,
            Bucket::Two => Move::FillTwo,
        }
    }

    /// Levels after performing this move from `state`
    pub fn apply(self, state: State, problem: &Problem) -> State {
        let (cap_one, cap_two) = (problem.capacity_one, problem.capacity_two);
        match self {
            Move::FillOne => State::new(cap_one, state.two),
            Move::FillTwo => State::new(state.one, cap_two),
            Move::EmptyOne => State::new(0, state.two),
            Move::EmptyTwo => State::new(state.one, 0),
            Move::PourOneIntoTwo => {
                let amount = state.one.min(cap_two.saturating_sub(state.two));
                State::new(state.one - amount, state.two + amount)
            }
            Move::PourTwoIntoOne => {
                let amount = state.two.min(cap_one.saturating_sub(state.one));
                State::new(state.one + amount, state.two - amount)
            }
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Move::FillOne => write!(f, "fill bucket one"),
            Move::FillTwo => write!(f, "fill bucket two"),
            Move::EmptyOne => write!(f, "empty bucket one"),
            Move::EmptyTwo => write!(f, "empty bucket two"),
            Move::PourOneIntoTwo => write!(f, "pour bucket one into bucket two"),
            Move::PourTwoIntoOne => write!(f, "pour bucket two into bucket one"),
        }
    }
}

/// One entry of a move trace: the move and the levels it leaves behind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub action: Move,
    pub state: State,
}
