//! Arithmetic reachability check
//!
//! A goal volume can be measured with two buckets only if it fits in the
//! larger bucket and is a multiple of the capacities' greatest common
//! divisor. Problems failing this check are rejected before any search.

use serde::Serialize;
use thiserror::Error;

use crate::types::{Bucket, Liters, Problem};

/// Why a puzzle cannot be solved
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Infeasibility {
    #[error("bucket {bucket} has no capacity")]
    ZeroCapacity { bucket: Bucket },

    #[error("goal {goal} exceeds both bucket capacities")]
    GoalExceedsCapacity { goal: Liters },

    #[error("goal {goal} is not a multiple of {divisor}")]
    NotMultipleOfGcd { goal: Liters, divisor: Liters },
}

/// Greatest common divisor; `gcd(0, 0)` is 0
pub fn gcd(mut a: Liters, mut b: Liters) -> Liters {
    while b != 0 {
        let rem = a % b;
        a = b;
        b = rem;
    }
    a
}

/// Check whether the goal is reachable at all
pub fn check(problem: &Problem) -> Result<(), Infeasibility> {
    if problem.validate().is_err() {
        let bucket = if problem.capacity_one == 0 {
            Bucket::One
        } else {
            Bucket::Two
        };
        return Err(Infeasibility::ZeroCapacity { bucket });
    }

    let goal = problem.goal;
    if goal > problem.capacity_one && goal > problem.capacity_two {
        return Err(Infeasibility::GoalExceedsCapacity { goal });
    }

    let divisor = gcd(problem.capacity_one, problem.capacity_two);
    if goal % divisor != 0 {
        return Err(Infeasibility::NotMultipleOfGcd { goal, divisor });
    }

    Ok(())
}
