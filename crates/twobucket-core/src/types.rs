//! Puzzle input and result types

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{BucketError, Result};

/// Volume unit for bucket capacities and levels
pub type Liters = u32;

/// One of the two buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    One,
    Two,
}

impl Bucket {
    /// The bucket that is not `self`
    pub fn other(self) -> Self {
        match self {
            Bucket::One => Bucket::Two,
            Bucket::Two => Bucket::One,
        }
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Bucket::One => write!(f, "one"),
            Bucket::Two => write!(f, "two"),
        }
    }
}

impl FromStr for Bucket {
    type Err = BucketError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "one" | "1" => Ok(Bucket::One),
            "two" | "2" => Ok(Bucket::Two),
            _ => Err(BucketError::UnknownBucket(s.to_string())),
        }
    }
}

/// A two-bucket puzzle
///
/// `start` names the bucket that is filled by the opening move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Problem {
    pub capacity_one: Liters,
    pub capacity_two: Liters,
    pub goal: Liters,
    pub start: Bucket,
}

impl Problem {
    /// Create a puzzle, rejecting empty buckets
    pub fn new(
        capacity_one: Liters,
        capacity_two: Liters,
        goal: Liters,
        start: Bucket,
    ) -> Result<Self> {
        let problem = Self {
            capacity_one,
            capacity_two,
            goal,
            start,
        };
        problem.validate()?;
        Ok(problem)
    }

    /// Check that both buckets can hold water
    pub fn validate(&self) -> Result<()> {
        if self.capacity_one == 0 {
            return Err(BucketError::ZeroCapacity { bucket: Bucket::One });
        }
        if self.capacity_two == 0 {
            return Err(BucketError::ZeroCapacity { bucket: Bucket::Two });
        }
        Ok(())
    }

    pub fn capacity(&self, bucket: Bucket) -> Liters {
        match bucket {
            Bucket::One => self.capacity_one,
            Bucket::Two => self.capacity_two,
        }
    }

    /// The same puzzle with the buckets relabelled
    pub fn mirrored(&self) -> Self {
        Self {
            capacity_one: self.capacity_two,
            capacity_two: self.capacity_one,
            goal: self.goal,
            start: self.start.other(),
        }
    }
}

/// Outcome of a measurement
///
/// `move_count`, `goal_bucket` and `other_bucket_level` are only
/// meaningful when `possible` is true.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Measurement {
    pub possible: bool,
    /// Moves taken to reach the goal, including the opening fill
    pub move_count: u32,
    /// Bucket holding the goal volume
    pub goal_bucket: Bucket,
    /// Level of the other bucket at that moment
    pub other_bucket_level: Liters,
}

impl Measurement {
    pub fn impossible() -> Self {
        Self {
            possible: false,
            move_count: 0,
            goal_bucket: Bucket::One,
            other_bucket_level: 0,
        }
    }

    pub fn reached(move_count: u32, goal_bucket: Bucket, other_bucket_level: Liters) -> Self {
        Self {
            possible: true,
            move_count,
            goal_bucket,
            other_bucket_level,
        }
    }

    /// Convert to the exercise-style result, `None` when not possible
    pub fn into_stats(self) -> Option<BucketStats> {
        self.possible.then_some(BucketStats {
            moves: self.move_count,
            goal_bucket: self.goal_bucket,
            other_bucket: self.other_bucket_level,
        })
    }
}

/// Exercise-style result returned by [`crate::solve`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketStats {
    /// The total number of moves, including the first fill
    pub moves: u32,
    /// Which bucket ends up with the desired number of liters
    pub goal_bucket: Bucket,
    /// How many liters are left in the other bucket
    pub other_bucket: Liters,
}
