//! twobucket Core - Two-bucket water-measuring puzzle solver
//!
//! This crate provides the puzzle types, the arithmetic feasibility
//! pre-check and the breadth-first `BucketSearch` engine used by the
//! `twobucket` CLI.

// Clippy pedantic allows - these are intentional design choices
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod feasibility;
pub mod search;
pub mod state;
pub mod types;

pub use error::{BucketError, Result};
pub use feasibility::{gcd, Infeasibility};
pub use search::{measure, solve, BucketSearch, Outcome, SearchReport};
pub use state::{Move, State, Step};
pub use types::{Bucket, BucketStats, Liters, Measurement, Problem};
