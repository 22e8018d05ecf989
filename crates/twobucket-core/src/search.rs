//! BucketSearch - breadth-first search over bucket levels

use std::collections::{HashMap, HashSet, VecDeque};

use serde::Serialize;
use tracing::{debug, warn};

use crate::feasibility::{self, Infeasibility};
use crate::state::{Move, State, Step};
use crate::types::{Bucket, BucketStats, Liters, Measurement, Problem};

/// How a search ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    /// The opening fill already measures the goal
    AlreadyAtGoal,
    /// The goal was reached during the search
    Reached,
    /// Rejected by the arithmetic pre-check, no search performed
    Infeasible { reason: Infeasibility },
    /// Frontier emptied without reaching the goal.
    /// Only possible if the pre-check and the move set disagree.
    Exhausted,
}

/// Result of a search with diagnostics
#[derive(Debug, Clone, Serialize)]
pub struct SearchReport {
    pub measurement: Measurement,
    pub outcome: Outcome,
    /// Distinct states seen before termination
    pub states_visited: usize,
    /// Moves from the opening fill to the goal, when tracing was enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<Vec<Step>>,
}

impl SearchReport {
    fn infeasible(reason: Infeasibility) -> Self {
        Self {
            measurement: Measurement::impossible(),
            outcome: Outcome::Infeasible { reason },
            states_visited: 0,
            trace: None,
        }
    }
}

/// Breadth-first solver for a single puzzle
///
/// Every call to [`BucketSearch::run`] builds its own frontier and visited
/// set, so a search value can be reused and shared between threads.
#[derive(Debug, Clone)]
pub struct BucketSearch {
    problem: Problem,
    record_trace: bool,
}

impl BucketSearch {
    pub fn new(problem: Problem) -> Self {
        Self {
            problem,
            record_trace: false,
        }
    }

    /// Record the winning move sequence
    pub fn with_trace(mut self, enabled: bool) -> Self {
        self.record_trace = enabled;
        self
    }

    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    /// Run the search to completion
    pub fn run(&self) -> SearchReport {
        let problem = &self.problem;
        debug!(
            capacity_one = problem.capacity_one,
            capacity_two = problem.capacity_two,
            goal = problem.goal,
            start = %problem.start,
            "Starting bucket search"
        );

        if let Err(reason) = feasibility::check(problem) {
            debug!("Puzzle is infeasible: {}", reason);
            return SearchReport::infeasible(reason);
        }

        let initial = State::initial(problem);
        let opening = Step {
            action: Move::fill(problem.start),
            state: initial,
        };

        if let Some((bucket, other)) = initial.goal_holder(problem.goal) {
            debug!("Goal measured by the opening fill of bucket {}", problem.start);
            return SearchReport {
                measurement: Measurement::reached(1, bucket, other),
                outcome: Outcome::AlreadyAtGoal,
                states_visited: 1,
                trace: self.record_trace.then(|| vec![opening]),
            };
        }

        let mut frontier: VecDeque<(State, u32)> = VecDeque::new();
        let mut visited: HashSet<State> = HashSet::new();
        let mut parents: HashMap<State, (State, Move)> = HashMap::new();

        frontier.push_back((initial, 1));
        visited.insert(initial);

        while let Some((current, moves)) = frontier.pop_front() {
            for action in Move::ALL {
                let next = action.apply(current, problem);

                if next.is_forbidden(problem) || visited.contains(&next) {
                    continue;
                }

                if self.record_trace {
                    parents.insert(next, (current, action));
                }

                if let Some((bucket, other)) = next.goal_holder(problem.goal) {
                    let move_count = moves + 1;
                    debug!(
                        "Goal reached in bucket {} after {} moves ({} states visited)",
                        bucket,
                        move_count,
                        visited.len()
                    );
                    return SearchReport {
                        measurement: Measurement::reached(move_count, bucket, other),
                        outcome: Outcome::Reached,
                        states_visited: visited.len() + 1,
                        trace: self
                            .record_trace
                            .then(|| rebuild_trace(&parents, opening, next)),
                    };
                }

                visited.insert(next);
                frontier.push_back((next, moves + 1));
            }
        }

        warn!(
            "Bucket search exhausted {} states without reaching goal {} despite passing the feasibility check",
            visited.len(),
            problem.goal
        );
        SearchReport {
            measurement: Measurement::impossible(),
            outcome: Outcome::Exhausted,
            states_visited: visited.len(),
            trace: None,
        }
    }
}

/// Walk the parent links back from `goal` to the opening fill
fn rebuild_trace(parents: &HashMap<State, (State, Move)>, opening: Step, goal: State) -> Vec<Step> {
    let mut steps = Vec::new();
    let mut cursor = goal;
    while let Some(&(previous, action)) = parents.get(&cursor) {
        steps.push(Step {
            action,
            state: cursor,
        });
        cursor = previous;
    }
    steps.push(opening);
    steps.reverse();
    steps
}

/// Minimal moves to measure `goal` liters, starting by filling `start`
pub fn measure(
    capacity_one: Liters,
    capacity_two: Liters,
    goal: Liters,
    start: Bucket,
) -> Measurement {
    let problem = Problem {
        capacity_one,
        capacity_two,
        goal,
        start,
    };
    BucketSearch::new(problem).run().measurement
}

/// Exercise-style interface: `None` when the goal cannot be measured
pub fn solve(
    capacity_1: Liters,
    capacity_2: Liters,
    goal: Liters,
    start_bucket: &Bucket,
) -> Option<BucketStats> {
    measure(capacity_1, capacity_2, goal, *start_bucket).into_stats()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(one: Liters, two: Liters, goal: Liters, start: Bucket) -> SearchReport {
        let problem = Problem::new(one, two, goal, start).unwrap();
        BucketSearch::new(problem).with_trace(true).run()
    }

    #[test]
    fn test_reached_outcome() {
        let report = run(3, 5, 1, Bucket::One);

        assert_eq!(report.outcome, Outcome::Reached);
        assert_eq!(report.measurement, Measurement::reached(4, Bucket::One, 5));
        assert!(report.states_visited > 1);
    }

    #[test]
    fn test_already_at_goal() {
        let report = run(1, 3, 3, Bucket::Two);

        assert_eq!(report.outcome, Outcome::AlreadyAtGoal);
        assert_eq!(report.measurement, Measurement::reached(1, Bucket::Two, 0));
        assert_eq!(
            report.trace,
            Some(vec![Step {
                action: Move::FillTwo,
                state: State::new(0, 3),
            }])
        );
    }

    #[test]
    fn test_infeasible_skips_search() {
        let report = run(6, 15, 5, Bucket::One);

        assert_eq!(
            report.outcome,
            Outcome::Infeasible {
                reason: Infeasibility::NotMultipleOfGcd { goal: 5, divisor: 3 }
            }
        );
        assert_eq!(report.states_visited, 0);
        assert!(report.trace.is_none());
        assert!(!report.measurement.possible);
    }

    #[test]
    fn test_trace_for_classic_puzzle() {
        let report = run(3, 5, 1, Bucket::One);
        let trace = report.trace.unwrap();

        let expected = vec![
            Step {
                action: Move::FillOne,
                state: State::new(3, 0),
            },
            Step {
                action: Move::PourOneIntoTwo,
                state: State::new(0, 3),
            },
            Step {
                action: Move::FillOne,
                state: State::new(3, 3),
            },
            Step {
                action: Move::PourOneIntoTwo,
                state: State::new(1, 5),
            },
        ];
        assert_eq!(trace, expected);
    }

    #[test]
    fn test_trace_disabled_by_default() {
        let problem = Problem::new(3, 5, 1, Bucket::One).unwrap();
        let report = BucketSearch::new(problem).run();

        assert!(report.trace.is_none());
        assert_eq!(report.measurement.move_count, 4);
    }

    #[test]
    fn test_zero_capacity_is_not_possible() {
        let measurement = measure(0, 5, 5, Bucket::One);
        assert!(!measurement.possible);
    }

    #[test]
    fn test_goal_zero_is_measured_by_empty_bucket() {
        assert_eq!(measure(2, 3, 0, Bucket::One), Measurement::reached(1, Bucket::Two, 2));
    }

    #[test]
    fn test_solve_wraps_measure() {
        assert_eq!(
            solve(2, 3, 3, &Bucket::One),
            Some(BucketStats {
                moves: 2,
                goal_bucket: Bucket::Two,
                other_bucket: 2,
            })
        );
        assert_eq!(solve(5, 7, 8, &Bucket::One), None);
    }

    #[test]
    fn test_report_serialization() {
        let report = run(3, 5, 1, Bucket::One);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["outcome"]["kind"], "reached");
        assert_eq!(json["measurement"]["move_count"], 4);
        assert_eq!(json["trace"][1]["action"], "pour_one_into_two");
    }
}
