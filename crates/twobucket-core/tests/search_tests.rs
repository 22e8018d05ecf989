//! Integration tests for BucketSearch
//! Canonical puzzle answers and trace checks, complementing the inline
//! unit tests in src/search.rs

use twobucket_core::{
    measure, solve, Bucket, BucketSearch, BucketStats, Measurement, Move, Outcome, Problem, State,
};

#[test]
fn test_three_and_five_start_with_one() {
    assert_eq!(
        solve(3, 5, 1, &Bucket::One),
        Some(BucketStats {
            moves: 4,
            goal_bucket: Bucket::One,
            other_bucket: 5,
        })
    );
}

#[test]
fn test_three_and_five_start_with_two() {
    assert_eq!(
        solve(3, 5, 1, &Bucket::Two),
        Some(BucketStats {
            moves: 8,
            goal_bucket: Bucket::Two,
            other_bucket: 3,
        })
    );
}

#[test]
fn test_seven_and_eleven_start_with_one() {
    assert_eq!(
        solve(7, 11, 2, &Bucket::One),
        Some(BucketStats {
            moves: 14,
            goal_bucket: Bucket::One,
            other_bucket: 11,
        })
    );
}

#[test]
fn test_seven_and_eleven_start_with_two() {
    assert_eq!(
        solve(7, 11, 2, &Bucket::Two),
        Some(BucketStats {
            moves: 18,
            goal_bucket: Bucket::Two,
            other_bucket: 7,
        })
    );
}

#[test]
fn test_goal_equal_to_start_bucket() {
    assert_eq!(
        solve(1, 3, 3, &Bucket::Two),
        Some(BucketStats {
            moves: 1,
            goal_bucket: Bucket::Two,
            other_bucket: 0,
        })
    );
}

#[test]
fn test_goal_equal_to_other_bucket() {
    assert_eq!(
        solve(2, 3, 3, &Bucket::One),
        Some(BucketStats {
            moves: 2,
            goal_bucket: Bucket::Two,
            other_bucket: 2,
        })
    );
}

#[test]
fn test_not_possible_to_reach_the_goal() {
    assert_eq!(solve(6, 15, 5, &Bucket::One), None);
}

#[test]
fn test_same_buckets_different_goal_is_possible() {
    assert_eq!(
        solve(6, 15, 9, &Bucket::One),
        Some(BucketStats {
            moves: 10,
            goal_bucket: Bucket::Two,
            other_bucket: 0,
        })
    );
}

#[test]
fn test_goal_larger_than_both_buckets() {
    assert_eq!(solve(5, 7, 8, &Bucket::One), None);
    assert_eq!(measure(5, 7, 8, Bucket::Two), Measurement::impossible());
}

#[test]
fn test_forbidden_state_is_never_entered() {
    // Filling bucket two straight after emptying bucket one would give (0, 5)
    let problem = Problem::new(3, 5, 5, Bucket::One).unwrap();
    let report = BucketSearch::new(problem).with_trace(true).run();

    assert_eq!(report.measurement, Measurement::reached(2, Bucket::Two, 3));
    let trace = report.trace.unwrap();
    assert_eq!(trace[1].action, Move::FillTwo);
    assert_eq!(trace[1].state, State::new(3, 5));
}

#[test]
fn test_trace_matches_move_count_and_replays() {
    let cases = [
        (3, 5, 1, Bucket::One),
        (3, 5, 1, Bucket::Two),
        (7, 11, 2, Bucket::One),
        (7, 11, 2, Bucket::Two),
        (6, 15, 9, Bucket::One),
    ];

    for (one, two, goal, start) in cases {
        let problem = Problem::new(one, two, goal, start).unwrap();
        let report = BucketSearch::new(problem).with_trace(true).run();
        let trace = report.trace.expect("trace requested");

        assert_eq!(trace.len() as u32, report.measurement.move_count);
        assert_eq!(trace[0].action, Move::fill(start));
        assert_eq!(trace[0].state, State::initial(&problem));

        // Each step must follow from the previous one
        for pair in trace.windows(2) {
            assert_eq!(pair[1].action.apply(pair[0].state, &problem), pair[1].state);
            assert!(!pair[1].state.is_forbidden(&problem));
        }

        let last = trace.last().unwrap().state;
        assert_eq!(
            last.goal_holder(goal),
            Some((report.measurement.goal_bucket, report.measurement.other_bucket_level))
        );
    }
}

#[test]
fn test_tracing_does_not_change_result() {
    let problem = Problem::new(7, 11, 2, Bucket::Two).unwrap();
    let plain = BucketSearch::new(problem).run();
    let traced = BucketSearch::new(problem).with_trace(true).run();

    assert_eq!(plain.measurement, traced.measurement);
    assert_eq!(plain.outcome, Outcome::Reached);
    assert_eq!(plain.states_visited, traced.states_visited);
}

#[test]
fn test_large_buckets() {
    let measurement = measure(97, 89, 1, Bucket::One);

    assert!(measurement.possible);
    assert!(measurement.move_count > 1);
}
