use serde::{Deserialize, Serialize};

use crate::model::course::HOLES;
use crate::model::round::{HoleScores, RoundWithCourse};

/// Only the most recent rounds count toward the index.
pub const MAX_HANDICAP_ROUNDS: usize = 20;
/// Slope of a course of standard difficulty.
pub const STANDARD_SLOPE: f64 = 113.0;

/// One completed round as the calculator sees it.
#[derive(Debug, Clone, Copy)]
pub struct HandicapRound<'a> {
    pub scores: &'a HoleScores,
    pub rating: f64,
    pub slope: i32,
}

impl<'a> From<&'a RoundWithCourse> for HandicapRound<'a> {
    fn from(entry: &'a RoundWithCourse) -> Self {
        HandicapRound {
            scores: &entry.round.hole_scores,
            rating: entry.course.rating,
            slope: entry.course.slope,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandicapIndex {
    pub index: f64,
    pub differentials_used: usize,
    pub eligible_rounds: usize,
}

/// `(total_score - rating) * 113 / slope`
#[must_use]
pub fn differential(total_score: i32, rating: f64, slope: i32) -> f64 {
    (f64::from(total_score) - rating) * STANDARD_SLOPE / f64::from(slope)
}

/// How many of the lowest differentials are averaged for `eligible` rounds.
/// A simplified ladder, kept as-is rather than the full official table.
#[must_use]
pub fn differentials_to_use(eligible: usize) -> usize {
    match eligible {
        0..=2 => 1,
        3..=4 => 2,
        5..=7 => eligible / 2,
        _ => 8,
    }
}

/// Handicap index over the given rounds, most recent first. Rounds past
/// `MAX_HANDICAP_ROUNDS`, rounds without all 18 holes scored, and rounds on a
/// course with a non-positive slope are ignored. `None` when nothing is
/// eligible.
#[must_use]
pub fn handicap_index(rounds: &[HandicapRound<'_>]) -> Option<HandicapIndex> {
    let mut differentials = rounds
        .iter()
        .take(MAX_HANDICAP_ROUNDS)
        .filter(|r| r.slope > 0 && r.scores.filled_count() == HOLES)
        .map(|r| {
            let total: i32 = r.scores.filled().map(|(_, s)| s).sum();
            differential(total, r.rating, r.slope)
        })
        .collect::<Vec<_>>();

    if differentials.is_empty() {
        return None;
    }

    differentials.sort_by(f64::total_cmp);
    let eligible_rounds = differentials.len();
    let differentials_used = differentials_to_use(eligible_rounds).min(eligible_rounds);
    let best = &differentials[..differentials_used];
    let mean = best.iter().sum::<f64>() / best.len() as f64;

    Some(HandicapIndex {
        index: round_to_tenth(mean),
        differentials_used,
        eligible_rounds,
    })
}

/// Convenience over stored rounds joined with their courses.
#[must_use]
pub fn handicap_for_rounds(rounds: &[RoundWithCourse]) -> Option<HandicapIndex> {
    let inputs = rounds.iter().map(HandicapRound::from).collect::<Vec<_>>();
    handicap_index(&inputs)
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
