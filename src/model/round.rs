use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::course::{Course, HOLES};
use crate::model::identity::OwnerId;
use crate::model::validation::{FieldError, parse_digits};
use crate::score::{RoundSummary, summarize};

/// Highest stroke count accepted for a single hole.
pub const MAX_HOLE_STROKES: i32 = 20;

/// A hole on the card, 1 through 18.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HoleNumber(u8);

impl HoleNumber {
    #[must_use]
    pub fn new(number: u8) -> Option<Self> {
        (1..=HOLES as u8).contains(&number).then_some(HoleNumber(number))
    }

    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }

    /// Zero-based slot in the score array.
    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.0) - 1
    }

    pub fn all() -> impl Iterator<Item = HoleNumber> {
        (1..=HOLES as u8).map(HoleNumber)
    }
}

impl std::fmt::Display for HoleNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The 18 score slots of a round. Unplayed holes are `None`, never zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoleScores([Option<i32>; HOLES]);

impl HoleScores {
    /// Build from raw slots; non-positive values become unfilled.
    #[must_use]
    pub fn from_slots(slots: [Option<i32>; HOLES]) -> Self {
        HoleScores(slots.map(|s| s.filter(|v| *v > 0)))
    }

    #[must_use]
    pub fn get(&self, hole: HoleNumber) -> Option<i32> {
        self.0[hole.index()].filter(|v| *v > 0)
    }

    pub fn set(&mut self, hole: HoleNumber, score: Option<i32>) {
        self.0[hole.index()] = score.filter(|v| *v > 0);
    }

    /// Filled slots as `(zero-based index, strokes)`.
    pub fn filled(&self) -> impl Iterator<Item = (usize, i32)> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(idx, s)| s.filter(|v| *v > 0).map(|v| (idx, v)))
    }

    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.filled().count()
    }

    #[must_use]
    pub fn slots(&self) -> &[Option<i32>; HOLES] {
        &self.0
    }
}

/// Read a hole-score form value. Blank, non-numeric and zero clear the hole.
///
/// # Errors
///
/// Will return `Err` if the value is a number above `MAX_HOLE_STROKES`
pub fn parse_hole_score(raw: &str) -> Result<Option<i32>, FieldError> {
    let trimmed = raw.trim();
    let too_many = || {
        FieldError::new(
            "strokes",
            format!("{trimmed} strokes is more than the {MAX_HOLE_STROKES} a hole allows."),
        )
    };
    match parse_digits(trimmed) {
        Some(0) => Ok(None),
        Some(v) if v <= MAX_HOLE_STROKES as u32 => Ok(Some(v as i32)),
        Some(_) => Err(too_many()),
        // all digits but too big for a u32
        None if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) => {
            Err(too_many())
        }
        None => Ok(None),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub round_id: i64,
    pub course_id: i64,
    pub owner_id: OwnerId,
    pub date_played: DateTime<Utc>,
    pub hole_scores: HoleScores,
    pub is_complete: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundWithCourse {
    pub round: Round,
    pub course: Course,
}

impl RoundWithCourse {
    #[must_use]
    pub fn summary(&self) -> RoundSummary {
        summarize(&self.round.hole_scores, &self.course.pars)
    }

    /// First hole without a score, which the round page focuses on.
    #[must_use]
    pub fn next_hole(&self) -> Option<HoleNumber> {
        HoleNumber::all().find(|h| self.round.hole_scores.get(*h).is_none())
    }
}
