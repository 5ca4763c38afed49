use ahash::AHashSet;

use crate::model::achievement::{Achievement, AchievementRule};
use crate::score::scoring::RoundSummary;

/// What the rules need to know about the round that was just completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundFacts {
    pub total_score: i32,
    pub has_birdie: bool,
    pub has_eagle: bool,
}

impl From<&RoundSummary> for RoundFacts {
    fn from(summary: &RoundSummary) -> Self {
        RoundFacts {
            total_score: summary.total_score,
            has_birdie: summary.has_birdie,
            has_eagle: summary.has_eagle,
        }
    }
}

impl AchievementRule {
    /// `completed_rounds` includes the round being evaluated.
    #[must_use]
    pub fn is_met(self, completed_rounds: usize, round: &RoundFacts) -> bool {
        match self {
            AchievementRule::FirstRound => completed_rounds >= 1,
            AchievementRule::FiveRounds => completed_rounds >= 5,
            AchievementRule::Broke100 => round.total_score < 100,
            AchievementRule::Broke90 => round.total_score < 90,
            AchievementRule::Broke80 => round.total_score < 80,
            AchievementRule::FirstBirdie => round.has_birdie,
            AchievementRule::FirstEagle => round.has_eagle,
        }
    }
}

/// Catalog entries newly earned by this round. Entries already awarded, and
/// entries whose name maps to no rule, are skipped.
#[must_use]
pub fn evaluate<'a>(
    catalog: &'a [Achievement],
    already_awarded: &AHashSet<i64>,
    completed_rounds: usize,
    round: &RoundFacts,
) -> Vec<&'a Achievement> {
    catalog
        .iter()
        .filter(|a| !already_awarded.contains(&a.achievement_id))
        .filter(|a| {
            AchievementRule::from_name(&a.name)
                .is_some_and(|rule| rule.is_met(completed_rounds, round))
        })
        .collect()
}
