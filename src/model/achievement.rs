use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub achievement_id: i64,
    pub name: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarnedAchievement {
    pub achievement: Achievement,
    pub awarded_at: DateTime<Utc>,
}

/// The predicate behind each seeded badge. Catalog rows are matched to a rule
/// by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AchievementRule {
    FirstRound,
    FiveRounds,
    Broke100,
    Broke90,
    Broke80,
    FirstBirdie,
    FirstEagle,
}

impl AchievementRule {
    pub const ALL: [AchievementRule; 7] = [
        AchievementRule::FirstRound,
        AchievementRule::FiveRounds,
        AchievementRule::Broke100,
        AchievementRule::Broke90,
        AchievementRule::Broke80,
        AchievementRule::FirstBirdie,
        AchievementRule::FirstEagle,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            AchievementRule::FirstRound => "First Round",
            AchievementRule::FiveRounds => "Five Rounds",
            AchievementRule::Broke100 => "Broke 100",
            AchievementRule::Broke90 => "Broke 90",
            AchievementRule::Broke80 => "Broke 80",
            AchievementRule::FirstBirdie => "First Birdie",
            AchievementRule::FirstEagle => "First Eagle",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            AchievementRule::FirstRound => "Complete your first 18-hole round.",
            AchievementRule::FiveRounds => "Complete five 18-hole rounds.",
            AchievementRule::Broke100 => "Finish a round under 100.",
            AchievementRule::Broke90 => "Finish a round under 90.",
            AchievementRule::Broke80 => "Finish a round under 80.",
            AchievementRule::FirstBirdie => "Score one under par on a hole.",
            AchievementRule::FirstEagle => "Score two or more under par on a hole.",
        }
    }

    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            AchievementRule::FirstRound => "⛳",
            AchievementRule::FiveRounds => "🏌",
            AchievementRule::Broke100 => "💯",
            AchievementRule::Broke90 => "🎯",
            AchievementRule::Broke80 => "🏆",
            AchievementRule::FirstBirdie => "🐦",
            AchievementRule::FirstEagle => "🦅",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        AchievementRule::ALL.into_iter().find(|r| r.name() == name)
    }
}
