use async_trait::async_trait;

use crate::error::StorageError;
use crate::model::{
    Achievement, ClubYardages, Course, EarnedAchievement, HoleNumber, NewCourse, OwnerId,
    RoundWithCourse, YardageChange,
};
use crate::score::RoundSummary;

pub mod sqlite;

pub use sqlite::SqliteStorage;

/// Result of asking to start play.
#[derive(Debug, Clone, PartialEq)]
pub struct StartedRound {
    pub entry: RoundWithCourse,
    /// `false` when the owner already had a round in progress, which is
    /// returned instead of creating a second one.
    pub created: bool,
}

/// Result of one hole-score submission.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreUpdate {
    pub entry: RoundWithCourse,
    pub summary: RoundSummary,
    /// This submission filled the last hole.
    pub newly_completed: bool,
    /// Badges earned by completing the round, empty otherwise.
    pub new_awards: Vec<Achievement>,
}

/// Persistent store for courses, rounds, yardages and achievements. Every
/// per-user call is scoped by the explicit `OwnerId`; a round belonging to a
/// different owner yields `StorageError::Denied`.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn create_course(&self, course: &NewCourse) -> Result<Course, StorageError>;
    async fn list_courses(&self) -> Result<Vec<Course>, StorageError>;
    async fn get_course(&self, course_id: i64) -> Result<Course, StorageError>;
    /// Also deletes every round played on the course.
    async fn delete_course(&self, course_id: i64) -> Result<(), StorageError>;

    async fn start_round(
        &self,
        owner: &OwnerId,
        course_id: i64,
    ) -> Result<StartedRound, StorageError>;
    async fn get_round(&self, owner: &OwnerId, round_id: i64)
    -> Result<RoundWithCourse, StorageError>;
    async fn open_round(&self, owner: &OwnerId) -> Result<Option<RoundWithCourse>, StorageError>;
    /// Newest first.
    async fn list_rounds(&self, owner: &OwnerId) -> Result<Vec<RoundWithCourse>, StorageError>;
    /// Completed rounds, newest first, at most `limit`.
    async fn recent_completed_rounds(
        &self,
        owner: &OwnerId,
        limit: usize,
    ) -> Result<Vec<RoundWithCourse>, StorageError>;
    /// Set or clear one hole. Completing the round and awarding achievements
    /// happen in the same transaction.
    async fn record_hole_score(
        &self,
        owner: &OwnerId,
        round_id: i64,
        hole: HoleNumber,
        score: Option<i32>,
    ) -> Result<ScoreUpdate, StorageError>;
    async fn delete_round(&self, owner: &OwnerId, round_id: i64) -> Result<(), StorageError>;

    async fn club_yardages(&self, owner: &OwnerId) -> Result<ClubYardages, StorageError>;
    async fn save_club_yardages(
        &self,
        owner: &OwnerId,
        changes: &[YardageChange],
    ) -> Result<(), StorageError>;

    async fn achievement_catalog(&self) -> Result<Vec<Achievement>, StorageError>;
    async fn earned_achievements(
        &self,
        owner: &OwnerId,
    ) -> Result<Vec<EarnedAchievement>, StorageError>;
    /// Run the evaluator again for a completed round. Returns only awards that
    /// did not exist before, so repeating it is a no-op.
    async fn reevaluate_achievements(
        &self,
        owner: &OwnerId,
        round_id: i64,
    ) -> Result<Vec<Achievement>, StorageError>;
}
