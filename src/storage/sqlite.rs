use ahash::AHashSet;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, info};

use crate::error::StorageError;
use crate::model::{
    Achievement, AchievementRule, Club, ClubYardages, Course, EarnedAchievement, HOLES,
    HoleNumber, HoleScores, NewCourse, OwnerId, Pars, Round, RoundWithCourse, YardageChange,
};
use crate::score::{RoundFacts, RoundSummary, evaluate, summarize};
use crate::storage::{ScoreUpdate, StartedRound, Storage};

const SCHEMA: [&str; 5] = [
    include_str!("../sql/schema/sqlite/01_course.sql"),
    include_str!("../sql/schema/sqlite/02_round.sql"),
    include_str!("../sql/schema/sqlite/03_user_club_yardage.sql"),
    include_str!("../sql/schema/sqlite/04_achievement.sql"),
    include_str!("../sql/schema/sqlite/05_user_achievement.sql"),
];

const COURSE_SELECT: &str = "SELECT course_id, name, pars, rating, slope FROM course";

const ROUND_SELECT: &str = "SELECT r.round_id, r.course_id, r.owner_id, r.date_played, \
     r.hole_scores, r.is_complete, c.name AS course_name, c.pars, c.rating, c.slope \
     FROM round r JOIN course c ON c.course_id = r.course_id";

/// SQLite-backed store. One connection behind a mutex; calls run on the
/// blocking pool so actix workers are not held up by disk IO.
#[derive(Clone)]
pub struct SqliteStorage {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStorage {
    /// Open (or create) the database file and apply the schema.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the file cannot be opened or the schema fails
    pub fn open(path: &str) -> Result<Self, StorageError> {
        info!(path, "opening sqlite database");
        Self::init(Connection::open(path)?)
    }

    /// # Errors
    ///
    /// Will return `Err` if the schema fails to apply
    pub fn open_in_memory() -> Result<Self, StorageError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StorageError> {
        conn.busy_timeout(Duration::from_secs(5))?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch(&SCHEMA.join("\n"))?;
        seed_achievements(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run a SQL script in one transaction, e.g. the startup script.
    ///
    /// # Errors
    ///
    /// Will return `Err` if any statement fails; nothing is applied then
    pub async fn execute_batch(&self, sql: &str) -> Result<(), StorageError> {
        let sql = sql.to_owned();
        self.interact(move |conn| {
            let tx = conn.transaction()?;
            tx.execute_batch(&sql)?;
            tx.commit()?;
            Ok(())
        })
        .await
    }

    async fn interact<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&mut Connection) -> Result<T, StorageError> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut guard = conn
                .lock()
                .map_err(|_| StorageError::Db("sqlite connection mutex poisoned".into()))?;
            f(&mut guard)
        })
        .await?
    }
}

fn seed_achievements(conn: &Connection) -> Result<(), StorageError> {
    let mut stmt = conn.prepare(
        "INSERT OR IGNORE INTO achievement (name, description, icon) VALUES (?1, ?2, ?3)",
    )?;
    for rule in AchievementRule::ALL {
        stmt.execute(params![rule.name(), rule.description(), rule.icon()])?;
    }
    Ok(())
}

#[derive(Debug, thiserror::Error)]
#[error("column {column}: {message}")]
struct ColumnError {
    column: &'static str,
    message: String,
}

fn column_error(row: &Row<'_>, column: &'static str, message: impl ToString) -> rusqlite::Error {
    let idx = row.as_ref().column_index(column).unwrap_or_default();
    rusqlite::Error::FromSqlConversionFailure(
        idx,
        Type::Text,
        Box::new(ColumnError {
            column,
            message: message.to_string(),
        }),
    )
}

fn pars_from_row(row: &Row<'_>) -> rusqlite::Result<Pars> {
    let raw: String = row.get("pars")?;
    raw.parse::<Pars>().map_err(|e| column_error(row, "pars", e))
}

fn course_from_row(row: &Row<'_>) -> rusqlite::Result<Course> {
    Ok(Course {
        course_id: row.get("course_id")?,
        name: row.get("name")?,
        pars: pars_from_row(row)?,
        rating: row.get("rating")?,
        slope: row.get("slope")?,
    })
}

fn round_with_course_from_row(row: &Row<'_>) -> rusqlite::Result<RoundWithCourse> {
    let owner_raw: String = row.get("owner_id")?;
    let owner_id = OwnerId::parse(&owner_raw)
        .ok_or_else(|| column_error(row, "owner_id", "not a valid owner token"))?;

    let scores_raw: String = row.get("hole_scores")?;
    let slots: [Option<i32>; HOLES] =
        serde_json::from_str(&scores_raw).map_err(|e| column_error(row, "hole_scores", e))?;

    let course_id: i64 = row.get("course_id")?;
    let date_played: DateTime<Utc> = row.get("date_played")?;

    Ok(RoundWithCourse {
        round: Round {
            round_id: row.get("round_id")?,
            course_id,
            owner_id,
            date_played,
            hole_scores: HoleScores::from_slots(slots),
            is_complete: row.get("is_complete")?,
        },
        course: Course {
            course_id,
            name: row.get("course_name")?,
            pars: pars_from_row(row)?,
            rating: row.get("rating")?,
            slope: row.get("slope")?,
        },
    })
}

fn insert_course(conn: &Connection, course: &NewCourse) -> Result<Course, StorageError> {
    let inserted = conn.execute(
        "INSERT INTO course (name, pars, rating, slope) VALUES (?1, ?2, ?3, ?4)",
        params![
            course.name,
            course.pars.to_db_string(),
            course.rating,
            course.slope
        ],
    );
    match inserted {
        Ok(_) => Ok(Course {
            course_id: conn.last_insert_rowid(),
            name: course.name.clone(),
            pars: course.pars,
            rating: course.rating,
            slope: course.slope,
        }),
        Err(e) => match StorageError::from(e) {
            StorageError::Conflict(_) => Err(StorageError::Conflict(format!(
                "Course \"{}\" already exists!",
                course.name
            ))),
            other => Err(other),
        },
    }
}

fn select_course(conn: &Connection, course_id: i64) -> Result<Course, StorageError> {
    conn.query_row(
        &format!("{COURSE_SELECT} WHERE course_id = ?1"),
        params![course_id],
        course_from_row,
    )
    .optional()?
    .ok_or_else(|| StorageError::NotFound(format!("course {course_id}")))
}

fn select_round(conn: &Connection, round_id: i64) -> Result<Option<RoundWithCourse>, StorageError> {
    Ok(conn
        .query_row(
            &format!("{ROUND_SELECT} WHERE r.round_id = ?1"),
            params![round_id],
            round_with_course_from_row,
        )
        .optional()?)
}

fn select_open_round(
    conn: &Connection,
    owner: &OwnerId,
) -> Result<Option<RoundWithCourse>, StorageError> {
    Ok(conn
        .query_row(
            &format!("{ROUND_SELECT} WHERE r.owner_id = ?1 AND r.is_complete = 0"),
            params![owner.as_str()],
            round_with_course_from_row,
        )
        .optional()?)
}

fn select_rounds(
    conn: &Connection,
    owner: &OwnerId,
    only_complete: bool,
    limit: Option<usize>,
) -> Result<Vec<RoundWithCourse>, StorageError> {
    let mut stmt = conn.prepare(&format!(
        "{ROUND_SELECT} WHERE r.owner_id = ?1 AND (?2 = 0 OR r.is_complete = 1) \
         ORDER BY r.date_played DESC, r.round_id DESC LIMIT ?3"
    ))?;
    // sqlite treats a negative limit as no limit
    let limit = limit.map_or(-1, |l| i64::try_from(l).unwrap_or(i64::MAX));
    let rows = stmt.query_map(
        params![owner.as_str(), only_complete, limit],
        round_with_course_from_row,
    )?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

/// Load a round and check it belongs to `owner`.
fn owned_round(
    conn: &Connection,
    owner: &OwnerId,
    round_id: i64,
) -> Result<RoundWithCourse, StorageError> {
    let entry = select_round(conn, round_id)?
        .ok_or_else(|| StorageError::NotFound(format!("round {round_id}")))?;
    if entry.round.owner_id != *owner {
        return Err(StorageError::Denied(format!(
            "round {round_id} belongs to another golfer"
        )));
    }
    Ok(entry)
}

fn select_catalog(conn: &Connection) -> Result<Vec<Achievement>, StorageError> {
    let mut stmt = conn.prepare(
        "SELECT achievement_id, name, description, icon FROM achievement ORDER BY achievement_id",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(Achievement {
            achievement_id: row.get("achievement_id")?,
            name: row.get("name")?,
            description: row.get("description")?,
            icon: row.get("icon")?,
        })
    })?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

/// Evaluate the catalog for a round that has just been marked complete and
/// record what was earned. Must run inside the completing transaction.
fn award_for_round(
    conn: &Connection,
    owner: &OwnerId,
    summary: &RoundSummary,
) -> Result<Vec<Achievement>, StorageError> {
    let completed_rounds: i64 = conn.query_row(
        "SELECT COUNT(*) FROM round WHERE owner_id = ?1 AND is_complete = 1",
        params![owner.as_str()],
        |row| row.get(0),
    )?;

    let catalog = select_catalog(conn)?;

    let already_awarded = {
        let mut stmt =
            conn.prepare("SELECT achievement_id FROM user_achievement WHERE owner_id = ?1")?;
        let ids = stmt.query_map(params![owner.as_str()], |row| row.get::<_, i64>(0))?;
        ids.collect::<Result<AHashSet<_>, _>>()?
    };

    let facts = RoundFacts::from(summary);
    let earned = evaluate(
        &catalog,
        &already_awarded,
        usize::try_from(completed_rounds).unwrap_or_default(),
        &facts,
    );

    let now = Utc::now();
    let mut stmt = conn.prepare(
        "INSERT OR IGNORE INTO user_achievement (owner_id, achievement_id, awarded_at) \
         VALUES (?1, ?2, ?3)",
    )?;
    let mut awarded = vec![];
    for achievement in earned {
        if stmt.execute(params![owner.as_str(), achievement.achievement_id, now])? == 1 {
            awarded.push(achievement.clone());
        }
    }
    if !awarded.is_empty() {
        info!(
            owner = %owner,
            awards = ?awarded.iter().map(|a| a.name.as_str()).collect::<Vec<_>>(),
            "achievements awarded"
        );
    }
    Ok(awarded)
}

#[async_trait]
impl Storage for SqliteStorage {
    async fn create_course(&self, course: &NewCourse) -> Result<Course, StorageError> {
        let course = course.clone();
        self.interact(move |conn| insert_course(conn, &course)).await
    }

    async fn list_courses(&self) -> Result<Vec<Course>, StorageError> {
        self.interact(|conn| {
            let mut stmt = conn.prepare(&format!("{COURSE_SELECT} ORDER BY name COLLATE NOCASE"))?;
            let rows = stmt.query_map([], course_from_row)?;
            Ok(rows.collect::<Result<Vec<_>, _>>()?)
        })
        .await
    }

    async fn get_course(&self, course_id: i64) -> Result<Course, StorageError> {
        self.interact(move |conn| select_course(conn, course_id))
            .await
    }

    async fn delete_course(&self, course_id: i64) -> Result<(), StorageError> {
        self.interact(move |conn| {
            let deleted = conn.execute("DELETE FROM course WHERE course_id = ?1", params![course_id])?;
            if deleted == 0 {
                return Err(StorageError::NotFound(format!("course {course_id}")));
            }
            info!(course_id, "course deleted");
            Ok(())
        })
        .await
    }

    async fn start_round(
        &self,
        owner: &OwnerId,
        course_id: i64,
    ) -> Result<StartedRound, StorageError> {
        let owner = owner.clone();
        self.interact(move |conn| {
            let tx = conn.transaction()?;
            select_course(&tx, course_id)?;

            if let Some(entry) = select_open_round(&tx, &owner)? {
                return Ok(StartedRound {
                    entry,
                    created: false,
                });
            }

            let empty = serde_json::to_string(HoleScores::default().slots())?;
            let inserted = tx.execute(
                "INSERT INTO round (course_id, owner_id, date_played, hole_scores, is_complete) \
                 VALUES (?1, ?2, ?3, ?4, 0)",
                params![course_id, owner.as_str(), Utc::now(), empty],
            );
            let started = match inserted {
                Ok(_) => {
                    let round_id = tx.last_insert_rowid();
                    let entry = select_round(&tx, round_id)?
                        .ok_or_else(|| StorageError::NotFound(format!("round {round_id}")))?;
                    StartedRound {
                        entry,
                        created: true,
                    }
                }
                // lost a race with another start for the same owner
                Err(e) => match StorageError::from(e) {
                    StorageError::Conflict(_) => {
                        let entry = select_open_round(&tx, &owner)?.ok_or_else(|| {
                            StorageError::Conflict("round already in progress".into())
                        })?;
                        StartedRound {
                            entry,
                            created: false,
                        }
                    }
                    other => return Err(other),
                },
            };
            tx.commit()?;
            if started.created {
                info!(owner = %owner, round_id = started.entry.round.round_id, course_id, "round started");
            }
            Ok(started)
        })
        .await
    }

    async fn get_round(
        &self,
        owner: &OwnerId,
        round_id: i64,
    ) -> Result<RoundWithCourse, StorageError> {
        let owner = owner.clone();
        self.interact(move |conn| owned_round(conn, &owner, round_id))
            .await
    }

    async fn open_round(&self, owner: &OwnerId) -> Result<Option<RoundWithCourse>, StorageError> {
        let owner = owner.clone();
        self.interact(move |conn| select_open_round(conn, &owner))
            .await
    }

    async fn list_rounds(&self, owner: &OwnerId) -> Result<Vec<RoundWithCourse>, StorageError> {
        let owner = owner.clone();
        self.interact(move |conn| select_rounds(conn, &owner, false, None))
            .await
    }

    async fn recent_completed_rounds(
        &self,
        owner: &OwnerId,
        limit: usize,
    ) -> Result<Vec<RoundWithCourse>, StorageError> {
        let owner = owner.clone();
        self.interact(move |conn| select_rounds(conn, &owner, true, Some(limit)))
            .await
    }

    async fn record_hole_score(
        &self,
        owner: &OwnerId,
        round_id: i64,
        hole: HoleNumber,
        score: Option<i32>,
    ) -> Result<ScoreUpdate, StorageError> {
        let owner = owner.clone();
        self.interact(move |conn| {
            let tx = conn.transaction()?;
            let mut entry = owned_round(&tx, &owner, round_id)?;
            if entry.round.is_complete {
                return Err(StorageError::Invalid(format!(
                    "round {round_id} is already complete"
                )));
            }

            entry.round.hole_scores.set(hole, score);
            let summary = summarize(&entry.round.hole_scores, &entry.course.pars);
            let scores_json = serde_json::to_string(entry.round.hole_scores.slots())?;
            tx.execute(
                "UPDATE round SET hole_scores = ?1, is_complete = ?2 WHERE round_id = ?3",
                params![scores_json, summary.is_complete, round_id],
            )?;
            debug!(round_id, hole = hole.get(), ?score, "hole score recorded");

            let mut new_awards = vec![];
            if summary.is_complete {
                entry.round.is_complete = true;
                new_awards = award_for_round(&tx, &owner, &summary)?;
                info!(
                    owner = %owner,
                    round_id,
                    total = summary.total_score,
                    to_par = summary.score_to_par,
                    "round complete"
                );
            }
            tx.commit()?;

            Ok(ScoreUpdate {
                entry,
                summary,
                newly_completed: summary.is_complete,
                new_awards,
            })
        })
        .await
    }

    async fn delete_round(&self, owner: &OwnerId, round_id: i64) -> Result<(), StorageError> {
        let owner = owner.clone();
        self.interact(move |conn| {
            let tx = conn.transaction()?;
            owned_round(&tx, &owner, round_id)?;
            tx.execute("DELETE FROM round WHERE round_id = ?1", params![round_id])?;
            tx.commit()?;
            info!(owner = %owner, round_id, "round deleted");
            Ok(())
        })
        .await
    }

    async fn club_yardages(&self, owner: &OwnerId) -> Result<ClubYardages, StorageError> {
        let owner = owner.clone();
        self.interact(move |conn| {
            let mut stmt = conn
                .prepare("SELECT club_name, yardage FROM user_club_yardage WHERE owner_id = ?1")?;
            let rows = stmt.query_map(params![owner.as_str()], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, u32>(1)?))
            })?;
            let mut yardages = ClubYardages::new();
            for row in rows {
                let (club_name, yards) = row?;
                match Club::from_name(&club_name) {
                    Some(club) => yardages.insert(club, yards),
                    None => debug!(club_name = %club_name, "ignoring yardage for unknown club"),
                }
            }
            Ok(yardages)
        })
        .await
    }

    async fn save_club_yardages(
        &self,
        owner: &OwnerId,
        changes: &[YardageChange],
    ) -> Result<(), StorageError> {
        let owner = owner.clone();
        let changes = changes.to_vec();
        self.interact(move |conn| {
            let tx = conn.transaction()?;
            {
                let mut upsert = tx.prepare(
                    "INSERT INTO user_club_yardage (owner_id, club_name, yardage) VALUES (?1, ?2, ?3) \
                     ON CONFLICT (owner_id, club_name) DO UPDATE SET yardage = excluded.yardage",
                )?;
                let mut delete = tx
                    .prepare("DELETE FROM user_club_yardage WHERE owner_id = ?1 AND club_name = ?2")?;
                for change in &changes {
                    match change.yards {
                        Some(yards) => {
                            upsert.execute(params![owner.as_str(), change.club.name(), yards])?;
                        }
                        None => {
                            delete.execute(params![owner.as_str(), change.club.name()])?;
                        }
                    }
                }
            }
            tx.commit()?;
            info!(owner = %owner, "club yardages saved");
            Ok(())
        })
        .await
    }

    async fn achievement_catalog(&self) -> Result<Vec<Achievement>, StorageError> {
        self.interact(|conn| select_catalog(conn)).await
    }

    async fn earned_achievements(
        &self,
        owner: &OwnerId,
    ) -> Result<Vec<EarnedAchievement>, StorageError> {
        let owner = owner.clone();
        self.interact(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT a.achievement_id, a.name, a.description, a.icon, ua.awarded_at \
                 FROM user_achievement ua JOIN achievement a ON a.achievement_id = ua.achievement_id \
                 WHERE ua.owner_id = ?1 ORDER BY ua.awarded_at, a.achievement_id",
            )?;
            let rows = stmt.query_map(params![owner.as_str()], |row| {
                Ok(EarnedAchievement {
                    achievement: Achievement {
                        achievement_id: row.get("achievement_id")?,
                        name: row.get("name")?,
                        description: row.get("description")?,
                        icon: row.get("icon")?,
                    },
                    awarded_at: row.get("awarded_at")?,
                })
            })?;
            Ok(rows.collect::<Result<Vec<_>, _>>()?)
        })
        .await
    }

    async fn reevaluate_achievements(
        &self,
        owner: &OwnerId,
        round_id: i64,
    ) -> Result<Vec<Achievement>, StorageError> {
        let owner = owner.clone();
        self.interact(move |conn| {
            let tx = conn.transaction()?;
            let entry = owned_round(&tx, &owner, round_id)?;
            if !entry.round.is_complete {
                return Err(StorageError::Invalid(format!(
                    "round {round_id} is not complete"
                )));
            }
            let awarded = award_for_round(&tx, &owner, &entry.summary())?;
            tx.commit()?;
            Ok(awarded)
        })
        .await
    }
}
