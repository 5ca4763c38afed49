#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;

use golf_caddie::caddie::{CompletionClient, CompletionRequest};
use golf_caddie::error::{CompletionError, StorageError};
use golf_caddie::model::{Course, DEFAULT_PARS, HoleNumber, NewCourse, OwnerId, Pars};
use golf_caddie::storage::{ScoreUpdate, SqliteStorage, Storage};

pub struct TestContext {
    pub storage: SqliteStorage,
    pub owner: OwnerId,
}

/// A fresh in-memory store with the schema applied, plus an extra fixture
/// script.
pub async fn setup_test_context(fixture_sql: &str) -> Result<TestContext, StorageError> {
    let storage = SqliteStorage::open_in_memory()?;
    if !fixture_sql.trim().is_empty() {
        storage.execute_batch(fixture_sql).await?;
    }
    Ok(TestContext {
        storage,
        owner: OwnerId::mint(),
    })
}

pub fn par_72() -> Pars {
    DEFAULT_PARS.parse().expect("default pars parse")
}

pub async fn add_course(
    storage: &SqliteStorage,
    name: &str,
    rating: f64,
    slope: i32,
) -> Result<Course, StorageError> {
    storage
        .create_course(&NewCourse {
            name: name.to_string(),
            pars: par_72(),
            rating,
            slope,
        })
        .await
}

/// Each hole played at `par + offset[hole]`.
pub fn scores_from_offsets(pars: &Pars, offsets: [i32; 18]) -> [i32; 18] {
    let mut scores = [0; 18];
    for (idx, offset) in offsets.iter().enumerate() {
        scores[idx] = pars.at(idx) + offset;
    }
    scores
}

/// `bogeys` holes at bogey, the rest at par, on a par 72.
pub fn bogey_round(bogeys: usize) -> [i32; 18] {
    let mut offsets = [0; 18];
    for slot in offsets.iter_mut().take(bogeys) {
        *slot = 1;
    }
    scores_from_offsets(&par_72(), offsets)
}

/// Start a round and enter every hole, returning the update for the last one.
pub async fn play_round(
    storage: &SqliteStorage,
    owner: &OwnerId,
    course_id: i64,
    scores: [i32; 18],
) -> Result<ScoreUpdate, StorageError> {
    let started = storage.start_round(owner, course_id).await?;
    let round_id = started.entry.round.round_id;
    let mut last = None;
    for (hole, strokes) in HoleNumber::all().zip(scores) {
        last = Some(
            storage
                .record_hole_score(owner, round_id, hole, Some(strokes))
                .await?,
        );
    }
    last.ok_or_else(|| StorageError::Invalid("no holes played".into()))
}

/// Answers every request the same way and keeps what it was asked.
pub struct StubCaddie {
    reply: Result<String, CompletionError>,
    pub seen: Mutex<Vec<CompletionRequest>>,
}

impl StubCaddie {
    pub fn answering(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            seen: Mutex::new(vec![]),
        }
    }

    pub fn failing(err: CompletionError) -> Self {
        Self {
            reply: Err(err),
            seen: Mutex::new(vec![]),
        }
    }

    pub fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionClient for StubCaddie {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        self.seen.lock().unwrap().push(request.clone());
        self.reply.clone()
    }
}
