//! Shared entities and executors for unit tests.

use crate::{
    db::{
        executor::{AsyncSliceExecutor, Page, PagingState, SliceExecutor},
        query::descriptor::ResolvedSlice,
        row::{Row, RowDecodeError},
        session::SliceSession,
    },
    error::InternalError,
    model::{
        entity::EntityModel,
        field::{ClusteringFieldModel, FieldKind, KeyFieldModel},
    },
    traits::{EntityKind, EntityValue, Path},
};
use async_trait::async_trait;
use parking_lot::Mutex;

///
/// ArticleRating
/// partition `article_id`, one ascending clustering column `rating`
///

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArticleRating {
    pub article_id: i64,
    pub rating: i64,
    pub user: String,
}

impl ArticleRating {
    pub fn new(article_id: i64, rating: i64, user: &str) -> Self {
        Self {
            article_id,
            rating,
            user: user.to_string(),
        }
    }
}

impl Path for ArticleRating {
    const PATH: &'static str = "test_fixtures::ArticleRating";
}

impl EntityKind for ArticleRating {
    const MODEL: &'static EntityModel = &EntityModel::new(
        Self::PATH,
        "article_rating",
        &[KeyFieldModel::new("article_id", FieldKind::Int)],
        &[ClusteringFieldModel::asc("rating", FieldKind::Int)],
    );
}

impl EntityValue for ArticleRating {
    fn to_row(&self) -> Row {
        Row::new()
            .with("article_id", self.article_id)
            .with("rating", self.rating)
            .with("user", self.user.as_str())
    }

    fn from_row(row: &Row) -> Result<Self, RowDecodeError> {
        Ok(Self {
            article_id: row.int("article_id")?,
            rating: row.int("rating")?,
            user: row.text("user")?.to_string(),
        })
    }
}

///
/// Leaderboard
/// partition `board`, clustering `score` DESC then `player` ASC
///

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Leaderboard {
    pub board: String,
    pub score: i64,
    pub player: String,
}

impl Leaderboard {
    pub fn new(board: &str, score: i64, player: &str) -> Self {
        Self {
            board: board.to_string(),
            score,
            player: player.to_string(),
        }
    }
}

impl Path for Leaderboard {
    const PATH: &'static str = "test_fixtures::Leaderboard";
}

impl EntityKind for Leaderboard {
    const MODEL: &'static EntityModel = &EntityModel::new(
        Self::PATH,
        "leaderboard",
        &[KeyFieldModel::new("board", FieldKind::Text)],
        &[
            ClusteringFieldModel::desc("score", FieldKind::Int),
            ClusteringFieldModel::asc("player", FieldKind::Text),
        ],
    );
}

impl EntityValue for Leaderboard {
    fn to_row(&self) -> Row {
        Row::new()
            .with("board", self.board.as_str())
            .with("score", self.score)
            .with("player", self.player.as_str())
    }

    fn from_row(row: &Row) -> Result<Self, RowDecodeError> {
        Ok(Self {
            board: row.text("board")?.to_string(),
            score: row.int("score")?,
            player: row.text("player")?.to_string(),
        })
    }
}

///
/// Reading
/// composite partition (`sensor`, `bucket`), clustering (`at`, `seq`)
///

#[derive(Clone, Debug, PartialEq)]
pub struct Reading {
    pub sensor: String,
    pub bucket: i64,
    pub at: i64,
    pub seq: i64,
    pub value: f64,
}

impl Reading {
    pub fn new(sensor: &str, bucket: i64, at: i64, seq: i64, value: f64) -> Self {
        Self {
            sensor: sensor.to_string(),
            bucket,
            at,
            seq,
            value,
        }
    }
}

impl Path for Reading {
    const PATH: &'static str = "test_fixtures::Reading";
}

impl EntityKind for Reading {
    const MODEL: &'static EntityModel = &EntityModel::new(
        Self::PATH,
        "reading",
        &[
            KeyFieldModel::new("sensor", FieldKind::Text),
            KeyFieldModel::new("bucket", FieldKind::Int),
        ],
        &[
            ClusteringFieldModel::asc("at", FieldKind::Timestamp),
            ClusteringFieldModel::asc("seq", FieldKind::Int),
        ],
    );
}

impl EntityValue for Reading {
    fn to_row(&self) -> Row {
        Row::new()
            .with("sensor", self.sensor.as_str())
            .with("bucket", self.bucket)
            .with("at", crate::value::Value::Timestamp(self.at))
            .with("seq", self.seq)
            .with("value", self.value)
    }

    fn from_row(row: &Row) -> Result<Self, RowDecodeError> {
        Ok(Self {
            sensor: row.text("sensor")?.to_string(),
            bucket: row.int("bucket")?,
            at: row.timestamp("at")?,
            seq: row.int("seq")?,
            value: row.float("value")?,
        })
    }
}

/// Session over a fresh `RecordingExecutor` with default config.
pub fn recording_session() -> SliceSession<RecordingExecutor> {
    SliceSession::with_defaults(RecordingExecutor::new())
}

///
/// RecordingExecutor
///
/// Captures every resolved slice it is handed and returns no rows.
/// Lets builder tests assert on resolution without a store.
///

#[derive(Debug, Default)]
pub struct RecordingExecutor {
    slices: Mutex<Vec<ResolvedSlice>>,
    pages: Mutex<Vec<u32>>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently executed slice.
    pub fn last(&self) -> ResolvedSlice {
        self.slices
            .lock()
            .last()
            .cloned()
            .expect("no slice was executed")
    }

    pub fn executed(&self) -> usize {
        self.slices.lock().len()
    }

    /// Page sizes requested through `fetch_page`, in call order.
    pub fn page_sizes(&self) -> Vec<u32> {
        self.pages.lock().clone()
    }

    fn record(&self, slice: &ResolvedSlice) {
        self.slices.lock().push(slice.clone());
    }
}

impl SliceExecutor for RecordingExecutor {
    fn get<E: EntityValue>(&self, slice: &ResolvedSlice) -> Result<Vec<E>, InternalError> {
        self.record(slice);
        Ok(Vec::new())
    }

    fn fetch_page<E: EntityValue>(
        &self,
        slice: &ResolvedSlice,
        page_size: u32,
        _state: Option<&PagingState>,
    ) -> Result<Page<E>, InternalError> {
        self.record(slice);
        self.pages.lock().push(page_size);
        Ok(Page::last(Vec::new()))
    }

    fn delete<E: EntityKind>(&self, slice: &ResolvedSlice) -> Result<(), InternalError> {
        self.record(slice);
        Ok(())
    }
}

#[async_trait]
impl AsyncSliceExecutor for RecordingExecutor {
    async fn get<E: EntityValue>(&self, slice: &ResolvedSlice) -> Result<Vec<E>, InternalError> {
        <Self as SliceExecutor>::get::<E>(self, slice)
    }

    async fn fetch_page<E: EntityValue>(
        &self,
        slice: &ResolvedSlice,
        page_size: u32,
        state: Option<&PagingState>,
    ) -> Result<Page<E>, InternalError> {
        <Self as SliceExecutor>::fetch_page::<E>(self, slice, page_size, state)
    }

    async fn delete<E: EntityKind>(&self, slice: &ResolvedSlice) -> Result<(), InternalError> {
        <Self as SliceExecutor>::delete::<E>(self, slice)
    }
}
