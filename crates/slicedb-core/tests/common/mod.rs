#![allow(dead_code)]

use slicedb_core::{
    db::{
        SliceSession,
        row::{Row, RowDecodeError},
        store::MemoryStore,
    },
    model::{
        entity::EntityModel,
        field::{ClusteringFieldModel, FieldKind, KeyFieldModel},
    },
    traits::{EntityKind, EntityValue, Path},
    value::Value,
};

///
/// Message
/// chat messages partitioned by (channel, day), clustered by posted time
///

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub channel: String,
    pub day: i64,
    pub posted_at: i64,
    pub body: String,
}

impl Message {
    pub fn new(channel: &str, day: i64, posted_at: i64, body: &str) -> Self {
        Self {
            channel: channel.to_string(),
            day,
            posted_at,
            body: body.to_string(),
        }
    }
}

impl Path for Message {
    const PATH: &'static str = "tests::Message";
}

impl EntityKind for Message {
    const MODEL: &'static EntityModel = &EntityModel::new(
        Self::PATH,
        "message",
        &[
            KeyFieldModel::new("channel", FieldKind::Text),
            KeyFieldModel::new("day", FieldKind::Int),
        ],
        &[ClusteringFieldModel::asc("posted_at", FieldKind::Timestamp)],
    );
}

impl EntityValue for Message {
    fn to_row(&self) -> Row {
        Row::new()
            .with("channel", self.channel.as_str())
            .with("day", self.day)
            .with("posted_at", Value::Timestamp(self.posted_at))
            .with("body", self.body.as_str())
    }

    fn from_row(row: &Row) -> Result<Self, RowDecodeError> {
        Ok(Self {
            channel: row.text("channel")?.to_string(),
            day: row.int("day")?,
            posted_at: row.timestamp("posted_at")?,
            body: row.text("body")?.to_string(),
        })
    }
}

/// Session over a store holding two days of `#general` and one of `#ops`.
pub fn message_session() -> SliceSession<MemoryStore> {
    let store = MemoryStore::new();
    store
        .insert_all(&[
            Message::new("general", 1, 100, "morning"),
            Message::new("general", 1, 200, "standup"),
            Message::new("general", 1, 300, "lunch"),
            Message::new("general", 1, 400, "review"),
            Message::new("general", 1, 500, "bye"),
            Message::new("general", 2, 150, "again"),
            Message::new("general", 2, 250, "deploy"),
            Message::new("ops", 1, 120, "page"),
        ])
        .expect("seed messages");

    SliceSession::with_defaults(store)
}

pub fn bodies(rows: impl IntoIterator<Item = Message>) -> Vec<String> {
    rows.into_iter().map(|m| m.body).collect()
}
