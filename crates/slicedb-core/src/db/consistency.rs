use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// ConsistencyLevel
///
/// Replica acknowledgement level requested for one statement.
/// Network semantics belong to the executor; the builder only carries it.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConsistencyLevel {
    #[display("ANY")]
    Any,
    #[default]
    #[display("ONE")]
    One,
    #[display("TWO")]
    Two,
    #[display("THREE")]
    Three,
    #[display("QUORUM")]
    Quorum,
    #[display("ALL")]
    All,
    #[display("LOCAL_QUORUM")]
    LocalQuorum,
    #[display("EACH_QUORUM")]
    EachQuorum,
    #[display("LOCAL_ONE")]
    LocalOne,
    #[display("SERIAL")]
    Serial,
    #[display("LOCAL_SERIAL")]
    LocalSerial,
}
