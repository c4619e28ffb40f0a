use crate::traits::EntityKind;
use derive_more::{Deref, IntoIterator};
use thiserror::Error as ThisError;

///
/// ResponseError
/// Errors related to interpreting a materialized response.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ResponseError {
    #[error("expected exactly one row, found 0 (entity {entity})")]
    NotFound { entity: &'static str },

    #[error("expected exactly one row, found {count} (entity {entity})")]
    NotUnique { entity: &'static str, count: u32 },
}

///
/// Response
/// Materialized slice result, in the order the executor returned it.
///

#[derive(Debug, Deref, IntoIterator)]
pub struct Response<E: EntityKind>(#[into_iterator(owned, ref)] Vec<E>);

impl<E: EntityKind> Response<E> {
    #[must_use]
    pub const fn new(rows: Vec<E>) -> Self {
        Self(rows)
    }

    //
    // Cardinality
    //

    #[must_use]
    /// Number of rows in the response, truncated to `u32`.
    #[allow(clippy::cast_possible_truncation)]
    pub const fn count(&self) -> u32 {
        self.0.len() as u32
    }

    #[must_use]
    /// True when no rows were returned.
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    //
    // Exact cardinality helpers
    //

    /// Require exactly one row.
    pub fn require_one(self) -> Result<E, ResponseError> {
        let count = self.count();
        let mut rows = self.0.into_iter();

        match (rows.next(), count) {
            (Some(row), 1) => Ok(row),
            (None, _) => Err(ResponseError::NotFound {
                entity: E::MODEL.entity_name,
            }),
            (Some(_), _) => Err(ResponseError::NotUnique {
                entity: E::MODEL.entity_name,
                count,
            }),
        }
    }

    /// Require at most one row.
    pub fn try_one(self) -> Result<Option<E>, ResponseError> {
        if self.count() > 1 {
            return Err(ResponseError::NotUnique {
                entity: E::MODEL.entity_name,
                count: self.count(),
            });
        }

        Ok(self.0.into_iter().next())
    }

    /// Fail with `NotFound` when the response is empty.
    pub fn require_some(self) -> Result<Self, ResponseError> {
        if self.is_empty() {
            Err(ResponseError::NotFound {
                entity: E::MODEL.entity_name,
            })
        } else {
            Ok(self)
        }
    }

    //
    // Entities
    //

    #[must_use]
    /// Borrow the first entity, if any.
    pub fn first(&self) -> Option<&E> {
        self.0.first()
    }

    #[must_use]
    /// Consume the response and collect all entities.
    pub fn entities(self) -> Vec<E> {
        self.0
    }
}
