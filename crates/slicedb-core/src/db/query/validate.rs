//! Key-component validation.
//!
//! Checks run eagerly, as each builder stage receives values, so a malformed
//! call chain fails before any executor sees it.

use crate::{
    db::query::error::SliceError,
    model::entity::{EntityModel, KeyKind},
    value::Value,
};

///
/// KeyValidator
/// Arity and kind checks for one entity's partition and clustering keys.
///

#[derive(Clone, Copy, Debug)]
pub struct KeyValidator<'m> {
    model: &'m EntityModel,
}

impl<'m> KeyValidator<'m> {
    #[must_use]
    pub const fn new(model: &'m EntityModel) -> Self {
        Self { model }
    }

    /// Validate exact partition components, starting at the first column.
    pub fn validate_partition_components(&self, values: &[Value]) -> Result<(), SliceError> {
        self.validate_components(KeyKind::Partition, values)
    }

    /// Validate clustering components, starting at the first column.
    pub fn validate_clustering_components(&self, values: &[Value]) -> Result<(), SliceError> {
        self.validate_components(KeyKind::Clustering, values)
    }

    /// Validate an IN suffix for `key` given how many exact components are bound.
    ///
    /// The IN list always targets the last column, so exactly `arity - 1`
    /// exact components must precede it.
    pub fn validate_components_in(
        &self,
        key: KeyKind,
        bound: usize,
        values: &[Value],
    ) -> Result<(), SliceError> {
        let entity = self.model.entity_name;
        let arity = self.model.key_arity(key);
        if arity == 0 {
            return Err(SliceError::TooManyComponents {
                entity,
                key,
                max: 0,
                found: values.len(),
            });
        }

        let required = arity - 1;
        if bound != required {
            return Err(SliceError::InPrefixIncomplete {
                entity,
                key,
                required,
                found: bound,
            });
        }

        if values.is_empty() {
            let field = self
                .model
                .key_field(key, required)
                .map_or("<unknown>", |field| field.name);

            return Err(SliceError::EmptyInValues { entity, key, field });
        }

        values
            .iter()
            .try_for_each(|value| self.check_value(key, required, value))
    }

    /// Validate that the partition key is fully bound at resolution time.
    pub fn validate_partition_complete(&self, bound: usize, has_in: bool) -> Result<(), SliceError> {
        let arity = self.model.partition_arity();
        let required = if has_in { arity.saturating_sub(1) } else { arity };

        if bound == required && arity > 0 {
            Ok(())
        } else {
            Err(SliceError::IncompletePartitionKey {
                entity: self.model.entity_name,
                required: arity,
                found: if has_in { bound + 1 } else { bound },
            })
        }
    }

    fn validate_components(&self, key: KeyKind, values: &[Value]) -> Result<(), SliceError> {
        let entity = self.model.entity_name;
        if values.is_empty() {
            return Err(SliceError::EmptyComponents { entity, key });
        }

        let max = self.model.key_arity(key);
        if values.len() > max {
            return Err(SliceError::TooManyComponents {
                entity,
                key,
                max,
                found: values.len(),
            });
        }

        values
            .iter()
            .enumerate()
            .try_for_each(|(position, value)| self.check_value(key, position, value))
    }

    fn check_value(&self, key: KeyKind, position: usize, value: &Value) -> Result<(), SliceError> {
        let entity = self.model.entity_name;
        let Some(field) = self.model.key_field(key, position) else {
            return Err(SliceError::TooManyComponents {
                entity,
                key,
                max: self.model.key_arity(key),
                found: position + 1,
            });
        };

        if value.is_null() {
            return Err(SliceError::NullComponent {
                entity,
                key,
                field: field.name,
            });
        }

        if !field.kind.accepts(value) {
            return Err(SliceError::ComponentKindMismatch {
                entity,
                key,
                field: field.name,
                expected: field.kind,
                found: value.kind(),
            });
        }

        Ok(())
    }
}
