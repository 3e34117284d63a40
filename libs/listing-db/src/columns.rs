use std::collections::HashMap;

use sea_orm::EntityTrait;

use crate::error::ComposeError;

/// Per-entity mapping from whitelisted field names to typed columns.
///
/// Second, independent safety layer under the sort whitelist: the structured
/// composer never touches a column that is not explicitly listed here, so a
/// registry/entity mismatch surfaces as [`ComposeError::UnmappedField`]
/// instead of leaking an identifier into SQL.
#[derive(Clone)]
pub struct SortColumnMap<E: EntityTrait> {
    map: HashMap<&'static str, E::Column>,
}

impl<E: EntityTrait> Default for SortColumnMap<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EntityTrait> SortColumnMap<E> {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    pub fn insert(mut self, field: &'static str, col: E::Column) -> Self {
        self.map.insert(field, col);
        self
    }

    pub fn get(&self, field: &str) -> Option<&E::Column> {
        self.map.get(field)
    }

    pub fn resolve(&self, field: &str) -> Result<E::Column, ComposeError>
    where
        E::Column: Copy,
    {
        self.map
            .get(field)
            .copied()
            .ok_or_else(|| ComposeError::UnmappedField(field.to_string()))
    }
}
