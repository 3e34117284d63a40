use std::collections::HashMap;

/// The set of field names an entity permits in client-driven ordering.
///
/// Declared as compile-time constants by the owning module and registered
/// into a [`SortSpecRegistry`] at startup; never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    entity: &'static str,
    fields: &'static [&'static str],
}

static EMPTY_SPEC: SortSpec = SortSpec::new("", &[]);

impl SortSpec {
    pub const fn new(entity: &'static str, fields: &'static [&'static str]) -> Self {
        Self { entity, fields }
    }

    pub fn entity(&self) -> &'static str {
        self.entity
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.iter().any(|f| *f == field)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &'static [&'static str] {
        self.fields
    }
}

/// Per-entity whitelist of orderable field names.
///
/// The only source of truth for which identifiers may appear in an
/// `ORDER BY`. Built once at startup, shared read-only across request
/// handlers; concurrent reads need no synchronization.
#[derive(Debug, Clone, Default)]
pub struct SortSpecRegistry {
    specs: HashMap<&'static str, SortSpec>,
}

impl SortSpecRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, spec: SortSpec) -> Self {
        self.specs.insert(spec.entity(), spec);
        self
    }

    /// Look up the sortable fields of an entity.
    ///
    /// An entity that was never registered is treated as "no fields
    /// orderable", not as an error.
    pub fn allowed_fields(&self, entity: &str) -> &SortSpec {
        self.specs.get(entity).unwrap_or(&EMPTY_SPEC)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const USER_SPEC: SortSpec = SortSpec::new("user", &["name", "created_at"]);

    #[test]
    fn registry_lookup_returns_registered_spec() {
        let registry = SortSpecRegistry::new().register(USER_SPEC);
        let spec = registry.allowed_fields("user");
        assert_eq!(spec.entity(), "user");
        assert!(spec.contains("name"));
        assert!(!spec.contains("ssn"));
    }

    #[test]
    fn unknown_entity_yields_empty_spec() {
        let registry = SortSpecRegistry::new().register(USER_SPEC);
        let spec = registry.allowed_fields("widget");
        assert!(spec.is_empty());
        assert!(!spec.contains("name"));
    }
}
