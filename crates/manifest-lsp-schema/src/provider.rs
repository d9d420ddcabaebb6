//! Cached access to the bundled manifest schema.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::example::EXAMPLE_MANIFEST;
use crate::schema::Schema;

/// Build-once, publish-atomically holder for the process-wide schema.
///
/// The schema is built from the bundled example manifest on first use and
/// shared immutably afterwards. Concurrent first calls serialize on the
/// write lock so readers only ever observe a fully built schema.
pub struct SchemaProvider {
    cached: RwLock<Option<Arc<Schema>>>,
}

impl SchemaProvider {
    pub fn new() -> Self {
        SchemaProvider {
            cached: RwLock::new(None),
        }
    }

    /// Get the schema, building it on first call.
    pub fn get(&self) -> Arc<Schema> {
        if let Some(schema) = self.cached.read().clone() {
            return schema;
        }

        let mut slot = self.cached.write();
        // Another caller may have filled the slot while we waited
        if let Some(schema) = slot.as_ref() {
            return schema.clone();
        }

        let schema = Arc::new(
            Schema::parse(EXAMPLE_MANIFEST).expect("bundled example manifest must parse"),
        );
        tracing::debug!(
            tables = schema.top_level_keys(false).len(),
            array_tables = schema.top_level_keys(true).len(),
            "built manifest key schema"
        );
        *slot = Some(schema.clone());
        schema
    }

    /// Drop the cached schema so the next `get` rebuilds it.
    ///
    /// Only needed when the schema source changes (e.g. tests swapping the
    /// bundled example); normal operation never invalidates.
    pub fn invalidate(&self) {
        self.cached.write().take();
    }
}

impl Default for SchemaProvider {
    fn default() -> Self {
        Self::new()
    }
}
