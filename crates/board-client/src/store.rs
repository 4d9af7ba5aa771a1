//! Normalized cache store
//!
//! Two explicit associative containers:
//!
//! - `entities`: fragment per `(typename, id)`, shared by every query result
//!   that references the same entity. A vote patch written once is visible in
//!   every view of that post without re-fetching.
//! - `queries`: one entry per `(field, serialized arguments)` invocation, in
//!   call order. Distinct cursors produce distinct entries.

use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Identity of a cached entity: `(typename, id)`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityKey {
    pub typename: &'static str,
    pub id: String,
}

impl EntityKey {
    /// Key for an arbitrary typename and id
    pub fn new(typename: &'static str, id: impl fmt::Display) -> Self {
        Self {
            typename,
            id: id.to_string(),
        }
    }

    /// Key for a post
    pub fn post(id: i64) -> Self {
        Self::new("Post", id)
    }

    /// Key for a user
    pub fn user(id: i64) -> Self {
        Self::new("User", id)
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.typename, self.id)
    }
}

/// A normalized entity fragment: the subset of fields observed so far
pub type Fragment = BTreeMap<String, Value>;

/// Identity of a cached query invocation: `(field, canonical arguments)`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub field: String,
    pub args: String,
}

impl QueryKey {
    /// Build a key from a field name and its argument object.
    ///
    /// Arguments are serialized with object keys sorted, so two argument
    /// objects that differ only in key order produce the same entry.
    pub fn new(field: &str, args: &Value) -> Self {
        Self {
            field: field.to_string(),
            args: canonical_args(args),
        }
    }
}

/// Canonical argument serialization: keys sorted recursively
fn canonical_args(args: &Value) -> String {
    fn sort(value: &Value) -> Value {
        match value {
            Value::Object(map) => {
                let sorted: BTreeMap<&String, Value> =
                    map.iter().map(|(k, v)| (k, sort(v))).collect();
                serde_json::to_value(sorted).unwrap_or(Value::Null)
            }
            Value::Array(items) => Value::Array(items.iter().map(sort).collect()),
            other => other.clone(),
        }
    }
    sort(args).to_string()
}

/// What a query invocation resolved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldLink {
    /// One feed page: entity references plus the page's continuation flag
    Page {
        refs: Vec<EntityKey>,
        has_more: bool,
    },
    /// A link to a single entity, or an explicit null (e.g. logged out)
    Entity(Option<EntityKey>),
}

/// A recorded query invocation
#[derive(Debug, Clone)]
struct QueryEntry {
    key: QueryKey,
    link: FieldLink,
}

/// The normalized cache store
#[derive(Debug, Default)]
pub struct CacheStore {
    entities: HashMap<EntityKey, Fragment>,
    // Call order matters: the pagination resolver concatenates page entries
    // in the order they were first recorded. The list stays small (one entry
    // per fetched page), so linear scans are fine.
    queries: Vec<QueryEntry>,
}

impl CacheStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Entity fragments
    // ========================================================================

    /// Merge fields into an entity fragment, creating it on first observation.
    ///
    /// Existing fields not named in `fields` are left untouched; the fragment
    /// is never replaced wholesale.
    pub fn write_fragment<I>(&mut self, key: &EntityKey, fields: I)
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        let fragment = self.entities.entry(key.clone()).or_default();
        for (name, value) in fields {
            fragment.insert(name, value);
        }
    }

    /// Read an entity fragment
    pub fn read_fragment(&self, key: &EntityKey) -> Option<&Fragment> {
        self.entities.get(key)
    }

    /// Read a single field from an entity fragment
    pub fn read_field(&self, key: &EntityKey, field: &str) -> Option<&Value> {
        self.entities.get(key).and_then(|f| f.get(field))
    }

    /// Drop an entity and prune it from every query result that references it
    pub fn evict_entity(&mut self, key: &EntityKey) {
        self.entities.remove(key);

        for entry in &mut self.queries {
            match &mut entry.link {
                FieldLink::Page { refs, .. } => refs.retain(|r| r != key),
                FieldLink::Entity(link) => {
                    if link.as_ref() == Some(key) {
                        *link = None;
                    }
                }
            }
        }
    }

    // ========================================================================
    // Query results
    // ========================================================================

    /// Record a query invocation's result.
    ///
    /// A repeat of an already-recorded `(field, args)` pair updates that
    /// entry in place, preserving its position in call order.
    pub fn write_query(&mut self, field: &str, args: &Value, link: FieldLink) {
        let key = QueryKey::new(field, args);
        if let Some(entry) = self.queries.iter_mut().find(|e| e.key == key) {
            entry.link = link;
        } else {
            self.queries.push(QueryEntry { key, link });
        }
    }

    /// Check whether an exact `(field, args)` invocation is cached
    pub fn has_invocation(&self, field: &str, args: &Value) -> bool {
        let key = QueryKey::new(field, args);
        self.queries.iter().any(|e| e.key == key)
    }

    /// Read the result of an exact `(field, args)` invocation
    pub fn read_query(&self, field: &str, args: &Value) -> Option<&FieldLink> {
        let key = QueryKey::new(field, args);
        self.queries.iter().find(|e| e.key == key).map(|e| &e.link)
    }

    /// All cached invocations of a field, in the order they were recorded
    pub fn inspect_field(&self, field: &str) -> Vec<&FieldLink> {
        self.queries
            .iter()
            .filter(|e| e.key.field == field)
            .map(|e| &e.link)
            .collect()
    }

    /// Drop every cached invocation of a field, forcing the next read to miss
    pub fn invalidate_field(&mut self, field: &str) {
        self.queries.retain(|e| e.key.field != field);
    }
}
