//! Feed pagination resolver
//!
//! Reconstructs the single logical "infinite list" from the per-request page
//! fragments the store holds. Each `(limit, cursor)` invocation stays a
//! separate entry; the resolver concatenates them in call order and performs
//! no sorting of its own.
//!
//! Caller contract: pages must be requested in decreasing-recency order
//! (each request using the cursor the previous page returned). The resolver
//! cannot detect an out-of-order cursor; feeding it one corrupts the merged
//! view.

use serde_json::Value;
use tracing::debug;

use crate::store::{CacheStore, EntityKey, FieldLink};

/// The query field the feed lives under
pub const FEED_FIELD: &str = "posts";

/// The resolver's merged view of every fetched feed page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedView {
    /// Entity references of every page, concatenated in call order
    pub post_refs: Vec<EntityKey>,
    /// Logical AND of all pages' flags: one exhausted page makes the whole
    /// list exhausted
    pub has_more: bool,
    /// True when the exact requested `(field, args)` page is not cached yet;
    /// the merged view can render while the missing page is fetched
    pub partial: bool,
}

/// Resolve the feed for a pagination request against the cache alone.
///
/// Returns `None` when no invocation of the field is cached at all - a full
/// network fetch is required. This is a pure read; recording the fetched page
/// afterwards is the explicit write-back step ([`write_feed_page`]).
pub fn resolve_feed(store: &CacheStore, field: &str, args: &Value) -> Option<FeedView> {
    let invocations = store.inspect_field(field);
    if invocations.is_empty() {
        return None;
    }

    let partial = !store.has_invocation(field, args);

    let mut has_more = true;
    let mut post_refs = Vec::new();
    for link in invocations {
        if let FieldLink::Page { refs, has_more: page_has_more } = link {
            if !page_has_more {
                has_more = false;
            }
            post_refs.extend(refs.iter().cloned());
        }
    }

    debug!(
        field = field,
        pages = store.inspect_field(field).len(),
        merged = post_refs.len(),
        partial = partial,
        "Resolved feed from cache"
    );

    Some(FeedView {
        post_refs,
        has_more,
        partial,
    })
}

/// Record a fetched feed page: normalize each post into the entity store and
/// link the `(field, args)` invocation to the page's references.
///
/// Each post object must carry an `id`; posts without one are skipped.
pub fn write_feed_page(
    store: &mut CacheStore,
    field: &str,
    args: &Value,
    posts: &[Value],
    has_more: bool,
) {
    let mut refs = Vec::with_capacity(posts.len());

    for post in posts {
        let Some(id) = post.get("id").and_then(Value::as_i64) else {
            debug!("Skipping feed item without an id");
            continue;
        };
        let key = EntityKey::post(id);

        if let Value::Object(fields) = post {
            store.write_fragment(
                &key,
                fields.iter().map(|(k, v)| (k.clone(), v.clone())),
            );
        }

        refs.push(key);
    }

    store.write_query(field, args, FieldLink::Page { refs, has_more });
}
