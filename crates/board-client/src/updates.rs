//! Mutation reconcilers
//!
//! Mutation-specific patch functions applied to the cache immediately from
//! each mutation's own response, instead of a refetch. The vote patch uses
//! the same ±1/±2 closed form as the server's ledger, so the optimistic local
//! state lands on exactly the value the server converges to.

use board_core::VoteValue;
use serde_json::{json, Value};
use tracing::debug;

use crate::feed::FEED_FIELD;
use crate::store::{CacheStore, EntityKey, FieldLink};

/// The query field the current user lives under
pub const ME_FIELD: &str = "me";

/// Patch the voted post's `(score, vote_status)` fragment.
///
/// Mirrors the ledger: a repeat of the recorded vote is a no-op; otherwise
/// the score moves by the raw value when no prior vote exists, or by twice
/// the value when the vote flips (one adjustment undoes the old vote and
/// applies the new one).
pub fn apply_vote(store: &mut CacheStore, post_id: i64, raw_value: i32) {
    let key = EntityKey::post(post_id);

    // Nothing to patch for a post the cache has never seen
    let Some(fragment) = store.read_fragment(&key) else {
        debug!(post_id, "Vote patch skipped: post not cached");
        return;
    };

    let value = VoteValue::from_raw(raw_value).as_i32();
    let score = fragment.get("score").and_then(Value::as_i64).unwrap_or(0);
    let vote_status = fragment.get("vote_status").and_then(Value::as_i64);

    // Idempotence guard mirroring the ledger's repeat-vote no-op
    if vote_status == Some(i64::from(value)) {
        return;
    }

    let multiplier: i64 = if vote_status.is_none() { 1 } else { 2 };
    let new_score = score + multiplier * i64::from(value);

    store.write_fragment(
        &key,
        [
            ("score".to_string(), json!(new_score)),
            ("vote_status".to_string(), json!(value)),
        ],
    );
}

/// Invalidate every cached feed page after a post is created.
///
/// Splicing a new item into an already-windowed cursor sequence is not
/// well-defined, so all open feed views refetch from page one instead.
pub fn apply_create_post(store: &mut CacheStore) {
    store.invalidate_field(FEED_FIELD);
}

/// Remove a deleted post from the normalized store; every query result
/// referencing it is pruned with it.
pub fn apply_delete_post(store: &mut CacheStore, post_id: i64) {
    store.evict_entity(&EntityKey::post(post_id));
}

/// Overwrite the cached current user directly from an auth mutation's
/// returned user object (login/register), or with null on logout.
///
/// A failed login never reaches this function, so the cached identity is
/// left untouched on failure.
pub fn write_current_user(store: &mut CacheStore, user: Option<&Value>) {
    match user {
        Some(user) => {
            let Some(id) = user.get("id").and_then(Value::as_i64) else {
                debug!("Current-user write skipped: user object has no id");
                return;
            };
            let key = EntityKey::user(id);

            if let Value::Object(fields) = user {
                store.write_fragment(&key, fields.iter().map(|(k, v)| (k.clone(), v.clone())));
            }

            store.write_query(ME_FIELD, &json!({}), FieldLink::Entity(Some(key)));
        }
        None => {
            store.write_query(ME_FIELD, &json!({}), FieldLink::Entity(None));
        }
    }
}
