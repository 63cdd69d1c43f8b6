//! Editor drafts, validation and the submit lock.
//!
//! A draft mirrors the editable subset of an entity. It is seeded from
//! defaults (create) or from the loaded record (edit), rebuilt from the
//! submitted form on every POST, validated synchronously, and only then
//! turned into an API payload. A draft that fails validation never reaches
//! the network.

pub mod account;
pub mod customer;
pub mod plan;
pub mod product;

pub use account::AccountDeletion;
pub use customer::CustomerDraft;
pub use plan::PlanDraft;
pub use product::{ProductDraft, VariationDraft};

use std::collections::BTreeMap;
use std::future::Future;
use std::time::Duration;

use chrono::Utc;
use tower_sessions::Session;

use crate::models::{Toast, session_keys};

/// Validation messages keyed by form field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` for `field`, keeping the first message per field.
    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    /// Message for `field`, empty when it is valid.
    #[must_use]
    pub fn get(&self, field: &str) -> &str {
        self.0.get(field).map_or("", String::as_str)
    }

    #[must_use]
    pub fn has(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Drop the error of a field the user has edited.
    pub fn clear(&mut self, field: &str) {
        self.0.remove(field);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// A submitted form as ordered key/value pairs.
///
/// Editors with repeated rows (variations, features) post the same name
/// several times, which a flat struct cannot hold.
#[derive(Debug, Clone, Default)]
pub struct FormPairs(Vec<(String, String)>);

impl FormPairs {
    #[must_use]
    pub const fn new(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }

    /// First value for `key`, empty when absent.
    #[must_use]
    pub fn first(&self, key: &str) -> &str {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map_or("", |(_, v)| v.as_str())
    }

    /// Every value for `key`, in form order.
    #[must_use]
    pub fn all(&self, key: &str) -> Vec<&str> {
        self.0
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.0.iter().any(|(k, _)| k == key)
    }
}

impl From<Vec<(String, String)>> for FormPairs {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }
}

/// A submission was rejected because another one is still in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("A submission is already in progress")]
pub struct SubmitLocked;

impl SubmitLocked {
    /// Toast shown instead of running the rejected submission.
    #[must_use]
    pub fn toast(self) -> Toast {
        Toast::error("Please wait", self.to_string())
    }
}

fn lock_key(editor: &str) -> String {
    format!("{}{editor}", session_keys::SUBMIT_LOCK_PREFIX)
}

/// Whether `editor` has a submission in flight that started within `ttl`.
///
/// The lock holds the time it was taken, in epoch milliseconds. An older
/// lock is left over from a request that never released it and no longer
/// blocks.
pub async fn is_locked(session: &Session, editor: &str, ttl: Duration) -> bool {
    let Some(taken_at) = session.get::<i64>(&lock_key(editor)).await.ok().flatten() else {
        return false;
    };
    let ttl = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
    Utc::now().timestamp_millis().saturating_sub(taken_at) < ttl
}

/// Releases a taken submit lock when dropped.
///
/// The normal path releases inline; the drop only matters when the
/// handler future is cancelled mid-submit.
struct LockGuard {
    session: Session,
    key: String,
    armed: bool,
}

impl LockGuard {
    async fn release(mut self) {
        self.armed = false;
        if let Err(e) = self.session.remove::<i64>(&self.key).await {
            tracing::warn!("Failed to release submit lock: {e}");
        } else if let Err(e) = self.session.save().await {
            tracing::warn!("Failed to persist submit lock release: {e}");
        }
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            tracing::warn!(key = %self.key, "Submit lock left to expire");
            return;
        };
        let session = self.session.clone();
        let key = std::mem::take(&mut self.key);
        tracing::info!(%key, "Releasing submit lock of a cancelled submit");
        handle.spawn(async move {
            if let Err(e) = session.remove::<i64>(&key).await {
                tracing::warn!("Failed to release submit lock: {e}");
            } else if let Err(e) = session.save().await {
                tracing::warn!("Failed to persist submit lock release: {e}");
            }
        });
    }
}

/// Run `work` while holding the submit lock of `editor`.
///
/// The lock is written through to the store before `work` starts, so a
/// second request on the same session sees it. It is released after
/// `work` finishes whatever its result, or when the submit is dropped
/// part way. A lock older than `ttl` no longer blocks, which covers a
/// concurrent request writing back the lock it loaded after release.
///
/// # Errors
///
/// Returns `SubmitLocked` without running `work` when the lock is held.
pub async fn with_submit_lock<F, T>(
    session: &Session,
    editor: &str,
    ttl: Duration,
    work: F,
) -> Result<T, SubmitLocked>
where
    F: Future<Output = T>,
{
    if is_locked(session, editor, ttl).await {
        tracing::info!(editor, "Rejected submit while locked");
        return Err(SubmitLocked);
    }

    let key = lock_key(editor);
    if let Err(e) = session.insert(&key, Utc::now().timestamp_millis()).await {
        tracing::warn!("Failed to set submit lock: {e}");
    } else if let Err(e) = session.save().await {
        tracing::warn!("Failed to persist submit lock: {e}");
    }
    let guard = LockGuard {
        session: session.clone(),
        key,
        armed: true,
    };

    let result = work.await;

    guard.release().await;
    Ok(result)
}
