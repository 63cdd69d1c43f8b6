//! Session-backed toasts that survive one redirect.

use tower_sessions::Session;

use crate::models::{Toast, session_keys};

/// Queue a toast for the next rendered page.
pub async fn push_toast(session: &Session, toast: Toast) {
    let mut pending = session
        .get::<Vec<Toast>>(session_keys::TOASTS)
        .await
        .ok()
        .flatten()
        .unwrap_or_default();
    pending.push(toast);

    if let Err(e) = session.insert(session_keys::TOASTS, pending).await {
        tracing::warn!("Failed to store toast in session: {e}");
    }
}

/// Remove and return every queued toast.
pub async fn take_toasts(session: &Session) -> Vec<Toast> {
    session
        .remove::<Vec<Toast>>(session_keys::TOASTS)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    use super::*;

    #[tokio::test]
    async fn test_toasts_are_taken_once() {
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);
        push_toast(&session, Toast::info("Logged out")).await;
        push_toast(&session, Toast::error("Delete Failed", "boom")).await;

        let toasts = take_toasts(&session).await;
        assert_eq!(toasts.len(), 2);
        assert_eq!(toasts[0].title, "Logged out");
        assert!(toasts[1].is_error());

        assert!(take_toasts(&session).await.is_empty());
    }
}
