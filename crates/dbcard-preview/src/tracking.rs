//! Best-effort background tasks and view tracking.
//!
//! A best-effort task is dispatched onto the runtime and never awaited by the
//! request that started it. Failures are logged with the task name and go no
//! further; the render path does not wait for or observe them.

use std::future::Future;

use axum::http::{HeaderMap, header};
use dbcard_core::{CardStore, CardView};
use tokio::task::JoinHandle;

/// Dispatch `task` in the background.
///
/// The returned handle resolves once the task has finished and its outcome
/// has been logged. Request handlers drop it.
pub fn spawn_best_effort<F, E>(name: &'static str, task: F) -> JoinHandle<()>
where
    F: Future<Output = Result<(), E>> + Send + 'static,
    E: std::fmt::Display + Send + 'static,
{
    tokio::spawn(async move {
        match task.await {
            Ok(()) => tracing::debug!(task = name, "background task finished"),
            Err(e) => tracing::warn!(task = name, error = %e, "background task failed"),
        }
    })
}

/// Request details recorded with a view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Visitor {
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
}

impl Visitor {
    /// Read the User-Agent and Referer headers.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let read = |name: header::HeaderName| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        Self {
            user_agent: read(header::USER_AGENT),
            referrer: read(header::REFERER),
        }
    }
}

/// Record one view of a card: an analytics row and the counter bump.
///
/// The two writes are independent; both are attempted and each failure is
/// logged on its own. The first failure, if any, is returned.
///
/// The counter is written as `current_count + 1` from the value read with the
/// card, so concurrent views may collapse into one increment.
pub async fn record_view(
    store: &CardStore,
    card_id: &str,
    current_count: i64,
    visitor: Visitor,
) -> dbcard_core::Result<()> {
    let view = CardView::new(card_id, visitor.user_agent, visitor.referrer);
    let (inserted, counted) = tokio::join!(
        store.insert_card_view(&view),
        store.set_view_count(card_id, current_count.saturating_add(1)),
    );

    if let Err(e) = &inserted {
        tracing::warn!(card_id = %card_id, error = %e, "analytics insert failed");
    }
    if let Err(e) = &counted {
        tracing::warn!(card_id = %card_id, error = %e, "view count update failed");
    }
    if inserted.is_ok() && counted.is_ok() {
        tracing::debug!(card_id = %card_id, device = ?view.device_type, "view recorded");
    }

    inserted.and(counted)
}

/// Dispatch [`record_view`] as a best-effort task.
pub fn track_view(
    store: CardStore,
    card_id: String,
    current_count: i64,
    visitor: Visitor,
) -> JoinHandle<()> {
    spawn_best_effort("record_view", async move {
        record_view(&store, &card_id, current_count, visitor).await
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[tokio::test]
    async fn best_effort_success_runs_to_completion() {
        let ran = Arc::new(AtomicBool::new(false));
        let flag = ran.clone();
        let handle = spawn_best_effort("test_ok", async move {
            flag.store(true, Ordering::SeqCst);
            Ok::<(), String>(())
        });
        handle.await.unwrap();
        assert!(ran.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn best_effort_failure_is_contained() {
        let handle = spawn_best_effort("test_err", async { Err::<(), _>("upstream down") });
        // The task itself completes normally; the error is only logged.
        assert!(handle.await.is_ok());
    }

    #[test]
    fn visitor_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(header::USER_AGENT, "Mozilla/5.0 (iPhone)".parse().unwrap());
        headers.insert(header::REFERER, "https://t.co/abc".parse().unwrap());
        let visitor = Visitor::from_headers(&headers);
        assert_eq!(visitor.user_agent.as_deref(), Some("Mozilla/5.0 (iPhone)"));
        assert_eq!(visitor.referrer.as_deref(), Some("https://t.co/abc"));
    }

    #[test]
    fn visitor_without_headers() {
        assert_eq!(Visitor::from_headers(&HeaderMap::new()), Visitor::default());
    }
}
