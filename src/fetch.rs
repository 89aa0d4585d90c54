//! Request-lifecycle state for interactive views.
//!
//! A [`QueryCell`] tracks one read (`data`/`loading`/`error`) and is re-run
//! by the caller whenever its inputs change. A [`MutationCell`] tracks one
//! write operation. Neither cancels in-flight work; instead every dispatch
//! takes a sequence ticket and a completion whose ticket is no longer the
//! latest is discarded, so a slow straggler cannot overwrite fresher state.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use futures_util::future::BoxFuture;

use crate::client::ApiError;

const GENERIC_ERROR: &str = "An error occurred";

#[derive(Debug, Clone)]
pub struct QueryState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: true,
            error: None,
        }
    }
}

pub struct QueryCell<T> {
    state: Mutex<QueryState<T>>,
    seq: AtomicU64,
}

impl<T: Clone> Default for QueryCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> QueryCell<T> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(QueryState::default()),
            seq: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> QueryState<T> {
        self.state.lock().unwrap().clone()
    }

    /// Runs the producer and applies its outcome to the cell.
    ///
    /// On success the data is replaced; on failure the error message is
    /// recorded and the previous data is left untouched (stale data keeps
    /// displaying alongside the error). If another run was dispatched while
    /// this one was in flight, this outcome is discarded entirely.
    pub async fn run<F, Fut>(&self, producer: F)
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let ticket = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.state.lock().unwrap();
            state.loading = true;
            state.error = None;
        }

        let result = producer().await;

        let mut state = self.state.lock().unwrap();
        if ticket != self.seq.load(Ordering::SeqCst) {
            // Superseded; the newer dispatch owns the cell now.
            return;
        }

        match result {
            Ok(data) => {
                state.data = Some(data);
                state.error = None;
            }
            Err(err) => {
                state.error = Some(error_message(&err));
            }
        }
        state.loading = false;
    }
}

/// A [`QueryCell`] bound to its producer, giving callers the full
/// data/loading/error/refetch surface in one value.
pub struct Fetch<T> {
    cell: QueryCell<T>,
    producer: Box<dyn Fn() -> BoxFuture<'static, Result<T, ApiError>> + Send + Sync>,
}

impl<T: Clone> Fetch<T> {
    pub fn new<F>(producer: F) -> Self
    where
        F: Fn() -> BoxFuture<'static, Result<T, ApiError>> + Send + Sync + 'static,
    {
        Self {
            cell: QueryCell::new(),
            producer: Box::new(producer),
        }
    }

    pub async fn refetch(&self) {
        self.cell.run(|| (self.producer)()).await;
    }

    pub fn snapshot(&self) -> QueryState<T> {
        self.cell.snapshot()
    }
}

#[derive(Debug, Clone)]
pub struct MutationState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for MutationState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

pub struct MutationCell<T> {
    state: Mutex<MutationState<T>>,
}

impl<T: Clone> Default for MutationCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> MutationCell<T> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MutationState::default()),
        }
    }

    pub fn snapshot(&self) -> MutationState<T> {
        self.state.lock().unwrap().clone()
    }

    /// Runs the operation, recording its outcome in the cell state. The
    /// result is also returned so callers can handle it inline; each call
    /// overwrites the previous call's state.
    pub async fn mutate<F, Fut>(&self, op: F) -> Result<T, ApiError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        {
            let mut state = self.state.lock().unwrap();
            state.loading = true;
            state.error = None;
        }

        let result = op().await;

        let mut state = self.state.lock().unwrap();
        state.loading = false;
        match &result {
            Ok(data) => state.data = Some(data.clone()),
            Err(err) => state.error = Some(error_message(err)),
        }
        result
    }
}

fn error_message(err: &ApiError) -> String {
    if err.message.is_empty() {
        String::from(GENERIC_ERROR)
    } else {
        err.message.clone()
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::oneshot;

    use super::*;

    fn api_error(message: &str) -> ApiError {
        ApiError {
            message: message.to_string(),
            status_code: 500,
            errors: None,
        }
    }

    #[tokio::test]
    async fn test_query_success() {
        let cell: QueryCell<Vec<u64>> = QueryCell::new();
        assert!(cell.snapshot().loading);

        cell.run(|| async { Ok(vec![1, 2, 3]) }).await;

        let state = cell.snapshot();
        assert!(!state.loading);
        assert_eq!(state.data, Some(vec![1, 2, 3]));
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn test_query_error_keeps_stale_data() {
        let cell: QueryCell<u64> = QueryCell::new();
        cell.run(|| async { Ok(42) }).await;

        cell.run(|| async { Err(api_error("backend down")) }).await;

        let state = cell.snapshot();
        assert!(!state.loading);
        assert_eq!(state.data, Some(42));
        assert_eq!(state.error.as_deref(), Some("backend down"));

        // A later success clears the error again.
        cell.run(|| async { Ok(7) }).await;
        let state = cell.snapshot();
        assert_eq!(state.data, Some(7));
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn test_superseded_run_is_discarded() {
        let cell: QueryCell<&'static str> = QueryCell::new();
        let (release_tx, release_rx) = oneshot::channel::<()>();

        let slow = cell.run(|| async {
            release_rx.await.unwrap();
            Ok("stale")
        });
        let fast = async {
            cell.run(|| async { Ok("fresh") }).await;
            release_tx.send(()).unwrap();
        };

        tokio::join!(slow, fast);

        // The straggler resolved last but must not win.
        let state = cell.snapshot();
        assert_eq!(state.data, Some("fresh"));
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_mutation_records_and_returns() {
        let cell: MutationCell<u64> = MutationCell::new();
        assert!(!cell.snapshot().loading);

        let result = cell.mutate(|| async { Ok(10) }).await;
        assert_eq!(result.unwrap(), 10);
        assert_eq!(cell.snapshot().data, Some(10));

        let result = cell.mutate(|| async { Err(api_error("rejected")) }).await;
        assert!(result.is_err());
        let state = cell.snapshot();
        assert_eq!(state.error.as_deref(), Some("rejected"));
        // Previous data remains until the next successful call.
        assert_eq!(state.data, Some(10));
    }

    #[tokio::test]
    async fn test_fetch_refetch() {
        let fetch: Fetch<u64> = Fetch::new(|| Box::pin(async { Ok(5) }));
        assert!(fetch.snapshot().loading);

        fetch.refetch().await;
        assert_eq!(fetch.snapshot().data, Some(5));
    }
}
