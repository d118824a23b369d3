//! Scoped connection: the client is closed on every exit path

use crate::client::SchemaClient;
use crate::error::Result;
use futures::FutureExt;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, warn};

/// Run `work` against `client`, then close the client exactly once.
///
/// The close happens whether `work` succeeds, returns an error, or panics.
/// After a failed or panicking run a close error is only logged, so the
/// original failure reaches the caller. After a successful run a close
/// error is returned.
pub async fn with_connection<C, F, Fut, T>(client: Arc<C>, work: F) -> Result<T>
where
    C: SchemaClient + ?Sized,
    F: FnOnce(Arc<C>) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let outcome = AssertUnwindSafe(work(Arc::clone(&client)))
        .catch_unwind()
        .await;

    debug!("Releasing connection");
    let closed = client.close().await;

    match outcome {
        Ok(Ok(value)) => {
            closed?;
            Ok(value)
        }
        Ok(Err(err)) => {
            if let Err(close_err) = closed {
                warn!("Failed to close connection after error: {}", close_err);
            }
            Err(err)
        }
        Err(payload) => {
            if let Err(close_err) = closed {
                warn!("Failed to close connection after panic: {}", close_err);
            }
            panic::resume_unwind(payload)
        }
    }
}
