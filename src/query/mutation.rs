//! Write operations with a pending flag.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;

use crate::error::ClientResult;

type Invoke<P, R> = Arc<dyn Fn(P) -> BoxFuture<'static, ClientResult<R>> + Send + Sync>;

/// `{invoke(params) -> Result, is_pending}` for one write.
///
/// Invalidation happens inside the wrapped operation, so a failed write
/// leaves the cache untouched. Clones share the pending counter.
pub struct Mutation<P, R> {
    invoke: Invoke<P, R>,
    pending: Arc<AtomicUsize>,
}

impl<P, R> Mutation<P, R>
where
    P: Send + 'static,
    R: Send + 'static,
{
    pub fn new<F, Fut>(operation: F) -> Self
    where
        F: Fn(P) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ClientResult<R>> + Send + 'static,
    {
        Self {
            invoke: Arc::new(move |params| operation(params).boxed()),
            pending: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub async fn invoke(&self, params: P) -> ClientResult<R> {
        let _pending = PendingGuard::enter(&self.pending);
        (self.invoke)(params).await
    }

    /// True while any invocation is running.
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::SeqCst) > 0
    }
}

impl<P, R> Clone for Mutation<P, R> {
    fn clone(&self) -> Self {
        Self {
            invoke: Arc::clone(&self.invoke),
            pending: Arc::clone(&self.pending),
        }
    }
}

impl<P, R> std::fmt::Debug for Mutation<P, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mutation")
            .field("pending", &self.pending.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

/// Decrements the counter even if the invocation is dropped mid-flight.
struct PendingGuard {
    counter: Arc<AtomicUsize>,
}

impl PendingGuard {
    fn enter(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self {
            counter: Arc::clone(counter),
        }
    }
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_pending_while_running() {
        let mutation = Mutation::new(|n: u32| async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            Ok(n * 2)
        });
        assert!(!mutation.is_pending());

        let running = {
            let m = mutation.clone();
            tokio::spawn(async move { m.invoke(21).await })
        };
        tokio::time::sleep(Duration::from_millis(1)).await;
        assert!(mutation.is_pending());

        assert_eq!(running.await.unwrap().unwrap(), 42);
        assert!(!mutation.is_pending());
    }

    #[tokio::test]
    async fn test_error_clears_pending() {
        let mutation: Mutation<(), ()> = Mutation::new(|_| async {
            Err(ClientError::Configuration {
                message: "bad".into(),
            })
        });
        assert!(mutation.invoke(()).await.is_err());
        assert!(!mutation.is_pending());
    }
}
