//! Async runtimes used to run event dispatch in the background.

use std::{fmt::Debug, future::Future, pin::Pin, sync::Arc};

/// A boxed future that runs detached from the caller.
pub type BoxFuture = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Spawns detached background work. The caller never awaits the spawned future.
pub trait Runtime: Debug + Send + Sync + 'static {
    /// Run `future` in the background. Must not block and must not panic.
    fn spawn(&self, future: BoxFuture);
}

impl<R: Runtime + ?Sized> Runtime for Arc<R> {
    fn spawn(&self, future: BoxFuture) {
        (**self).spawn(future)
    }
}

/// Tokio runtime.
///
/// Spawns on the runtime the client is used from. Events tracked outside of a Tokio runtime
/// are dropped with a warning.
#[cfg(feature = "rt-tokio")]
#[cfg_attr(docsrs, doc(cfg(feature = "rt-tokio")))]
#[derive(Debug, Clone, Default)]
pub struct Tokio {
    handle: Option<tokio::runtime::Handle>,
}

#[cfg(feature = "rt-tokio")]
impl Tokio {
    /// Always spawn on the runtime behind `handle`, wherever the client is used from.
    pub fn with_handle(handle: tokio::runtime::Handle) -> Self {
        Tokio {
            handle: Some(handle),
        }
    }
}

#[cfg(feature = "rt-tokio")]
impl Runtime for Tokio {
    fn spawn(&self, future: BoxFuture) {
        let handle = match &self.handle {
            Some(handle) => handle.clone(),
            None => match tokio::runtime::Handle::try_current() {
                Ok(handle) => handle,
                Err(err) => {
                    tracing::warn!(error = %err, "no tokio runtime available; event dropped");
                    return;
                }
            },
        };
        drop(handle.spawn(future));
    }
}
