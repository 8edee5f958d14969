//! Channel lifecycle for the collector connection.
//!
//! The channel connects lazily, so nothing touches the network until the first
//! call. Teardown is shutdown-now style: in-flight calls are cancelled, then
//! teardown waits a bounded grace period for them to wind down.

use crate::config::Target;
use crate::error::{ExportError, Result};
use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tonic::transport::{Channel, Endpoint};
use tracing::{debug, info, warn};

/// How long teardown waits for in-flight calls.
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// How a connection teardown ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shutdown {
    /// Every tracked call finished within the grace period.
    Clean,
    /// Calls were still running when the grace period ran out.
    TimedOut { grace: Duration },
}

/// Owning handle to the collector channel.
///
/// Must be closed with [`Connection::shutdown`] (or used through
/// [`Connection::scoped`]); dropping it unclosed only cancels in-flight calls.
pub struct Connection {
    target: Target,
    handle: ConnectionHandle,
    closed: bool,
}

/// Cheap, cloneable view of an open connection handed to callers.
#[derive(Clone)]
pub struct ConnectionHandle {
    channel: Channel,
    calls: TaskTracker,
    cancel: CancellationToken,
}

impl Connection {
    /// Create a lazily-connected plaintext channel to `target`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn open(target: &Target) -> Result<Self> {
        let endpoint = Endpoint::from_shared(target.to_string()).map_err(|e| {
            ExportError::InvalidTarget {
                target: target.to_string(),
                reason: e.to_string(),
            }
        })?;
        let channel = endpoint.connect_lazy();
        debug!("Opened channel to {}", target);

        Ok(Self {
            target: target.clone(),
            handle: ConnectionHandle {
                channel,
                calls: TaskTracker::new(),
                cancel: CancellationToken::new(),
            },
            closed: false,
        })
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn handle(&self) -> ConnectionHandle {
        self.handle.clone()
    }

    /// Run `body` against this connection, then shut it down.
    ///
    /// Shutdown happens exactly once, whether `body` returns `Ok` or `Err`.
    pub async fn scoped<T, E, F, Fut>(self, grace: Duration, body: F) -> (Result<T, E>, Shutdown)
    where
        F: FnOnce(ConnectionHandle) -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let result = body(self.handle()).await;
        let shutdown = self.shutdown(grace).await;
        (result, shutdown)
    }

    /// Cancel in-flight calls and wait up to `grace` for them to finish.
    pub async fn shutdown(mut self, grace: Duration) -> Shutdown {
        self.closed = true;
        self.handle.cancel.cancel();
        self.handle.calls.close();

        match tokio::time::timeout(grace, self.handle.calls.wait()).await {
            Ok(()) => {
                info!("Closed channel to {}", self.target);
                Shutdown::Clean
            }
            Err(_) => {
                warn!(
                    "Channel to {} still busy after {:?} ({} call(s)), forcing close",
                    self.target,
                    grace,
                    self.handle.calls.len()
                );
                Shutdown::TimedOut { grace }
            }
        }
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        if !self.closed {
            self.handle.cancel.cancel();
            warn!("Channel to {} dropped without shutdown", self.target);
        }
    }
}

impl ConnectionHandle {
    pub fn channel(&self) -> Channel {
        self.channel.clone()
    }

    /// Run `call` as an in-flight call on this connection.
    ///
    /// Resolves to `None` if the connection is shut down before the call
    /// completes; the call future is dropped in that case.
    pub fn track_call<F>(&self, call: F) -> impl Future<Output = Option<F::Output>>
    where
        F: Future,
    {
        let cancel = self.cancel.clone();
        self.calls.track_future(async move {
            tokio::select! {
                out = call => Some(out),
                _ = cancel.cancelled() => None,
            }
        })
    }
}
