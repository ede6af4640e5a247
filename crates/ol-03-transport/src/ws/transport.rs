//! WebSocket transport.
//!
//! One socket, many concurrent calls. Callers serialize on the write half
//! only long enough to allocate an id and send; they then wait on their own
//! oneshot receiver. A single reader task owns the read half and routes each
//! frame to the pending call table or the callback registry.
//!
//! ```text
//!  caller ──┐                       ┌──> PendingCalls ──> caller
//!  caller ──┼─> Writer ─> socket ─> reader task
//!  caller ──┘                       └──> CallbackRegistry ──> handlers
//! ```

use crate::domain::callbacks::next_id;
use crate::domain::{
    ApiId, CallResult, CallbackId, CallbackRegistry, Incoming, NoticeHandler, PendingCalls,
    PendingStats, RpcRequest, TransportError,
};
use crate::ports::{CallCloser, Caller};
use async_trait::async_trait;
use futures::{Sink, SinkExt, Stream, StreamExt};
use parking_lot::Mutex;
use serde_json::Value;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_tungstenite::{connect_async, WebSocketStream};
use tracing::{debug, error, info, trace, warn};

type WsSink = Pin<Box<dyn Sink<Message, Error = tungstenite::Error> + Send>>;

/// Lifecycle of a connection. `Shutdown` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Open,
    /// `close()` is in progress
    Closing,
    Shutdown,
}

/// Write half plus the request id counter it serializes.
struct Writer {
    sink: WsSink,
    /// Last id handed out
    last_id: u64,
}

/// State shared with the reader task.
struct Shared {
    pending: PendingCalls,
    callbacks: CallbackRegistry,
    state: Mutex<ConnectionState>,
}

/// Multiplexed JSON-RPC connection to a Graphene node.
pub struct WsTransport {
    shared: Arc<Shared>,
    writer: tokio::sync::Mutex<Writer>,
    reader: JoinHandle<()>,
    /// Bound applied to calls made through the [`Caller`] port
    request_timeout: Option<Duration>,
}

impl WsTransport {
    /// Dial `url` (`ws://` or `wss://`).
    pub async fn connect(url: &str) -> Result<Self, TransportError> {
        let (stream, _response) = connect_async(url).await?;
        info!(url = url, "Connected to node");
        Ok(Self::from_stream(stream))
    }

    /// Wrap an established WebSocket and start its reader task.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn from_stream<S>(stream: WebSocketStream<S>) -> Self
    where
        S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
    {
        let (sink, stream) = stream.split();
        let shared = Arc::new(Shared {
            pending: PendingCalls::new(),
            callbacks: CallbackRegistry::new(),
            state: Mutex::new(ConnectionState::Open),
        });
        let reader = tokio::spawn(read_loop(Arc::clone(&shared), stream));

        Self {
            shared,
            writer: tokio::sync::Mutex::new(Writer {
                sink: Box::pin(sink),
                last_id: 0,
            }),
            reader,
            request_timeout: None,
        }
    }

    /// Bound every call made through the [`Caller`] port by `timeout`.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Call `api.method(args)` and wait for the result.
    pub async fn call(
        &self,
        api: ApiId,
        method: &str,
        args: Vec<Value>,
    ) -> Result<Value, TransportError> {
        let rx = self.send_call(api, method, &args).await?;
        // a dropped sender means the table went away with the connection
        rx.await.unwrap_or(Err(TransportError::Shutdown))
    }

    /// [`call`](Self::call) bounded by `timeout`.
    ///
    /// On expiry the call stays in the pending table; a late response is
    /// discarded, or shutdown resolves it.
    pub async fn call_with_timeout(
        &self,
        api: ApiId,
        method: &str,
        args: Vec<Value>,
        timeout: Duration,
    ) -> Result<Value, TransportError> {
        match tokio::time::timeout(timeout, self.call(api, method, args)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(method = method, timeout_ms = timeout.as_millis(), "Call timed out");
                Err(TransportError::Timeout(timeout))
            }
        }
    }

    /// Register `handler`, then subscribe it with `api.method([callback_id])`.
    ///
    /// The registration is removed again if the subscription call fails.
    pub async fn set_callback(
        &self,
        api: ApiId,
        method: &str,
        handler: NoticeHandler,
    ) -> Result<CallbackId, TransportError> {
        let id = self.shared.callbacks.register(handler);
        match self.call(api, method, vec![Value::from(id.0)]).await {
            Ok(_) => Ok(id),
            Err(e) => {
                self.shared.callbacks.remove(id);
                Err(e)
            }
        }
    }

    /// Drop a local callback registration. Notices for it become fatal.
    pub fn cancel_callback(&self, id: CallbackId) -> bool {
        self.shared.callbacks.remove(id)
    }

    /// Close the connection.
    ///
    /// Pending calls are resolved with `Shutdown` and all callbacks are
    /// dropped. Closing a connection that is not open returns `Shutdown`.
    pub async fn close(&self) -> Result<(), TransportError> {
        {
            let mut state = self.shared.state.lock();
            if *state != ConnectionState::Open {
                return Err(TransportError::Shutdown);
            }
            *state = ConnectionState::Closing;
        }

        let drained = self.shared.pending.shutdown();
        let callbacks = self.shared.callbacks.clear();
        info!(drained = drained, callbacks = callbacks, "Closing connection");

        let result = self.writer.lock().await.sink.close().await;
        self.reader.abort();
        *self.shared.state.lock() = ConnectionState::Shutdown;

        match result {
            Ok(())
            | Err(tungstenite::Error::ConnectionClosed)
            | Err(tungstenite::Error::AlreadyClosed) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn state(&self) -> ConnectionState {
        *self.shared.state.lock()
    }

    /// Number of calls waiting for a response
    pub fn pending_calls(&self) -> usize {
        self.shared.pending.len()
    }

    pub fn stats(&self) -> &PendingStats {
        self.shared.pending.stats()
    }

    /// Allocate an id, register it and send the request as one step.
    async fn send_call(
        &self,
        api: ApiId,
        method: &str,
        args: &[Value],
    ) -> Result<oneshot::Receiver<CallResult>, TransportError> {
        let mut writer = self.writer.lock().await;
        if self.state() != ConnectionState::Open {
            return Err(TransportError::Shutdown);
        }

        writer.last_id = next_id(writer.last_id);
        let id = writer.last_id;
        let text = serde_json::to_string(&RpcRequest::call(id, api, method, args))?;

        let rx = self.shared.pending.register(id, method)?;
        debug!(request_id = id, api = api.0, method = method, request = %text, "Sending call");

        if let Err(e) = writer.sink.send(Message::Text(text.into())).await {
            self.shared.pending.remove(id);
            warn!(request_id = id, method = method, error = %e, "Failed to send call");
            return Err(e.into());
        }
        Ok(rx)
    }
}

impl Drop for WsTransport {
    fn drop(&mut self) {
        self.reader.abort();
    }
}

#[async_trait]
impl Caller for WsTransport {
    async fn call(
        &self,
        api: ApiId,
        method: &str,
        args: Vec<Value>,
    ) -> Result<Value, TransportError> {
        match self.request_timeout {
            Some(timeout) => self.call_with_timeout(api, method, args, timeout).await,
            None => WsTransport::call(self, api, method, args).await,
        }
    }

    async fn set_callback(
        &self,
        api: ApiId,
        method: &str,
        handler: NoticeHandler,
    ) -> Result<CallbackId, TransportError> {
        WsTransport::set_callback(self, api, method, handler).await
    }
}

#[async_trait]
impl CallCloser for WsTransport {
    async fn close(&self) -> Result<(), TransportError> {
        WsTransport::close(self).await
    }
}

// =============================================================================
// READER TASK
// =============================================================================

async fn read_loop<S>(shared: Arc<Shared>, mut stream: S)
where
    S: Stream<Item = Result<Message, tungstenite::Error>> + Unpin,
{
    let reason = loop {
        match stream.next().await {
            Some(Ok(Message::Text(text))) => {
                if let Err(e) = shared.handle_frame(text.as_str()) {
                    break e.to_string();
                }
            }
            Some(Ok(Message::Close(frame))) => {
                break format!("peer closed the connection: {frame:?}");
            }
            Some(Ok(Message::Binary(data))) => {
                warn!(len = data.len(), "Skipping binary frame");
            }
            Some(Ok(other)) => {
                trace!(frame = ?other, "Control frame");
            }
            Some(Err(e)) => break e.to_string(),
            None => break "connection ended".to_string(),
        }
    };
    shared.stop(&reason);
}

impl Shared {
    /// Route one text frame. An error is fatal to the connection.
    fn handle_frame(&self, text: &str) -> Result<(), TransportError> {
        let frame: Incoming = serde_json::from_str(text)?;

        if let Some(id) = frame.id {
            if self.pending.is_pending(id) {
                debug!(request_id = id, response = text, "Received response");
                self.pending
                    .complete(id, frame.into_result().map_err(TransportError::from));
                return Ok(());
            }
        }

        if frame.is_notice() {
            return self.dispatch_notice(frame.params);
        }

        warn!(frame = text, "Skipping unexpected frame");
        Ok(())
    }

    /// Invoke the handler of each `(callback_id, payload)` pair in order.
    ///
    /// A panicking handler is fatal to the connection like any other
    /// protocol error, so the reader still reaches [`Shared::stop`].
    fn dispatch_notice(&self, params: Vec<Value>) -> Result<(), TransportError> {
        if params.len() % 2 != 0 {
            return Err(TransportError::Protocol(format!(
                "notice with odd number of params ({})",
                params.len()
            )));
        }

        let mut params = params.into_iter();
        while let (Some(raw_id), Some(payload)) = (params.next(), params.next()) {
            let id = parse_callback_id(&raw_id)?;
            let handler = self.callbacks.get(id).ok_or_else(|| {
                TransportError::Protocol(format!("callback {id} is not registered"))
            })?;
            debug!(callback_id = id, "Dispatching notice");
            catch_unwind(AssertUnwindSafe(|| handler(payload))).map_err(|_| {
                TransportError::Protocol(format!("notice handler {id} panicked"))
            })?;
        }
        Ok(())
    }

    /// Terminal transition after the reader exits.
    fn stop(&self, reason: &str) {
        let previous = std::mem::replace(&mut *self.state.lock(), ConnectionState::Shutdown);
        let drained = self.pending.shutdown();
        self.callbacks.clear();

        if previous == ConnectionState::Open {
            error!(reason = reason, drained = drained, "Connection lost");
        } else {
            debug!(reason = reason, "Reader stopped");
        }
    }
}

/// Callback ids arrive as numbers or as numeric strings.
fn parse_callback_id(value: &Value) -> Result<u64, TransportError> {
    let id = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    };
    id.ok_or_else(|| TransportError::Protocol(format!("invalid callback id {value}")))
}
