//! # Mock Node
//!
//! Server half of an in-memory WebSocket pair that answers Graphene
//! `call` requests from a responder function and can push notices.
//!
//! ```text
//! WsTransport ──duplex──> MockNode::serve
//!      ▲                     │ responder(method, args)
//!      └──── result/error ───┤
//!      └──── notice ─────────┘ <── push_notice()
//! ```

use futures::{SinkExt, StreamExt};
use ol_03_transport::{RpcError, WsTransport};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::io::DuplexStream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::protocol::Role;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::WebSocketStream;

/// OpenLedger main-net chain id.
pub const CHAIN_ID: &str = "4018d7844c78f6a6c41c6a552b898022310fc5dec06da467ee7905a8dad512c8";

/// Answers one `(method, args)` request.
pub type Responder = dyn Fn(&str, &[Value]) -> Result<Value, RpcError> + Send + Sync;

/// Scripted node serving one connection.
pub struct MockNode {
    requests: Arc<Mutex<Vec<Value>>>,
    notices: mpsc::UnboundedSender<Value>,
    task: JoinHandle<()>,
}

impl MockNode {
    /// Start a node and return a transport connected to it.
    pub async fn spawn<F>(responder: F) -> (WsTransport, MockNode)
    where
        F: Fn(&str, &[Value]) -> Result<Value, RpcError> + Send + Sync + 'static,
    {
        let (client, server) = tokio::io::duplex(256 * 1024);
        let client = WebSocketStream::from_raw_socket(client, Role::Client, None).await;
        let server = WebSocketStream::from_raw_socket(server, Role::Server, None).await;

        let requests = Arc::new(Mutex::new(Vec::new()));
        let (notices, notice_rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(serve(
            server,
            Arc::new(responder),
            Arc::clone(&requests),
            notice_rx,
        ));

        let node = MockNode {
            requests,
            notices,
            task,
        };
        (WsTransport::from_stream(client), node)
    }

    /// Every request frame received so far.
    pub fn requests(&self) -> Vec<Value> {
        self.requests.lock().clone()
    }

    /// Argument lists of the requests for `method`, in arrival order.
    pub fn args_of(&self, method: &str) -> Vec<Vec<Value>> {
        self.requests
            .lock()
            .iter()
            .filter(|request| request["params"][1] == method)
            .map(|request| request["params"][2].as_array().cloned().unwrap_or_default())
            .collect()
    }

    /// Push `{"method":"notice","params":[callback, payload]}`.
    pub fn push_notice(&self, callback: u64, payload: Value) {
        let _ = self.notices.send(json!([callback, payload]));
    }

    /// Push a raw notice `params` value, well-formed or not.
    pub fn push_raw_notice(&self, params: Value) {
        let _ = self.notices.send(params);
    }

    /// Drop the server socket without a close handshake.
    pub fn disconnect(&self) {
        self.task.abort();
    }
}

impl Drop for MockNode {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn serve(
    mut socket: WebSocketStream<DuplexStream>,
    responder: Arc<Responder>,
    requests: Arc<Mutex<Vec<Value>>>,
    mut notices: mpsc::UnboundedReceiver<Value>,
) {
    loop {
        let reply = tokio::select! {
            frame = socket.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    let Ok(request) = serde_json::from_str::<Value>(text.as_str()) else {
                        break;
                    };
                    requests.lock().push(request.clone());
                    respond(&*responder, &request)
                }
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => continue,
            },
            Some(params) = notices.recv() => json!({"method": "notice", "params": params}),
        };

        if socket
            .send(Message::Text(reply.to_string().into()))
            .await
            .is_err()
        {
            break;
        }
    }
}

fn respond(responder: &Responder, request: &Value) -> Value {
    let method = request["params"][1].as_str().unwrap_or_default();
    let args = request["params"][2]
        .as_array()
        .map(Vec::as_slice)
        .unwrap_or_default();

    match responder(method, args) {
        Ok(result) => json!({"id": request["id"], "result": result}),
        Err(error) => json!({"id": request["id"], "error": error}),
    }
}

// =============================================================================
// REFERENCE CHAIN
// =============================================================================

/// Responder for a chain whose state reproduces the reference transfer:
/// last irreversible block 47377, head time 2018-06-04T13:06:57, and a
/// required fee of 10420 per operation.
pub fn reference_chain(method: &str, args: &[Value]) -> Result<Value, RpcError> {
    match method {
        "login" => Ok(json!(true)),
        "database" => Ok(json!(2)),
        "history" => Ok(json!(3)),
        "network_broadcast" => Ok(json!(4)),
        "get_chain_id" => Ok(json!(CHAIN_ID)),
        "get_required_fees" => {
            let count = args
                .first()
                .and_then(Value::as_array)
                .map_or(0, Vec::len);
            Ok(Value::Array(vec![
                json!({"amount": 10420, "asset_id": "1.3.0"});
                count
            ]))
        }
        "get_dynamic_global_properties" => Ok(json!({
            "id": "2.1.0",
            "head_block_number": 47380,
            "head_block_id": "0000b914",
            "time": "2018-06-04T13:06:57",
            "current_witness": "1.6.93",
            "next_maintenance_time": "2018-06-04T14:00:00",
            "last_budget_time": "2018-06-04T13:00:00",
            "last_irreversible_block_num": 47377
        })),
        "get_block" if args.first() == Some(&json!(47377)) => Ok(json!({
            "previous": "0000b910a4cb8255000000000000000000000000",
            "timestamp": "2018-06-04T13:06:54",
            "witness": "1.6.93",
            "transaction_merkle_root": "0000000000000000000000000000000000000000",
            "witness_signature": "1f",
            "transactions": []
        })),
        "get_block" => Ok(Value::Null),
        "broadcast_transaction" | "set_block_applied_callback" | "cancel_all_subscriptions" => {
            Ok(Value::Null)
        }
        "broadcast_transaction_synchronous" => Ok(json!({
            "id": "5a7c",
            "block_num": 47381,
            "trx_num": 0,
            "expired": false,
            "trx": {"operation_results": [[1, "1.7.4242"]]}
        })),
        other => Err(RpcError {
            code: 1,
            message: format!("method {other} not found"),
            data: None,
        }),
    }
}
