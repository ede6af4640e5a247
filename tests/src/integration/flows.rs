//! # Integration Test Flows
//!
//! The client facade driven over a real `WsTransport` against [`MockNode`].
//!
//! ## Flows Tested:
//!
//! 1. **Transfer**: namespaces → fees → props → block → sign → broadcast,
//!    with the broadcast bytes and signature checked on the node side
//! 2. **Limit orders**: synchronous broadcast yields the new order id
//! 3. **Block-applied notices**: node pushes reach the handler in order
//! 4. **Failures**: remote errors, missing blocks and dropped connections

#[cfg(test)]
mod tests {
    use crate::integration::{reference_chain, MockNode, CHAIN_ID};
    use ol_02_signing::{PrivateKey, SignedTransaction};
    use ol_03_transport::{RpcError, TransportError, WsTransport};
    use ol_client::{Client, ClientError};
    use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
    use secp256k1::{Message, Secp256k1};
    use serde_json::{json, Value};
    use shared_types::{AssetAmount, ObjectId};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::mpsc;
    use tokio::time::timeout;

    const WIF: &str = "5KQwrPbwdL6PhXujxW37FSSQZ1JiwsST4cqQzDeyXtP79zkvFD3";
    const REFERENCE_TX: &str =
        "10b9a4cb8255c93b155b0100b4280000000000000081bc3b95b20140420f000000000000000000";

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    async fn client_with<F>(responder: F) -> (Client<WsTransport>, MockNode)
    where
        F: Fn(&str, &[Value]) -> Result<Value, RpcError> + Send + Sync + 'static,
    {
        let (transport, node) = MockNode::spawn(responder).await;
        let client = Client::with_caller(Arc::new(transport), Duration::from_secs(600))
            .await
            .unwrap();
        (client, node)
    }

    fn core(amount: u64) -> AssetAmount {
        AssetAmount::new(amount, ObjectId::CORE_ASSET)
    }

    fn broadcast_transaction(node: &MockNode, method: &str) -> SignedTransaction {
        let args = node.args_of(method);
        assert_eq!(args.len(), 1, "expected one {method}");
        serde_json::from_value(args[0][0].clone()).unwrap()
    }

    fn recover_signer(signature_hex: &str, digest: [u8; 32]) -> secp256k1::PublicKey {
        let raw = hex::decode(signature_hex).unwrap();
        let recovery_id = RecoveryId::from_i32(i32::from(raw[0]) - 31).unwrap();
        let signature = RecoverableSignature::from_compact(&raw[1..], recovery_id).unwrap();
        Secp256k1::new()
            .recover_ecdsa(&Message::from_digest(digest), &signature)
            .unwrap()
    }

    // =============================================================================
    // TRANSFER
    // =============================================================================

    #[tokio::test]
    async fn test_transfer_end_to_end() {
        let (client, node) = client_with(reference_chain).await;
        assert_eq!(client.chain_id(), CHAIN_ID);

        client
            .transfer(
                WIF,
                ObjectId::new(1, 2, 974337),
                ObjectId::new(1, 2, 22805),
                core(1_000_000),
                core(0),
            )
            .await
            .unwrap();

        let methods: Vec<String> = node
            .requests()
            .iter()
            .map(|r| r["params"][1].as_str().unwrap().to_string())
            .collect();
        assert_eq!(
            methods,
            [
                "database",
                "get_chain_id",
                "history",
                "network_broadcast",
                "get_required_fees",
                "get_dynamic_global_properties",
                "get_block",
                "broadcast_transaction",
            ]
        );

        // Every request carries a fresh id on the resolved namespace.
        let requests = node.requests();
        for (i, request) in requests.iter().enumerate() {
            assert_eq!(request["id"], json!(i as u64 + 1));
            assert_eq!(request["method"], "call");
        }
        assert_eq!(requests[7]["params"][0], json!(4));

        let tx = broadcast_transaction(&node, "broadcast_transaction");
        assert_eq!(hex::encode(tx.serialize().unwrap()), REFERENCE_TX);

        let digest = tx.digest(CHAIN_ID).unwrap();
        assert_eq!(
            hex::encode(digest),
            "b631ca657dfe43975a0d219e9e7c7249a425ab10be7ff3fc38cbd2c4866bfcc4"
        );
        assert_eq!(tx.signatures().len(), 1);
        assert_eq!(
            recover_signer(&tx.signatures()[0], digest),
            PrivateKey::from_wif(WIF).unwrap().public_key()
        );

        client.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_rejected_broadcast_surfaces_remote_error() {
        let (client, node) = client_with(|method, args| match method {
            "broadcast_transaction" => Err(RpcError {
                code: 1,
                message: "missing required active authority".to_string(),
                data: None,
            }),
            _ => reference_chain(method, args),
        })
        .await;

        let err = client
            .transfer(
                WIF,
                ObjectId::new(1, 2, 974337),
                ObjectId::new(1, 2, 22805),
                core(1),
                core(0),
            )
            .await
            .unwrap_err();

        match err {
            ClientError::Transport(TransportError::Remote(error)) => {
                assert_eq!(error.message, "missing required active authority");
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(node.args_of("broadcast_transaction").len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_reference_block_stops_flow() {
        let (client, node) = client_with(|method, args| match method {
            "get_block" => Ok(Value::Null),
            _ => reference_chain(method, args),
        })
        .await;

        let err = client
            .transfer(
                WIF,
                ObjectId::new(1, 2, 1),
                ObjectId::new(1, 2, 2),
                core(1),
                core(0),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::BlockNotFound(47377)));
        assert!(node.args_of("broadcast_transaction").is_empty());
    }

    // =============================================================================
    // LIMIT ORDERS
    // =============================================================================

    #[tokio::test]
    async fn test_limit_order_lifecycle() {
        let (client, node) = client_with(reference_chain).await;

        let order = client
            .limit_order_create(
                WIF,
                ObjectId::new(1, 2, 974337),
                core(0),
                core(100_000),
                AssetAmount::new(25, ObjectId::new(1, 3, 121)),
                Duration::from_secs(3600),
                false,
            )
            .await
            .unwrap();
        assert_eq!(order, ObjectId::new(1, 7, 4242));

        client
            .limit_order_cancel(WIF, ObjectId::new(1, 2, 974337), order, core(0))
            .await
            .unwrap();

        let created = broadcast_transaction(&node, "broadcast_transaction_synchronous");
        let cancelled = broadcast_transaction(&node, "broadcast_transaction");
        assert_eq!(created.transaction().ref_block_num, 47376);
        assert_eq!(cancelled.transaction().ref_block_prefix, 1434635172);
        assert_eq!(
            cancelled.transaction().operations[0].fee().map(|f| f.amount),
            Some(10420)
        );
        assert_eq!(created.signatures().len(), 1);
    }

    // =============================================================================
    // NOTICES
    // =============================================================================

    #[tokio::test]
    async fn test_block_applied_notices_in_order() {
        let (client, node) = client_with(reference_chain).await;

        let (tx, mut rx) = mpsc::unbounded_channel();
        let callback = client
            .database()
            .set_block_applied_callback(move |block_id| {
                let _ = tx.send(block_id.map_err(|e| e.to_string()));
            })
            .await
            .unwrap();

        let subscribe = node.args_of("set_block_applied_callback");
        assert_eq!(subscribe, vec![vec![json!(callback.0)]]);

        node.push_notice(callback.0, json!(["0000b915aa", "0000b916bb"]));
        node.push_notice(callback.0, json!(["0000b917cc"]));

        let mut received = Vec::new();
        for _ in 0..3 {
            let block_id = timeout(Duration::from_secs(5), rx.recv())
                .await
                .unwrap()
                .unwrap()
                .unwrap();
            received.push(block_id);
        }
        assert_eq!(received, ["0000b915aa", "0000b916bb", "0000b917cc"]);

        client.database().cancel_all_subscriptions().await.unwrap();
        client.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_malformed_notice_shuts_connection() {
        let (client, node) = client_with(reference_chain).await;

        node.push_raw_notice(json!([1, ["a"], "odd"]));

        let result = timeout(Duration::from_secs(5), async {
            loop {
                match client.database().get_chain_id().await {
                    Err(e) if e.is_shutdown() => return e,
                    _ => tokio::time::sleep(Duration::from_millis(5)).await,
                }
            }
        })
        .await
        .unwrap();
        assert!(matches!(result, TransportError::Shutdown));
    }

    // =============================================================================
    // CONNECTION LOSS
    // =============================================================================

    #[tokio::test]
    async fn test_dropped_connection_fails_calls() {
        let (client, node) = client_with(reference_chain).await;
        node.disconnect();

        let result = timeout(Duration::from_secs(5), async {
            loop {
                // a write racing the reader may fail with an I/O error first
                match client.database().get_dynamic_global_properties().await {
                    Err(e) if e.is_shutdown() => return e,
                    _ => tokio::time::sleep(Duration::from_millis(5)).await,
                }
            }
        })
        .await
        .unwrap();
        assert!(matches!(result, TransportError::Shutdown));
        assert!(matches!(
            client.close().await,
            Err(ClientError::Transport(TransportError::Shutdown))
        ));
    }
}
