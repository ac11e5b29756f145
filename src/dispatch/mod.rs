//! Dispatch / Orchestration - one entry point per catalog operation
//!
//! Simple operations are one-call pass-throughs to the channel. Fillet is the
//! composite: the caller names a body, the host wants edges, so the body is
//! resolved first and its edge tokens are forwarded to the real fillet call.

use log::{debug, info};
use serde::Serialize;
use serde_json::Value;

use crate::catalog::{
    ApplyMaterialParams, BodyEdges, DrawCircleParams, DrawRectangleParams, ExtrudeParams, FilletEdgeSetParams,
    FilletEdgesParams, GetBodyInfoParams, Operation,
};
use crate::error::{BridgeError, Result};
use crate::rpc::{Methods, RemoteChannel};

/// Routes validated operation calls onto a remote channel
pub struct Dispatcher<C: RemoteChannel> {
    channel: C,
}

impl<C: RemoteChannel> Dispatcher<C> {
    /// Create a dispatcher over the given channel
    pub fn new(channel: C) -> Self {
        Self { channel }
    }

    /// Get the underlying channel
    pub fn channel(&self) -> &C {
        &self.channel
    }

    /// Run an operation with an already-validated params document
    pub async fn dispatch(&self, op: Operation, params: Value) -> Result<Value> {
        info!("Dispatching {}", op);
        match op {
            Operation::FilletEdges => {
                let params: FilletEdgesParams = serde_json::from_value(params)
                    .map_err(|e| BridgeError::Validation(format!("Tool '{}': {}", op, e)))?;
                self.fillet_edges(params).await
            }
            op if !op.takes_params() => self.channel.call(op.remote_method(), None).await,
            op => self.channel.call(op.remote_method(), Some(params)).await,
        }
    }

    async fn forward<P: Serialize>(&self, method: &str, params: &P) -> Result<Value> {
        let params = serde_json::to_value(params)?;
        self.channel.call(method, Some(params)).await
    }

    pub async fn draw_rectangle(&self, params: &DrawRectangleParams) -> Result<Value> {
        self.forward(Methods::DRAW_RECTANGLE, params).await
    }

    pub async fn draw_circle(&self, params: &DrawCircleParams) -> Result<Value> {
        self.forward(Methods::DRAW_CIRCLE, params).await
    }

    pub async fn extrude(&self, params: &ExtrudeParams) -> Result<Value> {
        self.forward(Methods::EXTRUDE, params).await
    }

    pub async fn get_body_info(&self, params: &GetBodyInfoParams) -> Result<Value> {
        self.forward(Methods::GET_BODY_INFO, params).await
    }

    pub async fn apply_material(&self, params: &ApplyMaterialParams) -> Result<Value> {
        self.forward(Methods::APPLY_MATERIAL, params).await
    }

    pub async fn list_sketches(&self) -> Result<Value> {
        self.channel.call(Methods::LIST_SKETCHES, None).await
    }

    pub async fn list_materials(&self) -> Result<Value> {
        self.channel.call(Methods::LIST_MATERIALS, None).await
    }

    /// Fillet every edge of a body.
    ///
    /// Two host calls: get-body-info, then fillet_edges with the body's edge
    /// tokens in host order. A failed lookup never reaches the fillet call.
    /// Edges may change between the two calls; nothing here detects that.
    pub async fn fillet_edges(&self, params: FilletEdgesParams) -> Result<Value> {
        let body = self
            .get_body_info(&GetBodyInfoParams {
                body_token: params.body_token.clone(),
            })
            .await?;

        let edge_tokens = serde_json::from_value::<BodyEdges>(body)
            .map_err(|e| {
                BridgeError::Decode(format!("get_body_info result for {} has no edge list: {}", params.body_token, e))
            })?
            .into_tokens();
        debug!("Body {} resolved to {} edges", params.body_token, edge_tokens.len());

        let edge_set = FilletEdgeSetParams {
            edge_tokens,
            radius: params.radius,
            operation: params.operation,
        };
        self.forward(Methods::FILLET_EDGES, &edge_set).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FeatureOperation;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Channel double that records calls and replays canned outcomes per method
    #[derive(Default)]
    struct MockChannel {
        responses: HashMap<String, std::result::Result<Value, String>>,
        calls: Mutex<Vec<(String, Option<Value>)>>,
    }

    impl MockChannel {
        fn new() -> Self {
            Self::default()
        }

        fn with_result(mut self, method: &str, result: Value) -> Self {
            self.responses.insert(method.to_string(), Ok(result));
            self
        }

        fn with_error(mut self, method: &str, message: &str) -> Self {
            self.responses.insert(method.to_string(), Err(message.to_string()));
            self
        }

        fn calls(&self) -> Vec<(String, Option<Value>)> {
            self.calls.lock().unwrap().clone()
        }

        fn call_count(&self, method: &str) -> usize {
            self.calls().iter().filter(|(m, _)| m == method).count()
        }
    }

    #[async_trait]
    impl RemoteChannel for MockChannel {
        async fn call(&self, method: &str, params: Option<Value>) -> Result<Value> {
            self.calls.lock().unwrap().push((method.to_string(), params));
            match self.responses.get(method) {
                Some(Ok(value)) => Ok(value.clone()),
                Some(Err(message)) => Err(BridgeError::Remote(message.clone())),
                None => Err(BridgeError::Remote(format!("Unknown method: {}", method))),
            }
        }
    }

    #[tokio::test]
    async fn test_draw_circle_pass_through() {
        let result = json!({"sketch": {"index": 0, "token": "sk1"}, "profile": {"token": "pr1"}});
        let dispatcher = Dispatcher::new(MockChannel::new().with_result("draw_circle", result.clone()));

        let params = json!({"radius": 10, "centerX": 0, "centerY": 0, "centerZ": 0});
        let got = dispatcher.dispatch(Operation::DrawCircle, params.clone()).await.unwrap();

        assert_eq!(got, result);
        assert_eq!(dispatcher.channel().calls(), vec![("draw_circle".to_string(), Some(params))]);
    }

    #[tokio::test]
    async fn test_every_simple_operation_is_identity() {
        let simple = [
            (Operation::DrawRectangle, json!({"width": 10, "height": 20})),
            (Operation::DrawCircle, json!({"radius": 5})),
            (Operation::Extrude, json!({"profileToken": "pr1", "distance": 15})),
            (Operation::GetBodyInfo, json!({"bodyToken": "b1"})),
            (Operation::ApplyMaterial, json!({"faceToken": "fa1", "materialName": "Steel"})),
        ];
        for (op, params) in simple {
            let result = json!({"echo": op.remote_method()});
            let dispatcher = Dispatcher::new(MockChannel::new().with_result(op.remote_method(), result.clone()));
            assert_eq!(dispatcher.dispatch(op, params.clone()).await.unwrap(), result);
            assert_eq!(
                dispatcher.channel().calls(),
                vec![(op.remote_method().to_string(), Some(params))]
            );
        }
    }

    #[tokio::test]
    async fn test_listing_operations_send_no_params() {
        let dispatcher = Dispatcher::new(
            MockChannel::new()
                .with_result("list_sketches", json!({"sketches": []}))
                .with_result("list_materials", json!({"materials": [], "count": 0})),
        );

        assert_eq!(
            dispatcher.dispatch(Operation::ListSketches, json!({})).await.unwrap(),
            json!({"sketches": []})
        );
        assert_eq!(dispatcher.list_materials().await.unwrap()["count"], 0);
        assert!(dispatcher.channel().calls().iter().all(|(_, params)| params.is_none()));
    }

    #[tokio::test]
    async fn test_typed_entry_serializes_camel_case() {
        let dispatcher = Dispatcher::new(MockChannel::new().with_result("extrude", json!({"token": "x1", "body": null})));
        let params = ExtrudeParams {
            profile_token: "pr1".into(),
            distance: 12.5,
            operation: Some(FeatureOperation::Cut),
        };

        dispatcher.extrude(&params).await.unwrap();
        let (_, sent) = &dispatcher.channel().calls()[0];
        assert_eq!(
            sent.as_ref().unwrap(),
            &json!({"profileToken": "pr1", "distance": 12.5, "operation": "CutFeatureOperation"})
        );
    }

    #[tokio::test]
    async fn test_remote_error_propagates_unchanged() {
        let dispatcher = Dispatcher::new(MockChannel::new().with_error("apply_material", "E"));
        let err = dispatcher
            .dispatch(Operation::ApplyMaterial, json!({"faceToken": "f", "materialName": "m"}))
            .await
            .unwrap_err();
        assert!(matches!(err, BridgeError::Remote(ref m) if m == "E"));
    }

    #[tokio::test]
    async fn test_fillet_resolves_edges_in_order() {
        let dispatcher = Dispatcher::new(
            MockChannel::new()
                .with_result(
                    "get_body_info",
                    json!({
                        "body": {"token": "b1"},
                        "edges": [{"token": "e1"}, {"token": "e2"}, {"token": "e3"}],
                        "faces": [],
                        "vertices": []
                    }),
                )
                .with_result("fillet_edges", json!({"token": "f1", "edgeCount": 3})),
        );

        let result = dispatcher
            .dispatch(
                Operation::FilletEdges,
                json!({"bodyToken": "b1", "radius": 2, "operation": "JoinFeatureOperation"}),
            )
            .await
            .unwrap();

        assert_eq!(result, json!({"token": "f1", "edgeCount": 3}));
        let calls = dispatcher.channel().calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], ("get_body_info".to_string(), Some(json!({"bodyToken": "b1"}))));
        assert_eq!(calls[1].0, "fillet_edges");
        assert_eq!(
            calls[1].1.as_ref().unwrap(),
            &json!({"edgeTokens": ["e1", "e2", "e3"], "radius": 2, "operation": "JoinFeatureOperation"})
        );
    }

    #[tokio::test]
    async fn test_fillet_omits_absent_operation() {
        let dispatcher = Dispatcher::new(
            MockChannel::new()
                .with_result("get_body_info", json!({"edges": [{"token": "e1"}, {"token": "e2"}]}))
                .with_result("fillet_edges", json!({"token": "f1", "edgeCount": 2})),
        );

        let result = dispatcher
            .fillet_edges(FilletEdgesParams {
                body_token: "b1".into(),
                radius: serde_json::Number::from(2),
                operation: None,
            })
            .await
            .unwrap();

        assert_eq!(result, json!({"token": "f1", "edgeCount": 2}));
        let calls = dispatcher.channel().calls();
        assert_eq!(calls[1].1.as_ref().unwrap(), &json!({"edgeTokens": ["e1", "e2"], "radius": 2}));
    }

    #[tokio::test]
    async fn test_fillet_lookup_failure_skips_fillet() {
        let dispatcher = Dispatcher::new(
            MockChannel::new()
                .with_error("get_body_info", "Entity not found")
                .with_result("fillet_edges", json!({"token": "f1", "edgeCount": 0})),
        );

        let err = dispatcher
            .dispatch(Operation::FilletEdges, json!({"bodyToken": "b1", "radius": 2}))
            .await
            .unwrap_err();

        assert!(matches!(err, BridgeError::Remote(ref m) if m == "Entity not found"));
        assert_eq!(dispatcher.channel().call_count("get_body_info"), 1);
        assert_eq!(dispatcher.channel().call_count("fillet_edges"), 0);
    }

    #[tokio::test]
    async fn test_fillet_step_two_failure_propagates() {
        let dispatcher = Dispatcher::new(
            MockChannel::new()
                .with_result("get_body_info", json!({"edges": [{"token": "e1"}]}))
                .with_error("fillet_edges", "No valid edges found from provided tokens"),
        );

        let err = dispatcher
            .dispatch(Operation::FilletEdges, json!({"bodyToken": "b1", "radius": 2}))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "No valid edges found from provided tokens");
        assert_eq!(dispatcher.channel().call_count("fillet_edges"), 1);
    }

    #[tokio::test]
    async fn test_fillet_body_without_edges_is_decode_error() {
        let dispatcher = Dispatcher::new(MockChannel::new().with_result("get_body_info", json!({"body": {}})));

        let err = dispatcher
            .dispatch(Operation::FilletEdges, json!({"bodyToken": "b1", "radius": 2}))
            .await
            .unwrap_err();

        assert!(matches!(err, BridgeError::Decode(_)));
        assert_eq!(dispatcher.channel().call_count("fillet_edges"), 0);
    }

    #[tokio::test]
    async fn test_repeated_calls_are_not_cached() {
        let dispatcher = Dispatcher::new(MockChannel::new().with_result("list_sketches", json!({"sketches": []})));
        dispatcher.list_sketches().await.unwrap();
        dispatcher.list_sketches().await.unwrap();
        assert_eq!(dispatcher.channel().call_count("list_sketches"), 2);
    }
}
