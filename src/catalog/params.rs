//! Typed parameter structs for programmatic callers
//!
//! Field names serialize in the host's camelCase; absent optionals are left
//! out of the document entirely.

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// How a new feature combines with existing bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FeatureOperation {
    #[default]
    #[serde(rename = "NewBodyFeatureOperation")]
    NewBody,
    #[serde(rename = "JoinFeatureOperation")]
    Join,
    #[serde(rename = "CutFeatureOperation")]
    Cut,
    #[serde(rename = "IntersectFeatureOperation")]
    Intersect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawRectangleParams {
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center_y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center_z: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawCircleParams {
    pub radius: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center_y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center_z: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtrudeParams {
    pub profile_token: String,
    pub distance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation: Option<FeatureOperation>,
}

/// Caller-facing fillet input; edges are resolved from the body on the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilletEdgesParams {
    pub body_token: String,
    /// Kept as the caller's JSON number so it reaches the host unchanged
    pub radius: Number,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation: Option<FeatureOperation>,
}

/// What the host's fillet method actually receives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilletEdgeSetParams {
    pub edge_tokens: Vec<String>,
    pub radius: Number,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation: Option<FeatureOperation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetBodyInfoParams {
    pub body_token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyMaterialParams {
    pub face_token: String,
    pub material_name: String,
}

/// Opaque host-issued handle, as it appears inside results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityToken {
    pub token: String,
}

/// The slice of a get-body-info result that fillet needs
#[derive(Debug, Clone, Deserialize)]
pub struct BodyEdges {
    pub edges: Vec<EntityToken>,
}

impl BodyEdges {
    /// Edge tokens in the order the host listed them
    pub fn into_tokens(self) -> Vec<String> {
        self.edges.into_iter().map(|edge| edge.token).collect()
    }
}
