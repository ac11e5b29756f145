//! Operation Catalog - the static table of remote operations
//!
//! Declares every tool the bridge exposes, the host method behind it, and the
//! parameter contract used to validate arguments at the front-end boundary.

mod operation;
mod params;
mod schema;

pub use operation::{FEATURE_OPERATIONS, Operation, ParamKind, ParamSpec};
pub use params::{
    ApplyMaterialParams, BodyEdges, DrawCircleParams, DrawRectangleParams, EntityToken, ExtrudeParams,
    FeatureOperation, FilletEdgeSetParams, FilletEdgesParams, GetBodyInfoParams,
};
pub use schema::{OperationCatalog, ToolSpec, input_schema, validate};
