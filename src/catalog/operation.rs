//! Catalog operations and their parameter contracts
//!
//! Each operation pairs the tool name the agent sees with the method the CAD
//! host understands. Parameter metadata is used for validation and schema
//! rendering only; the channel never looks at it.

use serde::{Deserialize, Serialize};

use crate::rpc::Methods;

/// Feature operation names accepted by extrude and fillet
pub const FEATURE_OPERATIONS: &[&str] = &[
    "NewBodyFeatureOperation",
    "JoinFeatureOperation",
    "CutFeatureOperation",
    "IntersectFeatureOperation",
];

/// Expected JSON type of a parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Plain measurement value (millimeters unless noted)
    Number,
    /// Opaque string, usually an entity token
    String,
    /// String restricted to the listed values
    OneOf(&'static [&'static str]),
}

impl ParamKind {
    /// JSON schema type name
    pub fn json_type(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::String | Self::OneOf(_) => "string",
        }
    }
}

/// One declared parameter of an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub required: bool,
    pub description: &'static str,
}

impl ParamSpec {
    const fn required(name: &'static str, kind: ParamKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            required: true,
            description,
        }
    }

    const fn optional(name: &'static str, kind: ParamKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            required: false,
            description,
        }
    }
}

const CENTER: [ParamSpec; 3] = [
    ParamSpec::optional("centerX", ParamKind::Number, "X coordinate in millimeters"),
    ParamSpec::optional("centerY", ParamKind::Number, "Y coordinate in millimeters"),
    ParamSpec::optional("centerZ", ParamKind::Number, "Z coordinate in millimeters"),
];

const DRAW_RECTANGLE_PARAMS: &[ParamSpec] = &[
    ParamSpec::required("width", ParamKind::Number, "Width in millimeters"),
    ParamSpec::required("height", ParamKind::Number, "Height in millimeters"),
    CENTER[0],
    CENTER[1],
    CENTER[2],
];

const DRAW_CIRCLE_PARAMS: &[ParamSpec] = &[
    ParamSpec::required("radius", ParamKind::Number, "Radius in millimeters"),
    CENTER[0],
    CENTER[1],
    CENTER[2],
];

const EXTRUDE_PARAMS: &[ParamSpec] = &[
    ParamSpec::required("profileToken", ParamKind::String, "The entity token of the profile to extrude"),
    ParamSpec::required("distance", ParamKind::Number, "Extrusion distance in millimeters"),
    ParamSpec::optional("operation", ParamKind::OneOf(FEATURE_OPERATIONS), "Type of operation"),
];

const FILLET_EDGES_PARAMS: &[ParamSpec] = &[
    ParamSpec::required("bodyToken", ParamKind::String, "The entity token of the body to fillet"),
    ParamSpec::required("radius", ParamKind::Number, "Radius in millimeters"),
    ParamSpec::optional("operation", ParamKind::OneOf(FEATURE_OPERATIONS), "Type of operation"),
];

const GET_BODY_INFO_PARAMS: &[ParamSpec] = &[ParamSpec::required(
    "bodyToken",
    ParamKind::String,
    "The entity token of the body to get info about",
)];

const APPLY_MATERIAL_PARAMS: &[ParamSpec] = &[
    ParamSpec::required("faceToken", ParamKind::String, "The entity token of the face to apply material to"),
    ParamSpec::required("materialName", ParamKind::String, "The name of the material/appearance to apply"),
];

/// A named remote operation exposed as a tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Operation {
    DrawRectangle,
    DrawCircle,
    Extrude,
    FilletEdges,
    GetBodyInfo,
    ApplyMaterial,
    ListSketches,
    ListMaterials,
}

impl Operation {
    /// Every operation, in catalog order
    pub const ALL: [Operation; 8] = [
        Self::DrawRectangle,
        Self::DrawCircle,
        Self::Extrude,
        Self::ListSketches,
        Self::FilletEdges,
        Self::GetBodyInfo,
        Self::ApplyMaterial,
        Self::ListMaterials,
    ];

    /// Look up an operation by its tool name
    pub fn from_tool_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.tool_name() == name)
    }

    /// Name exposed to the calling agent
    pub fn tool_name(&self) -> &'static str {
        match self {
            Self::DrawRectangle => "draw-rectangle",
            Self::DrawCircle => "draw-circle",
            Self::Extrude => "extrude",
            Self::FilletEdges => "fillet-edges",
            Self::GetBodyInfo => "get-body-info",
            Self::ApplyMaterial => "apply-material",
            Self::ListSketches => "list-sketches",
            Self::ListMaterials => "list-materials",
        }
    }

    /// Method name sent to the CAD host
    pub fn remote_method(&self) -> &'static str {
        match self {
            Self::DrawRectangle => Methods::DRAW_RECTANGLE,
            Self::DrawCircle => Methods::DRAW_CIRCLE,
            Self::Extrude => Methods::EXTRUDE,
            Self::FilletEdges => Methods::FILLET_EDGES,
            Self::GetBodyInfo => Methods::GET_BODY_INFO,
            Self::ApplyMaterial => Methods::APPLY_MATERIAL,
            Self::ListSketches => Methods::LIST_SKETCHES,
            Self::ListMaterials => Methods::LIST_MATERIALS,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::DrawRectangle => "Draw Rectangle",
            Self::DrawCircle => "Draw Circle",
            Self::Extrude => "Extrude Profile",
            Self::FilletEdges => "Fillet Edges",
            Self::GetBodyInfo => "Get Body Info",
            Self::ApplyMaterial => "Apply Material",
            Self::ListSketches => "List Sketches",
            Self::ListMaterials => "List Materials",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::DrawRectangle => "Draw a rectangle",
            Self::DrawCircle => "Draw a circle",
            Self::Extrude => "Extrude a profile to create a 3D feature",
            Self::FilletEdges => "Fillet edges",
            Self::GetBodyInfo => "Get information about a body",
            Self::ApplyMaterial => "Apply a material/appearance to a face",
            Self::ListSketches => "List all sketches in the design",
            Self::ListMaterials => "List all available materials/appearances",
        }
    }

    /// Shape of the value the host returns
    pub fn result_shape(&self) -> &'static str {
        match self {
            Self::DrawRectangle | Self::DrawCircle => "{ sketch: { index, token }, profile: { token } | null }",
            Self::Extrude => "{ token, body: { token } | null }",
            Self::FilletEdges => "{ token, edgeCount }",
            Self::GetBodyInfo => "{ body, edges[], faces[], vertices[] }",
            Self::ApplyMaterial => "{ faceToken, materialName, applied }",
            Self::ListSketches => "{ sketches: [{ index, name, token, profileCount }] }",
            Self::ListMaterials => "{ materials: [{ name, id }], count }",
        }
    }

    /// Declared parameters
    pub fn params(&self) -> &'static [ParamSpec] {
        match self {
            Self::DrawRectangle => DRAW_RECTANGLE_PARAMS,
            Self::DrawCircle => DRAW_CIRCLE_PARAMS,
            Self::Extrude => EXTRUDE_PARAMS,
            Self::FilletEdges => FILLET_EDGES_PARAMS,
            Self::GetBodyInfo => GET_BODY_INFO_PARAMS,
            Self::ApplyMaterial => APPLY_MATERIAL_PARAMS,
            Self::ListSketches | Self::ListMaterials => &[],
        }
    }

    /// Whether the host call carries a params document
    pub fn takes_params(&self) -> bool {
        !self.params().is_empty()
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tool_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tool_name() {
        assert_eq!(Operation::from_tool_name("draw-circle"), Some(Operation::DrawCircle));
        assert_eq!(Operation::from_tool_name("fillet-edges"), Some(Operation::FilletEdges));
        assert_eq!(Operation::from_tool_name("fillet_edges"), None);
        assert_eq!(Operation::from_tool_name("unknown"), None);
    }

    #[test]
    fn test_every_operation_round_trips_by_name() {
        for op in Operation::ALL {
            assert_eq!(Operation::from_tool_name(op.tool_name()), Some(op));
        }
    }

    #[test]
    fn test_remote_methods_use_underscores() {
        assert_eq!(Operation::DrawRectangle.remote_method(), "draw_rectangle");
        assert_eq!(Operation::GetBodyInfo.remote_method(), "get_body_info");
        assert_eq!(Operation::ListMaterials.remote_method(), "list_materials");
        for op in Operation::ALL {
            assert_eq!(op.remote_method(), op.tool_name().replace('-', "_"));
        }
    }

    #[test]
    fn test_listing_operations_take_no_params() {
        assert!(!Operation::ListSketches.takes_params());
        assert!(!Operation::ListMaterials.takes_params());
        assert!(Operation::DrawCircle.takes_params());
    }

    #[test]
    fn test_required_params() {
        let required: Vec<&str> = Operation::Extrude
            .params()
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name)
            .collect();
        assert_eq!(required, vec!["profileToken", "distance"]);
    }

    #[test]
    fn test_operation_serialization() {
        let json = serde_json::to_string(&Operation::ApplyMaterial).unwrap();
        assert_eq!(json, "\"apply-material\"");
        let op: Operation = serde_json::from_str("\"get-body-info\"").unwrap();
        assert_eq!(op, Operation::GetBodyInfo);
    }

    #[test]
    fn test_display_uses_tool_name() {
        assert_eq!(Operation::FilletEdges.to_string(), "fillet-edges");
    }
}
