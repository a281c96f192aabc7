use serde::{Deserialize, Serialize};

use crate::spec::{AttributeSpec, OverridePolicy};

/// Wire form of a target-bearing attribute spec.
///
/// One JSON array of these per wrapper element, stored as the value of the
/// marker attribute. Created during the merge, consumed and deleted during
/// the deferred pass; never persisted past one page view. Field order here
/// is the wire contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeferredInstruction {
    pub key: String,
    pub value: String,
    pub target: String,
    #[serde(rename = "override", default)]
    pub override_policy: OverridePolicy,
}

impl From<&AttributeSpec> for DeferredInstruction {
    fn from(spec: &AttributeSpec) -> Self {
        Self {
            key: spec.key.clone(),
            value: spec.value.clone(),
            target: spec.target.clone(),
            override_policy: spec.override_policy,
        }
    }
}

/// Parse a marker attribute payload back into instructions.
pub fn decode_instructions(payload: &str) -> serde_json::Result<Vec<DeferredInstruction>> {
    serde_json::from_str(payload)
}
