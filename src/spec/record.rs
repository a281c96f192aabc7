use serde::{Deserialize, Serialize};

/// Whether a spec wins a naming collision against an attribute already
/// present on its destination element.
///
/// `No` is the safe default: the first occupant of a key keeps its value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverridePolicy {
    Yes,
    #[default]
    No,
}

/// One author-supplied attribute rule for a rendered element.
///
/// An empty `target` means "apply to the wrapper itself"; a non-empty
/// `target` is a selector resolved against the wrapper's descendants during
/// the deferred pass. Specs with an empty `key` or `value` are excluded from
/// the merge entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSpec {
    pub key: String,
    pub value: String,
    #[serde(default)]
    pub target: String,
    #[serde(rename = "override", default)]
    pub override_policy: OverridePolicy,
}

impl AttributeSpec {
    /// A spec with a non-empty target is never merged directly into the
    /// wrapper map; it is routed into the deferred-instruction list.
    pub fn is_deferred(&self) -> bool {
        !self.target.is_empty()
    }

    pub fn is_usable(&self) -> bool {
        !self.key.is_empty() && !self.value.is_empty()
    }
}

/// The kind of host element being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Module,
    Column,
    Row,
}

impl ElementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Module => "module",
            ElementKind::Column => "column",
            ElementKind::Row => "row",
        }
    }
}

/// Render context the host passes alongside each element's attribute map.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub kind: ElementKind,
    /// How the host identifies the element being rendered (used for logging
    /// only, never for resolution).
    pub element: String,
}
