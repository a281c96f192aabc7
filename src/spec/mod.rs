mod ingest;
mod record;

pub use ingest::{ingest_specs, IdentityExpander, ValueExpander};
pub use record::{AttributeSpec, ElementKind, OverridePolicy, RenderContext};

use indexmap::IndexMap;

/// Attribute map for a rendered element, keyed by attribute name.
///
/// Insertion order is preserved so that attribute emission and marker
/// serialization stay deterministic across runs.
pub type AttributeMap = IndexMap<String, String>;
