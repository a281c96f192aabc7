//! Ingestion boundary for host-supplied attribute records.
//!
//! Settings storage hands the renderer loosely-typed records. Everything is
//! validated and mapped into strict [`AttributeSpec`] values here, before it
//! can reach the merge algorithm; malformed entries are dropped and logged.

use tracing::warn;

use crate::observability::messages::ingest::SpecRecordRejected;
use crate::spec::AttributeSpec;

/// Collaborator seam for host-specific text substitution in attribute
/// values (shortcode expansion and the like). Applied exactly once per
/// spec, at ingestion.
pub trait ValueExpander: Send + Sync {
    fn expand(&self, value: &str) -> String;
}

/// Default expander: values pass through untouched.
pub struct IdentityExpander;

impl ValueExpander for IdentityExpander {
    fn expand(&self, value: &str) -> String {
        value.to_string()
    }
}

/// Map loose records into strict specs, preserving input order.
///
/// Records that fail to deserialize (non-object shapes, non-string fields,
/// unknown override values) are dropped with a warning and never reach the
/// merge filter. Empty keys and values survive ingestion; the merge filter
/// owns that filtering rule.
pub fn ingest_specs(records: &[serde_json::Value], expander: &dyn ValueExpander) -> Vec<AttributeSpec> {
    let mut specs = Vec::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        match serde_json::from_value::<AttributeSpec>(record.clone()) {
            Ok(mut spec) => {
                spec.value = expander.expand(&spec.value);
                specs.push(spec);
            }
            Err(error) => {
                warn!("{}", SpecRecordRejected { index, error: &error });
            }
        }
    }

    specs
}
