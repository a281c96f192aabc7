use tracing::{debug, error};

use crate::config::consts::MARKER_ATTRIBUTE;
use crate::merge::DeferredInstruction;
use crate::observability::messages::merge::{DeferredEncodeFailed, ElementDecorated};
use crate::spec::{AttributeMap, AttributeSpec, OverridePolicy, RenderContext};
use crate::traits::AttributeFilter;

/// Merge stage applied once per rendered element.
///
/// Wrapper-targeted specs are merged directly into the element's attribute
/// map under the override policy: the first no-override writer to a key
/// blocks all later no-override writers, while a yes-override writer always
/// writes (a later one overwrites an earlier one). Target-bearing specs are
/// serialized into a single deferred-instruction payload stored under the
/// marker attribute for the post-parse pass.
#[derive(Debug, Default)]
pub struct MergeFilter;

impl MergeFilter {
    pub fn new() -> Self {
        Self
    }

    /// Merge `specs` into `attributes` in place.
    ///
    /// Pure apart from the map mutation: no DOM access, no I/O. Specs with
    /// an empty key or value are excluded entirely.
    pub fn merge(&self, attributes: &mut AttributeMap, specs: &[AttributeSpec]) {
        let mut deferred: Vec<DeferredInstruction> = Vec::new();

        for spec in specs.iter().filter(|spec| spec.is_usable()) {
            if spec.is_deferred() {
                deferred.push(DeferredInstruction::from(spec));
                continue;
            }

            if attributes.contains_key(&spec.key) && spec.override_policy == OverridePolicy::No {
                continue;
            }
            attributes.insert(spec.key.clone(), spec.value.clone());
        }

        if !deferred.is_empty() {
            match serde_json::to_string(&deferred) {
                Ok(payload) => {
                    attributes.insert(MARKER_ATTRIBUTE.to_string(), payload);
                }
                Err(error) => {
                    error!("{}", DeferredEncodeFailed { error: &error });
                }
            }
        }
    }
}

impl AttributeFilter for MergeFilter {
    fn filter(&self, attributes: &mut AttributeMap, specs: &[AttributeSpec], context: &RenderContext) {
        let attributes_before = attributes.len();
        self.merge(attributes, specs);
        debug!(
            "{}",
            ElementDecorated {
                element: &context.element,
                kind: context.kind.as_str(),
                attributes_before,
                attributes_after: attributes.len(),
            }
        );
    }

    fn name(&self) -> &'static str {
        "merge_filter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(key: &str, value: &str, target: &str, override_policy: OverridePolicy) -> AttributeSpec {
        AttributeSpec {
            key: key.to_string(),
            value: value.to_string(),
            target: target.to_string(),
            override_policy,
        }
    }

    fn map(pairs: &[(&str, &str)]) -> AttributeMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn no_override_spec_yields_to_existing_attribute() {
        let mut attributes = map(&[("class", "box")]);
        MergeFilter::new().merge(
            &mut attributes,
            &[spec("class", "box highlighted", "", OverridePolicy::No)],
        );

        assert_eq!(attributes.get("class").map(String::as_str), Some("box"));
    }

    #[test]
    fn yes_override_spec_replaces_existing_attribute() {
        let mut attributes = map(&[("class", "box")]);
        MergeFilter::new().merge(
            &mut attributes,
            &[spec("class", "box highlighted", "", OverridePolicy::Yes)],
        );

        assert_eq!(
            attributes.get("class").map(String::as_str),
            Some("box highlighted")
        );
    }

    #[test]
    fn first_no_override_writer_wins_within_one_pass() {
        let mut attributes = AttributeMap::new();
        MergeFilter::new().merge(
            &mut attributes,
            &[
                spec("a", "1", "", OverridePolicy::No),
                spec("a", "2", "", OverridePolicy::No),
            ],
        );

        assert_eq!(attributes.get("a").map(String::as_str), Some("1"));
    }

    #[test]
    fn later_yes_override_beats_earlier_no_override() {
        let mut attributes = AttributeMap::new();
        MergeFilter::new().merge(
            &mut attributes,
            &[
                spec("a", "1", "", OverridePolicy::No),
                spec("a", "2", "", OverridePolicy::Yes),
            ],
        );

        assert_eq!(attributes.get("a").map(String::as_str), Some("2"));
    }

    #[test]
    fn later_yes_override_beats_earlier_yes_override() {
        let mut attributes = AttributeMap::new();
        MergeFilter::new().merge(
            &mut attributes,
            &[
                spec("a", "1", "", OverridePolicy::Yes),
                spec("a", "2", "", OverridePolicy::Yes),
            ],
        );

        assert_eq!(attributes.get("a").map(String::as_str), Some("2"));
    }

    #[test]
    fn empty_key_or_value_specs_are_excluded() {
        let mut attributes = AttributeMap::new();
        MergeFilter::new().merge(
            &mut attributes,
            &[
                spec("", "1", "", OverridePolicy::Yes),
                spec("a", "", "", OverridePolicy::Yes),
                spec("", "", ".inner", OverridePolicy::Yes),
            ],
        );

        assert!(attributes.is_empty());
    }

    #[test]
    fn deferred_specs_never_land_as_direct_keys() {
        let mut attributes = AttributeMap::new();
        MergeFilter::new().merge(
            &mut attributes,
            &[spec("data-x", "1", ".inner", OverridePolicy::No)],
        );

        assert!(!attributes.contains_key("data-x"));
        assert!(attributes.contains_key(MARKER_ATTRIBUTE));
    }

    #[test]
    fn deferred_specs_share_one_marker_in_order() {
        let mut attributes = AttributeMap::new();
        MergeFilter::new().merge(
            &mut attributes,
            &[
                spec("data-a", "1", ".first", OverridePolicy::No),
                spec("data-b", "2", ".second", OverridePolicy::Yes),
            ],
        );

        let payload = attributes.get(MARKER_ATTRIBUTE).unwrap();
        let decoded = crate::merge::decode_instructions(payload).unwrap();
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[0].key, "data-a");
        assert_eq!(decoded[1].key, "data-b");
        assert_eq!(decoded[1].override_policy, OverridePolicy::Yes);
    }

    #[test]
    fn no_marker_is_written_without_deferred_specs() {
        let mut attributes = map(&[("class", "box")]);
        MergeFilter::new().merge(&mut attributes, &[spec("data-x", "1", "", OverridePolicy::No)]);

        assert!(!attributes.contains_key(MARKER_ATTRIBUTE));
        assert_eq!(attributes.len(), 2);
    }

    #[test]
    fn spec_section_end_to_end_merge() {
        // The render-side half of the end-to-end scenario: one wrapper spec
        // that yields, one deferred spec that lands in the marker payload.
        let mut attributes = map(&[("class", "box")]);
        MergeFilter::new().merge(
            &mut attributes,
            &[
                spec("class", "box highlighted", "", OverridePolicy::No),
                spec("data-x", "1", ".inner", OverridePolicy::No),
            ],
        );

        assert_eq!(attributes.get("class").map(String::as_str), Some("box"));
        assert_eq!(
            attributes.get(MARKER_ATTRIBUTE).map(String::as_str),
            Some(r#"[{"key":"data-x","value":"1","target":".inner","override":"no"}]"#)
        );
        assert_eq!(attributes.len(), 2);
    }

    #[test]
    fn filter_trait_runs_the_merge() {
        use crate::spec::ElementKind;

        let context = RenderContext {
            kind: ElementKind::Module,
            element: "#hero".to_string(),
        };
        let mut attributes = AttributeMap::new();
        let filter = MergeFilter::new();
        filter.filter(
            &mut attributes,
            &[spec("data-x", "1", "", OverridePolicy::No)],
            &context,
        );

        assert_eq!(attributes.get("data-x").map(String::as_str), Some("1"));
        assert_eq!(filter.name(), "merge_filter");
    }
}
