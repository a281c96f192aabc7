use tracing::{debug, info, warn};

use crate::apply::{CompletionSignal, CompletionSubscription};
use crate::config::consts::MARKER_ATTRIBUTE;
use crate::config::MalformedMarkerPolicy;
use crate::dom::Dom;
use crate::errors::ApplyError;
use crate::merge::decode_instructions;
use crate::observability::messages::apply::{
    DeferredPassCompleted, MarkerParseFailed, TargetSelectorUnresolved,
};
use crate::spec::OverridePolicy;

/// Outcome summary of one deferred pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub elements_processed: usize,
    pub attributes_applied: usize,
    pub markers_skipped: usize,
}

/// The deferred attribute pass.
///
/// Runs once over a parsed document: snapshots every element carrying the
/// marker attribute, applies each element's instructions to its matching
/// descendants under the override policy, strips the marker, then raises
/// the completion signal exactly once — including when zero elements were
/// marked. Failures are contained per element so one bad marker cannot
/// block the others.
#[derive(Debug)]
pub struct Applicator {
    policy: MalformedMarkerPolicy,
    signal: CompletionSignal,
}

impl Applicator {
    pub fn new(policy: MalformedMarkerPolicy) -> Self {
        Self {
            policy,
            signal: CompletionSignal::new(),
        }
    }

    pub fn signal(&self) -> &CompletionSignal {
        &self.signal
    }

    pub fn subscribe(&self) -> CompletionSubscription {
        self.signal.subscribe()
    }

    /// Run the pass to completion over the document's current marked set.
    ///
    /// Elements marked after the initial snapshot are not picked up. Under
    /// the `fail` policy a malformed marker aborts the pass without raising
    /// the completion signal; under the default `skip` policy the element
    /// is logged and left marked, and the pass continues.
    pub fn run(&self, dom: &mut Dom) -> Result<ApplyReport, ApplyError> {
        let marked = dom.elements_with_attribute(MARKER_ATTRIBUTE);
        let mut report = ApplyReport::default();

        for node in marked {
            let Some(payload) = dom.attribute(node, MARKER_ATTRIBUTE).map(str::to_owned) else {
                continue;
            };

            let instructions = match decode_instructions(&payload) {
                Ok(instructions) => instructions,
                Err(error) => {
                    let tag_name = dom.tag_name(node).unwrap_or("unknown").to_string();
                    match self.policy {
                        MalformedMarkerPolicy::Skip => {
                            warn!("{}", MarkerParseFailed { tag_name: &tag_name, error: &error });
                            report.markers_skipped += 1;
                            continue;
                        }
                        MalformedMarkerPolicy::Fail => {
                            return Err(ApplyError::MalformedMarker {
                                tag_name,
                                reason: error.to_string(),
                            });
                        }
                    }
                }
            };

            for instruction in &instructions {
                // Deferred instructions always carry a target by
                // construction; a defensively-empty one is a no-op.
                if instruction.target.is_empty() {
                    continue;
                }

                let targets = match dom.query_scoped(node, &instruction.target) {
                    Ok(targets) => targets,
                    Err(error) => {
                        debug!(
                            "{}",
                            TargetSelectorUnresolved {
                                selector: &instruction.target,
                                error: &error,
                            }
                        );
                        Vec::new()
                    }
                };

                for target in targets {
                    if instruction.override_policy == OverridePolicy::Yes
                        || !dom.has_attribute(target, &instruction.key)
                    {
                        dom.set_attribute(target, &instruction.key, &instruction.value);
                        report.attributes_applied += 1;
                    }
                }
            }

            dom.remove_attribute(node, MARKER_ATTRIBUTE);
            report.elements_processed += 1;
        }

        self.signal.raise();
        info!(
            "{}",
            DeferredPassCompleted {
                elements_processed: report.elements_processed,
                attributes_applied: report.attributes_applied,
                markers_skipped: report.markers_skipped,
            }
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_document;

    fn marked(payload: &str, inner: &str) -> String {
        let escaped = payload.replace('&', "&amp;").replace('"', "&quot;");
        format!(r#"<div data-custom-attributes="{escaped}">{inner}</div>"#)
    }

    #[test]
    fn applies_attribute_to_matching_descendants() {
        let html = marked(
            r#"[{"key":"data-x","value":"1","target":".inner","override":"no"}]"#,
            r#"<span class="inner"></span><span class="inner"></span>"#,
        );
        let mut dom = parse_document(&html).unwrap();

        let report = Applicator::new(MalformedMarkerPolicy::Skip).run(&mut dom).unwrap();

        assert_eq!(report.elements_processed, 1);
        assert_eq!(report.attributes_applied, 2);
        for span in dom.query(".inner").unwrap() {
            assert_eq!(dom.attribute(span, "data-x"), Some("1"));
        }
    }

    #[test]
    fn no_override_instruction_leaves_existing_attribute() {
        let html = marked(
            r#"[{"key":"data-x","value":"new","target":".inner","override":"no"}]"#,
            r#"<span class="inner" data-x="old"></span>"#,
        );
        let mut dom = parse_document(&html).unwrap();

        Applicator::new(MalformedMarkerPolicy::Skip).run(&mut dom).unwrap();

        let span = dom.query(".inner").unwrap()[0];
        assert_eq!(dom.attribute(span, "data-x"), Some("old"));
    }

    #[test]
    fn yes_override_instruction_replaces_existing_attribute() {
        let html = marked(
            r#"[{"key":"data-x","value":"new","target":".inner","override":"yes"}]"#,
            r#"<span class="inner" data-x="old"></span>"#,
        );
        let mut dom = parse_document(&html).unwrap();

        Applicator::new(MalformedMarkerPolicy::Skip).run(&mut dom).unwrap();

        let span = dom.query(".inner").unwrap()[0];
        assert_eq!(dom.attribute(span, "data-x"), Some("new"));
    }

    #[test]
    fn marker_is_stripped_and_second_pass_is_a_noop() {
        let html = marked(
            r#"[{"key":"data-x","value":"1","target":".inner","override":"no"}]"#,
            r#"<span class="inner"></span>"#,
        );
        let mut dom = parse_document(&html).unwrap();

        let first = Applicator::new(MalformedMarkerPolicy::Skip);
        first.run(&mut dom).unwrap();
        assert!(dom.elements_with_attribute(MARKER_ATTRIBUTE).is_empty());

        let second = Applicator::new(MalformedMarkerPolicy::Skip);
        let report = second.run(&mut dom).unwrap();
        assert_eq!(report, ApplyReport::default());
        assert!(second.signal().is_complete());
    }

    #[test]
    fn completion_fires_with_zero_marked_elements() {
        let mut dom = parse_document("<div><p>plain</p></div>").unwrap();
        let applicator = Applicator::new(MalformedMarkerPolicy::Skip);

        assert!(!applicator.signal().is_complete());
        applicator.run(&mut dom).unwrap();
        assert!(applicator.signal().is_complete());
    }

    #[test]
    fn malformed_marker_is_skipped_and_others_still_apply() {
        let html = format!(
            "{}{}",
            r#"<div data-custom-attributes="not json"><span class="a"></span></div>"#,
            marked(
                r#"[{"key":"data-x","value":"1","target":".b","override":"no"}]"#,
                r#"<span class="b"></span>"#,
            )
        );
        let mut dom = parse_document(&html).unwrap();
        let applicator = Applicator::new(MalformedMarkerPolicy::Skip);

        let report = applicator.run(&mut dom).unwrap();

        assert_eq!(report.markers_skipped, 1);
        assert_eq!(report.elements_processed, 1);
        let b = dom.query(".b").unwrap()[0];
        assert_eq!(dom.attribute(b, "data-x"), Some("1"));
        // the bad marker stays in place for inspection
        assert_eq!(dom.elements_with_attribute(MARKER_ATTRIBUTE).len(), 1);
        assert!(applicator.signal().is_complete());
    }

    #[test]
    fn malformed_marker_under_fail_policy_aborts_without_signalling() {
        let html = r#"<div data-custom-attributes="not json"></div>"#;
        let mut dom = parse_document(html).unwrap();
        let applicator = Applicator::new(MalformedMarkerPolicy::Fail);

        let result = applicator.run(&mut dom);

        assert!(matches!(result, Err(ApplyError::MalformedMarker { .. })));
        assert!(!applicator.signal().is_complete());
    }

    #[test]
    fn invalid_target_selector_resolves_to_zero_matches() {
        let html = marked(
            r#"[{"key":"data-x","value":"1","target":":hover","override":"no"},{"key":"data-y","value":"2","target":".inner","override":"no"}]"#,
            r#"<span class="inner"></span>"#,
        );
        let mut dom = parse_document(&html).unwrap();

        let report = Applicator::new(MalformedMarkerPolicy::Skip).run(&mut dom).unwrap();

        assert_eq!(report.attributes_applied, 1);
        let span = dom.query(".inner").unwrap()[0];
        assert!(!dom.has_attribute(span, "data-x"));
        assert_eq!(dom.attribute(span, "data-y"), Some("2"));
    }

    #[test]
    fn empty_target_instruction_is_a_noop_not_a_wrapper_write() {
        let html = marked(
            r#"[{"key":"data-x","value":"1","target":"","override":"yes"}]"#,
            r#"<span class="inner"></span>"#,
        );
        let mut dom = parse_document(&html).unwrap();

        let report = Applicator::new(MalformedMarkerPolicy::Skip).run(&mut dom).unwrap();

        assert_eq!(report.attributes_applied, 0);
        let div = dom.query("div").unwrap()[0];
        assert!(!dom.has_attribute(div, "data-x"));
    }

    #[test]
    fn instructions_only_reach_descendants_of_their_own_wrapper() {
        let html = format!(
            "{}{}",
            marked(
                r#"[{"key":"data-x","value":"first","target":".inner","override":"no"}]"#,
                r#"<span class="inner"></span>"#,
            ),
            r#"<div><span class="inner"></span></div>"#
        );
        let mut dom = parse_document(&html).unwrap();

        Applicator::new(MalformedMarkerPolicy::Skip).run(&mut dom).unwrap();

        let spans = dom.query(".inner").unwrap();
        assert_eq!(dom.attribute(spans[0], "data-x"), Some("first"));
        assert!(!dom.has_attribute(spans[1], "data-x"));
    }

    #[test]
    fn marked_elements_process_in_document_order() {
        let html = format!(
            "{}{}",
            marked(
                r#"[{"key":"data-n","value":"1","target":".t","override":"no"}]"#,
                r#"<i class="t"></i>"#,
            ),
            marked(
                r#"[{"key":"data-n","value":"2","target":".t","override":"no"}]"#,
                r#"<i class="t"></i>"#,
            )
        );
        let mut dom = parse_document(&html).unwrap();

        let report = Applicator::new(MalformedMarkerPolicy::Skip).run(&mut dom).unwrap();

        assert_eq!(report.elements_processed, 2);
        let targets = dom.query(".t").unwrap();
        assert_eq!(dom.attribute(targets[0], "data-n"), Some("1"));
        assert_eq!(dom.attribute(targets[1], "data-n"), Some("2"));
    }
}
