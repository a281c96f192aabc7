use tracing::warn;

use crate::apply::Applicator;
use crate::config::Config;
use crate::dom::parse_document;
use crate::errors::PipelineError;
use crate::merge::MergeFilter;
use crate::observability::messages::pipeline::{ElementSelectorInvalid, ElementUnmatched};
use crate::spec::{ingest_specs, AttributeMap, AttributeSpec, IdentityExpander, RenderContext, ValueExpander};
use crate::traits::AttributeFilter;

/// Explicit pipeline around the merge stage.
///
/// Hosts embedding the engine call [`RenderPipeline::decorate`] once per
/// rendered element, with the element's attribute map and spec list — a
/// plain function call, not a named-callback registration. The
/// document-level paths below drive the same stage from configuration for
/// the binary and the integration tests.
pub struct RenderPipeline {
    config: Config,
    filter: Box<dyn AttributeFilter>,
    expander: Box<dyn ValueExpander>,
}

impl RenderPipeline {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            filter: Box::new(MergeFilter::new()),
            expander: Box::new(IdentityExpander),
        }
    }

    /// Install a host-specific value expander (shortcode expansion and the
    /// like), replacing the identity default.
    pub fn with_expander(mut self, expander: Box<dyn ValueExpander>) -> Self {
        self.expander = expander;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The merge stage for one rendered element.
    pub fn decorate(
        &self,
        attributes: &mut AttributeMap,
        specs: &[AttributeSpec],
        context: &RenderContext,
    ) {
        self.filter.filter(attributes, specs, context);
    }

    /// Render-side half over a whole document: for every configured
    /// element, ingest its records and run the merge stage against the
    /// element's live attribute map. Returns the emitted markup, markers
    /// included.
    ///
    /// A configured selector that is invalid or matches nothing is logged
    /// and skipped; rendering the rest of the page must not hinge on one
    /// entry.
    pub fn render_document(&self, html: &str) -> Result<String, PipelineError> {
        let mut dom = parse_document(html)?;

        for entry in &self.config.elements {
            let nodes = match dom.query(&entry.element) {
                Ok(nodes) => nodes,
                Err(error) => {
                    warn!(
                        "{}",
                        ElementSelectorInvalid {
                            element: &entry.element,
                            error: &error,
                        }
                    );
                    continue;
                }
            };
            if nodes.is_empty() {
                warn!("{}", ElementUnmatched { element: &entry.element });
                continue;
            }

            let specs = ingest_specs(&entry.attributes, self.expander.as_ref());
            let context = RenderContext {
                kind: entry.kind,
                element: entry.element.clone(),
            };

            for node in nodes {
                let mut attributes = dom.attributes(node);
                self.decorate(&mut attributes, &specs, &context);
                dom.replace_attributes(node, attributes);
            }
        }

        Ok(dom.to_html())
    }

    /// Post-parse half: run the deferred pass over final markup.
    pub fn apply_document(
        &self,
        html: &str,
        applicator: &Applicator,
    ) -> Result<String, PipelineError> {
        let mut dom = parse_document(html)?;
        applicator.run(&mut dom)?;
        Ok(dom.to_html())
    }

    /// Both halves back to back: render, then the deferred pass.
    pub fn process_document(&self, html: &str) -> Result<String, PipelineError> {
        let rendered = self.render_document(html)?;
        let applicator = Applicator::new(self.config.on_malformed_marker);
        self.apply_document(&rendered, &applicator)
    }
}
