// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::spec::ElementKind;

/// Main configuration structure for the decoration engine.
///
/// Stands in for the host's settings storage: which elements carry
/// attribute rules, and how the deferred pass treats a marker payload that
/// fails to parse. It is typically loaded from a YAML file.
///
/// # Fields
/// * `on_malformed_marker` - Policy for unparseable marker payloads (optional, defaults to skip)
/// * `elements` - Element entries mapping a selector to its attribute records
///
/// # Example
/// ```yaml
/// on_malformed_marker: skip
/// elements:
///   - element: "#hero"
///     kind: module
///     attributes:
///       - key: "data-track"
///         value: "hero"
///       - key: "aria-label"
///         value: "Hero section"
///         target: ".cta"
///         override: "yes"
/// ```
#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub on_malformed_marker: MalformedMarkerPolicy,
    pub elements: Vec<ElementConfig>,
}

/// Policy for a marker attribute whose payload is not valid instruction
/// JSON.
///
/// `Skip` (log, leave the marker in place, continue with the other
/// elements) is the default. `Fail` aborts the pass before the completion
/// signal is raised, for callers that want a hard failure instead.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MalformedMarkerPolicy {
    #[default]
    Skip,
    Fail,
}

/// Configuration for a single decorated element.
///
/// # Fields
/// * `element` - Selector locating the wrapper element(s) in the document
/// * `kind` - What the host is rendering there (module, column, row)
/// * `attributes` - Loose attribute records, validated at the ingestion boundary
///
/// Attribute records are kept loosely typed on purpose: they follow the
/// shape settings storage hands the renderer, and strict validation happens
/// in one place (`spec::ingest_specs`) rather than at every load site.
#[derive(Debug, Deserialize)]
pub struct ElementConfig {
    pub element: String,
    pub kind: ElementKind,
    #[serde(default)]
    pub attributes: Vec<serde_json::Value>,
}

/// Load a config from a YAML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)?;
    let cfg: Config = serde_yaml::from_str(&content)?;
    Ok(cfg)
}

/// Load and validate a config from a YAML file
///
/// This function loads the configuration and validates the element entries
/// so authoring mistakes surface before any document is processed.
pub fn load_and_validate_config<P: AsRef<Path>>(
    path: P,
) -> Result<Config, Box<dyn std::error::Error>> {
    let cfg = load_config(path)?;

    if let Err(validation_errors) = crate::config::validate_config(&cfg) {
        let error_messages: Vec<String> = validation_errors.iter().map(|e| e.to_string()).collect();
        let combined_error = format!(
            "Configuration validation failed:\n{}",
            error_messages.join("\n")
        );
        return Err(combined_error.into());
    }

    Ok(cfg)
}
