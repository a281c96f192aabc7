// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Configuration validation for element entries.
//!
//! Validation collects every problem instead of stopping at the first, so
//! a config author sees all mistakes in one pass.

use std::collections::HashSet;

use crate::config::Config;
use crate::errors::ValidationError;

/// Validate element entries: non-empty selectors, no duplicate selectors,
/// at least one attribute record per entry.
pub fn validate_config(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for (index, entry) in config.elements.iter().enumerate() {
        if entry.element.trim().is_empty() {
            errors.push(ValidationError::EmptyElementSelector { index });
            continue;
        }

        if !seen.insert(entry.element.as_str()) {
            errors.push(ValidationError::DuplicateElementSelector {
                element: entry.element.clone(),
            });
        }

        if entry.attributes.is_empty() {
            errors.push(ValidationError::EmptyAttributeList {
                element: entry.element.clone(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ElementConfig;
    use crate::spec::ElementKind;
    use serde_json::json;

    fn entry(element: &str, attributes: Vec<serde_json::Value>) -> ElementConfig {
        ElementConfig {
            element: element.to_string(),
            kind: ElementKind::Module,
            attributes,
        }
    }

    fn record() -> serde_json::Value {
        json!({"key": "data-x", "value": "1"})
    }

    #[test]
    fn valid_config_passes() {
        let config = Config {
            on_malformed_marker: Default::default(),
            elements: vec![entry("#a", vec![record()]), entry("#b", vec![record()])],
        };
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn empty_selector_is_rejected() {
        let config = Config {
            on_malformed_marker: Default::default(),
            elements: vec![entry("   ", vec![record()])],
        };
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::EmptyElementSelector { index: 0 }]);
    }

    #[test]
    fn duplicate_selector_is_rejected() {
        let config = Config {
            on_malformed_marker: Default::default(),
            elements: vec![entry("#a", vec![record()]), entry("#a", vec![record()])],
        };
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::DuplicateElementSelector {
                element: "#a".to_string()
            }]
        );
    }

    #[test]
    fn empty_attribute_list_is_rejected() {
        let config = Config {
            on_malformed_marker: Default::default(),
            elements: vec![entry("#a", vec![])],
        };
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::EmptyAttributeList {
                element: "#a".to_string()
            }]
        );
    }

    #[test]
    fn all_problems_are_collected() {
        let config = Config {
            on_malformed_marker: Default::default(),
            elements: vec![
                entry("", vec![record()]),
                entry("#a", vec![record()]),
                entry("#a", vec![]),
            ],
        };
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
