// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for the deferred attribute pass.

use std::fmt::{Display, Formatter};

/// A marker attribute payload failed to parse and the element was skipped.
///
/// # Log Level
/// `warn!` - The element keeps its marker for inspection
pub struct MarkerParseFailed<'a> {
    pub tag_name: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for MarkerParseFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Skipping <{}>: marker payload is not valid instruction JSON: {}",
            self.tag_name, self.error
        )
    }
}

/// A deferred instruction's target selector could not be resolved and was
/// treated as zero matches.
///
/// # Log Level
/// `debug!` - Consistent with DOM query semantics, not an error
pub struct TargetSelectorUnresolved<'a> {
    pub selector: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for TargetSelectorUnresolved<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Target selector '{}' resolved to zero matches: {}",
            self.selector, self.error
        )
    }
}

/// The deferred pass finished and the completion signal was raised.
///
/// # Log Level
/// `info!` - Once per pass, including the zero-element case
///
/// # Example
/// ```
/// use attrweave::observability::messages::apply::DeferredPassCompleted;
///
/// let msg = DeferredPassCompleted {
///     elements_processed: 2,
///     attributes_applied: 5,
///     markers_skipped: 0,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct DeferredPassCompleted {
    pub elements_processed: usize,
    pub attributes_applied: usize,
    pub markers_skipped: usize,
}

impl Display for DeferredPassCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Deferred pass completed: {} elements, {} attributes applied, {} markers skipped",
            self.elements_processed, self.attributes_applied, self.markers_skipped
        )
    }
}
