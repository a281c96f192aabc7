// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for merge filter events.

use std::fmt::{Display, Formatter};

/// The merge stage finished for one rendered element.
///
/// # Log Level
/// `debug!` - Per-element detail
///
/// # Example
/// ```
/// use attrweave::observability::messages::merge::ElementDecorated;
///
/// let msg = ElementDecorated {
///     element: "#hero",
///     kind: "module",
///     attributes_before: 1,
///     attributes_after: 3,
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct ElementDecorated<'a> {
    pub element: &'a str,
    pub kind: &'a str,
    pub attributes_before: usize,
    pub attributes_after: usize,
}

impl Display for ElementDecorated<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Merged attributes for {} '{}': {} -> {} attributes",
            self.kind, self.element, self.attributes_before, self.attributes_after
        )
    }
}

/// Serializing the deferred-instruction list failed.
///
/// # Log Level
/// `error!` - The marker attribute is left unset
pub struct DeferredEncodeFailed<'a> {
    pub error: &'a dyn std::error::Error,
}

impl Display for DeferredEncodeFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Failed to serialize deferred instructions: {}",
            self.error
        )
    }
}
