// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for document pipeline events.

use std::fmt::{Display, Formatter};

/// A configured element selector matched nothing in the document.
///
/// # Log Level
/// `warn!` - The entry is skipped, rendering continues
pub struct ElementUnmatched<'a> {
    pub element: &'a str,
}

impl Display for ElementUnmatched<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Configured element '{}' matched no nodes in the document",
            self.element
        )
    }
}

/// A configured element selector could not be parsed.
///
/// # Log Level
/// `warn!` - The entry is skipped, rendering continues
pub struct ElementSelectorInvalid<'a> {
    pub element: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for ElementSelectorInvalid<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Configured element selector '{}' is invalid: {}",
            self.element, self.error
        )
    }
}
