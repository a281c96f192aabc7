// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Errors from the DOM substrate
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    #[error("html parse error: {0}")]
    HtmlParse(String),

    /// The selector is outside the supported subset or malformed. Callers
    /// resolving deferred targets map this to "zero matches".
    #[error("unsupported selector: {0}")]
    UnsupportedSelector(String),
}
