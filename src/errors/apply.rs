// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Errors from the deferred attribute pass
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplyError {
    /// The marker attribute payload was not valid instruction JSON. Raised
    /// only under the `fail` malformed-marker policy; the default policy
    /// skips the element instead.
    #[error("malformed marker payload on <{tag_name}>: {reason}")]
    MalformedMarker { tag_name: String, reason: String },
}
