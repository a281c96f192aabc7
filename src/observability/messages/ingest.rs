// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for ingestion-boundary events.

use std::fmt::{Display, Formatter};

/// A host-supplied attribute record failed strict validation and was
/// dropped before reaching the merge filter.
///
/// # Log Level
/// `warn!` - Authoring mistake worth surfacing, never fatal
pub struct SpecRecordRejected<'a> {
    pub index: usize,
    pub error: &'a dyn std::error::Error,
}

impl Display for SpecRecordRejected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Attribute record {} rejected at ingestion: {}",
            self.index, self.error
        )
    }
}
