// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;

/// Errors that can occur during configuration validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// An element entry has an empty selector
    EmptyElementSelector {
        /// Zero-based position of the entry in the elements list
        index: usize,
    },
    /// An element entry carries no attribute records
    EmptyAttributeList {
        /// The selector of the offending element entry
        element: String,
    },
    /// Two element entries share the same selector
    DuplicateElementSelector {
        /// The duplicated selector
        element: String,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyElementSelector { index } => {
                write!(f, "Element entry {} has an empty selector", index)
            }
            ValidationError::EmptyAttributeList { element } => {
                write!(f, "Element '{}' declares no attributes", element)
            }
            ValidationError::DuplicateElementSelector { element } => {
                write!(f, "Duplicate element selector: '{}'", element)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
