// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

use crate::errors::{ApplyError, DomError};

/// Errors from the document-level pipeline paths
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Dom(#[from] DomError),

    #[error(transparent)]
    Apply(#[from] ApplyError),
}
