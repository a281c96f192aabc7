// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod apply;
mod config;
mod dom;
mod pipeline;

pub use apply::ApplyError;
pub use config::ValidationError;
pub use dom::DomError;
pub use pipeline::PipelineError;
