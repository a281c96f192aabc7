// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod apply;
pub mod ingest;
pub mod merge;
pub mod pipeline;
