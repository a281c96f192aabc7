// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Structured log message types.
//!
//! Message types follow a struct-based pattern with a `Display` impl so the
//! wording of operational events lives in one place instead of being
//! scattered through the codebase as format strings.
//!
//! Messages are organized by subsystem:
//! * `messages::ingest` - ingestion-boundary rejections
//! * `messages::merge` - merge filter events
//! * `messages::apply` - deferred pass events
//! * `messages::pipeline` - document pipeline events

pub mod messages;
