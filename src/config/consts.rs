// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// Attribute carrying the serialized deferred-instruction list from the
/// render side to the post-parse pass
pub const MARKER_ATTRIBUTE: &str = "data-custom-attributes";
/// Well-known name of the broadcast raised when the deferred pass completes
pub const COMPLETION_EVENT: &str = "custom-attributes-processed";
