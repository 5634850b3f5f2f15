// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Bloxplode.
//
// None of these ever reach the web content. The presenter and the haptic
// bridge turn every `Err` into a log line; they exist so the platform seams
// can use `?` internally.

use thiserror::Error;

/// Top-level error type for all Bloxplode operations.
#[derive(Debug, Error)]
pub enum BloxError {
    // -- Platform bridge --
    #[error("platform bridge error: {0}")]
    Bridge(String),

    #[error("feature not available on this platform")]
    PlatformUnavailable,

    // -- Command surface --
    #[error("unknown bridge command: {0}")]
    UnknownCommand(String),

    // -- Configuration --
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, BloxError>;
