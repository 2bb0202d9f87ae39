// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors produced by text layout.

use core::fmt;

/// Error returned when text cannot be laid out.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LayoutError {
    /// Layout was requested before a usable font was set.
    FontUnresolved,
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FontUnresolved => f.write_str("text layout requires a usable font"),
        }
    }
}

impl core::error::Error for LayoutError {}
