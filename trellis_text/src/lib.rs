// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Text: incremental word wrap.
//!
//! This crate turns `(text, font, width)` into wrapped lines and their
//! measured widths. It does not shape or draw glyphs; an upstream renderer
//! supplies widths through [`Measure`].
//!
//! - [`tokenize`] splits text into words and single `' '` / `'\n'`
//!   delimiters without losing a byte.
//! - [`wrap`] is the greedy line breaker, a pure function.
//! - [`TextBox`] owns the inputs, observes its own
//!   [`NotificationHub`](trellis_notify::NotificationHub), and re-runs
//!   [`wrap`] whenever a dirty signal says the text, font, or width changed.
//!
//! ## Wrapping rules
//!
//! - A token stays on the current line only while the running width plus
//!   its width is strictly less than the wrap width.
//! - The first token on a line is always taken, so an over-long word gets a
//!   line of its own instead of being split.
//! - `'\n'` always ends a line. Empty lines are dropped: `"a\n\nb"` is two
//!   lines, not three.
//! - A wrapped line never starts with a space.
//!
//! ```rust
//! use trellis_text::{FixedAdvance, Font, TextBox};
//!
//! let text_box = TextBox::new(FixedAdvance(1.0));
//! text_box
//!     .edit(|edit| {
//!         edit.set_font(Font::new("sans-serif", 12.0));
//!         edit.set_text("a\n\nb");
//!     })
//!     .unwrap();
//! assert_eq!(text_box.layout().lines(), ["a", "b"]);
//! ```
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`.
//!
//! ## Features
//!
//! - `tracing`: emit a `debug!` event for every reflow.

#![no_std]

extern crate alloc;

mod error;
mod font;
mod measure;
mod text_box;
mod trace;
mod wrap;

pub use error::LayoutError;
pub use font::{Font, FontDescriptor, FontStyle};
pub use measure::{FixedAdvance, Measure};
pub use text_box::{CONTENT, FONT, LAYOUT, RELAYOUT, SIZE, TEXT_BOX, TextBox, TextEdit};
pub use wrap::{LineStart, TextLayout, Token, Tokens, tokenize, wrap};
