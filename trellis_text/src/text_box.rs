// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A wrapped text block that re-lays itself out on dirty signals.

use alloc::rc::Rc;
use alloc::string::String;
use core::cell::{Ref, RefCell};
use core::fmt;

use trellis_notify::{
    ChangeKind, ChangeSet, ComponentKind, DependencyObserver, NotificationHub, NotifyError,
    Observable,
};

use crate::error::LayoutError;
use crate::font::{Font, FontDescriptor};
use crate::measure::Measure;
use crate::trace::debug_event;
use crate::wrap::{TextLayout, wrap};

/// Component kind broadcast by every [`TextBox`].
pub const TEXT_BOX: ComponentKind = ComponentKind::new(0x0100);

/// The text content changed.
pub const CONTENT: ChangeKind = ChangeKind::new(8);
/// The font changed.
pub const FONT: ChangeKind = ChangeKind::new(9);
/// The wrap width changed.
pub const SIZE: ChangeKind = ChangeKind::new(10);
/// Several layout inputs changed at once.
pub const LAYOUT: ChangeKind = ChangeKind::new(11);

/// Change kinds that invalidate the wrapped lines.
pub const RELAYOUT: ChangeSet = ChangeSet::of(&[CONTENT, FONT, SIZE, LAYOUT]);

struct TextState {
    text: String,
    font: Option<Font>,
    /// Descriptor for `font`, filled on first layout after a font change.
    descriptor: Option<FontDescriptor>,
    width: f64,
    layout: TextLayout,
}

/// Returns the cached descriptor, resolving it from `font` on a miss.
fn resolve_descriptor<'a>(
    font: Option<&Font>,
    cache: &'a mut Option<FontDescriptor>,
) -> Result<&'a FontDescriptor, LayoutError> {
    if cache.is_none() {
        let font = font.ok_or(LayoutError::FontUnresolved)?;
        *cache = Some(font.descriptor()?);
    }
    cache.as_ref().ok_or(LayoutError::FontUnresolved)
}

/// A block of text wrapped to a width.
///
/// A `TextBox` observes its own [`NotificationHub`]: the setters store the
/// new value and signal [`CONTENT`], [`FONT`], or [`SIZE`], and the box
/// re-wraps when it receives one of the [`RELAYOUT`] kinds. Anything else
/// attached to the hub (an entity, a stage) hears the same signal after the
/// lines are already up to date.
///
/// Lines are never patched: every relayout recomputes them from
/// `(text, font, width)`.
///
/// # Example
///
/// ```
/// use trellis_text::{FixedAdvance, Font, TextBox};
///
/// let text_box = TextBox::new(FixedAdvance(4.0));
/// text_box.set_font(Font::new("monospace", 8.0)).unwrap();
/// text_box.set_width(5.0).unwrap();
/// text_box.set_text("aaaa bbbb").unwrap();
///
/// assert_eq!(text_box.layout().lines(), ["aaaa", "bbbb"]);
/// assert_eq!(text_box.layout().line_widths(), [16.0, 16.0]);
/// ```
///
/// Until a font is set, signals that need a relayout fail with
/// [`LayoutError::FontUnresolved`] wrapped in a [`NotifyError`]. Use
/// [`edit`](Self::edit) to set everything at once.
///
/// Accessors hand out [`Ref`]s into the box; drop them before calling a
/// setter.
pub struct TextBox<M> {
    hub: NotificationHub,
    measure: M,
    state: RefCell<TextState>,
}

impl<M: fmt::Debug> fmt::Debug for TextBox<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("TextBox")
            .field("hub", &self.hub)
            .field("measure", &self.measure)
            .field("text", &state.text)
            .field("font", &state.font)
            .field("width", &state.width)
            .field("lines", &state.layout.len())
            .finish_non_exhaustive()
    }
}

impl<M: Measure + 'static> TextBox<M> {
    /// Creates an empty, unbounded text box with no font.
    pub fn new(measure: M) -> Rc<Self> {
        let text_box = Rc::new(Self {
            hub: NotificationHub::new(TEXT_BOX),
            measure,
            state: RefCell::new(TextState {
                text: String::new(),
                font: None,
                descriptor: None,
                width: f64::INFINITY,
                layout: TextLayout::default(),
            }),
        });
        // First dependent, so the lines are current before anyone else hears.
        text_box.hub.attach(&text_box);
        text_box
    }

    /// Returns the current text.
    #[must_use]
    pub fn text(&self) -> Ref<'_, str> {
        Ref::map(self.state.borrow(), |state| state.text.as_str())
    }

    /// Returns the current font, if any.
    #[must_use]
    pub fn font(&self) -> Option<Font> {
        self.state.borrow().font.clone()
    }

    /// Returns the cached descriptor for the current font.
    ///
    /// `None` until the first layout after a font change.
    #[must_use]
    pub fn font_descriptor(&self) -> Option<FontDescriptor> {
        self.state.borrow().descriptor.clone()
    }

    /// Returns the wrap width.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.state.borrow().width
    }

    /// Returns the measurement backend.
    #[must_use]
    pub fn measure(&self) -> &M {
        &self.measure
    }

    /// Returns the wrapped lines from the last relayout.
    #[must_use]
    pub fn layout(&self) -> Ref<'_, TextLayout> {
        Ref::map(self.state.borrow(), |state| &state.layout)
    }

    /// Returns the number of wrapped lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.state.borrow().layout.len()
    }

    /// Returns the widest line's width.
    #[must_use]
    pub fn max_line_width(&self) -> f64 {
        self.state.borrow().layout.max_width()
    }

    /// Returns the block height for a given line height.
    #[must_use]
    pub fn height(&self, line_height: f64) -> f64 {
        let lines = self.line_count() as f64;
        lines * line_height
    }

    /// Replaces the text and signals [`CONTENT`].
    ///
    /// Setting the same text again does nothing.
    ///
    /// # Errors
    ///
    /// Propagates errors from the broadcast, including a failed relayout.
    pub fn set_text(&self, text: impl Into<String>) -> Result<(), NotifyError> {
        if self.replace_text(text.into()) {
            self.hub.dirty(CONTENT)?;
        }
        Ok(())
    }

    /// Replaces the font, drops the cached descriptor, and signals [`FONT`].
    ///
    /// # Errors
    ///
    /// Propagates errors from the broadcast, including a failed relayout.
    pub fn set_font(&self, font: Font) -> Result<(), NotifyError> {
        if self.replace_font(font) {
            self.hub.dirty(FONT)?;
        }
        Ok(())
    }

    /// Replaces the wrap width and signals [`SIZE`].
    ///
    /// # Errors
    ///
    /// Propagates errors from the broadcast, including a failed relayout.
    pub fn set_width(&self, width: f64) -> Result<(), NotifyError> {
        if self.replace_width(width) {
            self.hub.dirty(SIZE)?;
        }
        Ok(())
    }

    /// Applies several changes and signals once.
    ///
    /// Signals the single changed kind, or [`LAYOUT`] when more than one input
    /// changed, and nothing when every value was already current.
    ///
    /// ```
    /// use trellis_text::{FixedAdvance, Font, TextBox};
    ///
    /// let text_box = TextBox::new(FixedAdvance(1.0));
    /// text_box
    ///     .edit(|edit| {
    ///         edit.set_font(Font::new("serif", 10.0));
    ///         edit.set_width(4.0);
    ///         edit.set_text("one two");
    ///     })
    ///     .unwrap();
    /// assert_eq!(text_box.layout().lines(), ["one", "two"]);
    /// ```
    ///
    /// # Errors
    ///
    /// Propagates errors from the broadcast, including a failed relayout.
    pub fn edit(&self, f: impl FnOnce(&mut TextEdit<'_, M>)) -> Result<(), NotifyError> {
        let mut edit = TextEdit {
            text_box: self,
            changed: ChangeSet::EMPTY,
        };
        f(&mut edit);
        let mut kinds = edit.changed.iter();
        match (kinds.next(), kinds.next()) {
            (None, _) => {}
            (Some(kind), None) => {
                self.hub.dirty(kind)?;
            }
            (Some(_), Some(_)) => {
                self.hub.dirty(LAYOUT)?;
            }
        }
        Ok(())
    }

    /// Recomputes the wrapped lines from the current text, font, and width.
    ///
    /// This normally runs from the box's own dirty handler; calling it again
    /// with unchanged inputs gives an identical layout.
    ///
    /// No borrow of the box is held while measuring, so the [`Measure`]
    /// implementation may read the box.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::FontUnresolved`] if no usable font is set.
    pub fn refresh_metrics(&self) -> Result<(), LayoutError> {
        let (text, descriptor, width) = {
            let mut state = self.state.borrow_mut();
            let state = &mut *state;
            let descriptor = resolve_descriptor(state.font.as_ref(), &mut state.descriptor)?;
            (state.text.clone(), descriptor.clone(), state.width)
        };
        let layout = wrap(&text, width, &descriptor, &self.measure);
        debug_event!(
            lines = layout.len(),
            width,
            font = %descriptor,
            "text reflowed"
        );
        self.state.borrow_mut().layout = layout;
        Ok(())
    }

    fn replace_text(&self, text: String) -> bool {
        let mut state = self.state.borrow_mut();
        if state.text == text {
            return false;
        }
        state.text = text;
        true
    }

    fn replace_font(&self, font: Font) -> bool {
        let mut state = self.state.borrow_mut();
        if state.font.as_ref() == Some(&font) {
            return false;
        }
        state.font = Some(font);
        state.descriptor = None;
        true
    }

    fn replace_width(&self, width: f64) -> bool {
        let mut state = self.state.borrow_mut();
        if state.width == width {
            return false;
        }
        state.width = width;
        true
    }
}

impl<M> Observable for TextBox<M> {
    fn hub(&self) -> &NotificationHub {
        &self.hub
    }
}

impl<M: Measure + 'static> DependencyObserver for TextBox<M> {
    fn dependency_dirtied(
        &self,
        component: ComponentKind,
        source: &NotificationHub,
        change: ChangeKind,
    ) -> Result<(), NotifyError> {
        if component == TEXT_BOX && source.is_same(&self.hub) && RELAYOUT.contains(change) {
            self.refresh_metrics().map_err(NotifyError::observer)?;
        }
        Ok(())
    }
}

/// Batched setters handed out by [`TextBox::edit`].
pub struct TextEdit<'a, M> {
    text_box: &'a TextBox<M>,
    changed: ChangeSet,
}

impl<M: fmt::Debug> fmt::Debug for TextEdit<'_, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextEdit")
            .field("text_box", self.text_box)
            .field("changed", &self.changed)
            .finish()
    }
}

impl<M: Measure + 'static> TextEdit<'_, M> {
    /// Replaces the text.
    pub fn set_text(&mut self, text: impl Into<String>) -> &mut Self {
        if self.text_box.replace_text(text.into()) {
            self.changed.insert(CONTENT);
        }
        self
    }

    /// Replaces the font.
    pub fn set_font(&mut self, font: Font) -> &mut Self {
        if self.text_box.replace_font(font) {
            self.changed.insert(FONT);
        }
        self
    }

    /// Replaces the wrap width.
    pub fn set_width(&mut self, width: f64) -> &mut Self {
        if self.text_box.replace_width(width) {
            self.changed.insert(SIZE);
        }
        self
    }
}
