// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for `TextBox`: relayout on dirty signals and the wrapping scenarios
//! the engine must get right.

use std::cell::{Cell, RefCell};
use std::error::Error;
use std::rc::{Rc, Weak};

use trellis_notify::{
    ChangeKind, ComponentKind, DependencyObserver, NotificationHub, NotifyError, Observable,
};
use trellis_text::{
    CONTENT, FONT, FixedAdvance, Font, FontDescriptor, LAYOUT, LayoutError, LineStart, Measure,
    SIZE, TEXT_BOX, TextBox,
};

fn four_per_char(text: &str, _: &FontDescriptor) -> f64 {
    text.chars().count() as f64 * 4.0
}

fn ready<M: trellis_text::Measure + 'static>(measure: M, width: f64) -> Rc<TextBox<M>> {
    let text_box = TextBox::new(measure);
    text_box
        .edit(|edit| {
            edit.set_font(Font::new("sans-serif", 12.0));
            edit.set_width(width);
        })
        .unwrap();
    text_box
}

#[test]
fn everything_fits_on_one_line() {
    let text_box = ready(four_per_char, 10_000.0);
    text_box.set_text("Hi! Im some text").unwrap();

    let layout = text_box.layout();
    assert_eq!(layout.lines(), ["Hi! Im some text"]);
    assert_eq!(
        layout.line_widths(),
        [four_per_char("Hi! Im some text", &descriptor())]
    );
    assert_eq!(layout.line_starts(), [LineStart::First]);
}

fn descriptor() -> FontDescriptor {
    Font::new("sans-serif", 12.0).descriptor().unwrap()
}

#[test]
fn space_cannot_start_a_wrapped_line() {
    let text_box = ready(four_per_char, 5.0);
    text_box.set_text("aaaa bbbb").unwrap();

    let layout = text_box.layout();
    assert_eq!(layout.lines(), ["aaaa", "bbbb"]);
    assert_eq!(layout.line_widths(), [16.0, 16.0]);
    assert_eq!(layout.line_starts(), [LineStart::First, LineStart::Wrapped]);
}

#[test]
fn blank_lines_are_dropped() {
    let text_box = ready(FixedAdvance(1.0), 100.0);
    text_box.set_text("a\n\nb").unwrap();

    assert_eq!(text_box.layout().lines(), ["a", "b"]);
    assert_eq!(
        text_box.layout().line_starts(),
        [LineStart::First, LineStart::Explicit]
    );
}

#[test]
fn overlong_word_overflows_alone() {
    let text_box = ready(FixedAdvance(1.0), 4.0);
    text_box.set_text("hi extraordinarily ok").unwrap();

    let layout = text_box.layout();
    assert_eq!(layout.lines(), ["hi ", "extraordinarily", "ok"]);
    assert_eq!(layout.line_widths()[1], 15.0);
    assert_eq!(text_box.max_line_width(), 15.0);
}

#[test]
fn refresh_is_idempotent() {
    let text_box = ready(FixedAdvance(2.0), 9.0);
    text_box.set_text("the quick brown fox\njumps").unwrap();
    let before = text_box.layout().clone();

    text_box.refresh_metrics().unwrap();
    text_box.refresh_metrics().unwrap();

    assert_eq!(*text_box.layout(), before);
}

#[test]
fn width_change_rewraps() {
    let text_box = ready(FixedAdvance(1.0), 100.0);
    text_box.set_text("one two three").unwrap();
    assert_eq!(text_box.line_count(), 1);

    text_box.set_width(6.0).unwrap();
    assert_eq!(text_box.layout().lines(), ["one ", "two ", "three"]);
    assert_eq!(text_box.height(10.0), 30.0);
}

#[test]
fn layout_without_font_is_a_contract_violation() {
    let text_box = TextBox::new(FixedAdvance(1.0));

    assert_eq!(text_box.refresh_metrics(), Err(LayoutError::FontUnresolved));

    let err = text_box.set_text("hello").unwrap_err();
    let source = err.source().unwrap();
    assert_eq!(
        source.downcast_ref::<LayoutError>(),
        Some(&LayoutError::FontUnresolved)
    );
    // The text is kept; the next successful relayout picks it up.
    assert_eq!(&*text_box.text(), "hello");
    text_box.set_font(Font::new("serif", 10.0)).unwrap();
    assert_eq!(text_box.layout().lines(), ["hello"]);
}

#[test]
fn descriptor_is_cached_until_the_font_changes() {
    let text_box = TextBox::new(FixedAdvance(1.0));
    assert_eq!(text_box.font_descriptor(), None);

    text_box.set_font(Font::new("serif", 10.0)).unwrap();
    assert_eq!(text_box.font_descriptor().unwrap().as_str(), "10px serif");

    text_box
        .set_font(Font::new("serif", 10.0).with_weight(Font::BOLD_WEIGHT))
        .unwrap();
    assert_eq!(text_box.font_descriptor().unwrap().as_str(), "700 10px serif");
}

#[test]
fn measurement_sees_the_descriptor() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = seen.clone();
    let text_box = TextBox::new(move |text: &str, font: &FontDescriptor| {
        log.borrow_mut().push(font.to_string());
        text.len() as f64
    });
    text_box.set_font(Font::new("monospace", 9.0)).unwrap();
    text_box.set_text("x").unwrap();

    assert!(seen.borrow().iter().all(|font| font == "9px monospace"));
    assert!(!seen.borrow().is_empty());
}

/// Two pixels per char; logs the box's width as seen from inside layout.
#[derive(Default)]
struct ReadsBack {
    text_box: RefCell<Weak<TextBox<ReadsBack>>>,
    widths: RefCell<Vec<f64>>,
}

impl Measure for ReadsBack {
    fn measure(&self, text: &str, _: &FontDescriptor) -> f64 {
        let text_box = self.text_box.borrow().upgrade().unwrap();
        assert!(!text_box.text().is_empty());
        self.widths.borrow_mut().push(text_box.width());
        text.chars().count() as f64 * 2.0
    }
}

#[test]
fn measurement_may_read_the_box() {
    let text_box = TextBox::new(ReadsBack::default());
    *text_box.measure().text_box.borrow_mut() = Rc::downgrade(&text_box);
    text_box
        .edit(|edit| {
            edit.set_font(Font::new("serif", 10.0))
                .set_width(7.0)
                .set_text("ab cd ef");
        })
        .unwrap();

    assert_eq!(text_box.layout().lines(), ["ab ", "cd ", "ef"]);
    assert_eq!(text_box.layout().line_widths(), [6.0, 6.0, 4.0]);
    let widths = text_box.measure().widths.borrow();
    assert!(!widths.is_empty());
    assert!(widths.iter().all(|&width| width == 7.0));
}

/// Records what the text box looked like when each signal arrived.
struct Watcher {
    text_box: Rc<TextBox<FixedAdvance>>,
    seen: RefCell<Vec<(ChangeKind, usize)>>,
}

impl DependencyObserver for Watcher {
    fn dependency_dirtied(
        &self,
        component: ComponentKind,
        _: &NotificationHub,
        change: ChangeKind,
    ) -> Result<(), NotifyError> {
        assert_eq!(component, TEXT_BOX);
        self.seen
            .borrow_mut()
            .push((change, self.text_box.line_count()));
        Ok(())
    }
}

#[test]
fn other_observers_see_fresh_lines() {
    let text_box = ready(FixedAdvance(1.0), 3.0);
    let watcher = Rc::new(Watcher {
        text_box: text_box.clone(),
        seen: RefCell::default(),
    });
    text_box.hub().attach(&watcher);

    text_box.set_text("ab cd ef").unwrap();
    text_box.set_width(100.0).unwrap();

    assert_eq!(*watcher.seen.borrow(), [(CONTENT, 3), (SIZE, 1)]);
    text_box.hub().detach(&watcher);
}

#[test]
fn unchanged_values_do_not_signal() {
    let text_box = ready(FixedAdvance(1.0), 10.0);
    let count = Rc::new(Counter::default());
    text_box.hub().attach(&count);

    text_box.set_width(10.0).unwrap();
    text_box.set_font(Font::new("sans-serif", 12.0)).unwrap();
    text_box
        .edit(|edit| {
            edit.set_text("");
        })
        .unwrap();
    assert_eq!(count.0.get(), 0);

    text_box.set_text("x").unwrap();
    assert_eq!(count.0.get(), 1);
}

#[test]
fn edit_signals_once() {
    let text_box = TextBox::new(FixedAdvance(1.0));
    let count = Rc::new(Counter::default());
    text_box.hub().attach(&count);

    text_box
        .edit(|edit| {
            edit.set_font(Font::new("serif", 10.0))
                .set_width(4.0)
                .set_text("one two");
        })
        .unwrap();

    assert_eq!(count.0.get(), 1);
    assert_eq!(count.1.get(), Some(LAYOUT));

    text_box
        .edit(|edit| {
            edit.set_font(Font::new("serif", 11.0));
        })
        .unwrap();
    assert_eq!(count.1.get(), Some(FONT));
}

#[test]
fn frozen_box_keeps_stale_lines_until_dirtied() {
    let text_box = ready(FixedAdvance(1.0), 100.0);
    text_box.set_text("before").unwrap();

    {
        let _frozen = text_box.hub().frozen();
        text_box.set_text("after").unwrap();
        assert_eq!(text_box.layout().lines(), ["before"]);
    }
    // Unfreezing does not replay the suppressed signal.
    assert_eq!(text_box.layout().lines(), ["before"]);

    text_box.hub().dirty(CONTENT).unwrap();
    assert_eq!(text_box.layout().lines(), ["after"]);
}

#[derive(Default)]
struct Counter(Cell<u32>, Cell<Option<ChangeKind>>);

impl DependencyObserver for Counter {
    fn dependency_dirtied(
        &self,
        _: ComponentKind,
        _: &NotificationHub,
        change: ChangeKind,
    ) -> Result<(), NotifyError> {
        self.0.set(self.0.get() + 1);
        self.1.set(Some(change));
        Ok(())
    }
}
