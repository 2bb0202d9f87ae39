// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use trellis_text::{FixedAdvance, Font, TextBox, tokenize, wrap};

#[derive(Clone)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u32(&mut self) -> u32 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 32) as u32
    }
}

/// Builds `words` pseudo-random words of 1..=12 letters with occasional
/// paragraph breaks.
fn prose(words: usize, seed: u64) -> String {
    let mut rng = Lcg::new(seed);
    let mut text = String::new();
    for i in 0..words {
        if i > 0 {
            text.push(if rng.next_u32() % 40 == 0 { '\n' } else { ' ' });
        }
        let len = 1 + rng.next_u32() % 12;
        for _ in 0..len {
            let letter = b'a' + (rng.next_u32() % 26) as u8;
            text.push(char::from(letter));
        }
    }
    text
}

fn bench_wrap(c: &mut Criterion) {
    let mut group = c.benchmark_group("trellis_text");
    group.sample_size(50);

    let font = Font::new("monospace", 12.0).descriptor().unwrap();
    let measure = FixedAdvance(7.0);

    for &words in &[16_usize, 256, 4_096] {
        let text = prose(words, 0x7E47_0000_0000_0001);

        group.bench_function(format!("tokenize(words={words})"), |b| {
            b.iter(|| black_box(tokenize(black_box(&text)).count()));
        });

        for &width in &[80.0_f64, 640.0] {
            group.bench_function(format!("wrap(words={words},width={width})"), |b| {
                b.iter(|| black_box(wrap(black_box(&text), width, &font, &measure).len()));
            });
        }

        // Full round trip through the hub: set width, broadcast, relayout.
        let text_box = TextBox::new(measure);
        text_box
            .edit(|edit| {
                edit.set_font(Font::new("monospace", 12.0));
                edit.set_text(text.clone());
            })
            .unwrap();
        let mut toggle = false;
        group.bench_function(format!("text_box_resize(words={words})"), |b| {
            b.iter(|| {
                toggle = !toggle;
                let width = if toggle { 320.0 } else { 480.0 };
                text_box.set_width(width).unwrap();
                black_box(text_box.line_count());
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_wrap);
criterion_main!(benches);
