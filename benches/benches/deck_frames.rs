// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::time::Duration;

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Size;
use understory_deck::SwipeDeck;
use understory_deck::config::DeckConfig;
use understory_deck::deck::{DeckController, RenderDecision};
use understory_deck::render::CardRenderer;
use understory_deck::transform::CardTransform;
use understory_deck::types::Direction;

const VIEWPORT: Size = Size::new(390.0, 844.0);
const FRAME: Duration = Duration::from_millis(16);

struct Count;
impl CardRenderer<u32> for Count {
    type Output = ();
    fn render_card(&mut self, item: &u32) {
        black_box(item);
    }
    fn render_no_more_cards(&mut self) {}
}

fn bench_render_decision(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_decision");
    for n in [16_u32, 256, 4096] {
        let deck = DeckController::new((0..n).collect::<Vec<_>>());
        let top = CardTransform::for_offset(kurbo::Vec2::new(42.0, 0.0), VIEWPORT.width, 50.0);
        group.throughput(Throughput::Elements(u64::from(n)));
        group.bench_function(format!("classify_{n}"), |b| {
            b.iter(|| {
                let RenderDecision::Cards(slots) = deck.render_decision(black_box(top), 8.0) else {
                    unreachable!()
                };
                black_box(slots.len())
            });
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let deck = SwipeDeck::new((0..256_u32).collect::<Vec<_>>(), VIEWPORT, DeckConfig::default());
    c.bench_function("render_256", |b| b.iter(|| black_box(deck.render(&mut Count))));
}

fn bench_drag_stream(c: &mut Criterion) {
    c.bench_function("drag_move_120", |b| {
        b.iter_batched(
            || SwipeDeck::new(vec![1_u32, 2, 3], VIEWPORT, DeckConfig::default()),
            |mut deck| {
                deck.on_drag_start();
                for i in 0..120 {
                    deck.on_drag_move(f64::from(i) * 2.5);
                    black_box(deck.current_transform());
                }
                deck.on_drag_end(300.0)
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_animations(c: &mut Criterion) {
    let mut group = c.benchmark_group("animate");
    group.bench_function("swipe_out_to_commit", |b| {
        b.iter_batched(
            || SwipeDeck::new(vec![1_u32, 2, 3], VIEWPORT, DeckConfig::default()),
            |mut deck| {
                deck.force_swipe(Direction::Left).ok();
                while deck.advance(FRAME).is_none() {}
                deck
            },
            BatchSize::SmallInput,
        );
    });
    group.bench_function("spring_back", |b| {
        b.iter_batched(
            || {
                let mut deck = SwipeDeck::new(vec![1_u32], VIEWPORT, DeckConfig::default());
                deck.on_drag_start();
                deck
            },
            |mut deck| {
                deck.on_drag_end(40.0);
                while deck.advance(FRAME).is_none() {}
                deck
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_render_decision,
    bench_render,
    bench_drag_stream,
    bench_animations
);
criterion_main!(benches);
