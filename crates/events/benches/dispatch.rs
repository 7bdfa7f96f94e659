use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use herald_events::{
    CommonDispatcher, Dispatchable, Dispatcher, HandlerResult, KindRouter, MessageKind, handler_fn,
};

const PING: MessageKind = MessageKind::new("bench.ping");
const PONG: MessageKind = MessageKind::new("bench.pong");

#[derive(Debug)]
enum Msg {
    Ping(u64),
    Pong(u64),
}

impl Dispatchable for Msg {
    fn kind(&self) -> MessageKind {
        match self {
            Msg::Ping(_) => PING,
            Msg::Pong(_) => PONG,
        }
    }
}

fn ping_only() -> impl herald_events::Handler<Msg> + 'static {
    handler_fn("ping-only", |m: &Msg| -> HandlerResult {
        if let Msg::Ping(n) = m {
            black_box(*n);
        }
        Ok(())
    })
}

fn fan_out(c: &mut Criterion) {
    let mut group = c.benchmark_group("fan_out");
    for handlers in [1usize, 8, 64] {
        let broadcast = (0..handlers)
            .fold(CommonDispatcher::builder(), |b, _| b.handler(ping_only()))
            .build();
        let routed = (0..handlers)
            .fold(KindRouter::<Msg>::builder(), |b, _| b.route(PING, ping_only()))
            .build();

        group.bench_with_input(BenchmarkId::new("broadcast", handlers), &handlers, |b, _| {
            b.iter(|| broadcast.dispatch(Msg::Pong(1)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("routed", handlers), &handlers, |b, _| {
            b.iter(|| routed.dispatch(Msg::Pong(1)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("broadcast_match", handlers), &handlers, |b, _| {
            b.iter(|| broadcast.dispatch(Msg::Ping(1)).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, fan_out);
criterion_main!(benches);
