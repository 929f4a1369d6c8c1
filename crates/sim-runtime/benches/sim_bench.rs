use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sim_ai::GreedyPolicy;
use sim_core::{Catalog, SimConfig};
use sim_runtime::{SessionOptions, Simulator, TurnRequest};

fn bench_turns(c: &mut Criterion) {
    let catalog = Catalog::builtin();
    let sim = Simulator::new(&catalog, SimConfig::default()).unwrap();
    let s0 = sim
        .create_session(SessionOptions::default().scenario("bank-risk-and-growth-rebalance").seed(42))
        .unwrap();

    c.bench_function("single turn", |b| {
        b.iter(|| {
            let mut s = s0.clone();
            let id = s.options[0].clone();
            black_box(sim.apply_turn(&mut s, &TurnRequest::decisions([id])));
        })
    });

    c.bench_function("greedy session x 10 quarters", |b| {
        b.iter(|| {
            let mut s = s0.clone();
            let mut policy = GreedyPolicy;
            while sim.autoplay_turn(&mut s, &mut policy).is_some() {}
            black_box(s.scorecard())
        })
    });
}

criterion_group!(benches, bench_turns);
criterion_main!(benches);
