use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sim_ai::{persona, DecisionPolicy, PersonaPolicy, PolicyContext};
use sim_core::{Catalog, SimConfig};
use sim_runtime::{SessionOptions, Simulator};

fn bench_personas(c: &mut Criterion) {
    let catalog = Catalog::builtin();
    let sim = Simulator::new(&catalog, SimConfig::default()).unwrap();
    let session = sim
        .create_session(SessionOptions::default().role("cfo").seed(11))
        .unwrap();
    let cfo = persona("risk-tight-cfo").unwrap();

    c.bench_function("persona choice", |b| {
        let menu = sim.menu_entries(&session);
        let mut policy = PersonaPolicy::for_episode(cfo.clone(), 11);
        b.iter(|| {
            let ctx = PolicyContext {
                menu: &menu,
                scenario: &session.scenario,
            };
            black_box(policy.choose(&ctx))
        })
    });

    c.bench_function("persona episode", |b| {
        b.iter(|| {
            let mut s = session.clone();
            let mut policy = PersonaPolicy::for_episode(cfo.clone(), 11);
            while sim.autoplay_turn(&mut s, &mut policy).is_some() {}
            black_box(s.scorecard().overall)
        })
    });
}

criterion_group!(benches, bench_personas);
criterion_main!(benches);
