use criterion::{Criterion, criterion_group, criterion_main};
use petrel::{Graph, Link, Node, Simulation, SimulationOptions};
use std::hint::black_box;

// Ring of `n` nodes with a chord every 7 nodes, roughly the density of a regional route map.
fn ring_graph(n: usize) -> Graph {
    let nodes = (0..n).map(|i| Node::new(format!("n{i}"))).collect();
    let mut links = Vec::with_capacity(n + n / 7);
    for i in 0..n {
        links.push(Link::new(format!("n{i}"), format!("n{}", (i + 1) % n)));
        if i % 7 == 0 {
            links.push(Link::new(format!("n{i}"), format!("n{}", (i + n / 2) % n)));
        }
    }
    Graph { nodes, links }
}

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulation_tick");
    group.sample_size(50);

    for n in [100usize, 1_000] {
        let graph = ring_graph(n);
        group.bench_function(format!("ring_{n}_x10"), |b| {
            b.iter(|| {
                let mut sim = Simulation::new(&graph, SimulationOptions::default()).expect("sim");
                for _ in 0..10 {
                    sim.step();
                }
                black_box(sim.alpha());
            })
        });
    }

    group.bench_function("ring_300_until_settled", |b| {
        let graph = ring_graph(300);
        b.iter(|| {
            let mut sim = Simulation::new(&graph, SimulationOptions::default()).expect("sim");
            black_box(sim.run_until_settled(usize::MAX));
        })
    });

    group.finish();
}

criterion_group!(benches, bench_tick);
criterion_main!(benches);
