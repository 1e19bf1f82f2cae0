use claimnet_core::{Edge, Node};
use claimnet_metrics::{MetricsGraph, PageRankConfig, compute, metrics};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

const SIZES: [usize; 3] = [50, 200, 800];

/// Deterministic sparse network: each node links to the next one and to
/// two pseudo-random targets, with every tenth node left isolated.
fn synthetic_network(n: usize) -> (Vec<Node>, Vec<Edge>) {
    let nodes: Vec<Node> = (0..n).map(|i| Node::new(format!("c{i}"))).collect();
    let mut edges = Vec::with_capacity(n * 3);
    let mut state: u64 = 0x5EED_u64 + n as u64;
    for i in (0..n).filter(|i| i % 10 != 9) {
        edges.push(Edge::new(format!("c{i}"), format!("c{}", (i + 1) % n)));
        for _ in 0..2 {
            state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
            let j = (state >> 33) as usize % n;
            edges.push(Edge::new(format!("c{i}"), format!("c{j}")));
        }
    }
    (nodes, edges)
}

fn bench_compute(c: &mut Criterion) {
    let mut group = c.benchmark_group("metrics.compute");

    for n in SIZES {
        let (nodes, edges) = synthetic_network(n);
        group.throughput(Throughput::Elements(edges.len() as u64));

        group.bench_with_input(
            BenchmarkId::new("all", n),
            &(&nodes, &edges),
            |b, (nodes, edges)| b.iter(|| black_box(compute(nodes, edges))),
        );

        let g = MetricsGraph::build(&nodes, &edges);
        group.bench_with_input(BenchmarkId::new("pagerank", n), &g, |b, g| {
            b.iter(|| black_box(metrics::pagerank::pagerank(g, &PageRankConfig::default())));
        });
        group.bench_with_input(BenchmarkId::new("betweenness", n), &g, |b, g| {
            b.iter(|| black_box(metrics::betweenness::betweenness_centrality(g)));
        });
        group.bench_with_input(BenchmarkId::new("harmonic", n), &g, |b, g| {
            b.iter(|| black_box(metrics::harmonic::harmonic_centrality(g)));
        });
    }

    group.finish();
}

fn bench_build(c: &mut Criterion) {
    let (nodes, edges) = synthetic_network(800);
    c.bench_function("metrics.build/800", |b| {
        b.iter(|| black_box(MetricsGraph::build(&nodes, &edges)));
    });
}

criterion_group!(benches, bench_compute, bench_build);
criterion_main!(benches);
