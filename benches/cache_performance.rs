//! Benchmarks for completion index construction and queries
//!
//! This benchmark measures:
//! - Index build time for growing translation units
//! - Exhaustive prefix search over the master list
//! - Member completion on a class with a deep inheritance chain
//!
//! Run with: cargo bench --bench cache_performance

use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use completion_cache::syntax::{AccessLevel, NodeId, SyntaxTree, SyntaxTreeBuilder};
use completion_cache::{AccessFilter, Cache};

/// `namespaces` namespaces, each holding `classes` classes with a handful of
/// members, plus free functions. Every class after the first derives from the
/// previous one in its namespace.
fn generate_tree(namespaces: usize, classes: usize) -> (Arc<SyntaxTree>, NodeId) {
    let mut b = SyntaxTreeBuilder::new();
    let root = b.root();
    let mut deepest = root;

    for n in 0..namespaces {
        let ns = b.namespace(root, &format!("ns{}", n));
        let mut previous: Option<NodeId> = None;
        for c in 0..classes {
            let class = b.class(ns, &format!("Class{}_{}", n, c));
            b.method(class, &format!("get{}", c), &[], Some("int"), AccessLevel::Public, false);
            b.method(class, &format!("set{}", c), &["int"], None, AccessLevel::Public, false);
            b.field(class, &format!("value{}", c), "int", AccessLevel::Protected);
            b.field(class, &format!("cache{}", c), "bool", AccessLevel::Private);
            if let Some(base) = previous {
                b.inherit(class, base, AccessLevel::Public);
            }
            previous = Some(class);
            deepest = class;
        }
        b.function(ns, &format!("helper{}", n), &["const char*", "size_t"], Some("void"));
    }

    (Arc::new(b.finish()), deepest)
}

fn bench_index_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_build");

    for (namespaces, classes) in [(4, 8), (16, 16), (32, 32)].iter() {
        let (tree, _) = generate_tree(*namespaces, *classes);
        group.throughput(Throughput::Elements(tree.len() as u64));
        group.bench_with_input(BenchmarkId::new("nodes", tree.len()), &tree, |b, tree| {
            b.iter(|| {
                let cache = Cache::new(tree.clone(), tree.root()).unwrap_or_else(|e| panic!("{}", e));
                black_box(cache.len())
            })
        });
    }

    group.finish();
}

fn bench_prefix_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("prefix_search");
    let (tree, _) = generate_tree(32, 32);
    let cache = Cache::new(tree.clone(), tree.root()).unwrap_or_else(|e| panic!("{}", e));
    group.throughput(Throughput::Elements(cache.len() as u64));

    for prefix in ["", "g", "get1", "Class31_", "nothing"].iter() {
        group.bench_with_input(BenchmarkId::new("prefix", prefix), prefix, |b, prefix| {
            b.iter(|| black_box(cache.complete_starts_with(prefix).len()))
        });
    }

    group.finish();
}

fn bench_member_completion(c: &mut Criterion) {
    let mut group = c.benchmark_group("member_completion");
    let (tree, deepest) = generate_tree(4, 64);
    let cache = Cache::new(tree.clone(), tree.root()).unwrap_or_else(|e| panic!("{}", e));

    for filter in [AccessFilter::All, AccessFilter::PublicOnly, AccessFilter::SameScope].iter() {
        group.bench_with_input(BenchmarkId::new("filter", filter), filter, |b, filter| {
            b.iter(|| black_box(cache.complete_cursor(deepest, *filter).len()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_index_build, bench_prefix_search, bench_member_completion);
criterion_main!(benches);
