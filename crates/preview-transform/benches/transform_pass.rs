//! Benchmarks for whole transform passes.
//!
//! Measures pass time across project sizes; the transformer is the hot path
//! of every preview render, so regressions here show up directly as preview
//! latency.
//!
//! # Run Benchmarks
//!
//! ```bash
//! cargo bench --bench transform_pass
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use preview_transform::{transform, TransformConfig};
use preview_vfs::{Vfs, VfsBuilder};
use std::hint::black_box;

/// Builds a star-shaped project: the entry imports every component, and each
/// component pulls in the shared CDN import plus a stylesheet.
fn synthetic_project(component_count: usize) -> Vfs {
    let mut builder = VfsBuilder::new();

    let mut entry = String::from("import React from 'react';\n");
    for i in 0..component_count {
        entry.push_str(&format!("import Component{i} from './components/Component{i}';\n"));
    }
    entry.push_str("export default function App() { return null; }\n");
    builder = builder.add_file("/App.jsx", entry);

    for i in 0..component_count {
        builder = builder.add_file(
            format!("/components/Component{i}.jsx"),
            format!(
                "import React from 'react';\n\
                 import './Component{i}.css';\n\
                 export default function Component{i}() {{\n\
                   return <div className=\"c{i}\">component {i}</div>;\n\
                 }}\n"
            ),
        );
        builder = builder.add_file(
            format!("/components/Component{i}.css"),
            format!(".c{i} {{ display: flex; }}\n"),
        );
    }

    builder.build().unwrap()
}

fn bench_transform_by_module_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform_by_module_count");
    let config = TransformConfig::default();

    for component_count in [1, 10, 30, 50, 100] {
        let vfs = synthetic_project(component_count);
        group.bench_with_input(
            BenchmarkId::new("star", component_count),
            &component_count,
            |b, _| {
                b.iter(|| transform(black_box(&vfs), black_box(&config)).unwrap());
            },
        );
    }
    group.finish();
}

fn bench_transform_deep_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform_deep_chain");
    let config = TransformConfig::default();

    for depth in [10usize, 50, 100] {
        let mut builder = VfsBuilder::new();
        builder = builder.add_file("/App.jsx", "import Next from './mod0';\nexport default Next;\n");
        for i in 0..depth {
            let body = if i + 1 == depth {
                "export default 'leaf';\n".to_string()
            } else {
                format!("import Next from './mod{}';\nexport default Next;\n", i + 1)
            };
            builder = builder.add_file(format!("/mod{i}.jsx"), body);
        }
        let vfs = builder.build().unwrap();

        group.bench_with_input(BenchmarkId::new("chain", depth), &depth, |b, _| {
            b.iter(|| transform(black_box(&vfs), black_box(&config)).unwrap());
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_transform_by_module_count,
    bench_transform_deep_chain
);
criterion_main!(benches);
