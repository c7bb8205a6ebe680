// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Performance benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use meshtweak::geometry::{ActionPoint, Face, Selection};
use meshtweak::{build_intermediary_mesh, BodyRegion, Mesh, TextureLibrary, Vertex};

/// Cylinder-like strip with `rings` rings of `segments` vertices, split into three zones
fn synthetic_body(rings: usize, segments: usize, radius: f32, library: &mut TextureLibrary) -> Mesh {
    let mut mesh = Mesh::new();
    let at = |ring: usize, seg: usize| ring * segments + seg;

    for ring in 0..rings {
        for seg in 0..segments {
            let angle = seg as f32 / segments as f32 * std::f32::consts::TAU;
            mesh.vertices
                .push(Vertex::at(radius * angle.cos(), ring as f32, radius * angle.sin()));
        }
    }

    mesh.textures.push(library.acquire("graph/obj3d/textures/bench_skin.bmp"));
    for ring in 0..rings - 1 {
        for seg in 0..segments {
            let next = (seg + 1) % segments;
            let (a, b, c, d) = (at(ring, seg), at(ring, next), at(ring + 1, next), at(ring + 1, seg));
            mesh.faces.push(Face::new([a, b, c], Some(0)));
            mesh.faces.push(Face::new([a, c, d], Some(0)));
        }
    }

    let third = rings / 3;
    let zone = |from: usize, to: usize| (at(from, 0)..at(to, 0) + segments).collect::<Vec<_>>();
    mesh.selections = vec![
        Selection::with_vertices("leggings", zone(0, third)),
        Selection::with_vertices("chest", zone(third, 2 * third)),
        Selection::with_vertices("head", zone(2 * third, rings - 1)),
    ];
    mesh.action_points = vec![
        ActionPoint {
            name: "head2chest".to_string(),
            vertex: at(2 * third, 0),
            action: 0,
            effect: 0,
        },
        ActionPoint {
            name: "chest2leggings".to_string(),
            vertex: at(third, 0),
            action: 0,
            effect: 0,
        },
    ];
    mesh.bounds = mesh.bounding_box();
    mesh
}

fn bench_dedup(c: &mut Criterion) {
    let mut group = c.benchmark_group("dedup");
    let mut library = TextureLibrary::new();

    for rings in [12, 48] {
        let body = synthetic_body(rings, 16, 1.0, &mut library);
        group.bench_with_input(BenchmarkId::new("add_vertex", rings), &body, |b, body| {
            b.iter(|| {
                let mut mesh = Mesh::new();
                for vertex in body.vertices.iter().chain(body.vertices.iter()) {
                    mesh.add_vertex(black_box(vertex));
                }
                mesh
            });
        });
    }

    group.finish();
}

fn bench_intermediary(c: &mut Criterion) {
    let mut group = c.benchmark_group("intermediary");
    let mut library = TextureLibrary::new();

    for rings in [12, 48] {
        let base = synthetic_body(rings, 16, 1.0, &mut library);
        let source = synthetic_body(rings, 16, 1.5, &mut library);

        for region in BodyRegion::ALL {
            group.bench_with_input(
                BenchmarkId::new(region.selection_name(), rings),
                &(&base, &source),
                |b, (base, source)| {
                    b.iter(|| build_intermediary_mesh(black_box(base), black_box(source), region))
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_dedup, bench_intermediary);
criterion_main!(benches);
