//! Benchmarks for the quantization pipeline at different mesh sizes and level counts

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use meshquant_core::{Point3d, TriangleMesh};
use meshquant_quantization::{PipelineConfig, QuantizationPipeline};

fn generate_grid_mesh(size: usize) -> TriangleMesh {
    let mut vertices = Vec::with_capacity(size * size);
    for y in 0..size {
        for x in 0..size {
            let fx = x as f64 / (size - 1) as f64 * std::f64::consts::PI;
            let fy = y as f64 / (size - 1) as f64 * std::f64::consts::PI;
            vertices.push(Point3d::new(x as f64, y as f64, (fx.sin() * fy.sin()) * 2.0));
        }
    }
    let mut faces = Vec::with_capacity((size - 1) * (size - 1) * 2);
    for y in 0..(size - 1) {
        for x in 0..(size - 1) {
            let tl = y * size + x;
            let tr = tl + 1;
            let bl = (y + 1) * size + x;
            let br = bl + 1;
            faces.push([tl, bl, tr]);
            faces.push([tr, bl, br]);
        }
    }
    TriangleMesh::from_vertices_and_faces(vertices, faces)
}

fn bench_pipeline(c: &mut Criterion) {
    let sizes = [16, 64, 256];
    let levels = [256, 1024, 65536];

    let mut group = c.benchmark_group("quantization_pipeline");

    for &size in &sizes {
        let mesh = generate_grid_mesh(size);
        let vertex_count = mesh.vertex_count();

        for &level_count in &levels {
            group.bench_with_input(
                BenchmarkId::new("run", format!("{}v_l{}", vertex_count, level_count)),
                &(&mesh, level_count),
                |b, &(mesh, level_count)| {
                    let pipeline = QuantizationPipeline::new(PipelineConfig::with_levels(level_count));
                    b.iter(|| {
                        let output = pipeline.run(black_box(mesh)).unwrap();
                        black_box(output);
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
