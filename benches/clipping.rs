use criterion::{criterion_group, criterion_main, Criterion};
use maptopo::data::{ClipRect, Interior, Path, Point};
use maptopo::RectClipper;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::TAU;

const RING_SIZE: usize = 10_000;

fn jagged_ring(rng: &mut SmallRng, n: usize) -> Path {
  let points = (0..n)
    .map(|i| {
      let angle = TAU * i as f64 / n as f64;
      let r = rng.gen_range(50.0..100.0);
      Point::new([r * angle.cos(), r * angle.sin()])
    })
    .collect();
  Path::ring(points)
}

pub fn criterion_benchmark(c: &mut Criterion) {
  let mut rng = SmallRng::seed_from_u64(1);
  let mut ring = jagged_ring(&mut rng, RING_SIZE);
  let line = Path::open(ring.points().to_vec());
  let _ = ring.close(Interior::Unclassified);

  let mut clipper = RectClipper::new(ClipRect::new(-60.0, 60.0, -60.0, 60.0).unwrap());
  c.bench_function("clip_ring::<jagged 10k>", |b| b.iter(|| clipper.clip_ring(&ring)));
  c.bench_function("clip_line::<jagged 10k>", |b| b.iter(|| clipper.clip_line(&line)));

  let mut corner = RectClipper::new(ClipRect::new(40.0, 200.0, 40.0, 200.0).unwrap());
  c.bench_function("clip_ring::<corner>", |b| b.iter(|| corner.clip_ring(&ring)));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
