use criterion::{criterion_group, criterion_main, Criterion};
use raag_core::catalog::{Catalog, RawRecord};
use raag_core::index::LexicalIndex;
use raag_core::recommend::Recommender;

fn synthetic_catalog(n: usize) -> Catalog {
    let records: Vec<RawRecord> = (0..n)
        .map(|i| RawRecord {
            track_name: format!("Track {i} Dhun"),
            artist_name: format!("Artist {}", i % 50),
            album: format!("Album {}", i % 20),
            duration_ms: 180_000 + (i as i64 * 37) % 120_000,
            spotify_uri: format!("spotify:track:{i:022}"),
        })
        .collect();
    Catalog::from_records(records).expect("valid synthetic catalog")
}

fn bench_build(c: &mut Criterion) {
    let catalog = synthetic_catalog(2_000);
    c.bench_function("index_build_2k", |b| {
        b.iter(|| LexicalIndex::build(catalog.items()))
    });
}

fn bench_recommend(c: &mut Criterion) {
    let recommender = Recommender::new(synthetic_catalog(2_000));
    c.bench_function("recommend_top10", |b| {
        b.iter(|| recommender.recommend("Artist 7", 10))
    });
}

criterion_group!(benches, bench_build, bench_recommend);
criterion_main!(benches);
