//! This bench test simulates searching a large donor collection by blood type
//! and location.

#![allow(missing_docs)]

use std::{hint::black_box, path::Path};

use bloodline::{BloodType, Config, Donor, Registry, Store};
use criterion::{Criterion, criterion_group, criterion_main};
use tempfile::TempDir;

const LOCATIONS: [&str; 4] = [
    "Springfield General",
    "Shelbyville Clinic",
    "Capital City Hospital",
    "Ogdenville",
];

/// Fills a store with donors spread across every blood type and location.
fn preseed_store(path: &Path) -> Registry {
    let store = Store::new(path.to_path_buf(), Config::default());
    store.ensure_initialized().unwrap();
    for i in 0..5_000_u16 {
        let index = usize::from(i);
        let donor = Donor {
            name: format!("Donor {}", char::from(b'A' + u8::try_from(i % 26).unwrap())),
            age: 18 + u8::try_from(i % 60).unwrap(),
            blood_type: BloodType::ALL[index % BloodType::ALL.len()],
            location: LOCATIONS[index % LOCATIONS.len()].to_string(),
            contact: format!("{:010}", 5_550_000_000_u64 + u64::from(i)),
        };
        store.append_donor(&donor).unwrap();
    }
    Registry::with_store(store).unwrap()
}

fn find_donors(c: &mut Criterion) {
    let tmp_dir = TempDir::new().unwrap();
    let registry = preseed_store(tmp_dir.path());

    c.bench_function("find donors", |b| {
        b.iter(|| {
            registry
                .find_donors(black_box(BloodType::ONegative), black_box("springfield"))
                .unwrap()
        });
    });
}

criterion_group!(benches, find_donors);
criterion_main!(benches);
