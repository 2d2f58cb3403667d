//! Criterion benchmarks for the QR payload parsers.
//!
//! The parsers run once per decoded frame, so they only need to stay far
//! below the camera's frame interval.  These benches guard against an
//! accidental quadratic scan on long payloads.
//!
//! Run with:
//! ```bash
//! cargo bench --package kiosk-core --bench payload_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kiosk_core::{extract_ipv4_occurrences, parse_server_address, parse_wifi_credential};

const WIFI_PAYLOAD: &str = "WIFI:T:WPA;WIFI:S:kiosk-network-5g;P:correct horse battery staple;H:false;;";
const SERVER_PAYLOAD: &str = "lava=https://display.example.local:8443/table/1";

fn bench_parse_wifi_credential(c: &mut Criterion) {
    c.bench_function("parse_wifi_credential", |b| {
        b.iter(|| parse_wifi_credential(black_box(WIFI_PAYLOAD)))
    });
}

fn bench_parse_server_address(c: &mut Criterion) {
    c.bench_function("parse_server_address", |b| {
        b.iter(|| parse_server_address(black_box(SERVER_PAYLOAD), black_box("lava=")))
    });
}

fn bench_extract_ipv4_long_text(c: &mut Criterion) {
    let text = "host 10.0.0.1 port 80; ".repeat(200);
    c.bench_function("extract_ipv4_occurrences/200", |b| {
        b.iter(|| extract_ipv4_occurrences(black_box(&text)))
    });
}

criterion_group!(
    benches,
    bench_parse_wifi_credential,
    bench_parse_server_address,
    bench_extract_ipv4_long_text
);
criterion_main!(benches);
