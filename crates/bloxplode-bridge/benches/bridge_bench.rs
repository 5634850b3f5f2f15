// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the web-content call path in the bloxplode-bridge
// crate: command invoke and pulse resolution against the stub host.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use bloxplode_bridge::stub::{StubHost, StubVibrator};
use bloxplode_bridge::{BridgeRegistry, HapticBridge};
use bloxplode_core::BridgeConfig;

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Named invoke of the registered handler.
fn bench_registry_dispatch(c: &mut Criterion) {
    let total = Arc::new(AtomicI64::new(0));
    let sink = Arc::clone(&total);
    let mut registry = BridgeRegistry::new("AndroidNative");
    registry.register("rumble", move |ms| {
        sink.fetch_add(ms, Ordering::Relaxed);
    });

    let mut group = c.benchmark_group("registry_dispatch");
    group.bench_function("invoke", |b| {
        b.iter(|| registry.invoke(black_box("rumble"), black_box(40)))
    });
    group.finish();
    black_box(total.load(Ordering::Relaxed));
}

/// Full `rumble` path for each vibrator configuration.
fn bench_rumble(c: &mut Criterion) {
    let cases: &[(&str, u32, StubVibrator)] = &[
        ("one_shot", 34, StubVibrator::Present),
        ("legacy", 23, StubVibrator::Present),
        ("no_hardware", 34, StubVibrator::NoHardware),
    ];

    let mut group = c.benchmark_group("rumble");
    for &(label, api_level, vibrator) in cases {
        let host = StubHost::new()
            .with_api_level(api_level)
            .with_vibrator(vibrator);
        let bridge = HapticBridge::new(host, &BridgeConfig::default());
        group.bench_function(label, |b| {
            b.iter(|| {
                bridge.rumble(black_box(40));
                // keep the call log from growing across iterations
                black_box(bridge.host().take_calls());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_registry_dispatch, bench_rumble);
criterion_main!(benches);
