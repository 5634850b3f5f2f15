// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Tracing subscriber setup. On device the fmt output goes to logcat; elsewhere
// it goes to stdout.

use tracing_subscriber::EnvFilter;

/// Install the global `fmt` subscriber with `filter` as its directive string.
///
/// The filter comes from `BridgeConfig::log_filter`, never from the process
/// environment. An unparseable filter falls back to `info`. Later calls are
/// no-ops, so this can run on every `onCreate`.
pub fn init(filter: &str) {
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_ansi(false);

    // logcat stamps time and priority itself.
    #[cfg(target_os = "android")]
    let builder = builder
        .without_time()
        .with_level(false)
        .with_writer(crate::logcat::Logcat::new(crate::logcat::TAG, crate::logcat::Liblog));

    if builder.try_init().is_ok() {
        tracing::info!(filter, "Bloxplode native bridge logging initialised");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent_and_tolerates_bad_filters() {
        init("bloxplode=debug");
        init("[[not a filter");
        tracing::debug!("still logging");
    }
}
