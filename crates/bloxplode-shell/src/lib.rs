// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bloxplode: App shell glue.
//
// Built as a `cdylib` loaded by the Capacitor `MainActivity`. The activity
// forwards `onCreate`, `onResume`, `onWindowFocusChanged` and `onDestroy`
// through the JNI exports in `jni_exports`, and the webview delivers
// `window.AndroidNative.rumble(ms)` to the same library.

pub mod activity;
pub mod logcat;
pub mod logging;

#[cfg(target_os = "android")]
mod jni_exports;

pub use activity::ShellActivity;
