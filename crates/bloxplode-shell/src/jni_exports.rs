// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// JNI entry points called by the Java side of the app.
//
// `com.stratos.bloxplode.MainActivity` (a Capacitor `BridgeActivity`) declares:
//
//     private native void nativeOnCreate(String configJson);
//     private native void nativeOnResume();
//     private native void nativeOnWindowFocusChanged(boolean hasFocus);
//     private native void nativeOnDestroy();
//
// and calls each after the matching `super.onXxx(...)`.
// `com.stratos.bloxplode.NativeHapticInterface` declares
// `@JavascriptInterface public native void rumble(long milliseconds)`.

use std::ffi::c_void;
use std::sync::OnceLock;

use jni::objects::{JObject, JString};
use jni::sys::{JNI_VERSION_1_6, jboolean, jint, jlong};
use jni::{JNIEnv, JavaVM};

use bloxplode_bridge::traits::HostLifecycle;
use bloxplode_bridge::{SharedHost, android, platform_host};
use bloxplode_core::config::BridgeConfig;
use bloxplode_core::error::{BloxError, Result};

use crate::activity::ShellActivity;
use crate::logging;

static SHELL: OnceLock<ShellActivity<SharedHost>> = OnceLock::new();

fn shell() -> Option<&'static ShellActivity<SharedHost>> {
    let shell = SHELL.get();
    if shell.is_none() {
        tracing::debug!("native call before onCreate, ignoring");
    }
    shell
}

/// Read the optional JSON config passed to `nativeOnCreate`.
fn load_config(env: &mut JNIEnv<'_>, raw: &JString<'_>) -> Result<BridgeConfig> {
    if raw.is_null() {
        return Ok(BridgeConfig::default());
    }
    let json: String = env
        .get_string(raw)
        .map_err(|e| BloxError::Bridge(format!("get_string(configJson): {e}")))?
        .into();
    BridgeConfig::from_json(&json)
}

#[unsafe(no_mangle)]
pub extern "system" fn JNI_OnLoad(vm: *mut jni::sys::JavaVM, _reserved: *mut c_void) -> jint {
    // SAFETY: the runtime passes a valid `JavaVM*` that outlives the library.
    if let Ok(vm) = unsafe { JavaVM::from_raw(vm) } {
        android::register_java_vm(vm);
    }
    JNI_VERSION_1_6
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_com_stratos_bloxplode_MainActivity_nativeOnCreate<'local>(
    mut env: JNIEnv<'local>,
    activity: JObject<'local>,
    config_json: JString<'local>,
) {
    let config = load_config(&mut env, &config_json);
    let log_filter = config
        .as_ref()
        .map(|c| c.log_filter.clone())
        .unwrap_or_else(|_| BridgeConfig::default().log_filter);
    logging::init(&log_filter);

    let config = config.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "invalid bridge config, using defaults");
        BridgeConfig::default()
    });

    if let Err(e) = android::attach_activity(&mut env, &activity) {
        tracing::error!(error = %e, "failed to attach activity; native bridge disabled");
        return;
    }

    // The first config wins; later activity instances reuse the same shell.
    SHELL
        .get_or_init(|| ShellActivity::new(platform_host(), config))
        .on_create();
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_com_stratos_bloxplode_MainActivity_nativeOnResume<'local>(
    _env: JNIEnv<'local>,
    _activity: JObject<'local>,
) {
    if let Some(shell) = shell() {
        shell.on_resume();
    }
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_com_stratos_bloxplode_MainActivity_nativeOnWindowFocusChanged<
    'local,
>(
    _env: JNIEnv<'local>,
    _activity: JObject<'local>,
    has_focus: jboolean,
) {
    if let Some(shell) = shell() {
        shell.on_focus_changed(has_focus != 0);
    }
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_com_stratos_bloxplode_MainActivity_nativeOnDestroy<'local>(
    mut env: JNIEnv<'local>,
    activity: JObject<'local>,
) {
    // Only the instance being destroyed is released; a newer one that already
    // ran `nativeOnCreate` stays attached.
    android::detach_activity(&mut env, &activity);
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_com_stratos_bloxplode_NativeHapticInterface_rumble<'local>(
    _env: JNIEnv<'local>,
    _this: JObject<'local>,
    milliseconds: jlong,
) {
    if let Some(shell) = shell() {
        shell.rumble(milliseconds);
    }
}
