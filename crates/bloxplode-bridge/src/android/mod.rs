// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Android host via JNI.
//
// Requires the Android NDK and targets `aarch64-linux-android` or
// `armv7-linux-androideabi`. Every call goes through JNI into the ART runtime
// against the hosting Capacitor `BridgeActivity`.
//
// ## Architecture notes
//
// Capacitor activities are plain Java activities, not `NativeActivity`, so
// nothing initialises `ndk_context` for us. The shell records the `JavaVM`
// from `JNI_OnLoad` ([`register_java_vm`]) and attaches the activity on every
// `onCreate` ([`attach_activity`]). The attached activity is also published
// through `ndk_context` for other native libraries in the process, but
// lookups here go through our own [`ActivitySlot`] so a call arriving after
// `onDestroy` gets an error instead of a panic.
//
// Any Java exception raised by a call is cleared before the error is
// returned, so a failed vibrate never leaves an exception pending for the
// webview's JavaScript-bridge thread.

#![cfg(target_os = "android")]

use std::sync::OnceLock;

use jni::objects::{GlobalRef, JObject, JString, JValue};
use jni::{JNIEnv, JavaVM};

use bloxplode_core::error::{BloxError, Result};
use bloxplode_core::types::{Argb, CutoutMode, DisplayModeFlags, Pulse};

use crate::attachment::ActivitySlot;
use crate::traits::*;

// ---------------------------------------------------------------------------
// JNI bootstrap helpers
// ---------------------------------------------------------------------------

/// Java class backing `window.<namespace>`. Declares
/// `@JavascriptInterface public native void rumble(long)`.
pub const HAPTIC_INTERFACE_CLASS: &str = "com/stratos/bloxplode/NativeHapticInterface";

/// `Context.VIBRATOR_SERVICE`.
const VIBRATOR_SERVICE: &str = "vibrator";

static JAVA_VM: OnceLock<JavaVM> = OnceLock::new();

/// Global reference to the attached activity. Replaced on every `onCreate`,
/// cleared by the matching `onDestroy`.
static ACTIVITY: ActivitySlot<GlobalRef> = ActivitySlot::new();

/// Record the process `JavaVM`. Called from `JNI_OnLoad`.
pub fn register_java_vm(vm: JavaVM) {
    if JAVA_VM.set(vm).is_err() {
        tracing::debug!("JavaVM already registered");
    }
}

/// Attach `activity` as the host for this process.
///
/// Safe to call again when the activity is recreated (rotation, process
/// restore): the previous global reference is replaced.
pub fn attach_activity(env: &mut JNIEnv<'_>, activity: &JObject<'_>) -> Result<()> {
    let vm = env.get_java_vm().map_err(|e| jni_err(env, "GetJavaVM", e))?;
    let global = env
        .new_global_ref(activity)
        .map_err(|e| jni_err(env, "NewGlobalRef(activity)", e))?;

    let vm_ptr = vm.get_java_vm_pointer();
    ACTIVITY.attach(global, |global, had_previous| {
        // SAFETY: the VM pointer is valid for the life of the process and the
        // global ref stays alive in `ACTIVITY` until it is retracted again
        // here or in `detach_activity`, both under the slot lock.
        unsafe {
            if had_previous {
                ndk_context::release_android_context();
            }
            ndk_context::initialize_android_context(vm_ptr.cast(), global.as_obj().as_raw().cast());
        }
    });

    register_java_vm(vm);
    tracing::debug!("Android: activity attached");
    Ok(())
}

/// Detach `activity` if it is still the attached one. Called from
/// `onDestroy`; a stale destroy from an older instance is ignored.
pub fn detach_activity(env: &mut JNIEnv<'_>, activity: &JObject<'_>) {
    let detached = ACTIVITY.detach_if(
        |current| env.is_same_object(current.as_obj(), activity).unwrap_or(false),
        // SAFETY: a context was initialised by `attach_activity` for this
        // slot entry and has not been released since.
        || unsafe { ndk_context::release_android_context() },
    );
    if detached {
        tracing::debug!("Android: activity detached");
    } else {
        tracing::debug!("Android: ignoring destroy of a non-current activity");
    }
}

/// The process `JavaVM`, as recorded by `JNI_OnLoad` or `attach_activity`.
fn java_vm() -> Result<&'static JavaVM> {
    JAVA_VM
        .get()
        .ok_or_else(|| BloxError::Bridge("JavaVM not registered".into()))
}

/// Obtain a [`JNIEnv`] for the current thread, attaching it if needed.
fn jni_env() -> Result<JNIEnv<'static>> {
    java_vm()?
        .attach_current_thread_permanently()
        .map_err(|e| BloxError::Bridge(format!("failed to attach JNI thread: {e}")))
}

/// The attached `Activity`. The returned reference stays valid for as long
/// as the caller holds it, even if the activity is detached meanwhile.
fn activity() -> Result<GlobalRef> {
    ACTIVITY
        .current()
        .ok_or_else(|| BloxError::Bridge("no activity attached".into()))
}

/// Map a `jni::errors::Error` into `BloxError::Bridge`, clearing any pending
/// Java exception.
fn jni_err(env: &mut JNIEnv<'_>, context: &str, e: jni::errors::Error) -> BloxError {
    if matches!(e, jni::errors::Error::JavaException) {
        let _ = env.exception_clear();
    }
    BloxError::Bridge(format!("{context}: {e}"))
}

/// Read `Build.VERSION.SDK_INT`.
fn sdk_int() -> Result<u32> {
    let mut env = jni_env()?;
    let level = env
        .get_static_field("android/os/Build$VERSION", "SDK_INT", "I")
        .map_err(|e| jni_err(&mut env, "Build.VERSION.SDK_INT", e))?
        .i()
        .map_err(|e| jni_err(&mut env, "SDK_INT->i", e))?;
    Ok(u32::try_from(level).unwrap_or(0))
}

// ---------------------------------------------------------------------------
// Host
// ---------------------------------------------------------------------------

/// Android implementation of the host environment.
///
/// Zero-sized; all state lives on the Java side.
pub struct AndroidHost;

impl AndroidHost {
    /// Does **not** touch JNI; the first call happens lazily.
    pub fn new() -> Self {
        Self
    }
}

impl Default for AndroidHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HostEnvironment for AndroidHost {
    fn platform_name(&self) -> &str {
        "Android"
    }

    fn api_level(&self) -> u32 {
        match sdk_int() {
            Ok(level) => level,
            Err(e) => {
                tracing::warn!(error = %e, "Android: SDK_INT unreadable, assuming legacy");
                0
            }
        }
    }

    /// `activity.getWindow()`.
    fn window(&self) -> Result<Box<dyn DecorSurface + '_>> {
        let mut env = jni_env()?;
        let activity = activity()?;

        let window = env
            .call_method(&activity, "getWindow", "()Landroid/view/Window;", &[])
            .map_err(|e| jni_err(&mut env, "getWindow", e))?
            .l()
            .map_err(|e| jni_err(&mut env, "getWindow->l", e))?;
        if window.is_null() {
            return Err(BloxError::Bridge("activity has no window".into()));
        }

        Ok(Box::new(AndroidWindow { window }))
    }

    /// `activity.getSystemService(VIBRATOR_SERVICE)`.
    fn vibrator(&self) -> Option<Box<dyn VibratorService + '_>> {
        match vibrator_service() {
            Ok(Some(vibrator)) => Some(Box::new(AndroidVibrator { vibrator })),
            Ok(None) => None,
            Err(e) => {
                tracing::debug!(error = %e, "Android: vibrator service unavailable");
                None
            }
        }
    }

    /// `bridge.getWebView().addJavascriptInterface(new NativeHapticInterface(), namespace)`.
    ///
    /// Must run inside a Java-originated call (`onCreate`) so that
    /// `FindClass` resolves through the app's class loader.
    fn expose_interface(&self, namespace: &str) -> Result<()> {
        let mut env = jni_env()?;
        let activity = activity()?;

        let bridge = env
            .call_method(&activity, "getBridge", "()Lcom/getcapacitor/Bridge;", &[])
            .map_err(|e| jni_err(&mut env, "getBridge", e))?
            .l()
            .map_err(|e| jni_err(&mut env, "getBridge->l", e))?;

        let webview = env
            .call_method(&bridge, "getWebView", "()Landroid/webkit/WebView;", &[])
            .map_err(|e| jni_err(&mut env, "getWebView", e))?
            .l()
            .map_err(|e| jni_err(&mut env, "getWebView->l", e))?;

        let interface = env
            .new_object(HAPTIC_INTERFACE_CLASS, "()V", &[])
            .map_err(|e| jni_err(&mut env, "new NativeHapticInterface", e))?;

        let j_name: JString = env
            .new_string(namespace)
            .map_err(|e| jni_err(&mut env, "new_string(namespace)", e))?;

        env.call_method(
            &webview,
            "addJavascriptInterface",
            "(Ljava/lang/Object;Ljava/lang/String;)V",
            &[JValue::Object(&interface), JValue::Object(&j_name)],
        )
        .map_err(|e| jni_err(&mut env, "addJavascriptInterface", e))?;

        tracing::info!(namespace, "Android: native interface exposed to webview");
        Ok(())
    }
}

fn vibrator_service() -> Result<Option<JObject<'static>>> {
    let mut env = jni_env()?;
    let activity = activity()?;

    let j_name: JString = env
        .new_string(VIBRATOR_SERVICE)
        .map_err(|e| jni_err(&mut env, "new_string(VIBRATOR_SERVICE)", e))?;

    let service = env
        .call_method(
            &activity,
            "getSystemService",
            "(Ljava/lang/String;)Ljava/lang/Object;",
            &[JValue::Object(&j_name)],
        )
        .map_err(|e| jni_err(&mut env, "getSystemService(vibrator)", e))?
        .l()
        .map_err(|e| jni_err(&mut env, "getSystemService->l", e))?;

    Ok((!service.is_null()).then_some(service))
}

// ---------------------------------------------------------------------------
// DecorSurface: android.view.Window
// ---------------------------------------------------------------------------

struct AndroidWindow {
    window: JObject<'static>,
}

impl DecorSurface for AndroidWindow {
    /// `attrs.layoutInDisplayCutoutMode = mode; window.setAttributes(attrs)`.
    fn set_cutout_mode(&self, mode: CutoutMode) -> Result<()> {
        let mut env = jni_env()?;

        let attrs = env
            .call_method(
                &self.window,
                "getAttributes",
                "()Landroid/view/WindowManager$LayoutParams;",
                &[],
            )
            .map_err(|e| jni_err(&mut env, "getAttributes", e))?
            .l()
            .map_err(|e| jni_err(&mut env, "getAttributes->l", e))?;

        env.set_field(
            &attrs,
            "layoutInDisplayCutoutMode",
            "I",
            JValue::Int(mode.android_value()),
        )
        .map_err(|e| jni_err(&mut env, "layoutInDisplayCutoutMode", e))?;

        env.call_method(
            &self.window,
            "setAttributes",
            "(Landroid/view/WindowManager$LayoutParams;)V",
            &[JValue::Object(&attrs)],
        )
        .map_err(|e| jni_err(&mut env, "setAttributes", e))?;

        Ok(())
    }

    fn set_status_bar_color(&self, color: Argb) -> Result<()> {
        let mut env = jni_env()?;
        env.call_method(
            &self.window,
            "setStatusBarColor",
            "(I)V",
            &[JValue::Int(color.as_jint())],
        )
        .map_err(|e| jni_err(&mut env, "setStatusBarColor", e))?;
        Ok(())
    }

    /// `window.getDecorView().setSystemUiVisibility(flags)`.
    fn set_system_ui_visibility(&self, flags: DisplayModeFlags) -> Result<()> {
        let mut env = jni_env()?;

        let decor = env
            .call_method(&self.window, "getDecorView", "()Landroid/view/View;", &[])
            .map_err(|e| jni_err(&mut env, "getDecorView", e))?
            .l()
            .map_err(|e| jni_err(&mut env, "getDecorView->l", e))?;

        env.call_method(
            &decor,
            "setSystemUiVisibility",
            "(I)V",
            &[JValue::Int(flags.bits() as i32)],
        )
        .map_err(|e| jni_err(&mut env, "setSystemUiVisibility", e))?;

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// VibratorService: android.os.Vibrator
// ---------------------------------------------------------------------------

struct AndroidVibrator {
    vibrator: JObject<'static>,
}

impl VibratorService for AndroidVibrator {
    fn has_vibrator(&self) -> bool {
        let Ok(mut env) = jni_env() else {
            return false;
        };
        match env
            .call_method(&self.vibrator, "hasVibrator", "()Z", &[])
            .and_then(|v| v.z())
        {
            Ok(present) => present,
            Err(e) => {
                let e = jni_err(&mut env, "hasVibrator", e);
                tracing::debug!(error = %e, "Android: treating vibrator as absent");
                false
            }
        }
    }

    fn vibrate(&self, pulse: &Pulse) -> Result<()> {
        let mut env = jni_env()?;

        match *pulse {
            Pulse::OneShot {
                duration_ms,
                amplitude,
            } => {
                let effect = env
                    .call_static_method(
                        "android/os/VibrationEffect",
                        "createOneShot",
                        "(JI)Landroid/os/VibrationEffect;",
                        &[JValue::Long(duration_ms), JValue::Int(amplitude.android_value())],
                    )
                    .map_err(|e| jni_err(&mut env, "VibrationEffect.createOneShot", e))?
                    .l()
                    .map_err(|e| jni_err(&mut env, "createOneShot->l", e))?;

                env.call_method(
                    &self.vibrator,
                    "vibrate",
                    "(Landroid/os/VibrationEffect;)V",
                    &[JValue::Object(&effect)],
                )
                .map_err(|e| jni_err(&mut env, "Vibrator.vibrate(effect)", e))?;
            }
            Pulse::Legacy { duration_ms } => {
                env.call_method(
                    &self.vibrator,
                    "vibrate",
                    "(J)V",
                    &[JValue::Long(duration_ms)],
                )
                .map_err(|e| jni_err(&mut env, "Vibrator.vibrate(ms)", e))?;
            }
        }

        Ok(())
    }
}
