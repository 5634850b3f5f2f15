// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for the host capabilities the bridge
// consumes, plus the lifecycle surface the app shell drives.

use std::sync::Arc;

use bloxplode_core::error::Result;
use bloxplode_core::types::{
    Argb, CapabilityTier, CutoutMode, DisplayModeFlags, LifecycleEvent, Pulse,
};

/// The native environment hosting the web content.
///
/// Window and vibrator handles are resolved on every call rather than cached:
/// the activity behind them can be recreated at any time.
pub trait HostEnvironment {
    /// Human-readable platform name (e.g. "Android").
    fn platform_name(&self) -> &str;

    /// Platform API level (`Build.VERSION.SDK_INT` on Android).
    fn api_level(&self) -> u32;

    /// The host window's decoration surface.
    fn window(&self) -> Result<Box<dyn DecorSurface + '_>>;

    /// The platform vibration service, or `None` if the host has none.
    fn vibrator(&self) -> Option<Box<dyn VibratorService + '_>>;

    /// Make the native bridge callable from the web content as
    /// `window.<namespace>`.
    fn expose_interface(&self, namespace: &str) -> Result<()>;

    fn capability_tier(&self) -> CapabilityTier {
        CapabilityTier::from_api_level(self.api_level())
    }
}

/// System-chrome controls of a host window.
pub trait DecorSurface {
    /// Set how content is laid out around a display cutout.
    fn set_cutout_mode(&self, mode: CutoutMode) -> Result<()>;

    fn set_status_bar_color(&self, color: Argb) -> Result<()>;

    /// Write the whole flag set to the decoration view in one call.
    fn set_system_ui_visibility(&self, flags: DisplayModeFlags) -> Result<()>;
}

/// The platform vibrator.
pub trait VibratorService {
    /// Whether the device actually has vibration hardware.
    fn has_vibrator(&self) -> bool;

    /// Issue a single pulse. Returns once the request is handed to the OS;
    /// the actuator runs asynchronously.
    fn vibrate(&self, pulse: &Pulse) -> Result<()>;
}

/// Window lifecycle callbacks, invoked by the app shell.
pub trait HostLifecycle {
    fn on_create(&self);

    fn on_resume(&self);

    fn on_focus_changed(&self, has_focus: bool);

    fn dispatch(&self, event: LifecycleEvent) {
        match event {
            LifecycleEvent::Create => self.on_create(),
            LifecycleEvent::Resume => self.on_resume(),
            LifecycleEvent::FocusChanged { has_focus } => self.on_focus_changed(has_focus),
        }
    }
}

impl<H: HostEnvironment + ?Sized> HostEnvironment for Arc<H> {
    fn platform_name(&self) -> &str {
        (**self).platform_name()
    }

    fn api_level(&self) -> u32 {
        (**self).api_level()
    }

    fn window(&self) -> Result<Box<dyn DecorSurface + '_>> {
        (**self).window()
    }

    fn vibrator(&self) -> Option<Box<dyn VibratorService + '_>> {
        (**self).vibrator()
    }

    fn expose_interface(&self, namespace: &str) -> Result<()> {
        (**self).expose_interface(namespace)
    }

    fn capability_tier(&self) -> CapabilityTier {
        (**self).capability_tier()
    }
}
