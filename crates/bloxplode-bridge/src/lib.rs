// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bloxplode: Native capability bridge.
//
// Two independent pieces sit on top of a host abstraction:
//
// - `presenter`: keeps the host window immersive across its lifecycle.
// - `haptics`: the `rumble(ms)` endpoint exposed to the web content.
//
// `registry` provides the named-call surface the web content reaches, and
// `platform_host` picks the host implementation for the target OS.

pub mod attachment;
pub mod haptics;
pub mod presenter;
pub mod registry;
pub mod stub;
pub mod traits;

#[cfg(target_os = "android")]
pub mod android;

use std::sync::Arc;

pub use haptics::HapticBridge;
pub use presenter::DisplayPresenter;
pub use registry::BridgeRegistry;
pub use traits::{DecorSurface, HostEnvironment, HostLifecycle, VibratorService};

/// Shared handle to the host, usable by both the presenter and the haptic
/// bridge.
pub type SharedHost = Arc<dyn HostEnvironment + Send + Sync>;

/// Retrieves the host implementation for the target operating system.
pub fn platform_host() -> SharedHost {
    #[cfg(target_os = "android")]
    {
        // Android: JNI into the hosting Capacitor activity.
        Arc::new(android::AndroidHost::new())
    }
    #[cfg(not(target_os = "android"))]
    {
        // DESKTOP/CI: recording stub, no window effects or vibration.
        Arc::new(stub::StubHost::new())
    }
}
