// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Bloxplode native bridge.

use serde::{Deserialize, Serialize};

/// First platform API level whose vibrator accepts an explicit amplitude
/// (Android 8.0, `Build.VERSION_CODES.O`).
pub const AMPLITUDE_CONTROL_API_LEVEL: u32 = 26;

/// First platform API level with cutout-aware window layout
/// (Android 9, `Build.VERSION_CODES.P`).
pub const DISPLAY_CUTOUT_API_LEVEL: u32 = 28;

/// Whether the platform can lay content out under a display cutout (notch).
pub fn supports_display_cutout(api_level: u32) -> bool {
    api_level >= DISPLAY_CUTOUT_API_LEVEL
}

// ---------------------------------------------------------------------------
// Display mode
// ---------------------------------------------------------------------------

/// A single system-chrome intent. Bit values match `View.SYSTEM_UI_FLAG_*`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayIntent {
    /// Hide the navigation bar.
    HideNavigation,
    /// Hide the status bar.
    Fullscreen,
    /// Lay out as if the navigation bar were hidden.
    LayoutHideNavigation,
    /// Lay out as if the status bar were hidden.
    LayoutFullscreen,
    /// Keep the layout stable while chrome comes and goes.
    LayoutStable,
    /// Transiently revealed bars hide themselves again.
    ImmersiveSticky,
}

impl DisplayIntent {
    /// Every intent, in bit order.
    pub const ALL: [DisplayIntent; 6] = [
        DisplayIntent::HideNavigation,
        DisplayIntent::Fullscreen,
        DisplayIntent::LayoutStable,
        DisplayIntent::LayoutHideNavigation,
        DisplayIntent::LayoutFullscreen,
        DisplayIntent::ImmersiveSticky,
    ];

    pub const fn bit(self) -> u32 {
        match self {
            DisplayIntent::HideNavigation => 0x0000_0002,
            DisplayIntent::Fullscreen => 0x0000_0004,
            DisplayIntent::LayoutStable => 0x0000_0100,
            DisplayIntent::LayoutHideNavigation => 0x0000_0200,
            DisplayIntent::LayoutFullscreen => 0x0000_0400,
            DisplayIntent::ImmersiveSticky => 0x0000_1000,
        }
    }
}

/// The bitset written to the window's decoration view.
///
/// The only value that can be constructed is [`DisplayModeFlags::IMMERSIVE`],
/// so a window can never be handed a partial set (status bar hidden but
/// navigation bar still showing, for instance).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DisplayModeFlags(u32);

impl DisplayModeFlags {
    /// Full immersive-sticky, edge-to-edge mode.
    pub const IMMERSIVE: Self = Self(
        DisplayIntent::HideNavigation.bit()
            | DisplayIntent::Fullscreen.bit()
            | DisplayIntent::LayoutStable.bit()
            | DisplayIntent::LayoutHideNavigation.bit()
            | DisplayIntent::LayoutFullscreen.bit()
            | DisplayIntent::ImmersiveSticky.bit(),
    );

    /// Raw bits, as passed to `View.setSystemUiVisibility`.
    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, intent: DisplayIntent) -> bool {
        self.0 & intent.bit() == intent.bit()
    }
}

impl std::fmt::Display for DisplayModeFlags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#06x}", self.0)
    }
}

/// What the presenter last asserted for the window.
///
/// The OS can drop back to `ChromeVisible` at any moment without telling us,
/// so this is a record of intent rather than observed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayState {
    #[default]
    ChromeVisible,
    Immersive,
}

/// How window content is laid out around a display cutout.
/// Values match `WindowManager.LayoutParams.LAYOUT_IN_DISPLAY_CUTOUT_MODE_*`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CutoutMode {
    Default,
    #[default]
    ShortEdges,
    Never,
    Always,
}

impl CutoutMode {
    pub const fn android_value(self) -> i32 {
        match self {
            CutoutMode::Default => 0,
            CutoutMode::ShortEdges => 1,
            CutoutMode::Never => 2,
            CutoutMode::Always => 3,
        }
    }
}

/// A 32-bit ARGB color as Android expects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Argb(pub u32);

impl Argb {
    pub const TRANSPARENT: Argb = Argb(0x0000_0000);

    /// The color as a Java `int`.
    pub const fn as_jint(self) -> i32 {
        self.0 as i32
    }
}

// ---------------------------------------------------------------------------
// Haptics
// ---------------------------------------------------------------------------

/// Vibration capability of the host platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapabilityTier {
    /// Duration-only vibration, no intensity control.
    Legacy,
    /// One-shot effects with an explicit amplitude.
    AmplitudeControlled,
}

impl CapabilityTier {
    pub fn from_api_level(api_level: u32) -> Self {
        if api_level >= AMPLITUDE_CONTROL_API_LEVEL {
            CapabilityTier::AmplitudeControlled
        } else {
            CapabilityTier::Legacy
        }
    }
}

/// Intensity requested for an amplitude-controlled pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Amplitude {
    /// Full motor strength. Overrides the reduced intensity some devices apply
    /// to UI-originated ("touch feedback") vibration.
    #[default]
    Maximum,
    /// Let the platform pick (`VibrationEffect.DEFAULT_AMPLITUDE`).
    PlatformDefault,
}

impl Amplitude {
    pub const fn android_value(self) -> i32 {
        match self {
            Amplitude::Maximum => 255,
            Amplitude::PlatformDefault => -1,
        }
    }
}

/// A single actuator request, resolved against the capability tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pulse {
    /// `VibrationEffect.createOneShot(duration, amplitude)`.
    OneShot { duration_ms: i64, amplitude: Amplitude },
    /// `Vibrator.vibrate(duration)`.
    Legacy { duration_ms: i64 },
}

impl Pulse {
    /// Pick the pulse shape for a tier. This is the only branching rule in
    /// the haptic path.
    pub fn for_tier(tier: CapabilityTier, duration_ms: i64, amplitude: Amplitude) -> Self {
        match tier {
            CapabilityTier::AmplitudeControlled => Pulse::OneShot {
                duration_ms,
                amplitude,
            },
            CapabilityTier::Legacy => Pulse::Legacy { duration_ms },
        }
    }

    pub fn duration_ms(&self) -> i64 {
        match *self {
            Pulse::OneShot { duration_ms, .. } | Pulse::Legacy { duration_ms } => duration_ms,
        }
    }
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

/// Host window lifecycle callbacks the shell forwards to us.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    Create,
    Resume,
    FocusChanged { has_focus: bool },
}

impl std::fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LifecycleEvent::Create => write!(f, "create"),
            LifecycleEvent::Resume => write!(f, "resume"),
            LifecycleEvent::FocusChanged { has_focus: true } => write!(f, "focus-gained"),
            LifecycleEvent::FocusChanged { has_focus: false } => write!(f, "focus-lost"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn immersive_flags_carry_every_intent() {
        for intent in DisplayIntent::ALL {
            assert!(DisplayModeFlags::IMMERSIVE.contains(intent), "{intent:?}");
        }
    }

    #[test]
    fn immersive_flags_match_android_bits() {
        // STICKY | STABLE | LAYOUT_HIDE_NAV | LAYOUT_FULLSCREEN | HIDE_NAV | FULLSCREEN
        assert_eq!(DisplayModeFlags::IMMERSIVE.bits(), 0x1706);
        assert_eq!(DisplayModeFlags::IMMERSIVE.to_string(), "0x1706");
    }

    #[test]
    fn tier_boundary_is_api_26() {
        assert_eq!(CapabilityTier::from_api_level(0), CapabilityTier::Legacy);
        assert_eq!(CapabilityTier::from_api_level(25), CapabilityTier::Legacy);
        assert_eq!(
            CapabilityTier::from_api_level(26),
            CapabilityTier::AmplitudeControlled
        );
        assert_eq!(
            CapabilityTier::from_api_level(34),
            CapabilityTier::AmplitudeControlled
        );
    }

    #[test]
    fn cutout_support_starts_at_api_28() {
        assert!(!supports_display_cutout(27));
        assert!(supports_display_cutout(28));
    }

    #[test]
    fn legacy_pulse_has_no_amplitude() {
        let pulse = Pulse::for_tier(CapabilityTier::Legacy, 250, Amplitude::Maximum);
        assert_eq!(pulse, Pulse::Legacy { duration_ms: 250 });
    }

    #[test]
    fn one_shot_pulse_keeps_duration_and_amplitude() {
        let pulse = Pulse::for_tier(CapabilityTier::AmplitudeControlled, 40, Amplitude::Maximum);
        assert_eq!(
            pulse,
            Pulse::OneShot {
                duration_ms: 40,
                amplitude: Amplitude::Maximum
            }
        );
        assert_eq!(pulse.duration_ms(), 40);
        assert_eq!(Amplitude::Maximum.android_value(), 255);
    }

    #[test]
    fn transparent_status_bar_is_zero() {
        assert_eq!(Argb::TRANSPARENT.as_jint(), 0);
        assert_eq!(Argb(0xFF00_0000).as_jint(), -16_777_216);
    }
}
