// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub host for desktop/CI builds where no mobile window or vibrator exists.
//
// Instead of touching hardware it records every call it receives, which is
// what the presenter, haptic and shell tests assert against. The API level and
// vibrator presence are configurable so both capability tiers can be
// exercised off-device, and the attached activity can be torn down to check
// that late calls degrade to no-ops.

use std::sync::{Mutex, PoisonError};

use bloxplode_core::error::{BloxError, Result};
use bloxplode_core::types::{Argb, CutoutMode, DisplayModeFlags, Pulse};

use crate::attachment::ActivitySlot;
use crate::traits::*;

/// One call received by the stub host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    CutoutMode(CutoutMode),
    StatusBarColor(Argb),
    SystemUiVisibility(DisplayModeFlags),
    Vibrate(Pulse),
    ExposeInterface(String),
}

/// What the stub reports when asked for a vibrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StubVibrator {
    /// No vibration service at all.
    Missing,
    /// The service resolves but reports no hardware.
    NoHardware,
    /// A working vibrator.
    Present,
}

/// Recording host used off-device.
pub struct StubHost {
    api_level: u32,
    vibrator: StubVibrator,
    has_window: bool,
    activity: ActivitySlot<u32>,
    calls: Mutex<Vec<HostCall>>,
}

impl StubHost {
    /// Activity id attached by [`StubHost::new`].
    pub const INITIAL_ACTIVITY: u32 = 0;

    /// A desktop host: no vibrator, legacy API level, one attached activity.
    pub fn new() -> Self {
        let activity = ActivitySlot::new();
        activity.attach(Self::INITIAL_ACTIVITY, |_, _| {});
        Self {
            api_level: 0,
            vibrator: StubVibrator::Missing,
            has_window: true,
            activity,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_api_level(mut self, api_level: u32) -> Self {
        self.api_level = api_level;
        self
    }

    pub fn with_vibrator(mut self, vibrator: StubVibrator) -> Self {
        self.vibrator = vibrator;
        self
    }

    /// Simulate an activity whose window has not been attached yet.
    pub fn without_window(mut self) -> Self {
        self.has_window = false;
        self
    }

    /// Simulate `onCreate` of a new activity instance.
    pub fn attach_activity(&self, id: u32) {
        self.activity.attach(id, |_, _| {});
    }

    /// Simulate `onDestroy` of activity `id`. Returns whether it was the
    /// attached one.
    pub fn detach_activity(&self, id: u32) -> bool {
        self.activity.detach_if(|current| *current == id, || {})
    }

    fn attached(&self) -> Result<u32> {
        self.activity
            .current()
            .ok_or_else(|| BloxError::Bridge("no activity attached".into()))
    }

    /// Snapshot of every call received so far.
    pub fn calls(&self) -> Vec<HostCall> {
        self.lock().clone()
    }

    /// Drain the call log.
    pub fn take_calls(&self) -> Vec<HostCall> {
        std::mem::take(&mut *self.lock())
    }

    /// Only the pulses, in order.
    pub fn pulses(&self) -> Vec<Pulse> {
        self.lock()
            .iter()
            .filter_map(|call| match call {
                HostCall::Vibrate(pulse) => Some(*pulse),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: HostCall) {
        tracing::debug!(?call, "stub host call");
        self.lock().push(call);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<HostCall>> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for StubHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HostEnvironment for StubHost {
    fn platform_name(&self) -> &str {
        "Desktop (stub)"
    }

    fn api_level(&self) -> u32 {
        self.api_level
    }

    fn window(&self) -> Result<Box<dyn DecorSurface + '_>> {
        self.attached()?;
        if !self.has_window {
            return Err(BloxError::Bridge("activity has no window".into()));
        }
        Ok(Box::new(StubWindow { host: self }))
    }

    fn vibrator(&self) -> Option<Box<dyn VibratorService + '_>> {
        self.attached().ok()?;
        match self.vibrator {
            StubVibrator::Missing => None,
            StubVibrator::NoHardware | StubVibrator::Present => {
                Some(Box::new(StubVibratorService { host: self }))
            }
        }
    }

    fn expose_interface(&self, namespace: &str) -> Result<()> {
        self.attached()?;
        self.record(HostCall::ExposeInterface(namespace.to_owned()));
        Ok(())
    }
}

struct StubWindow<'a> {
    host: &'a StubHost,
}

impl DecorSurface for StubWindow<'_> {
    fn set_cutout_mode(&self, mode: CutoutMode) -> Result<()> {
        self.host.record(HostCall::CutoutMode(mode));
        Ok(())
    }

    fn set_status_bar_color(&self, color: Argb) -> Result<()> {
        self.host.record(HostCall::StatusBarColor(color));
        Ok(())
    }

    fn set_system_ui_visibility(&self, flags: DisplayModeFlags) -> Result<()> {
        self.host.record(HostCall::SystemUiVisibility(flags));
        Ok(())
    }
}

struct StubVibratorService<'a> {
    host: &'a StubHost,
}

impl VibratorService for StubVibratorService<'_> {
    fn has_vibrator(&self) -> bool {
        self.host.vibrator == StubVibrator::Present
    }

    fn vibrate(&self, pulse: &Pulse) -> Result<()> {
        // Mirrors `VibrationEffect.createOneShot`, which throws for
        // non-positive durations. The legacy call accepts anything.
        if let Pulse::OneShot { duration_ms, .. } = *pulse {
            if duration_ms <= 0 {
                return Err(BloxError::Bridge(format!(
                    "one-shot duration must be positive, got {duration_ms}"
                )));
            }
        }
        self.host.record(HostCall::Vibrate(*pulse));
        Ok(())
    }
}
