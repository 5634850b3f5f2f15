// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Haptic bridge: the `rumble(ms)` endpoint exposed to the web content.
//
// Haptics are an enhancement. Nothing here reports failure to the caller:
// a missing service, a device without a motor, or the OS rejecting the
// request all end as a debug log line and a normal return.

use bloxplode_core::config::BridgeConfig;
use bloxplode_core::error::{BloxError, Result};
use bloxplode_core::types::{Amplitude, Pulse};
use tracing::debug;

use crate::traits::HostEnvironment;

/// Issues single timed pulses on the host's vibrator.
pub struct HapticBridge<H> {
    host: H,
    amplitude: Amplitude,
}

impl<H: HostEnvironment> HapticBridge<H> {
    pub fn new(host: H, config: &BridgeConfig) -> Self {
        Self {
            host,
            amplitude: config.amplitude,
        }
    }

    /// Vibrate for `duration_ms`. Fire-and-forget; the duration is passed
    /// through unvalidated.
    pub fn rumble(&self, duration_ms: i64) {
        match self.try_rumble(duration_ms) {
            Ok(pulse) => debug!(?pulse, "rumble issued"),
            Err(BloxError::PlatformUnavailable) => {
                debug!(duration_ms, "rumble ignored: no vibrator");
            }
            Err(e) => debug!(duration_ms, error = %e, "rumble dropped"),
        }
    }

    fn try_rumble(&self, duration_ms: i64) -> Result<Pulse> {
        let vibrator = self.host.vibrator().ok_or(BloxError::PlatformUnavailable)?;
        if !vibrator.has_vibrator() {
            return Err(BloxError::PlatformUnavailable);
        }

        let pulse = Pulse::for_tier(self.host.capability_tier(), duration_ms, self.amplitude);
        vibrator.vibrate(&pulse)?;
        Ok(pulse)
    }

    pub fn host(&self) -> &H {
        &self.host
    }
}
