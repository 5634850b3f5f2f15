// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Display presenter: keeps the host window immersive and edge-to-edge.
//
// The OS may bring the system bars back whenever the window loses focus, and
// there is no "hide forever" switch. So the full flag set is re-sent on every
// event after which the bars may have returned: creation, resume and
// focus-gained. It is never sent on focus-lost.

use std::sync::atomic::{AtomicBool, Ordering};

use bloxplode_core::config::BridgeConfig;
use bloxplode_core::types::{
    Argb, CutoutMode, DisplayModeFlags, DisplayState, supports_display_cutout,
};
use tracing::{debug, warn};

use crate::traits::{HostEnvironment, HostLifecycle};

/// Owns the immersive display contract for one host window.
pub struct DisplayPresenter<H> {
    host: H,
    cutout_mode: CutoutMode,
    status_bar_color: Argb,
    immersive: AtomicBool,
}

impl<H: HostEnvironment> DisplayPresenter<H> {
    pub fn new(host: H, config: &BridgeConfig) -> Self {
        Self {
            host,
            cutout_mode: config.cutout_mode,
            status_bar_color: config.status_bar_color,
            immersive: AtomicBool::new(false),
        }
    }

    /// Cutout accommodation and status-bar color. Run once per window
    /// creation, before the first [`apply_immersive_mode`](Self::apply_immersive_mode).
    ///
    /// Never fails: a missing window or a rejected platform call is logged
    /// and skipped.
    pub fn initialize(&self) {
        let window = match self.host.window() {
            Ok(window) => window,
            Err(e) => {
                warn!(error = %e, "display init skipped: no window");
                return;
            }
        };

        let api_level = self.host.api_level();
        if supports_display_cutout(api_level) {
            if let Err(e) = window.set_cutout_mode(self.cutout_mode) {
                warn!(error = %e, mode = ?self.cutout_mode, "failed to set cutout mode");
            }
        } else {
            debug!(api_level, "cutout-aware layout unsupported, skipping");
        }

        if let Err(e) = window.set_status_bar_color(self.status_bar_color) {
            warn!(error = %e, "failed to set status bar color");
        }
    }

    /// Send the complete immersive flag set to the window.
    pub fn apply_immersive_mode(&self) {
        let flags = DisplayModeFlags::IMMERSIVE;
        let applied = self
            .host
            .window()
            .and_then(|window| window.set_system_ui_visibility(flags));

        match applied {
            Ok(()) => {
                debug!(%flags, "immersive mode asserted");
                self.immersive.store(true, Ordering::Relaxed);
            }
            Err(e) => {
                warn!(error = %e, "failed to apply immersive mode");
                self.immersive.store(false, Ordering::Relaxed);
            }
        }
    }

    /// The state last asserted. The OS may have overridden it since.
    pub fn state(&self) -> DisplayState {
        if self.immersive.load(Ordering::Relaxed) {
            DisplayState::Immersive
        } else {
            DisplayState::ChromeVisible
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }
}

impl<H: HostEnvironment> HostLifecycle for DisplayPresenter<H> {
    fn on_create(&self) {
        self.initialize();
        self.apply_immersive_mode();
    }

    fn on_resume(&self) {
        self.apply_immersive_mode();
    }

    fn on_focus_changed(&self, has_focus: bool) {
        if has_focus {
            self.apply_immersive_mode();
        }
    }
}
