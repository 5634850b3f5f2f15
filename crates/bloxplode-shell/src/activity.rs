// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Reaction of the native side to the host activity's lifecycle.
//
// The presenter and the haptic bridge share a host handle but nothing else;
// the registry owns the only path from the web content to the haptics.

use std::sync::Arc;

use bloxplode_bridge::traits::{HostEnvironment, HostLifecycle};
use bloxplode_bridge::{BridgeRegistry, DisplayPresenter, HapticBridge};
use bloxplode_core::config::BridgeConfig;
use bloxplode_core::types::{DisplayState, LifecycleEvent};
use tracing::{debug, info, warn};

/// Name of the single operation exposed to the web content.
pub const RUMBLE: &str = "rumble";

/// Native half of the host activity.
pub struct ShellActivity<H> {
    host: H,
    presenter: DisplayPresenter<H>,
    registry: BridgeRegistry,
}

impl<H> ShellActivity<H>
where
    H: HostEnvironment + Clone + Send + Sync + 'static,
{
    pub fn new(host: H, config: BridgeConfig) -> Self {
        let presenter = DisplayPresenter::new(host.clone(), &config);
        let haptics = Arc::new(HapticBridge::new(host.clone(), &config));

        let mut registry = BridgeRegistry::new(config.interface_name.clone());
        registry.register(RUMBLE, move |duration_ms| haptics.rumble(duration_ms));

        info!(
            platform = host.platform_name(),
            namespace = registry.namespace(),
            "shell activity ready"
        );

        Self {
            host,
            presenter,
            registry,
        }
    }

    /// Entry point for `window.<namespace>.rumble(ms)`. Never reports an
    /// error to the web content.
    pub fn rumble(&self, duration_ms: i64) {
        if let Err(e) = self.registry.invoke(RUMBLE, duration_ms) {
            debug!(error = %e, "bridge call ignored");
        }
    }

    pub fn display_state(&self) -> DisplayState {
        self.presenter.state()
    }

    pub fn registry(&self) -> &BridgeRegistry {
        &self.registry
    }

    pub fn host(&self) -> &H {
        &self.host
    }
}

impl<H> HostLifecycle for ShellActivity<H>
where
    H: HostEnvironment + Clone + Send + Sync + 'static,
{
    fn on_create(&self) {
        let event = LifecycleEvent::Create;
        debug!(%event, "lifecycle");
        self.presenter.on_create();

        // A recreated activity brings a fresh webview, so expose every time.
        if let Err(e) = self.host.expose_interface(self.registry.namespace()) {
            warn!(error = %e, "failed to expose native interface");
        }
    }

    fn on_resume(&self) {
        let event = LifecycleEvent::Resume;
        debug!(%event, "lifecycle");
        self.presenter.on_resume();
    }

    fn on_focus_changed(&self, has_focus: bool) {
        let event = LifecycleEvent::FocusChanged { has_focus };
        debug!(%event, "lifecycle");
        self.presenter.on_focus_changed(has_focus);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bloxplode_bridge::stub::{HostCall, StubHost, StubVibrator};
    use bloxplode_core::types::{Amplitude, Argb, CutoutMode, DisplayModeFlags, Pulse};

    fn shell(api_level: u32) -> ShellActivity<Arc<StubHost>> {
        let host = Arc::new(
            StubHost::new()
                .with_api_level(api_level)
                .with_vibrator(StubVibrator::Present),
        );
        ShellActivity::new(host, BridgeConfig::default())
    }

    #[test]
    fn create_initialises_display_and_exposes_bridge() {
        let shell = shell(33);
        shell.on_create();
        assert_eq!(
            shell.host().calls(),
            vec![
                HostCall::CutoutMode(CutoutMode::ShortEdges),
                HostCall::StatusBarColor(Argb::TRANSPARENT),
                HostCall::SystemUiVisibility(DisplayModeFlags::IMMERSIVE),
                HostCall::ExposeInterface("AndroidNative".into()),
            ]
        );
        assert_eq!(shell.display_state(), DisplayState::Immersive);
    }

    #[test]
    fn lifecycle_sequence_reasserts_only_on_gain() {
        let shell = shell(33);
        for event in [
            LifecycleEvent::Create,
            LifecycleEvent::FocusChanged { has_focus: true },
            LifecycleEvent::FocusChanged { has_focus: false },
            LifecycleEvent::Resume,
            LifecycleEvent::FocusChanged { has_focus: false },
            LifecycleEvent::FocusChanged { has_focus: true },
        ] {
            shell.dispatch(event);
        }
        let reasserted = shell
            .host()
            .calls()
            .into_iter()
            .filter(|c| matches!(c, HostCall::SystemUiVisibility(_)))
            .count();
        // create + focus-gained + resume + focus-gained
        assert_eq!(reasserted, 4);
    }

    #[test]
    fn rumble_reaches_the_vibrator() {
        let shell = shell(33);
        shell.rumble(40);
        assert_eq!(
            shell.host().pulses(),
            vec![Pulse::OneShot {
                duration_ms: 40,
                amplitude: Amplitude::Maximum
            }]
        );
    }

    #[test]
    fn legacy_tier_rumble_goes_through_registry() {
        let shell = shell(23);
        shell.rumble(250);
        shell.registry().invoke(RUMBLE, 250).unwrap();
        assert_eq!(
            shell.host().pulses(),
            vec![
                Pulse::Legacy { duration_ms: 250 },
                Pulse::Legacy { duration_ms: 250 }
            ]
        );
    }

    #[test]
    fn only_rumble_is_registered() {
        let shell = shell(33);
        assert!(shell.registry().invoke("vibratePattern", 10).is_err());
        assert!(shell.host().calls().is_empty());
        assert_eq!(shell.registry().methods(), vec![RUMBLE]);
    }

    #[test]
    fn late_rumble_after_destroy_returns_normally() {
        let shell = shell(33);
        shell.on_create();
        assert!(shell.host().detach_activity(StubHost::INITIAL_ACTIVITY));
        shell.rumble(40);
        shell.on_resume();
        assert!(shell.host().pulses().is_empty());
    }

    #[test]
    fn stale_destroy_leaves_recreated_activity_working() {
        let shell = shell(33);
        shell.on_create();
        shell.host().attach_activity(1);
        shell.on_create();
        assert!(!shell.host().detach_activity(StubHost::INITIAL_ACTIVITY));
        shell.rumble(40);
        assert_eq!(shell.host().pulses().len(), 1);
    }

    #[test]
    fn custom_namespace_is_exposed() {
        let host = Arc::new(StubHost::new());
        let config = BridgeConfig {
            interface_name: "BloxNative".into(),
            ..BridgeConfig::default()
        };
        let shell = ShellActivity::new(Arc::clone(&host), config);
        shell.on_create();
        assert!(host.calls().contains(&HostCall::ExposeInterface("BloxNative".into())));
    }

    #[test]
    fn rumble_without_vibrator_returns_normally() {
        let host = Arc::new(StubHost::new().with_api_level(33));
        let shell = ShellActivity::new(host, BridgeConfig::default());
        shell.rumble(1000);
        assert!(shell.host().pulses().is_empty());
    }
}
