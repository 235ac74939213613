use crate::config::Config;
use crate::controller::{LifecycleState, OverlayController, OverlayError, OverlayResult};
use log::{debug, trace, warn};
use std::cell::Cell;

/// Host application lifecycle transitions, as the embedding environment
/// reports them. Each fires exactly once per real transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    ForegroundEntered,
    ForegroundExited,
    Destroyed,
}

/// Which host transitions are forwarded to the controller. Snapshotted from
/// [`Config`] at registration time.
#[derive(Debug, Clone, Copy)]
pub struct BinderPolicy {
    pub attach_on_foreground: bool,
    pub detach_on_background: bool,
}

impl Default for BinderPolicy {
    fn default() -> Self {
        Self {
            attach_on_foreground: true,
            detach_on_background: true,
        }
    }
}

impl BinderPolicy {
    pub fn from_config() -> Self {
        Self {
            attach_on_foreground: Config::attach_on_foreground(),
            detach_on_background: Config::detach_on_background(),
        }
    }
}

/// Translates host lifecycle callbacks into controller calls:
/// foreground-entered becomes `attach()`, foreground-exited `detach()`,
/// host-destroyed `release()`. Registered once against an initialized
/// controller and deregisters itself when it observes the terminal state.
pub struct HostLifecycleBinder {
    controller: OverlayController,
    policy: BinderPolicy,
    registered: Cell<bool>,
}

impl HostLifecycleBinder {
    pub fn register(controller: &OverlayController) -> OverlayResult<Self> {
        Self::register_with_policy(controller, BinderPolicy::from_config())
    }

    pub fn register_with_policy(
        controller: &OverlayController,
        policy: BinderPolicy,
    ) -> OverlayResult<Self> {
        match controller.current_state() {
            LifecycleState::Uninitialized => Err(OverlayError::InvalidHostContext),
            LifecycleState::Released => Err(OverlayError::AlreadyReleased),
            _ => {
                debug!("host lifecycle binder registered");
                Ok(Self {
                    controller: controller.clone(),
                    policy,
                    registered: Cell::new(true),
                })
            }
        }
    }

    pub fn is_registered(&self) -> bool {
        self.registered.get()
    }

    /// Forwards one host transition. Redundant attach/detach traffic from
    /// noisy hosts is absorbed by the controller's idempotent transitions;
    /// failures are logged, never propagated back into the host's lifecycle
    /// machinery.
    pub fn dispatch(&self, event: HostEvent) {
        if !self.registered.get() {
            debug!("binder: {:?} after deregistration, ignoring", event);
            return;
        }
        match event {
            HostEvent::ForegroundEntered if self.policy.attach_on_foreground => {
                if let Err(e) = self.controller.attach() {
                    warn!("attach on foreground failed: {}", e);
                }
            }
            HostEvent::ForegroundExited if self.policy.detach_on_background => {
                if let Err(e) = self.controller.detach() {
                    warn!("detach on background failed: {}", e);
                }
            }
            HostEvent::Destroyed => {
                self.controller.release();
            }
            _ => trace!("binder: {:?} suppressed by policy", event),
        }
        if self.controller.current_state() == LifecycleState::Released {
            self.registered.set(false);
            debug!("host lifecycle binder deregistered");
        }
    }
}
