use crate::host::HostContext;
use crate::permission::PermissionGate;
use crate::platform::{
    OverlayPermissionApi, OverlayWindowApi, PermissionState, PlatformError,
};
use crate::surface::OverlaySurface;
use log::{debug, info, warn};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Uninitialized,
    Initialized,
    Attached,
    Detached,
    /// Terminal. Entered once, never left.
    Released,
}

#[derive(Debug, Error)]
pub enum OverlayError {
    #[error("host context is missing or expired")]
    InvalidHostContext,
    #[error("overlay permission denied by the platform")]
    PermissionDenied,
    #[error("overlay window could not be created: {0}")]
    SurfaceCreationFailed(#[from] PlatformError),
    #[error("overlay lifecycle already released")]
    AlreadyReleased,
}

pub type OverlayResult<T> = Result<T, OverlayError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachOutcome {
    /// A surface was created and is now showing.
    Attached,
    /// A surface was already showing; nothing happened.
    AlreadyAttached,
    /// A permission prompt is outstanding; the attach completes (or not)
    /// when the platform delivers its result.
    PermissionPending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetachOutcome {
    Detached,
    /// No surface existed; nothing happened.
    AlreadyDetached,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    Released,
    AlreadyReleased,
}

/// Observable lifecycle notifications, delivered synchronously on the UI
/// thread after the state change they describe has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayEvent {
    Attached,
    Detached,
    Released,
    PermissionDenied,
    SurfaceCreationFailed,
}

/// The process-wide overlay lifecycle controller: the single serialization
/// point for attach/detach/release requests and the only component that
/// touches [`OverlaySurface`].
///
/// All methods are UI-thread calls. The handle is cheap to clone; clones
/// share one lifecycle. Idempotent transitions, not locks, make the state
/// machine safe against any interleaving of host lifecycle callbacks and
/// direct user calls arriving on that thread.
#[derive(Clone)]
pub struct OverlayController {
    inner: Rc<RefCell<Inner>>,
}

struct Inner {
    state: LifecycleState,
    host: Weak<HostContext>,
    surface: Option<OverlaySurface>,
    windows: Rc<dyn OverlayWindowApi>,
    gate: PermissionGate,
    pending: Option<PendingAttach>,
    listener: Option<Rc<dyn Fn(OverlayEvent)>>,
}

/// One permission request in flight. `wanted` tracks whether the attach that
/// triggered it is still desired; a detach in the meantime withdraws it
/// without being able to cancel the platform prompt itself.
struct PendingAttach {
    wanted: bool,
}

enum AttachStep {
    Done(OverlayResult<AttachOutcome>, Option<OverlayEvent>),
    Prompt(PermissionGate),
}

impl OverlayController {
    pub fn new(
        windows: Rc<dyn OverlayWindowApi>,
        permissions: Rc<dyn OverlayPermissionApi>,
    ) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                state: LifecycleState::Uninitialized,
                host: Weak::new(),
                surface: None,
                windows,
                gate: PermissionGate::new(permissions),
                pending: None,
                listener: None,
            })),
        }
    }

    /// Binds the controller to its host. Must happen before any attach or
    /// detach; calling it again once initialized is a no-op that returns the
    /// current state without rebinding.
    pub fn init(&self, host: Weak<HostContext>) -> OverlayResult<LifecycleState> {
        let mut inner = self.inner.borrow_mut();
        match inner.state {
            LifecycleState::Uninitialized => {
                let context = host.upgrade().ok_or(OverlayError::InvalidHostContext)?;
                info!("overlay lifecycle bound to host '{}'", context.name());
                inner.host = host;
                inner.state = LifecycleState::Initialized;
                Ok(LifecycleState::Initialized)
            }
            LifecycleState::Released => Err(OverlayError::AlreadyReleased),
            current => {
                debug!("init: already initialized, keeping existing state {:?}", current);
                Ok(current)
            }
        }
    }

    /// Shows the overlay. Idempotent when already attached. When the
    /// permission state is unknown this suspends into an asynchronous
    /// prompt; at most one prompt is outstanding at a time, and a repeat
    /// attach while it is pending simply rides on its eventual result.
    pub fn attach(&self) -> OverlayResult<AttachOutcome> {
        let step = {
            let mut inner = self.inner.borrow_mut();
            match inner.state {
                LifecycleState::Uninitialized => {
                    AttachStep::Done(Err(OverlayError::InvalidHostContext), None)
                }
                LifecycleState::Released => {
                    warn!("attach after release, ignoring");
                    AttachStep::Done(Err(OverlayError::AlreadyReleased), None)
                }
                LifecycleState::Attached => {
                    debug!("attach: overlay already attached");
                    AttachStep::Done(Ok(AttachOutcome::AlreadyAttached), None)
                }
                LifecycleState::Initialized | LifecycleState::Detached => {
                    if let Some(pending) = inner.pending.as_mut() {
                        debug!("attach: permission prompt already outstanding");
                        pending.wanted = true;
                        AttachStep::Done(Ok(AttachOutcome::PermissionPending), None)
                    } else {
                        match inner.gate.check() {
                            PermissionState::Granted => match inner.create_surface() {
                                Ok(()) => AttachStep::Done(
                                    Ok(AttachOutcome::Attached),
                                    Some(OverlayEvent::Attached),
                                ),
                                Err(e @ OverlayError::InvalidHostContext) => {
                                    AttachStep::Done(Err(e), None)
                                }
                                Err(e) => AttachStep::Done(
                                    Err(e),
                                    Some(OverlayEvent::SurfaceCreationFailed),
                                ),
                            },
                            PermissionState::Denied => {
                                warn!("attach refused: overlay permission denied");
                                AttachStep::Done(
                                    Err(OverlayError::PermissionDenied),
                                    Some(OverlayEvent::PermissionDenied),
                                )
                            }
                            PermissionState::Unknown => {
                                inner.pending = Some(PendingAttach { wanted: true });
                                AttachStep::Prompt(inner.gate.clone())
                            }
                        }
                    }
                }
            }
        };

        match step {
            AttachStep::Done(result, event) => {
                if let Some(event) = event {
                    self.notify(event);
                }
                result
            }
            AttachStep::Prompt(gate) => {
                let weak = Rc::downgrade(&self.inner);
                gate.request(Box::new(move |verdict| {
                    if let Some(inner) = weak.upgrade() {
                        OverlayController { inner }.resolve_permission(verdict);
                    }
                }));
                Ok(AttachOutcome::PermissionPending)
            }
        }
    }

    /// Hides the overlay. Destroys the surface if one exists, otherwise a
    /// no-op; either way the state lands in `Detached`. A pending attach
    /// waiting on a permission prompt is withdrawn.
    pub fn detach(&self) -> OverlayResult<DetachOutcome> {
        let (result, event) = {
            let mut inner = self.inner.borrow_mut();
            match inner.state {
                LifecycleState::Uninitialized => (Err(OverlayError::InvalidHostContext), None),
                LifecycleState::Released => {
                    warn!("detach after release, ignoring");
                    (Err(OverlayError::AlreadyReleased), None)
                }
                LifecycleState::Attached => {
                    if let Some(mut surface) = inner.surface.take() {
                        surface.destroy();
                    }
                    inner.state = LifecycleState::Detached;
                    info!("overlay detached");
                    (Ok(DetachOutcome::Detached), Some(OverlayEvent::Detached))
                }
                LifecycleState::Initialized | LifecycleState::Detached => {
                    if let Some(pending) = inner.pending.as_mut() {
                        if pending.wanted {
                            debug!("detach: withdrawing attach pending on permission");
                            pending.wanted = false;
                        }
                    }
                    inner.state = LifecycleState::Detached;
                    (Ok(DetachOutcome::AlreadyDetached), None)
                }
            }
        };
        if let Some(event) = event {
            self.notify(event);
        }
        result
    }

    /// Tears everything down and enters the terminal state. Any surface is
    /// destroyed, the host back-reference dropped, and an outstanding
    /// permission result will be discarded on arrival. Safe to call any
    /// number of times.
    pub fn release(&self) -> ReleaseOutcome {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.state == LifecycleState::Released {
                return ReleaseOutcome::AlreadyReleased;
            }
            if let Some(mut surface) = inner.surface.take() {
                surface.destroy();
            }
            if inner.pending.take().is_some() {
                debug!("release: outstanding permission result will be discarded");
            }
            inner.host = Weak::new();
            inner.state = LifecycleState::Released;
            info!("overlay lifecycle released");
        }
        self.notify(OverlayEvent::Released);
        self.inner.borrow_mut().listener = None;
        ReleaseOutcome::Released
    }

    /// Diagnostics accessor.
    pub fn current_state(&self) -> LifecycleState {
        self.inner.borrow().state
    }

    /// Registers the single observer for lifecycle events. The listener may
    /// call back into the controller.
    pub fn set_listener<F>(&self, listener: F)
    where
        F: Fn(OverlayEvent) + 'static,
    {
        self.inner.borrow_mut().listener = Some(Rc::new(listener));
    }

    fn resolve_permission(&self, verdict: PermissionState) {
        let event = {
            let mut inner = self.inner.borrow_mut();
            let pending = match inner.pending.take() {
                Some(pending) => pending,
                None => {
                    // Released (or never asked): the prompt result is stale.
                    debug!("permission result arrived with no request outstanding, discarding");
                    return;
                }
            };
            match verdict {
                PermissionState::Granted if pending.wanted => match inner.create_surface() {
                    Ok(()) => Some(OverlayEvent::Attached),
                    Err(OverlayError::InvalidHostContext) => {
                        warn!("permission granted but the host context expired, attach abandoned");
                        None
                    }
                    Err(e) => {
                        warn!("attach failed after permission grant: {}", e);
                        Some(OverlayEvent::SurfaceCreationFailed)
                    }
                },
                PermissionState::Granted => {
                    debug!("permission granted but the attach was withdrawn");
                    None
                }
                PermissionState::Denied | PermissionState::Unknown => {
                    warn!("overlay permission denied, attach abandoned");
                    Some(OverlayEvent::PermissionDenied)
                }
            }
        };
        if let Some(event) = event {
            self.notify(event);
        }
    }

    fn notify(&self, event: OverlayEvent) {
        let listener = self.inner.borrow().listener.clone();
        if let Some(listener) = listener {
            listener(event);
        }
    }
}

impl Inner {
    fn create_surface(&mut self) -> OverlayResult<()> {
        let host = self.host.upgrade().ok_or(OverlayError::InvalidHostContext)?;
        let surface = OverlaySurface::create(self.windows.clone(), &host)?;
        info!("overlay attached (window {})", surface.handle());
        self.surface = Some(surface);
        self.state = LifecycleState::Attached;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::MockPlatform;
    use std::cell::RefCell;

    fn controller(platform: &Rc<MockPlatform>) -> OverlayController {
        OverlayController::new(platform.clone(), platform.clone())
    }

    fn initialized(platform: &Rc<MockPlatform>) -> (OverlayController, Rc<HostContext>) {
        let host = HostContext::new("test-host");
        let controller = controller(platform);
        controller.init(Rc::downgrade(&host)).unwrap();
        (controller, host)
    }

    fn record_events(controller: &OverlayController) -> Rc<RefCell<Vec<OverlayEvent>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        controller.set_listener(move |event| sink.borrow_mut().push(event));
        events
    }

    #[test]
    fn attach_before_init_reports_invalid_host_context() {
        let platform = MockPlatform::granted();
        let controller = controller(&platform);

        assert!(matches!(
            controller.attach(),
            Err(OverlayError::InvalidHostContext)
        ));
        assert_eq!(controller.current_state(), LifecycleState::Uninitialized);
        assert_eq!(platform.windows_created(), 0);
    }

    #[test]
    fn detach_before_init_reports_invalid_host_context() {
        let platform = MockPlatform::granted();
        let controller = controller(&platform);

        assert!(matches!(
            controller.detach(),
            Err(OverlayError::InvalidHostContext)
        ));
        assert_eq!(controller.current_state(), LifecycleState::Uninitialized);
    }

    #[test]
    fn init_with_expired_host_fails() {
        let platform = MockPlatform::granted();
        let controller = controller(&platform);
        let host = HostContext::new("short-lived");
        let weak = Rc::downgrade(&host);
        drop(host);

        assert!(matches!(
            controller.init(weak),
            Err(OverlayError::InvalidHostContext)
        ));
        assert_eq!(controller.current_state(), LifecycleState::Uninitialized);
    }

    #[test]
    fn repeated_init_keeps_existing_state() {
        let platform = MockPlatform::granted();
        let (controller, host) = initialized(&platform);
        controller.attach().unwrap();

        let other_host = HostContext::new("other");
        assert_eq!(
            controller.init(Rc::downgrade(&other_host)).unwrap(),
            LifecycleState::Attached
        );
        assert_eq!(controller.current_state(), LifecycleState::Attached);
        drop(host);
    }

    #[test]
    fn scenario_a_attach_with_permission_granted() {
        let platform = MockPlatform::granted();
        let (controller, _host) = initialized(&platform);
        let events = record_events(&controller);

        assert_eq!(controller.attach().unwrap(), AttachOutcome::Attached);
        assert_eq!(controller.current_state(), LifecycleState::Attached);
        assert_eq!(platform.windows_created(), 1);
        assert_eq!(platform.live_windows(), 1);
        assert_eq!(*events.borrow(), vec![OverlayEvent::Attached]);
    }

    #[test]
    fn scenario_b_attach_with_permission_denied() {
        let platform = MockPlatform::denied();
        let (controller, _host) = initialized(&platform);
        let events = record_events(&controller);

        assert!(matches!(
            controller.attach(),
            Err(OverlayError::PermissionDenied)
        ));
        assert_eq!(controller.current_state(), LifecycleState::Initialized);
        assert_eq!(platform.windows_created(), 0);
        assert_eq!(*events.borrow(), vec![OverlayEvent::PermissionDenied]);
    }

    #[test]
    fn attach_twice_creates_exactly_one_surface() {
        let platform = MockPlatform::granted();
        let (controller, _host) = initialized(&platform);

        assert_eq!(controller.attach().unwrap(), AttachOutcome::Attached);
        assert_eq!(controller.attach().unwrap(), AttachOutcome::AlreadyAttached);
        assert_eq!(platform.windows_created(), 1);
        assert_eq!(platform.live_windows(), 1);
    }

    #[test]
    fn detach_destroys_the_surface() {
        let platform = MockPlatform::granted();
        let (controller, _host) = initialized(&platform);
        controller.attach().unwrap();

        assert_eq!(controller.detach().unwrap(), DetachOutcome::Detached);
        assert_eq!(controller.current_state(), LifecycleState::Detached);
        assert_eq!(platform.live_windows(), 0);
        assert_eq!(platform.windows_destroyed(), 1);
    }

    #[test]
    fn detach_when_already_detached_is_a_noop() {
        let platform = MockPlatform::granted();
        let (controller, _host) = initialized(&platform);
        controller.attach().unwrap();
        controller.detach().unwrap();

        assert_eq!(controller.detach().unwrap(), DetachOutcome::AlreadyDetached);
        assert_eq!(controller.current_state(), LifecycleState::Detached);
        assert_eq!(platform.windows_destroyed(), 1);
        assert_eq!(platform.stray_destroys(), 0);
    }

    #[test]
    fn detach_from_initialized_lands_in_detached() {
        let platform = MockPlatform::granted();
        let (controller, _host) = initialized(&platform);

        assert_eq!(controller.detach().unwrap(), DetachOutcome::AlreadyDetached);
        assert_eq!(controller.current_state(), LifecycleState::Detached);
    }

    #[test]
    fn attach_after_detach_recreates_the_surface() {
        let platform = MockPlatform::granted();
        let (controller, _host) = initialized(&platform);

        controller.attach().unwrap();
        controller.detach().unwrap();
        assert_eq!(controller.attach().unwrap(), AttachOutcome::Attached);

        assert_eq!(platform.windows_created(), 2);
        assert_eq!(platform.live_windows(), 1);
        assert_eq!(platform.max_live_windows(), 1);
    }

    #[test]
    fn attach_detach_storm_never_overlaps_surfaces() {
        let platform = MockPlatform::granted();
        let (controller, _host) = initialized(&platform);

        controller.attach().unwrap();
        controller.attach().unwrap();
        controller.detach().unwrap();
        controller.detach().unwrap();
        controller.attach().unwrap();
        controller.detach().unwrap();
        controller.attach().unwrap();
        controller.attach().unwrap();

        assert_eq!(platform.max_live_windows(), 1);
        assert_eq!(platform.stray_destroys(), 0);
        assert_eq!(controller.current_state(), LifecycleState::Attached);
    }

    #[test]
    fn attach_with_expired_host_reports_invalid_host_context() {
        let platform = MockPlatform::granted();
        let (controller, host) = initialized(&platform);
        drop(host);

        assert!(matches!(
            controller.attach(),
            Err(OverlayError::InvalidHostContext)
        ));
        assert_eq!(platform.windows_created(), 0);
    }

    #[test]
    fn scenario_d_release_is_terminal() {
        let platform = MockPlatform::granted();
        let (controller, _host) = initialized(&platform);
        controller.attach().unwrap();

        assert_eq!(controller.release(), ReleaseOutcome::Released);
        assert_eq!(controller.current_state(), LifecycleState::Released);
        assert_eq!(platform.live_windows(), 0);

        assert!(matches!(
            controller.attach(),
            Err(OverlayError::AlreadyReleased)
        ));
        assert!(matches!(
            controller.detach(),
            Err(OverlayError::AlreadyReleased)
        ));
        assert_eq!(controller.current_state(), LifecycleState::Released);
        assert_eq!(platform.windows_created(), 1);
    }

    #[test]
    fn release_is_idempotent() {
        let platform = MockPlatform::granted();
        let (controller, _host) = initialized(&platform);

        assert_eq!(controller.release(), ReleaseOutcome::Released);
        assert_eq!(controller.release(), ReleaseOutcome::AlreadyReleased);
        assert_eq!(controller.current_state(), LifecycleState::Released);
    }

    #[test]
    fn release_works_before_init() {
        let platform = MockPlatform::granted();
        let controller = controller(&platform);

        assert_eq!(controller.release(), ReleaseOutcome::Released);
        assert_eq!(controller.current_state(), LifecycleState::Released);
        assert!(matches!(
            controller.init(Rc::downgrade(&HostContext::new("late"))),
            Err(OverlayError::AlreadyReleased)
        ));
    }

    #[test]
    fn unknown_permission_suspends_into_a_prompt() {
        let platform = MockPlatform::prompting();
        let (controller, _host) = initialized(&platform);

        assert_eq!(
            controller.attach().unwrap(),
            AttachOutcome::PermissionPending
        );
        assert_eq!(platform.prompts_shown(), 1);
        assert!(platform.has_pending_prompt());
        assert_eq!(controller.current_state(), LifecycleState::Initialized);
        assert_eq!(platform.windows_created(), 0);
    }

    #[test]
    fn second_attach_rides_on_the_outstanding_prompt() {
        let platform = MockPlatform::prompting();
        let (controller, _host) = initialized(&platform);

        controller.attach().unwrap();
        assert_eq!(
            controller.attach().unwrap(),
            AttachOutcome::PermissionPending
        );
        assert_eq!(platform.prompts_shown(), 1);

        assert!(platform.resolve_prompt(PermissionState::Granted));
        assert_eq!(controller.current_state(), LifecycleState::Attached);
        assert_eq!(platform.windows_created(), 1);
    }

    #[test]
    fn prompt_granted_completes_the_attach() {
        let platform = MockPlatform::prompting();
        let (controller, _host) = initialized(&platform);
        let events = record_events(&controller);

        controller.attach().unwrap();
        assert!(platform.resolve_prompt(PermissionState::Granted));

        assert_eq!(controller.current_state(), LifecycleState::Attached);
        assert_eq!(platform.live_windows(), 1);
        assert_eq!(*events.borrow(), vec![OverlayEvent::Attached]);
    }

    #[test]
    fn prompt_denied_abandons_the_attach() {
        let platform = MockPlatform::prompting();
        let (controller, _host) = initialized(&platform);
        let events = record_events(&controller);

        controller.attach().unwrap();
        assert!(platform.resolve_prompt(PermissionState::Denied));

        assert_eq!(controller.current_state(), LifecycleState::Initialized);
        assert_eq!(platform.windows_created(), 0);
        assert_eq!(*events.borrow(), vec![OverlayEvent::PermissionDenied]);

        // Denial is not sticky: a later attach asks again.
        controller.attach().unwrap();
        assert_eq!(platform.prompts_shown(), 2);
    }

    #[test]
    fn synchronous_prompt_grant_attaches_within_the_call() {
        let platform = MockPlatform::prompting();
        platform.answer_prompts_with(PermissionState::Granted);
        let (controller, _host) = initialized(&platform);

        assert_eq!(
            controller.attach().unwrap(),
            AttachOutcome::PermissionPending
        );
        assert_eq!(controller.current_state(), LifecycleState::Attached);
        assert_eq!(platform.windows_created(), 1);
    }

    #[test]
    fn scenario_e_release_discards_the_pending_prompt_result() {
        let platform = MockPlatform::prompting();
        let (controller, _host) = initialized(&platform);

        controller.attach().unwrap();
        controller.release();
        assert!(platform.resolve_prompt(PermissionState::Granted));

        assert_eq!(controller.current_state(), LifecycleState::Released);
        assert_eq!(platform.windows_created(), 0);
        assert_eq!(platform.live_windows(), 0);
    }

    #[test]
    fn detach_withdraws_the_pending_attach() {
        let platform = MockPlatform::prompting();
        let (controller, _host) = initialized(&platform);

        controller.attach().unwrap();
        controller.detach().unwrap();
        assert!(platform.resolve_prompt(PermissionState::Granted));

        assert_eq!(controller.current_state(), LifecycleState::Detached);
        assert_eq!(platform.windows_created(), 0);

        // The prompt slot is free again; a new attach starts a new request.
        controller.attach().unwrap();
        assert_eq!(platform.prompts_shown(), 2);
        assert!(platform.resolve_prompt(PermissionState::Granted));
        assert_eq!(controller.current_state(), LifecycleState::Attached);
    }

    #[test]
    fn creation_failure_is_nonfatal_and_retryable() {
        let platform = MockPlatform::granted();
        let (controller, _host) = initialized(&platform);
        let events = record_events(&controller);

        platform.refuse_creation(true);
        assert!(matches!(
            controller.attach(),
            Err(OverlayError::SurfaceCreationFailed(_))
        ));
        assert_eq!(controller.current_state(), LifecycleState::Initialized);
        assert_eq!(platform.live_windows(), 0);
        assert_eq!(*events.borrow(), vec![OverlayEvent::SurfaceCreationFailed]);

        platform.refuse_creation(false);
        assert_eq!(controller.attach().unwrap(), AttachOutcome::Attached);
        assert_eq!(controller.current_state(), LifecycleState::Attached);
    }

    #[test]
    fn creation_failure_after_prompt_grant_is_nonfatal() {
        let platform = MockPlatform::prompting();
        let (controller, _host) = initialized(&platform);
        let events = record_events(&controller);

        controller.attach().unwrap();
        platform.refuse_creation(true);
        assert!(platform.resolve_prompt(PermissionState::Granted));

        assert_eq!(controller.current_state(), LifecycleState::Initialized);
        assert_eq!(platform.live_windows(), 0);
        assert_eq!(*events.borrow(), vec![OverlayEvent::SurfaceCreationFailed]);
    }

    #[test]
    fn release_notifies_and_drops_the_listener() {
        let platform = MockPlatform::granted();
        let (controller, _host) = initialized(&platform);
        let events = record_events(&controller);

        controller.attach().unwrap();
        controller.release();

        assert_eq!(
            *events.borrow(),
            vec![OverlayEvent::Attached, OverlayEvent::Released]
        );
    }

    #[test]
    fn listener_may_reenter_the_controller() {
        let platform = MockPlatform::granted();
        let (controller, _host) = initialized(&platform);

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let reentrant = controller.clone();
        controller.set_listener(move |event| {
            sink.borrow_mut().push((event, reentrant.current_state()));
        });

        controller.attach().unwrap();
        assert_eq!(
            *seen.borrow(),
            vec![(OverlayEvent::Attached, LifecycleState::Attached)]
        );
    }
}
