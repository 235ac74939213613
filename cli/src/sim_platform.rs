use crate::cli::PermissionMode;
use floatview_core::platform::{
    OverlayPermissionApi, OverlayWindowApi, PermissionCallback, PermissionState, PlatformResult,
    SurfaceHandle,
};
use floatview_core::{Config, HostContext};
use log::info;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Stands in for a real windowing system: window creation and permission
/// prompts only print what a platform would do. In `Prompt` mode the
/// permission callback is parked until the operator answers through the
/// menu, which makes the suspended-attach and discarded-result paths
/// walkable by hand.
pub struct SimPlatform {
    mode: PermissionMode,
    next_handle: Cell<SurfaceHandle>,
    pending_prompt: RefCell<Option<PermissionCallback>>,
}

impl SimPlatform {
    pub fn new(mode: PermissionMode) -> Rc<Self> {
        Rc::new(Self {
            mode,
            next_handle: Cell::new(1),
            pending_prompt: RefCell::new(None),
        })
    }

    pub fn has_pending_prompt(&self) -> bool {
        self.pending_prompt.borrow().is_some()
    }

    /// Answers the parked permission prompt. Returns false when none is
    /// outstanding.
    pub fn resolve_prompt(&self, verdict: PermissionState) -> bool {
        let callback = self.pending_prompt.borrow_mut().take();
        match callback {
            Some(callback) => {
                info!("[sim] permission prompt answered: {:?}", verdict);
                callback(verdict);
                true
            }
            None => false,
        }
    }
}

impl OverlayWindowApi for SimPlatform {
    fn create_overlay_window(&self, host: &HostContext) -> PlatformResult<SurfaceHandle> {
        let (x, y) = Config::initial_position();
        let (width, height) = Config::surface_size();
        let handle = self.next_handle.get();
        self.next_handle.set(handle + 1);
        info!(
            "[sim] overlay window {} for '{}' shown at ({}, {}), size {}x{}",
            handle,
            host.name(),
            x,
            y,
            width,
            height
        );
        Ok(handle)
    }

    fn destroy_overlay_window(&self, handle: SurfaceHandle) -> PlatformResult<()> {
        info!("[sim] overlay window {} hidden and released", handle);
        Ok(())
    }
}

impl OverlayPermissionApi for SimPlatform {
    fn query_overlay_permission(&self) -> PermissionState {
        match self.mode {
            PermissionMode::Granted => PermissionState::Granted,
            PermissionMode::Denied => PermissionState::Denied,
            PermissionMode::Prompt => PermissionState::Unknown,
        }
    }

    fn request_overlay_permission(&self, on_result: PermissionCallback) {
        match self.mode {
            PermissionMode::Granted => on_result(PermissionState::Granted),
            PermissionMode::Denied => {
                info!("[sim] permission prompt auto-denied");
                on_result(PermissionState::Denied);
            }
            PermissionMode::Prompt => {
                info!("[sim] permission prompt shown; answer with 'grant' or 'deny'");
                *self.pending_prompt.borrow_mut() = Some(on_result);
            }
        }
    }
}
