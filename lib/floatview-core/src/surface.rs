use crate::host::HostContext;
use crate::platform::{OverlayWindowApi, PlatformResult, SurfaceHandle};
use log::{debug, warn};
use std::rc::Rc;
use std::time::Instant;

/// Exclusive owner of one live native overlay window. Created showing,
/// destroyed exactly once, never reused afterwards.
pub struct OverlaySurface {
    windows: Rc<dyn OverlayWindowApi>,
    handle: SurfaceHandle,
    created_at: Instant,
    destroyed: bool,
}

impl OverlaySurface {
    pub(crate) fn create(
        windows: Rc<dyn OverlayWindowApi>,
        host: &HostContext,
    ) -> PlatformResult<Self> {
        let handle = windows.create_overlay_window(host)?;
        debug!("overlay window {} created for '{}'", handle, host.name());
        Ok(Self {
            windows,
            handle,
            created_at: Instant::now(),
            destroyed: false,
        })
    }

    pub fn handle(&self) -> SurfaceHandle {
        self.handle
    }

    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Hides and releases the window. A handle that has already been
    /// destroyed is left alone, so a racing `release()`/`detach()` pair
    /// cannot double-free it.
    pub(crate) fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        match self.windows.destroy_overlay_window(self.handle) {
            Ok(()) => debug!("overlay window {} destroyed", self.handle),
            Err(e) => warn!("could not destroy overlay window {}: {}", self.handle, e),
        }
    }
}

impl Drop for OverlaySurface {
    fn drop(&mut self) {
        self.destroy();
    }
}
