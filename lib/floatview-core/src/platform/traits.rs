use crate::host::HostContext;
use crate::platform::{PermissionState, PlatformResult, SurfaceHandle};

/// Delivered exactly once with the user's answer to a permission prompt.
/// May fire re-entrantly, from inside `request_overlay_permission`, when the
/// platform can answer without showing UI.
pub type PermissionCallback = Box<dyn FnOnce(PermissionState)>;

/// Creates and destroys native overlay windows. Implemented by the embedding
/// environment (mobile OS, desktop windowing system, embedded UI shell); the
/// lifecycle core only ever holds the returned handle.
pub trait OverlayWindowApi {
    /// Allocates and shows one overlay window above all other application
    /// content. Fails when the platform refuses, which can happen even after
    /// a positive permission check if the permission was revoked in between.
    fn create_overlay_window(&self, host: &HostContext) -> PlatformResult<SurfaceHandle>;

    /// Hides and releases the window behind `handle`.
    fn destroy_overlay_window(&self, handle: SurfaceHandle) -> PlatformResult<()>;
}

/// Queries and requests the one platform permission required to draw
/// system-level overlays.
pub trait OverlayPermissionApi {
    /// Current permission state, queried fresh on every call. Hosts that can
    /// only report granted/not-granted should map the latter to
    /// [`PermissionState::Unknown`] so it routes through the prompt.
    fn query_overlay_permission(&self) -> PermissionState;

    /// Prompts the user and delivers the answer through `on_result`.
    fn request_overlay_permission(&self, on_result: PermissionCallback);
}
