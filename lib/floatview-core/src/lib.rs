mod binder;
pub mod config;
mod controller;
mod host;
pub mod paths;
mod permission;
pub mod platform;
mod surface;

pub use binder::{BinderPolicy, HostEvent, HostLifecycleBinder};
pub use config::Config;
pub use controller::{
    AttachOutcome, DetachOutcome, LifecycleState, OverlayController, OverlayError, OverlayEvent,
    OverlayResult, ReleaseOutcome,
};
pub use host::HostContext;
pub use permission::PermissionGate;
pub use surface::OverlaySurface;

pub fn version() -> &'static str {
    option_env!("VERSION").unwrap_or("v0.0.0-dev")
}
