use crate::platform::{OverlayPermissionApi, PermissionCallback, PermissionState};
use log::debug;
use std::rc::Rc;

/// Stateless front for the platform permission API. Holds no permission
/// state of its own; single-outstanding-request bookkeeping belongs to the
/// controller.
#[derive(Clone)]
pub struct PermissionGate {
    api: Rc<dyn OverlayPermissionApi>,
}

impl PermissionGate {
    pub fn new(api: Rc<dyn OverlayPermissionApi>) -> Self {
        Self { api }
    }

    /// Fresh platform query. The answer is never cached because the user can
    /// change the permission externally between calls.
    pub fn check(&self) -> PermissionState {
        self.api.query_overlay_permission()
    }

    /// Forwards the asynchronous prompt. The callback fires at most once,
    /// possibly from inside this call.
    pub fn request(&self, on_result: PermissionCallback) {
        debug!("requesting overlay permission from the platform");
        self.api.request_overlay_permission(on_result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::MockPlatform;

    #[test]
    fn check_reflects_current_platform_state() {
        let platform = MockPlatform::granted();
        let gate = PermissionGate::new(platform.clone());
        assert_eq!(gate.check(), PermissionState::Granted);

        platform.set_permission(PermissionState::Denied);
        assert_eq!(gate.check(), PermissionState::Denied);

        platform.set_permission(PermissionState::Unknown);
        assert_eq!(gate.check(), PermissionState::Unknown);
    }

    #[test]
    fn request_reaches_the_platform_prompt() {
        let platform = MockPlatform::prompting();
        let gate = PermissionGate::new(platform.clone());

        gate.request(Box::new(|_| {}));
        assert_eq!(platform.prompts_shown(), 1);
        assert!(platform.has_pending_prompt());
    }

    #[test]
    fn synchronous_prompt_answers_run_inside_request() {
        let platform = MockPlatform::prompting();
        platform.answer_prompts_with(PermissionState::Granted);
        let gate = PermissionGate::new(platform.clone());

        let delivered = Rc::new(std::cell::Cell::new(None));
        let sink = delivered.clone();
        gate.request(Box::new(move |verdict| sink.set(Some(verdict))));
        assert_eq!(delivered.get(), Some(PermissionState::Granted));
        assert!(!platform.has_pending_prompt());
    }
}
