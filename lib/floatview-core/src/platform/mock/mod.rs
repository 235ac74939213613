use crate::host::HostContext;
use crate::platform::{
    OverlayPermissionApi, OverlayWindowApi, PermissionCallback, PermissionState, PlatformResult,
    SurfaceHandle,
};
use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;

/// In-memory platform for the test suite. Every window the lifecycle core
/// creates or destroys is counted here, so tests can assert the
/// at-most-one-surface invariant and the absence of double-destroys.
pub struct MockPlatform {
    permission: Cell<PermissionState>,
    refuse_creation: Cell<bool>,
    next_handle: Cell<SurfaceHandle>,
    live: RefCell<HashSet<SurfaceHandle>>,
    created: Cell<u32>,
    destroyed: Cell<u32>,
    stray_destroys: Cell<u32>,
    max_live: Cell<usize>,
    prompts: Cell<u32>,
    prompt_answer: Cell<Option<PermissionState>>,
    pending_prompt: RefCell<Option<PermissionCallback>>,
}

impl MockPlatform {
    pub fn new(permission: PermissionState) -> Rc<Self> {
        Rc::new(Self {
            permission: Cell::new(permission),
            refuse_creation: Cell::new(false),
            next_handle: Cell::new(1),
            live: RefCell::new(HashSet::new()),
            created: Cell::new(0),
            destroyed: Cell::new(0),
            stray_destroys: Cell::new(0),
            max_live: Cell::new(0),
            prompts: Cell::new(0),
            prompt_answer: Cell::new(None),
            pending_prompt: RefCell::new(None),
        })
    }

    pub fn granted() -> Rc<Self> {
        Self::new(PermissionState::Granted)
    }

    pub fn denied() -> Rc<Self> {
        Self::new(PermissionState::Denied)
    }

    /// Platform that answers `Unknown` to queries, forcing a prompt.
    pub fn prompting() -> Rc<Self> {
        Self::new(PermissionState::Unknown)
    }

    pub fn set_permission(&self, state: PermissionState) {
        self.permission.set(state);
    }

    /// Make subsequent window creations fail, emulating a permission revoked
    /// between check and creation.
    pub fn refuse_creation(&self, refuse: bool) {
        self.refuse_creation.set(refuse);
    }

    /// Answer future prompts synchronously, from inside the request call.
    pub fn answer_prompts_with(&self, verdict: PermissionState) {
        self.prompt_answer.set(Some(verdict));
    }

    /// Delivers a deferred prompt result. Returns false if no prompt is
    /// outstanding.
    pub fn resolve_prompt(&self, verdict: PermissionState) -> bool {
        let callback = self.pending_prompt.borrow_mut().take();
        match callback {
            Some(callback) => {
                callback(verdict);
                true
            }
            None => false,
        }
    }

    pub fn has_pending_prompt(&self) -> bool {
        self.pending_prompt.borrow().is_some()
    }

    pub fn live_windows(&self) -> usize {
        self.live.borrow().len()
    }

    /// Largest number of windows alive at the same time, ever.
    pub fn max_live_windows(&self) -> usize {
        self.max_live.get()
    }

    pub fn windows_created(&self) -> u32 {
        self.created.get()
    }

    pub fn windows_destroyed(&self) -> u32 {
        self.destroyed.get()
    }

    /// Destroy calls for handles that were not alive.
    pub fn stray_destroys(&self) -> u32 {
        self.stray_destroys.get()
    }

    pub fn prompts_shown(&self) -> u32 {
        self.prompts.get()
    }
}

impl OverlayWindowApi for MockPlatform {
    fn create_overlay_window(&self, host: &HostContext) -> PlatformResult<SurfaceHandle> {
        if self.refuse_creation.get() {
            return Err(format!("overlay window for '{}' refused", host.name()).into());
        }
        let handle = self.next_handle.get();
        self.next_handle.set(handle + 1);
        let mut live = self.live.borrow_mut();
        live.insert(handle);
        self.created.set(self.created.get() + 1);
        self.max_live.set(self.max_live.get().max(live.len()));
        Ok(handle)
    }

    fn destroy_overlay_window(&self, handle: SurfaceHandle) -> PlatformResult<()> {
        if self.live.borrow_mut().remove(&handle) {
            self.destroyed.set(self.destroyed.get() + 1);
        } else {
            self.stray_destroys.set(self.stray_destroys.get() + 1);
        }
        Ok(())
    }
}

impl OverlayPermissionApi for MockPlatform {
    fn query_overlay_permission(&self) -> PermissionState {
        self.permission.get()
    }

    fn request_overlay_permission(&self, on_result: PermissionCallback) {
        self.prompts.set(self.prompts.get() + 1);
        match self.prompt_answer.get() {
            Some(verdict) => on_result(verdict),
            None => *self.pending_prompt.borrow_mut() = Some(on_result),
        }
    }
}
