use std::rc::Rc;

/// Identity of the application embedding the overlay. The host owns the
/// strong reference; the lifecycle core only ever keeps a weak back-reference
/// to it, so dropping the host invalidates the context everywhere at once.
#[derive(Debug)]
pub struct HostContext {
    name: String,
}

impl HostContext {
    pub fn new(name: impl Into<String>) -> Rc<Self> {
        Rc::new(Self { name: name.into() })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
