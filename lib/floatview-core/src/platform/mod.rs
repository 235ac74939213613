pub use common::*;
pub use traits::*;

mod common;
mod traits;

#[cfg(any(test, feature = "mock-platform"))]
pub mod mock;
