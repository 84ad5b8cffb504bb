pub mod adapter;
pub mod handle;

pub use adapter::*;
pub use handle::*;
