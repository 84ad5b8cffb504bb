pub mod client;
pub mod core;
pub mod data;
pub mod evaluate;
pub mod evaluator;
pub mod lm;
pub mod providers;
pub mod trace;
pub mod utils;

pub use client::*;
pub use self::core::*;
pub use data::*;
pub use evaluate::*;
pub use evaluator::*;
pub use lm::*;
pub use providers::*;
pub use trace::*;
pub use utils::*;
