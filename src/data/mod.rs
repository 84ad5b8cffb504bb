pub mod example;
pub mod feedback;
pub mod run;
pub mod utils;

pub use example::*;
pub use feedback::*;
pub use run::*;
pub use utils::*;
