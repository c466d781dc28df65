pub mod answers;
pub mod guidance;
pub mod prompt;

pub use answers::*;
pub use guidance::*;
pub use prompt::*;
