pub mod classify;
pub mod parser;
pub mod types;

pub use classify::*;
pub use parser::*;
pub use types::*;
