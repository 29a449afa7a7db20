pub mod builder;
mod describe;
mod types;

pub use describe::describe;
pub use types::*;
