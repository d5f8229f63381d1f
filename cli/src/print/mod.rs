mod chunk;
mod diagnostics;
mod tokens;

pub use chunk::print as chunk;
pub use diagnostics::{compile_errors, error_message};
pub use tokens::print as tokens;
