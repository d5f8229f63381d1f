mod scanner;
mod tokens;

// Scan a source string into a stream of tokens
pub use scanner::{Scanner, ScannerState};

// A token, and the closed set of token kinds
pub use tokens::{LineNumber, Token, TokenType};
