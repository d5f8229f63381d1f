mod builtins;
mod chunk;
mod compiler;
mod interner;
mod object;
mod value;
mod vm;

// Bytecode: instruction records plus a constant pool, owned by a function
pub use chunk::{Chunk, Instruction, OpCode, NO_CONSTANT};

// Compile source text into the top-level function
pub use compiler::{compile, CompileError};

// Canonical identities for every string the interpreter touches
pub use interner::Interner;

// Heap values
pub use object::{Function, NativeFunction, Object, Tuple};
pub use value::Value;

// Run compiled bytecode
pub use vm::{InterpretResult, VM, MAX_CALL_FRAMES, MAX_DATA_SIZE};
