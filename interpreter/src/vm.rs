use crate::chunk::{Instruction, OpCode};
use crate::compiler::compile;
use crate::interner::Interner;
use crate::object::{Function, Object};
use crate::value::Value;
use flint_syntax::LineNumber;
use smallvec::SmallVec;
use std::io::{self, Write};
use std::mem;
use std::rc::Rc;

/// Slots in the VM memory array; compile-time slot allocation mirrors it.
pub const MAX_DATA_SIZE: usize = 1000;
pub const MAX_CALL_FRAMES: usize = 255;

const STACK_RESERVE: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpretResult {
  Ok,
  CompileError,
  RuntimeError,
}

struct CallFrame {
  function: Rc<Function>,
  pc: usize,
}

macro_rules! runtime_error {
  ($vm:expr, $($message:tt)+) => {{
    $vm.runtime_error(&format!($($message)+));
    continue;
  }};
}

// Add/Subtract/Multiply/Divide double as in-place compound assignment when
// the compiler left an address operand on top of the stack.
macro_rules! arithmetic_op {
  ($vm:expr, $a:ident, $b:ident, $result:expr) => {{
    if matches!($vm.stack.last(), Some(Value::Address(_))) {
      let address = match $vm.pop() {
        Value::Address(address) => usize::from(address),
        _ => unreachable!(),
      };
      if address >= $vm.data.len() {
        runtime_error!($vm, "bad memory reference");
      }
      let $b = $vm.pop();
      let $a = mem::replace(&mut $vm.data[address], Value::Nil);
      match $result {
        Ok(value) => $vm.data[address] = value,
        Err(message) => runtime_error!($vm, "{message}"),
      }
    } else {
      let $b = $vm.pop();
      let $a = $vm.pop();
      match $result {
        Ok(value) => $vm.push(value),
        Err(message) => runtime_error!($vm, "{message}"),
      }
    }
  }};
}

macro_rules! comparison_op {
  ($vm:expr, $method:ident) => {{
    let (b, a) = ($vm.pop(), $vm.pop());
    match a.$method(&b) {
      Ok(result) => $vm.push(Value::Bool(result)),
      Err(message) => runtime_error!($vm, "{message}"),
    }
  }};
}

pub struct VM {
  frames: SmallVec<[CallFrame; 8]>,
  stack: Vec<Value>,
  data: Vec<Value>,
  state: InterpretResult,
  current_line: LineNumber,
  interner: Interner,
  stdout: Box<dyn Write>,
  stderr: Box<dyn Write>,
}

impl VM {
  pub fn new() -> Self {
    Self::with_output(Box::new(io::stdout()), Box::new(io::stderr()))
  }

  pub fn with_output(stdout: Box<dyn Write>, stderr: Box<dyn Write>) -> Self {
    Self {
      frames: SmallVec::new(),
      stack: Vec::with_capacity(STACK_RESERVE),
      data: vec![Value::Nil; MAX_DATA_SIZE],
      state: InterpretResult::Ok,
      current_line: 0,
      interner: Interner::new(),
      stdout,
      stderr,
    }
  }

  /// Compiles the source and runs it as frame 0. Compile errors are
  /// written to the diagnostic sink and abort before execution.
  pub fn interpret(&mut self, source: &str) -> InterpretResult {
    let function = match compile(source, &mut self.interner) {
      Ok(function) => function,
      Err(errors) => {
        for error in errors {
          let _ = writeln!(self.stderr, "{error}");
        }
        self.state = InterpretResult::CompileError;
        return self.state;
      }
    };

    self.stack.clear();
    self.frames.clear();
    self.state = InterpretResult::Ok;
    self.frames.push(CallFrame {
      function: Rc::new(function),
      pc: 0,
    });

    self.run()
  }

  pub fn frame_count(&self) -> usize {
    self.frames.len()
  }

  fn run(&mut self) -> InterpretResult {
    loop {
      if self.state != InterpretResult::Ok {
        return self.state;
      }

      let instruction = {
        let frame = self.frames.last_mut().unwrap();
        let instruction = frame.function.chunk.code[frame.pc];
        frame.pc += 1;
        instruction
      };
      self.current_line = instruction.line;

      match instruction.code {
        OpCode::Constant => {
          let constant = self.constant(instruction);
          self.push(constant);
        }
        OpCode::True => self.push(Value::Bool(true)),
        OpCode::False => self.push(Value::Bool(false)),
        OpCode::Nil => self.push(Value::Nil),
        OpCode::Pop => {
          self.stack.pop(); // may legitimately be empty
        }

        OpCode::Add => {
          arithmetic_op!(self, a, b, a.add(b, &mut self.interner));
        }
        OpCode::Subtract => {
          arithmetic_op!(self, a, b, a.subtract(b));
        }
        OpCode::Multiply => {
          arithmetic_op!(self, a, b, a.multiply(b));
        }
        OpCode::Divide => {
          arithmetic_op!(self, a, b, a.divide(b));
        }
        OpCode::Power => {
          let (b, a) = (self.pop(), self.pop());
          match a.power(b) {
            Ok(value) => self.push(value),
            Err(message) => runtime_error!(self, "{message}"),
          }
        }
        OpCode::Mod => {
          let (b, a) = (self.pop(), self.pop());
          match a.modulo(b) {
            Ok(value) => self.push(value),
            Err(message) => runtime_error!(self, "{message}"),
          }
        }

        OpCode::Cmp => comparison_op!(self, equals),
        OpCode::Greater => comparison_op!(self, greater),
        OpCode::Less => comparison_op!(self, less),

        OpCode::Not => {
          let value = self.pop();
          self.push(Value::Bool(value.is_falsy()));
        }
        OpCode::Negate => match self.stack.last_mut() {
          Some(Value::Number(number)) => *number = -*number,
          _ => runtime_error!(self, "negation operand must be a number"),
        },

        OpCode::Increment | OpCode::Decrement => {
          let address = match self.pop() {
            Value::Address(address) => usize::from(address),
            _ => runtime_error!(self, "bad memory reference"),
          };
          let step = if instruction.code == OpCode::Increment {
            1.0
          } else {
            -1.0
          };
          match self.data.get_mut(address) {
            Some(Value::Number(number)) => *number += step,
            Some(_) => runtime_error!(self, "increment target must be a number"),
            None => runtime_error!(self, "bad memory reference"),
          }
        }

        OpCode::And => {
          let (b, a) = (self.pop(), self.pop());
          self.push(Value::Bool(!a.is_falsy() && !b.is_falsy()));
        }
        OpCode::Or => {
          // the first truthy operand, else false
          let (b, a) = (self.pop(), self.pop());
          if !a.is_falsy() {
            self.push(a);
          } else if !b.is_falsy() {
            self.push(b);
          } else {
            self.push(Value::Bool(false));
          }
        }

        OpCode::SetMem => {
          let address = match self.constant(instruction) {
            Value::Address(address) => usize::from(address),
            _ => runtime_error!(self, "bad memory reference"),
          };
          if address >= self.data.len() {
            runtime_error!(self, "bad memory reference");
          }
          self.data[address] = self.pop();
        }
        OpCode::GetMem => {
          let address = match self.constant(instruction) {
            Value::Address(address) => usize::from(address),
            _ => runtime_error!(self, "bad memory reference"),
          };
          if address >= self.data.len() {
            runtime_error!(self, "bad memory reference");
          }
          self.push(self.data[address].clone());
        }
        OpCode::LoadAddr => {
          let address = self.constant(instruction);
          self.push(address);
        }

        OpCode::TypeCmp => {
          let (b, a) = (self.pop(), self.pop());
          self.push(Value::Bool(a.type_cmp(&b)));
        }
        OpCode::ToString => {
          let value = self.pop();
          let string = self.interner.intern_owned(value.to_string());
          self.push(Value::Object(Object::String(string)));
        }

        OpCode::Jif => {
          let offset = self.jump_offset(instruction);
          let value = self.pop();
          if value.is_falsy() {
            self.frames.last_mut().unwrap().pc += offset;
          }
        }
        OpCode::Jump => {
          let offset = self.jump_offset(instruction);
          self.frames.last_mut().unwrap().pc += offset;
        }
        OpCode::RollBack => {
          let offset = self.jump_offset(instruction);
          self.frames.last_mut().unwrap().pc -= offset;
        }

        OpCode::Print => {
          let value = self.pop();
          let _ = writeln!(self.stdout, "{value}");
        }

        OpCode::Call => {
          let argument_count = match self.constant(instruction) {
            Value::Number(count) => count as usize,
            _ => runtime_error!(self, "non function called"),
          };

          match self.pop() {
            Value::Object(Object::Function(function)) => {
              if self.frames.len() >= MAX_CALL_FRAMES {
                runtime_error!(self, "call stack overflow");
              }
              if let Err(message) = self.align_arguments(argument_count, function.param_count) {
                runtime_error!(self, "{message}");
              }
              self.frames.push(CallFrame { function, pc: 0 });
            }
            Value::Object(Object::NativeFunction(native)) => {
              if let Err(message) = self.align_arguments(argument_count, native.param_count) {
                runtime_error!(self, "{message}");
              }
              self.state = (native.func)(self);
            }
            _ => runtime_error!(self, "non function called"),
          }
        }

        OpCode::ConstructTuple => match self.pop() {
          Value::Object(Object::Tuple(mut tuple)) => {
            let length = usize::from(tuple.length);
            if self.stack.len() < length {
              runtime_error!(self, "invalid tuple construction");
            }
            let from = self.stack.len() - length;
            tuple.data = self.stack.drain(from..).collect();
            self.push(Value::Object(Object::Tuple(tuple)));
          }
          _ => runtime_error!(self, "invalid tuple construction"),
        },

        OpCode::SetFromTuple => {
          let id_count = match self.constant(instruction) {
            Value::Address(count) => usize::from(count),
            _ => runtime_error!(self, "bad memory reference"),
          };
          let start = match self.pop() {
            Value::Address(address) => usize::from(address),
            _ => runtime_error!(self, "bad memory reference"),
          };
          if start + id_count > self.data.len() {
            runtime_error!(self, "bad memory reference");
          }

          match self.pop() {
            Value::Object(Object::Tuple(tuple)) => {
              for offset in 0..id_count {
                self.data[start + offset] =
                  tuple.data.get(offset).cloned().unwrap_or(Value::Nil);
              }
            }
            value => {
              self.data[start] = value;
              for offset in 1..id_count {
                self.data[start + offset] = Value::Nil;
              }
            }
          }
        }

        OpCode::NoOp => {}

        OpCode::Return => {
          self.frames.pop();
          if self.frames.is_empty() {
            return self.state;
          }
        }
      }
    }
  }

  /// Pads missing arguments with nil, then reverses the argument window so
  /// the callee's prologue stores see the first argument first.
  fn align_arguments(&mut self, argument_count: usize, param_count: u8) -> Result<(), String> {
    let param_count = usize::from(param_count);

    if argument_count > param_count {
      return Err(format!(
        "expected {param_count} arguments but got {argument_count}"
      ));
    }

    for _ in argument_count..param_count {
      self.push(Value::Nil);
    }

    let length = self.stack.len();
    if length < param_count {
      return Err("invalid call arguments".to_string());
    }
    self.stack[length - param_count..].reverse();

    Ok(())
  }

  fn constant(&self, instruction: Instruction) -> Value {
    self.frames.last().unwrap().function.chunk.constants[usize::from(instruction.constant)].clone()
  }

  fn jump_offset(&self, instruction: Instruction) -> usize {
    match self.constant(instruction) {
      Value::Number(offset) => offset as usize,
      _ => 0,
    }
  }

  pub(crate) fn push(&mut self, value: Value) {
    self.stack.push(value);
  }

  pub(crate) fn pop(&mut self) -> Value {
    self.stack.pop().unwrap_or(Value::Nil)
  }

  pub(crate) fn intern_owned(&mut self, text: String) -> Rc<str> {
    self.interner.intern_owned(text)
  }

  pub(crate) fn write_out(&mut self, text: &str) {
    let _ = write!(self.stdout, "{text}");
    let _ = self.stdout.flush();
  }

  pub(crate) fn runtime_error(&mut self, message: &str) {
    let _ = writeln!(
      self.stderr,
      "[runtime error on line {}] {}",
      self.current_line, message
    );
    self.state = InterpretResult::RuntimeError;
  }
}

impl Default for VM {
  fn default() -> Self {
    Self::new()
  }
}
