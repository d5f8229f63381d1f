use crate::object::Object;
use crate::value::Value;
use crate::vm::MAX_DATA_SIZE;
use flint_syntax::LineNumber;

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum OpCode {
  Constant,
  SetMem,
  GetMem,
  ToString,
  True,
  False,
  Pop,
  Nil,
  Cmp,
  Greater,
  Less,
  Add,
  Subtract,
  Multiply,
  Divide,
  Power,
  Mod,
  Not,
  Negate,
  Increment,
  Decrement,
  Or,
  And,
  Print,
  LoadAddr,
  TypeCmp,
  Jif,
  Jump,
  RollBack,
  Call,
  ConstructTuple,
  SetFromTuple,
  Return,
  NoOp,
}

pub const NO_CONSTANT: u16 = u16::MAX;

/// Fixed-shape instruction record: opcode, constant-pool index
/// (`NO_CONSTANT` when the opcode takes none), and source line.
#[derive(Debug, Copy, Clone)]
pub struct Instruction {
  pub code: OpCode,
  pub constant: u16,
  pub line: LineNumber,
}

#[derive(Clone, Default, Debug)]
pub struct Chunk {
  pub code: Vec<Instruction>,
  pub constants: Vec<Value>,
}

impl Chunk {
  pub fn len(&self) -> usize {
    self.code.len()
  }

  pub fn is_empty(&self) -> bool {
    self.code.is_empty()
  }

  pub fn emit(&mut self, code: OpCode, line: LineNumber) {
    self.code.push(Instruction {
      code,
      constant: NO_CONSTANT,
      line,
    });
  }

  /// Appends an instruction together with a newly pooled constant.
  /// `None` once the pool can no longer be indexed by a `u16`.
  pub fn emit_with_constant(
    &mut self,
    code: OpCode,
    value: Value,
    line: LineNumber,
  ) -> Option<u16> {
    if self.constants.len() >= usize::from(NO_CONSTANT) {
      return None;
    }

    let index = self.constants.len() as u16;
    self.constants.push(value);
    self.code.push(Instruction {
      code,
      constant: index,
      line,
    });

    Some(index)
  }

  pub fn get_constant(&self, index: u16) -> &Value {
    &self.constants[usize::from(index)]
  }

  /// Checks the structural invariants the compiler is supposed to uphold:
  /// constant indices are valid, jump distances are in-range numbers,
  /// memory references fit the VM data array, and the chunk ends with
  /// `Return`. Function constants are verified recursively.
  pub fn verify(&self) -> Result<(), String> {
    if !matches!(self.code.last().map(|i| i.code), Some(OpCode::Return)) {
      return Err("chunk does not end with Return".to_string());
    }

    for (position, instruction) in self.code.iter().enumerate() {
      let constant = if instruction.constant == NO_CONSTANT {
        None
      } else if usize::from(instruction.constant) < self.constants.len() {
        Some(self.get_constant(instruction.constant))
      } else {
        return Err(format!("constant index out of range at {position}"));
      };

      match instruction.code {
        OpCode::Constant | OpCode::Call => {
          if constant.is_none() {
            return Err(format!("missing constant at {position}"));
          }
        }
        OpCode::SetMem | OpCode::GetMem | OpCode::LoadAddr => match constant {
          Some(Value::Address(address)) if usize::from(*address) < MAX_DATA_SIZE => {}
          _ => return Err(format!("bad memory reference at {position}")),
        },
        OpCode::SetFromTuple => match constant {
          Some(Value::Address(_)) => {}
          _ => return Err(format!("bad identifier count at {position}")),
        },
        OpCode::Jif | OpCode::Jump => match constant {
          Some(Value::Number(offset)) if *offset >= 0.0 => {
            let target = position + 1 + *offset as usize;
            if target > self.code.len() {
              return Err(format!("jump out of range at {position}"));
            }
          }
          _ => return Err(format!("bad jump distance at {position}")),
        },
        OpCode::RollBack => match constant {
          Some(Value::Number(offset)) if *offset >= 0.0 => {
            if *offset as usize > position + 1 {
              return Err(format!("rollback out of range at {position}"));
            }
          }
          _ => return Err(format!("bad rollback distance at {position}")),
        },
        _ => {}
      }
    }

    for constant in &self.constants {
      if let Value::Object(Object::Function(function)) = constant {
        function.chunk.verify()?;
      }
    }

    Ok(())
  }
}
