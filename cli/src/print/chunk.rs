use flint_interpreter::{Chunk, Function, Instruction, Object, OpCode, Value, NO_CONSTANT};

pub fn print(function: &Function) {
  print_chunk(&function.name, &function.chunk);

  for constant in &function.chunk.constants {
    if let Value::Object(Object::Function(inner)) = constant {
      print(inner);
    }
  }
}

fn print_chunk(name: &str, chunk: &Chunk) {
  println!("          ╭─[{name}]");

  let mut last_line = 0;
  for (position, instruction) in chunk.code.iter().enumerate() {
    if instruction.line == last_line {
      print!("     {position:0>4} │ ");
    } else {
      print!("{:<4} {position:0>4} │ ", instruction.line);
      last_line = instruction.line;
    }
    print_instruction(chunk, instruction);
  }

  println!("──────────╯");
}

fn print_instruction(chunk: &Chunk, instruction: &Instruction) {
  if instruction.constant == NO_CONSTANT {
    return println!("{:?}", instruction.code);
  }

  let constant = chunk.get_constant(instruction.constant);
  match instruction.code {
    OpCode::Jif | OpCode::Jump | OpCode::RollBack => {
      println!("{:?} by {constant}", instruction.code);
    }
    OpCode::SetMem | OpCode::GetMem | OpCode::LoadAddr | OpCode::SetFromTuple => {
      println!("{:?} @{constant}", instruction.code);
    }
    OpCode::Call => println!("Call ({constant} args)"),
    _ => println!("{:?} {constant}", instruction.code),
  }
}
