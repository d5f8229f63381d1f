use flint_interpreter::CompileError;

fn red(text: &str) -> String {
  format!("\u{001b}[31m{text}\u{001b}[0m")
}

fn bold(text: &str) -> String {
  format!("\u{001b}[1m{text}\u{001b}[0m")
}

pub fn error_message(message: &str) {
  eprintln!("{} {}", bold(&red("Error:")), bold(message));
}

pub fn compile_errors(errors: &[CompileError]) {
  for error in errors {
    eprintln!("{error}");
  }
}
