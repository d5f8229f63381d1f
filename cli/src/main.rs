use clap::{Arg, Command};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::fs;
use std::process;

use flint_interpreter::{compile, Interner, VM};

mod print;

fn read_file(filename: &str) -> String {
  match fs::read_to_string(filename) {
    Ok(contents) if !contents.is_empty() => contents,
    _ => {
      print::error_message("could not read input file");
      process::exit(-1);
    }
  }
}

fn run_file(filename: &str) {
  let source = read_file(filename);
  let mut vm = VM::new();
  vm.interpret(&source);
}

fn repl() {
  let Ok(mut editor) = DefaultEditor::new() else {
    return print::error_message("could not open the terminal");
  };
  let mut vm = VM::new();

  loop {
    match editor.readline("> ") {
      Ok(line) => {
        if line.is_empty() {
          continue;
        }
        let _ = editor.add_history_entry(&line);
        vm.interpret(&line);
      }
      Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
      Err(error) => {
        println!("Error: {error:?}");
        break;
      }
    }
  }
}

fn main() {
  let version = "v0.2";
  let app = Command::new("flint")
    .version(version)
    .arg(Arg::new("file").help("The file to run").required(false))
    .subcommand(
      Command::new("run")
        .about("Execute a flint program")
        .arg(Arg::new("file").help("The file to run").required(true)),
    )
    .subcommand(
      Command::new("tokens")
        .about("Display the tokens for a file")
        .arg(
          Arg::new("file")
            .help("The file to scan for tokens")
            .required(true),
        ),
    )
    .subcommand(
      Command::new("bytecode")
        .about("Display the compiled bytecode for a file")
        .arg(Arg::new("file").help("The file to compile").required(true)),
    )
    .get_matches();

  match app.subcommand() {
    Some(("run", subcommand)) => {
      run_file(subcommand.get_one::<String>("file").unwrap());
    }
    Some(("tokens", subcommand)) => {
      let source = read_file(subcommand.get_one::<String>("file").unwrap());
      print::tokens(&source);
    }
    Some(("bytecode", subcommand)) => {
      let source = read_file(subcommand.get_one::<String>("file").unwrap());
      let mut interner = Interner::new();
      match compile(&source, &mut interner) {
        Ok(function) => print::chunk(&function),
        Err(errors) => print::compile_errors(&errors),
      }
    }
    _ => {
      if let Some(filename) = app.get_one::<String>("file") {
        run_file(filename);
      } else {
        println!("flint ({version})");
        repl();
      }
    }
  }
}
