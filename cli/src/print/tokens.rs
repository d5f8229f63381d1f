use flint_syntax::{Scanner, Token, TokenType};

pub fn print(source: &str) {
  let mut scanner = Scanner::new(source);
  let mut last_line = 0;

  println!("     ╭─[Tokens]");
  loop {
    let token = scanner.scan_token();
    print_token(token, &mut last_line);

    if token.ttype == TokenType::FStringStart {
      loop {
        let token = scanner.scan_fstring();
        print_token(token, &mut last_line);

        if matches!(
          token.ttype,
          TokenType::FStringEnd | TokenType::Error | TokenType::Eof
        ) {
          break;
        }
      }
    }

    if matches!(token.ttype, TokenType::Eof | TokenType::Error) {
      break;
    }
  }
  println!("─────╯");

  if !scanner.state.ok {
    super::error_message(scanner.state.message);
  }
}

fn print_token(token: Token, last_line: &mut u32) {
  if token.line == *last_line {
    print!("     │ ");
  } else {
    print!("{:>4} │ ", token.line);
    *last_line = token.line;
  }
  println!("{:?} ({})", token.ttype, token.lexeme);
}
