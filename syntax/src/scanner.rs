use crate::tokens::{keyword, LineNumber, Token, TokenType};

#[derive(Debug, Clone)]
pub struct ScannerState {
  pub ok: bool,
  pub message: &'static str,
  pub line: LineNumber,
  pub column: u32,
}

impl Default for ScannerState {
  fn default() -> Self {
    Self {
      ok: true,
      message: "",
      line: 1,
      column: 1,
    }
  }
}

pub struct Scanner<'source> {
  source: &'source str,
  bytes: &'source [u8],

  offset: usize,
  start: usize,
  line: LineNumber,
  column: u32,
  start_column: u32,

  last_token: TokenType,
  in_fstring_brace: bool,

  pub state: ScannerState,
}

impl<'source> Scanner<'source> {
  pub fn new(source: &'source str) -> Self {
    Self {
      source,
      bytes: source.as_bytes(),
      offset: 0,
      start: 0,
      line: 1,
      column: 1,
      start_column: 1,
      last_token: TokenType::Eof,
      in_fstring_brace: false,
      state: ScannerState::default(),
    }
  }

  pub fn scan_token(&mut self) -> Token<'source> {
    let line_before = self.line;
    self.skip_chars();

    // A line break directly after `return` ends the statement.
    if self.last_token == TokenType::Return && self.line > line_before {
      self.last_token = TokenType::SemiColon;
      return Token {
        ttype: TokenType::SemiColon,
        lexeme: "",
        line: line_before,
        column: self.column,
      };
    }

    let token = self.next_token();
    self.last_token = token.ttype;
    token
  }

  pub fn scan_fstring(&mut self) -> Token<'source> {
    while !self.at_end() && self.peek() != b'"' {
      self.start = self.offset;
      self.start_column = self.column;

      if self.matches(b'}') {
        self.in_fstring_brace = false;
        continue;
      }

      if self.matches(b'{') || self.in_fstring_brace {
        self.in_fstring_brace = true;
        return self.scan_token();
      }

      while !self.at_end() && self.peek() != b'{' && self.peek() != b'"' {
        if self.peek() == b'\n' {
          self.line += 1;
          self.column = 1;
        }
        self.advance();
      }

      return self.build(TokenType::String);
    }

    if self.at_end() {
      // Eof rather than Error, so callers cannot spin re-scanning
      self.error("unterminated format string found");
      return self.build(TokenType::Eof);
    }

    self.advance();
    self.start = self.offset;
    self.build(TokenType::FStringEnd)
  }

  fn next_token(&mut self) -> Token<'source> {
    self.start = self.offset;
    self.start_column = self.column;

    if self.at_end() {
      return self.build(TokenType::Eof);
    }

    let character = self.advance();

    match character {
      b'(' => self.build(TokenType::LeftParen),
      b')' => self.build(TokenType::RightParen),
      b'{' => self.build(TokenType::LeftBrace),
      b'}' => self.build(TokenType::RightBrace),
      b',' => self.build(TokenType::Comma),
      b';' => self.build(TokenType::SemiColon),
      b':' => self.build(TokenType::Colon),
      b'^' => self.build(TokenType::Caret),
      b'%' => self.build(TokenType::Percent),
      b'.' => {
        let ttype = if self.matches(b'.') {
          TokenType::DotDot
        } else {
          TokenType::Dot
        };
        self.build(ttype)
      }
      b'-' => {
        let ttype = if self.matches(b'=') {
          TokenType::MinusEqual
        } else if self.matches(b'-') {
          TokenType::MinusMinus
        } else {
          TokenType::Minus
        };
        self.build(ttype)
      }
      b'+' => {
        let ttype = if self.matches(b'=') {
          TokenType::PlusEqual
        } else if self.matches(b'+') {
          TokenType::PlusPlus
        } else {
          TokenType::Plus
        };
        self.build(ttype)
      }
      b'*' => {
        let ttype = if self.matches(b'=') {
          TokenType::StarEqual
        } else {
          TokenType::Star
        };
        self.build(ttype)
      }
      b'/' => {
        let ttype = if self.matches(b'=') {
          TokenType::SlashEqual
        } else {
          TokenType::Slash
        };
        self.build(ttype)
      }
      b'!' => {
        let ttype = if self.matches(b'=') {
          TokenType::BangEqual
        } else {
          TokenType::Bang
        };
        self.build(ttype)
      }
      b'=' => {
        let ttype = if self.matches(b'=') {
          TokenType::EqualEqual
        } else {
          TokenType::Equal
        };
        self.build(ttype)
      }
      b'>' => {
        let ttype = if self.matches(b'=') {
          TokenType::GreaterEqual
        } else {
          TokenType::Greater
        };
        self.build(ttype)
      }
      b'<' => {
        let ttype = if self.matches(b'=') {
          TokenType::LessEqual
        } else {
          TokenType::Less
        };
        self.build(ttype)
      }
      b'f' if self.peek() == b'"' => {
        self.advance();
        self.build(TokenType::FStringStart)
      }
      b'"' => self.scan_string(),
      b'0'..=b'9' => self.scan_number(),
      c if is_alpha(c) => self.scan_identifier(),
      _ => {
        self.error("unexpected character");
        self.build(TokenType::Error)
      }
    }
  }

  fn scan_string(&mut self) -> Token<'source> {
    while !self.at_end() && self.peek() != b'"' {
      if self.peek() == b'\n' {
        self.line += 1;
        self.column = 1;
      }
      self.advance();
    }

    if self.at_end() {
      self.error("unterminated string");
      return self.build(TokenType::Error);
    }

    self.advance();

    // lexeme excludes the enclosing quotes
    self.start += 1;
    self.offset -= 1;
    let token = self.build(TokenType::String);
    self.offset += 1;

    token
  }

  fn scan_number(&mut self) -> Token<'source> {
    while self.peek().is_ascii_digit() {
      self.advance();
    }

    if self.peek() == b'.' && self.peek_next().is_ascii_digit() {
      self.advance();
      while self.peek().is_ascii_digit() {
        self.advance();
      }
    }

    self.build(TokenType::Number)
  }

  fn scan_identifier(&mut self) -> Token<'source> {
    while is_alpha(self.peek()) || self.peek().is_ascii_digit() {
      self.advance();
    }

    let lexeme = &self.source[self.start..self.offset];
    self.build(keyword(lexeme).unwrap_or(TokenType::Identifier))
  }

  fn skip_chars(&mut self) {
    loop {
      match self.peek() {
        b' ' | b'\r' | b'\t' => {
          self.advance();
        }
        b'\n' => {
          self.line += 1;
          self.column = 1;
          self.offset += 1;
        }
        b'/' if self.peek_next() == b'/' => {
          while !self.at_end() && self.peek() != b'\n' {
            self.advance();
          }
        }
        b'/' if self.peek_next() == b'*' => {
          self.advance();
          self.advance();

          loop {
            if self.at_end() {
              self.error("multiline comment is not terminated");
              return;
            }
            if self.peek() == b'*' && self.peek_next() == b'/' {
              self.advance();
              self.advance();
              break;
            }
            if self.peek() == b'\n' {
              self.line += 1;
              self.column = 1;
            }
            self.advance();
          }
        }
        _ => return,
      }
    }
  }

  fn build(&self, ttype: TokenType) -> Token<'source> {
    Token {
      ttype,
      lexeme: &self.source[self.start..self.offset],
      line: self.line,
      column: self.start_column,
    }
  }

  fn at_end(&self) -> bool {
    self.offset >= self.bytes.len()
  }

  fn advance(&mut self) -> u8 {
    if self.at_end() {
      return b'\0';
    }
    self.column += 1;
    self.offset += 1;
    self.bytes[self.offset - 1]
  }

  fn matches(&mut self, expected: u8) -> bool {
    if self.at_end() || self.bytes[self.offset] != expected {
      return false;
    }
    self.advance();
    true
  }

  fn peek(&self) -> u8 {
    if self.at_end() {
      b'\0'
    } else {
      self.bytes[self.offset]
    }
  }

  fn peek_next(&self) -> u8 {
    if self.offset + 1 >= self.bytes.len() {
      b'\0'
    } else {
      self.bytes[self.offset + 1]
    }
  }

  fn error(&mut self, message: &'static str) {
    self.state.ok = false;
    self.state.message = message;
    self.state.line = self.line;
    self.state.column = self.column;
  }
}

fn is_alpha(c: u8) -> bool {
  c.is_ascii_alphabetic() || c == b'_'
}
