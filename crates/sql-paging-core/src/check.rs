//! Best-effort detection of statements that cannot be paginated textually.
//!
//! The count wrapper and the appended limit clause only work for a single
//! top-level SELECT with no terminator and no row window of its own. This
//! module scans the statement lexically to catch the common violations. It
//! is not a parser: anything it accepts may still fail in the database.

use crate::{Error, Result};

/// Check that `sql` looks safe to wrap in a count query and to extend with a
/// limit clause.
///
/// Rejects, at the top level (outside parentheses, quoted literals, quoted
/// identifiers and comments):
/// - empty statements
/// - statements not starting with `SELECT` or `WITH`
/// - any `;` statement terminator
/// - unbalanced parentheses
/// - an existing `LIMIT`, `OFFSET` or `FETCH` clause
///
/// Also rejects a `--` comment that runs to the end of the statement, since
/// anything appended after it would be commented out, and unterminated block
/// comments, literals and quoted identifiers.
pub fn check_statement(sql: &str) -> Result<()> {
   let mut tokens = Tokens::new(sql);
   let mut depth: usize = 0;

   loop {
      match tokens.next().transpose()? {
         None => return Err(malformed("statement is empty")),
         Some(Token::Open) => depth += 1,
         Some(Token::Word(word))
            if word.eq_ignore_ascii_case("SELECT") || word.eq_ignore_ascii_case("WITH") =>
         {
            break;
         }
         Some(_) => return Err(malformed("statement must start with SELECT or WITH")),
      }
   }

   let mut qualified = false;
   while let Some(token) = tokens.next().transpose()? {
      match token {
         Token::Open => depth += 1,
         Token::Close => {
            depth = depth
               .checked_sub(1)
               .ok_or_else(|| malformed("unbalanced parentheses"))?;
         }
         Token::Terminator if depth == 0 => {
            return Err(malformed("statement terminator is not allowed"));
         }
         Token::Word(word) if depth == 0 && !qualified && is_row_limit(word) => {
            return Err(malformed("statement already has a row limit"));
         }
         _ => {}
      }
      qualified = matches!(token, Token::Dot);
   }

   if depth != 0 {
      return Err(malformed("unbalanced parentheses"));
   }
   if tokens.ends_in_line_comment {
      return Err(malformed("line comment runs to the end of the statement"));
   }

   Ok(())
}

fn malformed(reason: &'static str) -> Error {
   Error::MalformedStatement { reason }
}

fn is_row_limit(word: &str) -> bool {
   ["LIMIT", "OFFSET", "FETCH"]
      .iter()
      .any(|keyword| word.eq_ignore_ascii_case(keyword))
}

#[derive(Debug, Clone, Copy)]
enum Token<'a> {
   /// Bare identifier, keyword or number
   Word(&'a str),
   Open,
   Close,
   Dot,
   Terminator,
   /// Literals, quoted identifiers, operators and anything else
   Other,
}

/// Splits a statement into [`Token`]s, dropping whitespace and comments.
struct Tokens<'a> {
   sql: &'a str,
   pos: usize,
   ends_in_line_comment: bool,
}

impl<'a> Tokens<'a> {
   fn new(sql: &'a str) -> Self {
      Self {
         sql,
         pos: 0,
         ends_in_line_comment: false,
      }
   }

   fn rest(&self) -> &'a [u8] {
      &self.sql.as_bytes()[self.pos..]
   }

   /// Move past the text up to and including `close`, starting `skip` bytes
   /// ahead. `None` when `close` never appears.
   fn consume_through(&mut self, skip: usize, close: &[u8]) -> Option<()> {
      let found = self.rest()[skip..]
         .windows(close.len())
         .position(|w| w == close)?;
      self.pos += skip + found + close.len();
      Some(())
   }

   /// Move past a quoted literal or identifier opened at the current
   /// position. Doubling the closing quote escapes it, except in `[...]`.
   fn consume_quoted(&mut self, close: u8) -> Result<()> {
      let rest = self.rest();
      let mut j = 1;
      while j < rest.len() {
         if rest[j] == close {
            if close != b']' && rest.get(j + 1) == Some(&close) {
               j += 2;
               continue;
            }
            self.pos += j + 1;
            return Ok(());
         }
         j += 1;
      }
      self.pos = self.sql.len();
      Err(malformed("unterminated quoted literal or identifier"))
   }
}

impl<'a> Iterator for Tokens<'a> {
   type Item = Result<Token<'a>>;

   fn next(&mut self) -> Option<Self::Item> {
      loop {
         let rest = self.rest();
         let byte = *rest.first()?;
         let next = rest.get(1).copied();

         let token = match (byte, next) {
            (b, _) if b.is_ascii_whitespace() => {
               self.pos += 1;
               continue;
            }
            (b'-', Some(b'-')) => {
               if self.consume_through(2, b"\n").is_none() {
                  self.pos = self.sql.len();
                  self.ends_in_line_comment = true;
               }
               continue;
            }
            (b'/', Some(b'*')) => {
               if self.consume_through(2, b"*/").is_none() {
                  self.pos = self.sql.len();
                  return Some(Err(malformed("unterminated block comment")));
               }
               continue;
            }
            (b'\'' | b'"' | b'`', _) => {
               return Some(self.consume_quoted(byte).map(|()| Token::Other));
            }
            (b'[', _) => return Some(self.consume_quoted(b']').map(|()| Token::Other)),
            (b'(', _) => Token::Open,
            (b')', _) => Token::Close,
            (b'.', _) => Token::Dot,
            (b';', _) => Token::Terminator,
            (b, _) if is_word_byte(b) => {
               let sql = self.sql;
               let start = self.pos;
               self.pos += rest.iter().take_while(|b| is_word_byte(**b)).count();
               return Some(Ok(Token::Word(&sql[start..self.pos])));
            }
            _ => Token::Other,
         };

         self.pos += 1;
         return Some(Ok(token));
      }
   }
}

fn is_word_byte(b: u8) -> bool {
   b.is_ascii_alphanumeric() || b == b'_'
}
