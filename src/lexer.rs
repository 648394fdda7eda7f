use std::str::FromStr;

use rust_decimal::Decimal;

use crate::ast::Token;

/// Character offset into the query text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position(pub usize);

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    #[error("unexpected character '{ch}' at position {position}")]
    UnexpectedChar { ch: char, position: Position },

    #[error("unterminated string starting at position {position}")]
    UnterminatedString { position: Position },

    #[error("invalid number '{text}' at position {position}")]
    InvalidNumber { text: String, position: Position },

    #[error("invalid parameter '{text}' at position {position}")]
    InvalidParameter { text: String, position: Position },
}

/// Tokenizer for the textual dialect.
///
/// Keywords match case-insensitively. Identifiers and quoted strings keep the
/// casing they were written with.
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    token_start: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
            token_start: 0,
        }
    }

    /// The full text being lexed.
    pub fn source(&self) -> String {
        self.input.iter().collect()
    }

    /// Source text of the token last returned by `next_token`, as written.
    pub fn lexeme(&self) -> String {
        self.input[self.token_start..self.position].iter().collect()
    }

    /// Offset of the next unread character.
    pub fn position(&self) -> Position {
        Position(self.position)
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_identifier(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if ch.is_alphanumeric() || ch == '_' {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    fn read_digits(&mut self) -> String {
        let mut digits = String::new();
        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                digits.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        digits
    }

    /// A doubled quote inside the literal stands for one quote character.
    fn read_string(&mut self, quote: char) -> Result<String, LexError> {
        let start = self.position();
        let mut result = String::new();
        self.advance(); // opening quote

        while let Some(ch) = self.current_char() {
            if ch == quote {
                if self.peek_char(1) == Some(quote) {
                    result.push(quote);
                    self.advance();
                    self.advance();
                    continue;
                }
                self.advance();
                return Ok(result);
            }
            result.push(ch);
            self.advance();
        }

        Err(LexError::UnterminatedString { position: start })
    }

    fn read_number(&mut self) -> Result<Token, LexError> {
        let start = self.position();
        let mut number = String::new();

        if let Some(sign @ ('-' | '+')) = self.current_char() {
            if sign == '-' {
                number.push(sign);
            }
            self.advance();
        }

        number.push_str(&self.read_digits());

        let is_decimal = self.current_char() == Some('.')
            && self.peek_char(1).is_some_and(|c| c.is_ascii_digit());

        if is_decimal {
            number.push('.');
            self.advance();
            number.push_str(&self.read_digits());
            Decimal::from_str(&number)
                .map(Token::Decimal)
                .map_err(|_| LexError::InvalidNumber {
                    text: number,
                    position: start,
                })
        } else {
            number
                .parse::<i64>()
                .map(Token::Integer)
                .map_err(|_| LexError::InvalidNumber {
                    text: number,
                    position: start,
                })
        }
    }

    fn read_named_param(&mut self) -> Result<Token, LexError> {
        let start = self.position();
        self.advance(); // ':'
        match self.current_char() {
            Some(c) if c.is_alphabetic() || c == '_' => Ok(Token::NamedParam(self.read_identifier())),
            other => Err(LexError::InvalidParameter {
                text: format!(":{}", other.map(String::from).unwrap_or_default()),
                position: start,
            }),
        }
    }

    fn read_positional_param(&mut self) -> Result<Token, LexError> {
        let start = self.position();
        self.advance(); // '?'
        let digits = self.read_digits();
        match digits.parse::<usize>() {
            Ok(n) if n > 0 => Ok(Token::PositionalParam(n)),
            _ => Err(LexError::InvalidParameter {
                text: format!("?{digits}"),
                position: start,
            }),
        }
    }

    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();
        self.token_start = self.position;

        let token = match self.current_char() {
            None => Token::Eof,
            Some('(') => {
                self.advance();
                Token::LParen
            }
            Some(')') => {
                self.advance();
                Token::RParen
            }
            Some(',') => {
                self.advance();
                Token::Comma
            }
            Some('.') => {
                self.advance();
                Token::Dot
            }
            Some('*') => {
                self.advance();
                Token::Star
            }
            Some('=') => {
                self.advance();
                Token::Eq
            }
            Some('<') => match self.peek_char(1) {
                Some('=') => {
                    self.advance();
                    self.advance();
                    Token::LtEq
                }
                Some('>') => {
                    self.advance();
                    self.advance();
                    Token::NotEq
                }
                _ => {
                    self.advance();
                    Token::Lt
                }
            },
            Some('>') => {
                if self.peek_char(1) == Some('=') {
                    self.advance();
                    self.advance();
                    Token::GtEq
                } else {
                    self.advance();
                    Token::Gt
                }
            }
            Some('!') if self.peek_char(1) == Some('=') => {
                self.advance();
                self.advance();
                Token::NotEq
            }
            Some(quote @ ('\'' | '"')) => Token::String(self.read_string(quote)?),
            Some(':') => self.read_named_param()?,
            Some('?') => self.read_positional_param()?,
            Some('-' | '+') if self.peek_char(1).is_some_and(|c| c.is_ascii_digit()) => {
                self.read_number()?
            }
            Some(ch) if ch.is_ascii_digit() => self.read_number()?,
            Some(ch) if ch.is_alphabetic() || ch == '_' => {
                let ident = self.read_identifier();
                Token::keyword(&ident).unwrap_or(Token::Identifier(ident))
            }
            Some(ch) => {
                return Err(LexError::UnexpectedChar {
                    ch,
                    position: self.position(),
                });
            }
        };
        Ok(token)
    }

    /// Lex the whole input, `Eof` included.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token == Token::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }
}

#[test]
fn test_keywords_ignore_case() {
    let mut lexer = Lexer::new("select From wHeRe and OR not");
    assert_eq!(lexer.next_token().unwrap(), Token::Select);
    assert_eq!(lexer.next_token().unwrap(), Token::From);
    assert_eq!(lexer.next_token().unwrap(), Token::Where);
    assert_eq!(lexer.next_token().unwrap(), Token::And);
    assert_eq!(lexer.next_token().unwrap(), Token::Or);
    assert_eq!(lexer.next_token().unwrap(), Token::Not);
    assert_eq!(lexer.next_token().unwrap(), Token::Eof);
}

#[test]
fn test_where_clause() {
    let mut lexer = Lexer::new("WHERE age >= :age");
    assert_eq!(lexer.next_token().unwrap(), Token::Where);
    assert_eq!(lexer.next_token().unwrap(), Token::Identifier("age".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::GtEq);
    assert_eq!(lexer.next_token().unwrap(), Token::NamedParam("age".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::Eof);
}
