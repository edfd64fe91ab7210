//! DDL tokenizer implementation.

use super::{Keyword, LexError, Span, Token, TokenKind};

/// A lexer that tokenizes MySQL DDL input.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    /// The input source code.
    input: &'a str,
    /// The current byte position.
    pos: usize,
    /// The byte position of the start of the current token.
    start: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            start: 0,
        }
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Returns the next character without advancing.
    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    /// Advances to the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Skips whitespace and comments.
    fn skip_whitespace_and_comments(&mut self) -> Result<(), LexError> {
        loop {
            while self.peek().is_some_and(char::is_whitespace) {
                self.advance();
            }

            // `-- ` comments need whitespace (or end of input) after the dashes.
            let dash_comment = self.peek() == Some('-')
                && self.peek_next() == Some('-')
                && self.input[self.pos + 2..]
                    .chars()
                    .next()
                    .map_or(true, |c| c.is_whitespace() || c.is_control());
            if dash_comment || self.peek() == Some('#') {
                while self.peek().is_some_and(|c| c != '\n') {
                    self.advance();
                }
                continue;
            }

            if self.peek() == Some('/') && self.peek_next() == Some('*') {
                let comment_start = self.pos;
                self.advance(); // /
                self.advance(); // *
                loop {
                    match self.advance() {
                        Some('*') if self.peek() == Some('/') => {
                            self.advance();
                            break;
                        }
                        Some(_) => {}
                        None => {
                            return Err(LexError::UnterminatedComment {
                                span: Span::new(comment_start, self.pos),
                            });
                        }
                    }
                }
                continue;
            }

            return Ok(());
        }
    }

    /// Creates a span from start to current position.
    const fn make_span(&self) -> Span {
        Span::new(self.start, self.pos)
    }

    /// Creates a token with the current span.
    fn make_token(&self, kind: TokenKind) -> Token<'a> {
        Token::new(kind, self.make_span(), &self.input[self.start..self.pos])
    }

    /// Scans an identifier or keyword.
    fn scan_identifier(&mut self) -> Token<'a> {
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '$')
        {
            self.advance();
        }

        let text = &self.input[self.start..self.pos];
        match Keyword::from_str(text) {
            Some(keyword) => self.make_token(TokenKind::Keyword(keyword)),
            None => self.make_token(TokenKind::Identifier(String::from(text))),
        }
    }

    /// Scans a backtick-quoted identifier. A doubled backtick stands for
    /// a literal backtick.
    fn scan_quoted_identifier(&mut self) -> Result<Token<'a>, LexError> {
        self.advance(); // opening backtick
        let mut name = String::new();

        loop {
            match self.advance() {
                Some('`') if self.peek() == Some('`') => {
                    self.advance();
                    name.push('`');
                }
                Some('`') => break,
                Some(c) => name.push(c),
                None => {
                    return Err(LexError::UnterminatedIdentifier {
                        span: self.make_span(),
                    });
                }
            }
        }

        Ok(self.make_token(TokenKind::Identifier(name)))
    }

    /// Scans a numeric literal: decimal, with optional fraction and
    /// exponent, or hexadecimal (`0x1F`).
    fn scan_number(&mut self) -> Token<'a> {
        if self.peek() == Some('0') && matches!(self.peek_next(), Some('x' | 'X')) {
            self.advance();
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
                self.advance();
            }
            return self.make_token(TokenKind::Number(String::from(
                &self.input[self.start..self.pos],
            )));
        }

        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.advance(); // .
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        if self.peek().is_some_and(|c| c == 'e' || c == 'E') {
            let rest = &self.input[self.pos + 1..];
            let mut chars = rest.chars();
            let has_exponent = match chars.next() {
                Some('+' | '-') => chars.next().is_some_and(|c| c.is_ascii_digit()),
                Some(c) => c.is_ascii_digit(),
                None => false,
            };
            if has_exponent {
                self.advance(); // e/E
                if self.peek().is_some_and(|c| c == '+' || c == '-') {
                    self.advance();
                }
                while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.advance();
                }
            }
        }

        self.make_token(TokenKind::Number(String::from(
            &self.input[self.start..self.pos],
        )))
    }

    /// Scans a string literal delimited by `quote`, resolving doubled
    /// quotes and backslash escapes.
    fn scan_string(&mut self, quote: char) -> Result<Token<'a>, LexError> {
        self.advance(); // opening quote
        let mut value = String::new();

        loop {
            match self.advance() {
                Some(c) if c == quote => {
                    if self.peek() == Some(quote) {
                        self.advance();
                        value.push(quote);
                    } else {
                        break;
                    }
                }
                Some('\\') => match self.advance() {
                    Some(escaped) => value.push(unescape(escaped)),
                    None => {
                        return Err(LexError::UnterminatedString {
                            span: self.make_span(),
                        });
                    }
                },
                Some(c) => value.push(c),
                None => {
                    return Err(LexError::UnterminatedString {
                        span: self.make_span(),
                    });
                }
            }
        }

        Ok(self.make_token(TokenKind::String(value)))
    }

    /// Scans a `b'...'` or `x'...'` literal. `prefix` is the letter before
    /// the opening quote.
    fn scan_bit_or_hex(&mut self, prefix: char) -> Result<Token<'a>, LexError> {
        self.advance(); // b / x
        self.advance(); // opening quote
        let mut digits = String::new();
        loop {
            match self.advance() {
                Some('\'') => break,
                Some(c) => digits.push(c),
                None => {
                    return Err(LexError::UnterminatedString {
                        span: self.make_span(),
                    });
                }
            }
        }

        let kind = if prefix.eq_ignore_ascii_case(&'b') {
            if !digits.chars().all(|c| c == '0' || c == '1') {
                return Err(LexError::InvalidLiteral {
                    span: self.make_span(),
                });
            }
            TokenKind::BitString(digits)
        } else {
            if digits.len() % 2 != 0 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(LexError::InvalidLiteral {
                    span: self.make_span(),
                });
            }
            TokenKind::HexString(digits.to_ascii_uppercase())
        };
        Ok(self.make_token(kind))
    }

    /// Scans the next token.
    ///
    /// # Errors
    ///
    /// Returns a [`LexError`] for an unterminated literal or comment, or a
    /// character that cannot start a token.
    pub fn next_token(&mut self) -> Result<Token<'a>, LexError> {
        self.skip_whitespace_and_comments()?;
        self.start = self.pos;

        let Some(c) = self.peek() else {
            return Ok(self.make_token(TokenKind::Eof));
        };

        match c {
            '\'' | '"' => return self.scan_string(c),
            '`' => return self.scan_quoted_identifier(),
            'b' | 'B' | 'x' | 'X' if self.peek_next() == Some('\'') => {
                return self.scan_bit_or_hex(c);
            }
            c if c.is_ascii_digit() => return Ok(self.scan_number()),
            '.' if self.peek_next().is_some_and(|n| n.is_ascii_digit()) => {
                return Ok(self.scan_number());
            }
            c if c.is_alphabetic() || c == '_' => return Ok(self.scan_identifier()),
            _ => {}
        }

        self.advance();
        let kind = match c {
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            '.' => TokenKind::Dot,
            ':' => TokenKind::Colon,
            '?' => TokenKind::Question,
            '@' => TokenKind::At,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '&' => TokenKind::Ampersand,
            '|' => TokenKind::Pipe,
            '^' => TokenKind::Caret,
            '~' => TokenKind::Tilde,
            '=' => TokenKind::Eq,
            '!' => {
                if self.peek() == Some('=') {
                    self.advance();
                    TokenKind::NotEq
                } else {
                    TokenKind::Bang
                }
            }
            '<' => match self.peek() {
                Some('=') => {
                    self.advance();
                    TokenKind::LtEq
                }
                Some('>') => {
                    self.advance();
                    TokenKind::NotEq
                }
                _ => TokenKind::Lt,
            },
            '>' => {
                if self.peek() == Some('=') {
                    self.advance();
                    TokenKind::GtEq
                } else {
                    TokenKind::Gt
                }
            }
            ch => {
                return Err(LexError::UnexpectedCharacter {
                    ch,
                    span: self.make_span(),
                });
            }
        };
        Ok(self.make_token(kind))
    }

    /// Tokenizes the entire input. The last token is always
    /// [`TokenKind::Eof`].
    ///
    /// # Errors
    ///
    /// Returns the first [`LexError`] encountered.
    pub fn tokenize(&mut self) -> Result<Vec<Token<'a>>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                return Ok(tokens);
            }
        }
    }
}

/// Maps the character after a backslash to the character it denotes.
const fn unescape(c: char) -> char {
    match c {
        '0' => '\0',
        'b' => '\u{8}',
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        'Z' => '\u{1a}',
        other => other,
    }
}
