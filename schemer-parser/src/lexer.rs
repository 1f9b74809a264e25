// schemer-parser - Lexer and parser for the Schemer programming language
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Lexer (tokeniser) for Schemer source code.
//!
//! A single-pass scanner with one character of lookahead. Multi-character
//! tokens build up in an accumulator that is flushed when a delimiter
//! arrives; `|…|` identifiers and `"…"` strings switch the scanner into an
//! override state that suppresses normal classification until the closing
//! delimiter. There are no unrecognised-character errors: anything the
//! scanner cannot classify becomes a `Char` token for the parser to reject.

use std::fmt;

use crate::token::{Token, TokenType, encode_float, encode_varint};

/// Characters permitted inside an identifier besides letters and digits.
const SPECIAL_INITIALS: &str = "!$%&*/:<=>?^_~";

/// Characters that form operator tokens.
const OPERATOR_CHARS: &str = "+-/*<=>";

/// Lexer error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    /// A numeric accumulator whose decimal text does not convert.
    InvalidNumber { lexeme: String },
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::InvalidNumber { lexeme } => {
                write!(f, "Invalid numeric literal: {}", lexeme)
            }
        }
    }
}

impl std::error::Error for LexError {}

/// Which delimited form the scanner is currently inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OverrideState {
    None,
    Ident,
    String,
}

/// Lex an input string into tokens.
pub fn lex(input: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(input).run()
}

/// Stateful scanner over the input's Unicode scalar values.
struct Lexer {
    chars: Vec<char>,
    tokens: Vec<Token>,
    accumulating: bool,
    accumulating_type: TokenType,
    accumulator: Vec<u8>,
    override_state: OverrideState,
}

fn is_operator(c: char) -> bool {
    OPERATOR_CHARS.contains(c)
}

fn is_special_initial(c: char) -> bool {
    SPECIAL_INITIALS.contains(c)
}

impl Lexer {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            tokens: Vec::new(),
            accumulating: false,
            accumulating_type: TokenType::None,
            accumulator: Vec::new(),
            override_state: OverrideState::None,
        }
    }

    fn run(mut self) -> Result<Vec<Token>, LexError> {
        for index in 0..self.chars.len() {
            let c = self.chars[index];
            let peek = self.chars.get(index + 1).copied();
            self.scan(c, peek)?;
        }
        // input may end mid-accumulation
        self.flush_pending()?;
        Ok(self.tokens)
    }

    fn scan(&mut self, c: char, peek: Option<char>) -> Result<(), LexError> {
        // Inside |…|: everything up to the closing bar belongs to the
        // identifier, bars included.
        if self.override_state == OverrideState::Ident {
            self.push_char(c);
            if c == '|' {
                self.flush()?;
                self.override_state = OverrideState::None;
            }
            return Ok(());
        }

        // Inside "…": the closing quote ends the literal and is discarded.
        if self.override_state == OverrideState::String {
            if c == '"' {
                self.flush()?;
                self.override_state = OverrideState::None;
            } else {
                self.push_char(c);
            }
            return Ok(());
        }

        if c.is_whitespace() {
            // no multi-character token accepts whitespace
            return self.flush_pending();
        }

        if c == '(' {
            self.flush_pending()?;
            self.emit(TokenType::LParen, "(");
            return Ok(());
        }

        if c == ')' {
            self.flush_pending()?;
            self.emit(TokenType::RParen, ")");
            return Ok(());
        }

        if c == '"' {
            self.flush_pending()?;
            self.accumulating = true;
            self.accumulating_type = TokenType::StringLiteral;
            self.override_state = OverrideState::String;
            return Ok(());
        }

        // Operators only begin outside any accumulation; inside an identifier
        // the overlapping characters fall through to the special-initial rule.
        if is_operator(c) && (!self.accumulating || self.accumulating_type == TokenType::Op) {
            if (c == '<' || c == '>') && peek == Some('=') {
                self.accumulating = true;
                self.accumulating_type = TokenType::Op;
                self.push_char(c);
            } else if self.accumulating && self.accumulating_type == TokenType::Op && c == '=' {
                self.push_char(c);
                self.flush()?;
            } else {
                self.emit(TokenType::Op, &c.to_string());
            }
            return Ok(());
        }

        if c == '|' {
            if self.accumulating
                && self.accumulating_type != TokenType::Ident
                && self.accumulating_type != TokenType::StringLiteral
            {
                self.flush()?;
            }
            if !self.accumulating {
                self.override_state = OverrideState::Ident;
            }
            self.accumulating = true;
            self.accumulating_type = TokenType::Ident;
            self.push_char(c);
            return Ok(());
        }

        if c == '.' {
            if self.accumulating && self.accumulating_type == TokenType::Ident {
                // valid inside an identifier
                self.push_char(c);
            } else if peek.is_some_and(|p| p.is_numeric()) {
                // leading-dot float, or the dot of a literal already underway
                self.accumulating = true;
                self.accumulating_type = TokenType::FloatLiteral;
                self.push_char(c);
            } else {
                self.emit(TokenType::Dot, ".");
            }
            return Ok(());
        }

        if c == '#' || (self.accumulating && self.accumulating_type == TokenType::BoolLiteral) {
            if self.accumulating && self.accumulating_type == TokenType::BoolLiteral {
                // the character after the # is t or f by construction
                self.accumulator.push(if c == 't' { 0x01 } else { 0x00 });
                self.flush()?;
            } else if peek == Some('t') || peek == Some('f') {
                self.flush_pending()?;
                self.accumulating = true;
                self.accumulating_type = TokenType::BoolLiteral;
            } else {
                self.emit(TokenType::Char, "#");
            }
            return Ok(());
        }

        if c.is_alphabetic() {
            if self.accumulating && self.accumulating_type != TokenType::Ident {
                self.flush()?;
            }
            self.accumulating = true;
            self.accumulating_type = TokenType::Ident;
            self.push_char(c);
            return Ok(());
        }

        if is_special_initial(c) {
            if self.accumulating && self.accumulating_type == TokenType::Ident {
                self.push_char(c);
            } else {
                self.emit(TokenType::Char, &c.to_string());
            }
            return Ok(());
        }

        if c.is_numeric() {
            if self.accumulating && self.accumulating_type == TokenType::Ident {
                self.flush()?;
            }
            self.accumulating = true;
            if self.accumulating_type != TokenType::FloatLiteral {
                self.accumulating_type = TokenType::IntLiteral;
            }
            self.push_char(c);
            return Ok(());
        }

        // anything else is a single Char token for the parser to interpret
        self.emit(TokenType::Char, &c.to_string());
        Ok(())
    }

    fn push_char(&mut self, c: char) {
        let mut buf = [0u8; 4];
        self.accumulator
            .extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
    }

    fn emit(&mut self, token_type: TokenType, lexeme: &str) {
        self.tokens.push(Token::from_str(token_type, lexeme));
    }

    /// Flush the accumulator into a token, converting numeric text to its
    /// binary payload.
    fn flush(&mut self) -> Result<(), LexError> {
        let token = match self.accumulating_type {
            TokenType::IntLiteral => {
                let text = String::from_utf8_lossy(&self.accumulator).into_owned();
                let value: i64 = text
                    .parse()
                    .map_err(|_| LexError::InvalidNumber { lexeme: text })?;
                Token::from_bytes(TokenType::IntLiteral, &encode_varint(value))
            }
            TokenType::FloatLiteral => {
                let text = String::from_utf8_lossy(&self.accumulator).into_owned();
                let value: f64 = text
                    .parse()
                    .map_err(|_| LexError::InvalidNumber { lexeme: text })?;
                Token::from_bytes(TokenType::FloatLiteral, &encode_float(value))
            }
            token_type => Token::from_bytes(token_type, &self.accumulator),
        };
        self.tokens.push(token);
        self.accumulator.clear();
        self.accumulating = false;
        self.accumulating_type = TokenType::None;
        Ok(())
    }

    fn flush_pending(&mut self) -> Result<(), LexError> {
        if self.accumulating {
            self.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input() {
        assert_eq!(lex("").unwrap(), vec![]);
    }

    #[test]
    fn two_char_operator_needs_equals() {
        let tokens = lex("< <=").unwrap();
        assert_eq!(tokens[0], Token::from_str(TokenType::Op, "<"));
        assert_eq!(tokens[1], Token::from_str(TokenType::Op, "<="));
    }

    #[test]
    fn hash_without_bool_suffix_is_a_char() {
        let tokens = lex("# #x").unwrap();
        assert_eq!(tokens[0], Token::from_str(TokenType::Char, "#"));
        assert_eq!(tokens[1], Token::from_str(TokenType::Char, "#"));
        assert_eq!(tokens[2], Token::from_str(TokenType::Ident, "x"));
    }

    #[test]
    fn int_overflow_is_an_error() {
        let err = lex("99999999999999999999").unwrap_err();
        assert_eq!(
            err,
            LexError::InvalidNumber {
                lexeme: "99999999999999999999".to_string()
            }
        );
    }
}
