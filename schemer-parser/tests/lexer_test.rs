// schemer-parser - Lexer tests
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Lexer scenario tests: token classification, accumulator flushing,
//! delimited identifiers and strings, numeric payload encoding.

use schemer_parser::lexer::{LexError, lex};
use schemer_parser::token::{Token, TokenType, encode_float, encode_varint};

fn tok(token_type: TokenType, lexeme: &str) -> Token {
    Token::from_str(token_type, lexeme)
}

fn int_tok(value: i64) -> Token {
    Token::from_bytes(TokenType::IntLiteral, &encode_varint(value))
}

fn float_tok(value: f64) -> Token {
    Token::from_bytes(TokenType::FloatLiteral, &encode_float(value))
}

fn bool_tok(value: bool) -> Token {
    Token::from_bytes(TokenType::BoolLiteral, &[u8::from(value)])
}

#[test]
fn single_expression() {
    let tokens = lex("(abc def ghi)").unwrap();
    assert_eq!(
        tokens,
        vec![
            tok(TokenType::LParen, "("),
            tok(TokenType::Ident, "abc"),
            tok(TokenType::Ident, "def"),
            tok(TokenType::Ident, "ghi"),
            tok(TokenType::RParen, ")"),
        ]
    );
}

#[test]
fn nested_expressions() {
    let tokens = lex("(abc (def ghi (jkl)))").unwrap();
    assert_eq!(
        tokens,
        vec![
            tok(TokenType::LParen, "("),
            tok(TokenType::Ident, "abc"),
            tok(TokenType::LParen, "("),
            tok(TokenType::Ident, "def"),
            tok(TokenType::Ident, "ghi"),
            tok(TokenType::LParen, "("),
            tok(TokenType::Ident, "jkl"),
            tok(TokenType::RParen, ")"),
            tok(TokenType::RParen, ")"),
            tok(TokenType::RParen, ")"),
        ]
    );
}

#[test]
fn extra_whitespace_is_ignored() {
    let tokens = lex("( ab   cd efg)").unwrap();
    assert_eq!(
        tokens,
        vec![
            tok(TokenType::LParen, "("),
            tok(TokenType::Ident, "ab"),
            tok(TokenType::Ident, "cd"),
            tok(TokenType::Ident, "efg"),
            tok(TokenType::RParen, ")"),
        ]
    );
}

#[test]
fn unterminated_input_flushes_the_accumulator() {
    let tokens = lex("(abc").unwrap();
    assert_eq!(
        tokens,
        vec![tok(TokenType::LParen, "("), tok(TokenType::Ident, "abc")]
    );
}

#[test]
fn number_literals() {
    let tokens = lex("(123 abc def 456.789 .012 345)").unwrap();
    assert_eq!(
        tokens,
        vec![
            tok(TokenType::LParen, "("),
            int_tok(123),
            tok(TokenType::Ident, "abc"),
            tok(TokenType::Ident, "def"),
            float_tok(456.789),
            float_tok(0.012),
            int_tok(345),
            tok(TokenType::RParen, ")"),
        ]
    );
}

#[test]
fn dots_and_bar_delimited_identifiers() {
    let tokens = lex("ab.c . d|ef? |gh +i|").unwrap();
    assert_eq!(
        tokens,
        vec![
            tok(TokenType::Ident, "ab.c"),
            tok(TokenType::Dot, "."),
            tok(TokenType::Ident, "d|ef?"),
            tok(TokenType::Ident, "|gh +i|"),
        ]
    );
}

#[test]
fn operators() {
    let tokens = lex("(>= 150 (* (+ 10 3.2) 5))").unwrap();
    assert_eq!(
        tokens,
        vec![
            tok(TokenType::LParen, "("),
            tok(TokenType::Op, ">="),
            int_tok(150),
            tok(TokenType::LParen, "("),
            tok(TokenType::Op, "*"),
            tok(TokenType::LParen, "("),
            tok(TokenType::Op, "+"),
            int_tok(10),
            float_tok(3.2),
            tok(TokenType::RParen, ")"),
            int_tok(5),
            tok(TokenType::RParen, ")"),
            tok(TokenType::RParen, ")"),
        ]
    );
}

#[test]
fn newlines_separate_tokens() {
    let tokens = lex("(ab\ncd\nef)").unwrap();
    assert_eq!(
        tokens,
        vec![
            tok(TokenType::LParen, "("),
            tok(TokenType::Ident, "ab"),
            tok(TokenType::Ident, "cd"),
            tok(TokenType::Ident, "ef"),
            tok(TokenType::RParen, ")"),
        ]
    );
}

#[test]
fn single_float_constant() {
    let tokens = lex("3.14").unwrap();
    assert_eq!(tokens, vec![float_tok(3.14)]);
}

#[test]
fn string_literal_drops_the_quotes() {
    let tokens = lex("\"la li lu le lo\"").unwrap();
    assert_eq!(
        tokens,
        vec![tok(TokenType::StringLiteral, "la li lu le lo")]
    );
}

#[test]
fn bool_literals() {
    let tokens = lex("#t #f bla").unwrap();
    assert_eq!(
        tokens,
        vec![bool_tok(true), bool_tok(false), tok(TokenType::Ident, "bla")]
    );
}

#[test]
fn comparison_operators_take_one_lookahead() {
    let tokens = lex("< <= > >= =").unwrap();
    assert_eq!(
        tokens,
        vec![
            tok(TokenType::Op, "<"),
            tok(TokenType::Op, "<="),
            tok(TokenType::Op, ">"),
            tok(TokenType::Op, ">="),
            tok(TokenType::Op, "="),
        ]
    );
}

#[test]
fn standalone_special_initial_is_a_char() {
    // special initials are only valid inside an identifier
    let tokens = lex("? a?").unwrap();
    assert_eq!(
        tokens,
        vec![tok(TokenType::Char, "?"), tok(TokenType::Ident, "a?")]
    );
}

#[test]
fn hash_not_followed_by_t_or_f_is_a_char() {
    let tokens = lex("#x").unwrap();
    assert_eq!(
        tokens,
        vec![tok(TokenType::Char, "#"), tok(TokenType::Ident, "x")]
    );
}

#[test]
fn string_adjacent_to_number_flushes_it() {
    let tokens = lex("12\"ab\"").unwrap();
    assert_eq!(
        tokens,
        vec![int_tok(12), tok(TokenType::StringLiteral, "ab")]
    );
}

#[test]
fn int_payloads_use_varint_encoding() {
    let tokens = lex("123").unwrap();
    assert_eq!(tokens[0].value, encode_varint(123));
    assert_eq!(tokens[0].int_value(), 123);
}

#[test]
fn float_payloads_are_little_endian_bit_patterns() {
    let tokens = lex("456.789").unwrap();
    assert_eq!(tokens[0].value, 456.789f64.to_le_bytes().to_vec());
    assert_eq!(tokens[0].float_value(), 456.789);
}

#[test]
fn overflowing_int_literal_is_rejected() {
    let err = lex("(+ 99999999999999999999 1)").unwrap_err();
    assert!(matches!(err, LexError::InvalidNumber { .. }));
}

#[test]
fn lexing_is_pure() {
    let src = "(define (square x) (* x x)) \"s\" #t |a b| 4.5";
    assert_eq!(lex(src).unwrap(), lex(src).unwrap());
}
