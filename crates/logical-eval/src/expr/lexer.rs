//! Scanner (tokenizer) for filter expressions.
//!
//! Tokens are produced on demand. The scanner is a plain `Copy` value (the
//! source text plus a byte offset), so lookahead is done by probing a copy
//! instead of saving and restoring the shared cursor.

use std::fmt;

use strsim::levenshtein;

use super::ast::Operator;
use super::error::{EvalError, EvalResult};

/// Characters that may appear in an operator symbol.
const OPERATOR_CHARS: [char; 6] = ['<', '>', '!', '=', '~', '^'];

/// Maximum edit distance for suggesting an operator after a typo.
const MAX_SUGGESTION_DISTANCE: usize = 1;

/// The kind of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// End of input.
    EndOfInput,
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// `'`
    SingleQuote,
    /// `"`
    DoubleQuote,
    /// A variable name such as `user.age`.
    Variable,
    /// The `AND` keyword (case-insensitive).
    And,
    /// The `OR` keyword (case-insensitive).
    Or,
    /// A comparison operator.
    Operator(Operator),
}

impl TokenKind {
    /// Every comparison operator kind.
    pub const OPERATORS: [TokenKind; 9] = [
        TokenKind::Operator(Operator::Equal),
        TokenKind::Operator(Operator::NotEqual),
        TokenKind::Operator(Operator::Greater),
        TokenKind::Operator(Operator::GreaterOrEqual),
        TokenKind::Operator(Operator::Less),
        TokenKind::Operator(Operator::LessOrEqual),
        TokenKind::Operator(Operator::Matches),
        TokenKind::Operator(Operator::Contains),
        TokenKind::Operator(Operator::NotContains),
    ];

    /// Returns the quote character for quote kinds.
    pub fn quote_char(self) -> Option<char> {
        match self {
            TokenKind::SingleQuote => Some('\''),
            TokenKind::DoubleQuote => Some('"'),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::EndOfInput => f.write_str("end of input"),
            TokenKind::OpenParen => f.write_str("'('"),
            TokenKind::CloseParen => f.write_str("')'"),
            TokenKind::SingleQuote => f.write_str("single quote"),
            TokenKind::DoubleQuote => f.write_str("double quote"),
            TokenKind::Variable => f.write_str("variable name"),
            TokenKind::And => f.write_str("AND"),
            TokenKind::Or => f.write_str("OR"),
            TokenKind::Operator(op) => write!(f, "operator '{op}'"),
        }
    }
}

/// A token with its position in the input.
///
/// Only [`TokenKind::Variable`] tokens carry text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The variable name, for variable tokens.
    pub text: Option<String>,
    /// The byte offset where the token starts.
    pub position: usize,
}

impl Token {
    fn new(kind: TokenKind, position: usize) -> Self {
        Self {
            kind,
            text: None,
            position,
        }
    }

    fn variable(name: String, position: usize) -> Self {
        Self {
            kind: TokenKind::Variable,
            text: Some(name),
            position,
        }
    }
}

/// Scanner over a single expression.
#[derive(Debug, Clone, Copy)]
pub struct Lexer<'a> {
    input: &'a str,
    /// Byte offset of the cursor, always on a char boundary.
    position: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a scanner positioned at the start of `input`.
    pub fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    /// Returns the source text.
    pub fn input(&self) -> &'a str {
        self.input
    }

    /// Returns the cursor's byte offset.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the character at the cursor without moving it.
    fn peek_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    /// Returns the character at the cursor and advances past it.
    fn next_char(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.position += c.len_utf8();
        Some(c)
    }

    /// Skips spaces, tabs, newlines, carriage returns, vertical tabs and NULs.
    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek_char() {
            if matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0B' | '\0') {
                self.next_char();
            } else {
                break;
            }
        }
    }

    /// Reads a run of `[A-Za-z0-9.]`.
    fn read_identifier(&mut self) -> String {
        let mut ident = String::new();
        while let Some(c) = self.peek_char() {
            if c.is_ascii_alphanumeric() || c == '.' {
                ident.push(c);
                self.next_char();
            } else {
                break;
            }
        }
        ident
    }

    /// Reads a run of operator characters.
    fn read_operator_symbol(&mut self) -> String {
        let mut symbol = String::new();
        while let Some(c) = self.peek_char() {
            if OPERATOR_CHARS.contains(&c) {
                symbol.push(c);
                self.next_char();
            } else {
                break;
            }
        }
        symbol
    }

    /// Reads a quoted value up to, but not including, the closing `quote`.
    ///
    /// A backslash escapes `quote` and itself: `\"` gives `"` and `\\` gives
    /// `\`. Before any other character the backslash is kept, so `\d` stays
    /// `\d`. A lone backslash at the end of input is dropped.
    pub fn read_quoted_value(&mut self, quote: char) -> String {
        let mut value = String::new();
        let mut escape_next = false;

        while let Some(c) = self.peek_char() {
            if c == quote && !escape_next {
                break;
            }
            self.next_char();

            if c == quote || c == '\\' {
                if escape_next {
                    value.push(c);
                    escape_next = false;
                } else {
                    escape_next = true;
                }
            } else {
                if escape_next {
                    value.push('\\');
                }
                value.push(c);
                escape_next = false;
            }
        }
        value
    }

    /// Consumes and returns the next token.
    pub fn next_token(&mut self) -> EvalResult<Token> {
        self.skip_whitespace();
        let start = self.position;

        let Some(c) = self.peek_char() else {
            return Ok(Token::new(TokenKind::EndOfInput, start));
        };

        let token = match c {
            '(' => {
                self.next_char();
                Token::new(TokenKind::OpenParen, start)
            }
            ')' => {
                self.next_char();
                Token::new(TokenKind::CloseParen, start)
            }
            '\'' => {
                self.next_char();
                Token::new(TokenKind::SingleQuote, start)
            }
            '"' => {
                self.next_char();
                Token::new(TokenKind::DoubleQuote, start)
            }
            _ if OPERATOR_CHARS.contains(&c) => {
                let symbol = self.read_operator_symbol();
                match Operator::from_symbol(&symbol) {
                    Some(op) => Token::new(TokenKind::Operator(op), start),
                    None => {
                        let suggestion = suggest_operator(&symbol);
                        return Err(EvalError::unknown_operator(symbol, start, suggestion));
                    }
                }
            }
            _ if c.is_ascii_alphabetic() => {
                let word = self.read_identifier();
                if word.eq_ignore_ascii_case("and") {
                    Token::new(TokenKind::And, start)
                } else if word.eq_ignore_ascii_case("or") {
                    Token::new(TokenKind::Or, start)
                } else {
                    Token::variable(word, start)
                }
            }
            _ => return Err(EvalError::unknown_character(c, start)),
        };

        tracing::trace!(kind = ?token.kind, position = token.position, "token");
        Ok(token)
    }

    /// Returns the next token without consuming it.
    pub fn peek_token(&self) -> EvalResult<Token> {
        let mut probe = *self;
        probe.next_token()
    }

    /// Consumes the next token and checks that its kind is one of `expected`.
    pub fn expect(&mut self, expected: &[TokenKind]) -> EvalResult<Token> {
        let token = self.next_token()?;
        if expected.contains(&token.kind) {
            Ok(token)
        } else {
            Err(EvalError::unexpected_token(
                expected,
                token.kind,
                self.input,
                self.position,
            ))
        }
    }

    /// Collects every remaining token, stopping after end of input.
    #[cfg(test)]
    pub fn tokenize(mut self) -> EvalResult<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.kind == TokenKind::EndOfInput;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }
}

/// Finds the known operator closest to a mistyped symbol.
fn suggest_operator(symbol: &str) -> Option<String> {
    Operator::SYMBOLS
        .iter()
        .map(|(candidate, _)| (*candidate, levenshtein(symbol, candidate)))
        .filter(|(_, distance)| *distance <= MAX_SUGGESTION_DISTANCE)
        .min_by_key(|(_, distance)| *distance)
        .map(|(candidate, _)| candidate.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        Lexer::new(input)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn op(operator: Operator) -> TokenKind {
        TokenKind::Operator(operator)
    }

    #[test]
    fn test_tokenize_empty() {
        assert_eq!(kinds(""), vec![TokenKind::EndOfInput]);
        assert_eq!(kinds(" \t\r\n\x0B\0"), vec![TokenKind::EndOfInput]);
    }

    #[test]
    fn test_tokenize_comparison() {
        let tokens = Lexer::new(r#"user.age >= "30""#).tokenize().unwrap();
        assert_eq!(tokens[0], Token::variable("user.age".to_string(), 0));
        assert_eq!(tokens[1], Token::new(op(Operator::GreaterOrEqual), 9));
        assert_eq!(tokens[2], Token::new(TokenKind::DoubleQuote, 12));
        // the scanner does not know it is inside a literal
        assert_eq!(tokens[3], Token::variable("30".to_string(), 13));
    }

    #[test]
    fn test_tokenize_every_operator() {
        let cases = [
            ("=", Operator::Equal),
            ("<>", Operator::NotEqual),
            ("!=", Operator::NotEqual),
            (">", Operator::Greater),
            (">=", Operator::GreaterOrEqual),
            ("<", Operator::Less),
            ("<=", Operator::LessOrEqual),
            ("~", Operator::Matches),
            ("^", Operator::Contains),
            ("!^", Operator::NotContains),
        ];
        for (symbol, expected) in cases {
            assert_eq!(
                kinds(&format!("a {symbol} b")),
                vec![
                    TokenKind::Variable,
                    op(expected),
                    TokenKind::Variable,
                    TokenKind::EndOfInput
                ],
                "symbol {symbol}"
            );
        }
    }

    #[test]
    fn test_lone_less_than_is_an_operator() {
        assert_eq!(
            kinds("a<b"),
            vec![
                TokenKind::Variable,
                op(Operator::Less),
                TokenKind::Variable,
                TokenKind::EndOfInput
            ]
        );
    }

    #[test]
    fn test_keywords_case_insensitive() {
        for word in ["and", "AND", "And", "aNd"] {
            assert_eq!(kinds(word), vec![TokenKind::And, TokenKind::EndOfInput]);
        }
        for word in ["or", "OR", "Or"] {
            assert_eq!(kinds(word), vec![TokenKind::Or, TokenKind::EndOfInput]);
        }
        assert_eq!(
            kinds("android order"),
            vec![
                TokenKind::Variable,
                TokenKind::Variable,
                TokenKind::EndOfInput
            ]
        );
    }

    #[test]
    fn test_tokenize_punctuation() {
        assert_eq!(
            kinds("( ) ' \""),
            vec![
                TokenKind::OpenParen,
                TokenKind::CloseParen,
                TokenKind::SingleQuote,
                TokenKind::DoubleQuote,
                TokenKind::EndOfInput
            ]
        );
    }

    #[test]
    fn test_identifier_stops_at_other_characters() {
        let tokens = Lexer::new("a.b_c").tokenize();
        assert_eq!(
            tokens,
            Err(EvalError::unknown_character('_', 3)),
            "underscore is not an identifier character"
        );
    }

    #[test]
    fn test_unknown_character() {
        assert_eq!(
            Lexer::new("  @x").next_token(),
            Err(EvalError::unknown_character('@', 2))
        );
        // identifiers must start with a letter
        assert_eq!(
            Lexer::new("1a").next_token(),
            Err(EvalError::unknown_character('1', 0))
        );
    }

    #[test]
    fn test_unknown_operator_with_suggestion() {
        let err = Lexer::new("a == 'x'").tokenize().unwrap_err();
        assert_eq!(
            err,
            EvalError::unknown_operator("==", 2, Some("=".to_string()))
        );
        assert_eq!(
            err.to_string(),
            "unknown operator '==' at position 2 (did you mean '='?)"
        );
    }

    #[test]
    fn test_unknown_operator_without_suggestion() {
        let err = Lexer::new("a <<>>! 'x'").tokenize().unwrap_err();
        assert_eq!(err, EvalError::unknown_operator("<<>>!", 2, None));
    }

    #[test]
    fn test_peek_does_not_advance() {
        let mut lexer = Lexer::new("  a = 'b'");
        let peeked = lexer.peek_token().unwrap();
        assert_eq!(lexer.position(), 0);
        assert_eq!(peeked, Token::variable("a".to_string(), 2));
        assert_eq!(lexer.next_token().unwrap(), peeked);
        assert_eq!(lexer.position(), 3);
    }

    #[test]
    fn test_expect_reports_position_and_source() {
        let mut lexer = Lexer::new("a b");
        lexer.next_token().unwrap();
        let err = lexer.expect(&TokenKind::OPERATORS).unwrap_err();
        assert!(matches!(
            err,
            EvalError::UnexpectedToken {
                found: TokenKind::Variable,
                position: 3,
                ..
            }
        ));
        assert!(err.to_string().contains("Expression: a b, pos: 3"));
    }

    #[test]
    fn test_read_quoted_value_plain() {
        let mut lexer = Lexer::new("hello world\" rest");
        assert_eq!(lexer.read_quoted_value('"'), "hello world");
        assert_eq!(lexer.peek_char(), Some('"'));
    }

    #[test]
    fn test_read_quoted_value_escapes() {
        let mut lexer = Lexer::new(r#"va\"lue""#);
        assert_eq!(lexer.read_quoted_value('"'), r#"va"lue"#);

        let mut lexer = Lexer::new(r#"a\\b""#);
        assert_eq!(lexer.read_quoted_value('"'), r"a\b");

        // backslash before anything else is kept
        let mut lexer = Lexer::new(r#"\d+\.x""#);
        assert_eq!(lexer.read_quoted_value('"'), r"\d+\.x");
    }

    #[test]
    fn test_read_quoted_value_other_quote_is_literal() {
        let mut lexer = Lexer::new(r#"it's "fine"'"#);
        assert_eq!(lexer.read_quoted_value('\''), "it");

        let mut lexer = Lexer::new(r#"say "hi"'"#);
        assert_eq!(lexer.read_quoted_value('\''), r#"say "hi""#);

        // escaping the other quote keeps the backslash
        let mut lexer = Lexer::new(r#"a\'b""#);
        assert_eq!(lexer.read_quoted_value('"'), r"a\'b");
    }

    #[test]
    fn test_read_quoted_value_unterminated() {
        let mut lexer = Lexer::new("abc");
        assert_eq!(lexer.read_quoted_value('"'), "abc");
        assert_eq!(lexer.position(), 3);

        let mut lexer = Lexer::new("abc\\");
        assert_eq!(lexer.read_quoted_value('"'), "abc");
    }

    #[test]
    fn test_read_quoted_value_multibyte() {
        let mut lexer = Lexer::new("zürich ✓'");
        assert_eq!(lexer.read_quoted_value('\''), "zürich ✓");
        assert_eq!(lexer.peek_char(), Some('\''));
    }

    #[test]
    fn test_read_quoted_value_round_trip() {
        for text in ["", "plain", "with spaces", "a,b;c", "ünï", "tab\there", r"\w+"] {
            let source = format!("{text}\"");
            let mut lexer = Lexer::new(&source);
            assert_eq!(lexer.read_quoted_value('"'), text);
        }
    }

    #[test]
    fn test_suggest_operator() {
        assert_eq!(suggest_operator("=<"), Some("=".to_string()));
        assert_eq!(suggest_operator("!~"), Some("!=".to_string()));
        assert_eq!(suggest_operator(">>>"), None);
    }
}
