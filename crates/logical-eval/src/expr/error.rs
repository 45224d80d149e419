//! Error types for scanning, parsing and evaluating expressions.

use std::fmt;

use thiserror::Error;

use super::lexer::TokenKind;

/// A specialized Result type for expression operations.
pub type EvalResult<T> = Result<T, EvalError>;

/// Broad classification of an [`EvalError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A character or operator the scanner does not recognize.
    Lexical,
    /// A token of the wrong kind, or nesting beyond the configured limit.
    Syntax,
    /// A `~` pattern that is not a valid regular expression.
    Pattern,
}

/// Errors that can occur while evaluating an expression.
///
/// All of them are fatal to the evaluation in progress. Undefined variables
/// are never an error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EvalError {
    /// A character that starts no token.
    #[error("unknown character '{character}' at position {position}")]
    UnknownCharacter {
        /// The offending character.
        character: char,
        /// Byte offset of the character.
        position: usize,
    },

    /// A run of operator characters that is not a known operator.
    #[error("unknown operator '{symbol}' at position {position}{}", did_you_mean(.suggestion))]
    UnknownOperator {
        /// The assembled symbol.
        symbol: String,
        /// Byte offset where the symbol starts.
        position: usize,
        /// The closest known operator, if any is close enough.
        suggestion: Option<String>,
    },

    /// A token of a kind the grammar does not allow at this point.
    #[error("expected {}, got {found}. Expression: {expression}, pos: {position}", ExpectedKinds(.expected))]
    UnexpectedToken {
        /// The kinds that would have been accepted.
        expected: Vec<TokenKind>,
        /// The kind that was found.
        found: TokenKind,
        /// The full source text.
        expression: String,
        /// Cursor offset after reading the unexpected token.
        position: usize,
    },

    /// Parentheses or AND/OR chains nested deeper than allowed.
    #[error("expression nested deeper than {limit} levels at position {position}")]
    NestingTooDeep {
        /// The configured limit.
        limit: usize,
        /// Byte offset where the limit was exceeded.
        position: usize,
    },

    /// A `~` right-hand side that does not compile.
    #[error("invalid regular expression '{pattern}': {message}")]
    InvalidPattern {
        /// The pattern text.
        pattern: String,
        /// The compiler's explanation.
        message: String,
    },
}

impl EvalError {
    /// Creates an unknown character error.
    pub fn unknown_character(character: char, position: usize) -> Self {
        EvalError::UnknownCharacter {
            character,
            position,
        }
    }

    /// Creates an unknown operator error.
    pub fn unknown_operator(
        symbol: impl Into<String>,
        position: usize,
        suggestion: Option<String>,
    ) -> Self {
        EvalError::UnknownOperator {
            symbol: symbol.into(),
            position,
            suggestion,
        }
    }

    /// Creates an unexpected token error.
    pub fn unexpected_token(
        expected: &[TokenKind],
        found: TokenKind,
        expression: impl Into<String>,
        position: usize,
    ) -> Self {
        EvalError::UnexpectedToken {
            expected: expected.to_vec(),
            found,
            expression: expression.into(),
            position,
        }
    }

    /// Creates an invalid pattern error.
    pub fn invalid_pattern(pattern: impl Into<String>, message: impl fmt::Display) -> Self {
        EvalError::InvalidPattern {
            pattern: pattern.into(),
            message: message.to_string(),
        }
    }

    /// Returns the broad class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EvalError::UnknownCharacter { .. } | EvalError::UnknownOperator { .. } => {
                ErrorKind::Lexical
            }
            EvalError::UnexpectedToken { .. } | EvalError::NestingTooDeep { .. } => {
                ErrorKind::Syntax
            }
            EvalError::InvalidPattern { .. } => ErrorKind::Pattern,
        }
    }

    /// Returns true for lexical errors.
    pub fn is_lexical(&self) -> bool {
        self.kind() == ErrorKind::Lexical
    }

    /// Returns true for syntax errors.
    pub fn is_syntax(&self) -> bool {
        self.kind() == ErrorKind::Syntax
    }
}

fn did_you_mean(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(s) => format!(" (did you mean '{s}'?)"),
        None => String::new(),
    }
}

/// Renders a set of token kinds as `a, b or c`.
struct ExpectedKinds<'a>(&'a [TokenKind]);

impl fmt::Display for ExpectedKinds<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kinds = self.0;
        if kinds.len() == TokenKind::OPERATORS.len()
            && TokenKind::OPERATORS.iter().all(|k| kinds.contains(k))
        {
            return f.write_str("an operator");
        }
        for (i, kind) in kinds.iter().enumerate() {
            if i > 0 {
                let sep = if i + 1 == kinds.len() { " or " } else { ", " };
                f.write_str(sep)?;
            }
            write!(f, "{kind}")?;
        }
        Ok(())
    }
}
