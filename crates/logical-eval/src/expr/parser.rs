//! Recursive descent parser for filter expressions.

use super::ast::{Comparison, Expr, Operand};
use super::error::{EvalError, EvalResult};
use super::lexer::{Lexer, TokenKind};
use super::EvalOptions;

/// Parser for filter expressions.
///
/// # Grammar
///
/// ```text
/// expr    ::= "(" expr ")" tail
///           | VARNAME operator rhs tail
/// tail    ::= AND expr | OR expr | ε        (ε before end of input or ")")
/// rhs     ::= quote value same-quote
///           | VARNAME
/// ```
///
/// AND and OR share one precedence level and chain to the right, so
/// `a AND b OR c` parses as `a AND (b OR c)`. Parentheses are the only way to
/// group differently.
///
/// # Example
///
/// ```
/// use logical_eval::{Expr, ExprParser, Operator};
///
/// let expr = ExprParser::parse(r#"age >= "18" and country = 'NZ'"#).unwrap();
/// assert_eq!(
///     expr,
///     Expr::and(
///         Expr::literal("age", Operator::GreaterOrEqual, "18"),
///         Expr::literal("country", Operator::Equal, "NZ"),
///     )
/// );
/// ```
pub struct ExprParser<'a> {
    lexer: Lexer<'a>,
    max_depth: usize,
    depth: usize,
}

impl<'a> ExprParser<'a> {
    /// Parses an expression with default options.
    ///
    /// # Errors
    ///
    /// Returns a lexical error for characters or operators the scanner does not
    /// know, and a syntax error for misplaced tokens, unbalanced parentheses,
    /// unterminated literals or nesting beyond [`EvalOptions::max_depth`].
    pub fn parse(input: &'a str) -> EvalResult<Expr> {
        Self::parse_with(input, &EvalOptions::default())
    }

    /// Parses an expression with the given options.
    pub fn parse_with(input: &'a str, options: &EvalOptions) -> EvalResult<Expr> {
        let mut parser = Self {
            lexer: Lexer::new(input),
            max_depth: options.max_depth,
            depth: 0,
        };
        let expr = parser.parse_expression()?;

        // A stray ")" at the top level is left behind by the tail rule.
        parser.lexer.expect(&[TokenKind::EndOfInput])?;
        Ok(expr)
    }

    /// Parses `expr`: a group or comparison, then an optional AND/OR tail.
    fn parse_expression(&mut self) -> EvalResult<Expr> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(EvalError::NestingTooDeep {
                limit: self.max_depth,
                position: self.lexer.position(),
            });
        }

        let token = self
            .lexer
            .expect(&[TokenKind::OpenParen, TokenKind::Variable])?;

        let left = match token.kind {
            TokenKind::OpenParen => {
                let inner = self.parse_expression()?;
                self.lexer.expect(&[TokenKind::CloseParen])?;
                inner
            }
            _ => Expr::Comparison(self.parse_comparison(token.text.unwrap_or_default())?),
        };

        let expr = self.parse_tail(left)?;
        self.depth -= 1;
        Ok(expr)
    }

    /// Parses the operator and right-hand side after a variable name.
    fn parse_comparison(&mut self, variable: String) -> EvalResult<Comparison> {
        let token = self.lexer.next_token()?;
        let TokenKind::Operator(operator) = token.kind else {
            return Err(EvalError::unexpected_token(
                &TokenKind::OPERATORS,
                token.kind,
                self.lexer.input(),
                self.lexer.position(),
            ));
        };

        let next = self.lexer.peek_token()?;
        let rhs = match next.kind.quote_char() {
            Some(quote) => {
                self.lexer.next_token()?;
                let value = self.lexer.read_quoted_value(quote);
                // the closing quote must match the opening one
                self.lexer.expect(&[next.kind])?;
                Operand::Literal(value)
            }
            None => {
                let token = self.lexer.expect(&[
                    TokenKind::SingleQuote,
                    TokenKind::DoubleQuote,
                    TokenKind::Variable,
                ])?;
                Operand::Variable(token.text.unwrap_or_default())
            }
        };

        Ok(Comparison {
            variable,
            operator,
            rhs,
        })
    }

    /// Parses `tail`: AND/OR followed by another expression, or nothing.
    fn parse_tail(&mut self, left: Expr) -> EvalResult<Expr> {
        let next = self.lexer.peek_token()?;
        match next.kind {
            TokenKind::And => {
                self.lexer.next_token()?;
                let right = self.parse_expression()?;
                Ok(Expr::and(left, right))
            }
            TokenKind::Or => {
                self.lexer.next_token()?;
                let right = self.parse_expression()?;
                Ok(Expr::or(left, right))
            }
            TokenKind::EndOfInput | TokenKind::CloseParen => Ok(left),
            _ => {
                // consume it so the reported position matches the other errors
                self.lexer.next_token()?;
                Err(EvalError::unexpected_token(
                    &[
                        TokenKind::And,
                        TokenKind::Or,
                        TokenKind::CloseParen,
                        TokenKind::EndOfInput,
                    ],
                    next.kind,
                    self.lexer.input(),
                    self.lexer.position(),
                ))
            }
        }
    }
}
