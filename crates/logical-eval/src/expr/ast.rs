//! Expression tree produced by the parser.

use std::fmt;

/// A parsed filter expression.
///
/// Chains of `AND` / `OR` lean to the right: `a AND b OR c` is
/// `And(a, Or(b, c))`. Parenthesized groups become the left child of the
/// combinator that follows them.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A single `variable operator value` test.
    Comparison(Comparison),

    /// Logical AND of two expressions.
    And(Box<Expr>, Box<Expr>),

    /// Logical OR of two expressions.
    Or(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Creates an AND expression.
    pub fn and(left: Expr, right: Expr) -> Self {
        Expr::And(Box::new(left), Box::new(right))
    }

    /// Creates an OR expression.
    pub fn or(left: Expr, right: Expr) -> Self {
        Expr::Or(Box::new(left), Box::new(right))
    }

    /// Creates a comparison against a quoted literal.
    pub fn literal(variable: impl Into<String>, operator: Operator, value: impl Into<String>) -> Self {
        Expr::Comparison(Comparison {
            variable: variable.into(),
            operator,
            rhs: Operand::Literal(value.into()),
        })
    }

    /// Creates a variable-to-variable comparison.
    pub fn variable(variable: impl Into<String>, operator: Operator, other: impl Into<String>) -> Self {
        Expr::Comparison(Comparison {
            variable: variable.into(),
            operator,
            rhs: Operand::Variable(other.into()),
        })
    }

    /// Returns every variable name referenced, in order of first appearance.
    pub fn variables(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_variables(&mut names);
        names
    }

    fn collect_variables<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            Expr::Comparison(comparison) => {
                let mut push = |name: &'a str| {
                    if !names.contains(&name) {
                        names.push(name);
                    }
                };
                push(comparison.variable.as_str());
                if let Operand::Variable(other) = &comparison.rhs {
                    push(other.as_str());
                }
            }
            Expr::And(left, right) | Expr::Or(left, right) => {
                left.collect_variables(names);
                right.collect_variables(names);
            }
        }
    }

    fn is_combinator(&self) -> bool {
        matches!(self, Expr::And(..) | Expr::Or(..))
    }
}

/// A comparison between a variable and a right-hand operand.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    /// Name of the variable on the left.
    pub variable: String,
    /// The comparison operator.
    pub operator: Operator,
    /// The right-hand side.
    pub rhs: Operand,
}

/// Right-hand side of a comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// A quoted literal, with escapes already resolved.
    Literal(String),
    /// Another variable, resolved at evaluation time.
    Variable(String),
}

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `=`
    Equal,
    /// `<>` or `!=`
    NotEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterOrEqual,
    /// `<`
    Less,
    /// `<=`
    LessOrEqual,
    /// `~` (regex match)
    Matches,
    /// `^` (substring present)
    Contains,
    /// `!^` (substring absent)
    NotContains,
}

impl Operator {
    /// Every operator symbol the scanner accepts, with its operator.
    pub const SYMBOLS: [(&'static str, Operator); 10] = [
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

    /// Looks up an assembled operator symbol.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::SYMBOLS
            .iter()
            .find(|(s, _)| *s == symbol)
            .map(|(_, op)| *op)
    }

    /// Returns the canonical symbol for this operator.
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Equal => "=",
            Operator::NotEqual => "!=",
            Operator::Greater => ">",
            Operator::GreaterOrEqual => ">=",
            Operator::Less => "<",
            Operator::LessOrEqual => "<=",
            Operator::Matches => "~",
            Operator::Contains => "^",
            Operator::NotContains => "!^",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Variable(name) => f.write_str(name),
            Operand::Literal(value) => {
                f.write_str("\"")?;
                for c in value.chars() {
                    if c == '"' || c == '\\' {
                        f.write_str("\\")?;
                    }
                    write!(f, "{c}")?;
                }
                f.write_str("\"")
            }
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.variable, self.operator, self.rhs)
    }
}

/// Renders the canonical form. Parsing the output yields an equal tree.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (left, keyword, right) = match self {
            Expr::Comparison(comparison) => return comparison.fmt(f),
            Expr::And(left, right) => (left, "AND", right),
            Expr::Or(left, right) => (left, "OR", right),
        };
        if left.is_combinator() {
            write!(f, "({left})")?;
        } else {
            write!(f, "{left}")?;
        }
        write!(f, " {keyword} {right}")
    }
}
