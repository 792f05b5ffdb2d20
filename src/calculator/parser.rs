//! Restricted expression grammar.
//!
//! Only decimal literals, `+ - * / **`, parentheses, a fixed table of unary
//! functions and the constants `pi` and `e` are accepted. Identifiers are
//! resolved against that table while parsing, so nothing outside it can ever
//! be reached by an evaluated expression.
//!
//! ```text
//! expr    := term (("+" | "-") term)*
//! term    := unary (("*" | "/") unary)*
//! unary   := ("+" | "-") unary | power
//! power   := primary ("**" unary)?
//! primary := number | constant | function "(" expr ")" | "(" expr ")"
//! ```
//!
//! `**` is right-associative and binds tighter than a unary sign on its left,
//! so `-2**2` is `-4` and `2**-1` is `0.5`. Numbers may carry an exponent
//! (`1e5`, `2.5e-3`); a bare `e` is the constant.
//!
//! Expressions longer than [`MAX_TOKENS`] tokens or nested deeper than
//! [`MAX_DEPTH`] levels are rejected as syntax errors, which keeps parsing and
//! evaluation within a bounded stack.

use crate::error::EvalError;
use std::f64::consts::{E, PI};

/// Longest accepted expression, in tokens.
pub const MAX_TOKENS: usize = 1000;

/// Deepest accepted nesting of signs, parentheses, calls and exponents.
pub const MAX_DEPTH: usize = 256;

#[derive(Clone, Debug, PartialEq)]
enum TokenKind {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Pow,
    LeftParen,
    RightParen,
}

#[derive(Clone, Debug, PartialEq)]
struct Token {
    kind: TokenKind,
    /// Byte offset of the token in the source.
    position: usize,
}

/// A named unary function callable from an expression.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Builtin {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Log10,
    Ln,
    Sqrt,
    Radians,
    Degrees,
}

impl Builtin {
    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "sin" => Self::Sin,
            "cos" => Self::Cos,
            "tan" => Self::Tan,
            "asin" => Self::Asin,
            "acos" => Self::Acos,
            "atan" => Self::Atan,
            "log" | "log10" => Self::Log10,
            "ln" => Self::Ln,
            "sqrt" => Self::Sqrt,
            "radians" => Self::Radians,
            "degrees" => Self::Degrees,
            _ => return None,
        })
    }

    fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Asin => "asin",
            Self::Acos => "acos",
            Self::Atan => "atan",
            Self::Log10 => "log",
            Self::Ln => "ln",
            Self::Sqrt => "sqrt",
            Self::Radians => "radians",
            Self::Degrees => "degrees",
        }
    }

    fn apply(self, x: f64) -> Result<f64, EvalError> {
        let domain_error = || EvalError::domain(self.name(), x.to_string());
        let value = match self {
            Self::Sin => x.sin(),
            Self::Cos => x.cos(),
            Self::Tan => x.tan(),
            Self::Asin | Self::Acos if !(-1.0..=1.0).contains(&x) => return Err(domain_error()),
            Self::Asin => x.asin(),
            Self::Acos => x.acos(),
            Self::Atan => x.atan(),
            Self::Log10 | Self::Ln if x <= 0.0 => return Err(domain_error()),
            Self::Log10 => x.log10(),
            Self::Ln => x.ln(),
            Self::Sqrt if x < 0.0 => return Err(domain_error()),
            Self::Sqrt => x.sqrt(),
            Self::Radians => x.to_radians(),
            Self::Degrees => x.to_degrees(),
        };
        Ok(value)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

/// Parsed expression tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Number(f64),
    Neg(Box<Expr>),
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Call {
        function: Builtin,
        arg: Box<Expr>,
    },
}

impl Expr {
    /// Evaluate the tree, rejecting division by zero, domain violations and
    /// non-finite intermediate results.
    pub fn eval(&self) -> Result<f64, EvalError> {
        let value = match self {
            Expr::Number(n) => *n,
            Expr::Neg(inner) => -inner.eval()?,
            Expr::Call { function, arg } => function.apply(arg.eval()?)?,
            Expr::Binary { op, lhs, rhs } => {
                let a = lhs.eval()?;
                let b = rhs.eval()?;
                match op {
                    BinaryOp::Add => a + b,
                    BinaryOp::Sub => a - b,
                    BinaryOp::Mul => a * b,
                    BinaryOp::Div if b == 0.0 => return Err(EvalError::DivisionByZero),
                    BinaryOp::Div => a / b,
                    BinaryOp::Pow if a == 0.0 && b < 0.0 => {
                        return Err(EvalError::DivisionByZero);
                    }
                    // A negative base with a fractional exponent has no real result.
                    BinaryOp::Pow if a < 0.0 && b.fract() != 0.0 => {
                        return Err(EvalError::domain("**", format!("{a}**{b}")));
                    }
                    BinaryOp::Pow => a.powf(b),
                }
            }
        };

        if value.is_finite() {
            Ok(value)
        } else {
            Err(EvalError::NotFinite)
        }
    }
}

/// Parse and evaluate `source` in one step.
pub fn evaluate(source: &str) -> Result<f64, EvalError> {
    parse(source)?.eval()
}

/// Parse `source` into an expression tree.
pub fn parse(source: &str) -> Result<Expr, EvalError> {
    let tokens = tokenize(source)?;
    if tokens.is_empty() {
        return Err(EvalError::syntax("empty expression", 0));
    }
    if let Some(token) = tokens.get(MAX_TOKENS) {
        return Err(EvalError::syntax("expression too long", token.position));
    }

    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        end: source.len(),
        depth: 0,
    };
    let expr = parser.parse_expr()?;

    match parser.current() {
        None => Ok(expr),
        Some(token) => Err(EvalError::syntax(
            format!("unexpected {:?}", token.kind),
            token.position,
        )),
    }
}

fn tokenize(source: &str) -> Result<Vec<Token>, EvalError> {
    let mut tokens = Vec::new();
    let mut chars = source.char_indices().peekable();

    while let Some((position, ch)) = chars.next() {
        let kind = match ch {
            c if c.is_whitespace() => continue,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '/' => TokenKind::Slash,
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            '*' => {
                if chars.next_if(|&(_, c)| c == '*').is_some() {
                    TokenKind::Pow
                } else {
                    TokenKind::Star
                }
            }
            '0'..='9' | '.' => {
                let mut end = position + ch.len_utf8();
                let mut seen_dot = ch == '.';
                while let Some(&(i, c)) = chars.peek() {
                    if c.is_ascii_digit() || (c == '.' && !seen_dot) {
                        seen_dot |= c == '.';
                        end = i + c.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }

                // Exponent suffix, only when digits follow; `2e` is `2` then `e`.
                let mut ahead = chars.clone();
                if ahead.next_if(|&(_, c)| c == 'e' || c == 'E').is_some() {
                    ahead.next_if(|&(_, c)| c == '+' || c == '-');
                    if ahead.peek().is_some_and(|&(_, c)| c.is_ascii_digit()) {
                        while let Some((i, c)) = ahead.next_if(|&(_, c)| c.is_ascii_digit()) {
                            end = i + c.len_utf8();
                        }
                        chars = ahead;
                    }
                }

                let literal = &source[position..end];
                if literal == "." {
                    return Err(EvalError::syntax("lone decimal point", position));
                }
                let value = literal
                    .parse()
                    .map_err(|_| EvalError::syntax(format!("bad number '{literal}'"), position))?;
                TokenKind::Number(value)
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut end = position + c.len_utf8();
                while let Some(&(i, c)) = chars.peek() {
                    if c.is_ascii_alphanumeric() || c == '_' {
                        end = i + c.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                TokenKind::Ident(source[position..end].to_string())
            }
            other => {
                return Err(EvalError::syntax(
                    format!("unexpected character '{other}'"),
                    position,
                ));
            }
        };

        tokens.push(Token { kind, position });
    }

    Ok(tokens)
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    /// Source length, reported as the position of end-of-input errors.
    end: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn current(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn next_token(&mut self) -> Result<&'a Token, EvalError> {
        let token = self
            .current()
            .ok_or_else(|| EvalError::syntax("unexpected end of input", self.end))?;
        self.advance();
        Ok(token)
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.current().is_some_and(|t| &t.kind == kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<(), EvalError> {
        if self.eat(kind) {
            return Ok(());
        }
        let position = self.current().map_or(self.end, |t| t.position);
        Err(EvalError::syntax(format!("expected {kind:?}"), position))
    }

    /// Run `parse` one nesting level deeper.
    fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, EvalError>,
    ) -> Result<T, EvalError> {
        if self.depth >= MAX_DEPTH {
            let position = self.current().map_or(self.end, |t| t.position);
            return Err(EvalError::syntax("expression nested too deeply", position));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn parse_expr(&mut self) -> Result<Expr, EvalError> {
        let mut lhs = self.parse_term()?;
        loop {
            let op = if self.eat(&TokenKind::Plus) {
                BinaryOp::Add
            } else if self.eat(&TokenKind::Minus) {
                BinaryOp::Sub
            } else {
                return Ok(lhs);
            };
            let rhs = self.parse_term()?;
            lhs = binary(op, lhs, rhs);
        }
    }

    fn parse_term(&mut self) -> Result<Expr, EvalError> {
        let mut lhs = self.parse_unary()?;
        loop {
            let op = if self.eat(&TokenKind::Star) {
                BinaryOp::Mul
            } else if self.eat(&TokenKind::Slash) {
                BinaryOp::Div
            } else {
                return Ok(lhs);
            };
            let rhs = self.parse_unary()?;
            lhs = binary(op, lhs, rhs);
        }
    }

    fn parse_unary(&mut self) -> Result<Expr, EvalError> {
        self.nested(|parser| {
            if parser.eat(&TokenKind::Minus) {
                return Ok(Expr::Neg(Box::new(parser.parse_unary()?)));
            }
            if parser.eat(&TokenKind::Plus) {
                return parser.parse_unary();
            }
            parser.parse_power()
        })
    }

    fn parse_power(&mut self) -> Result<Expr, EvalError> {
        let base = self.parse_primary()?;
        if self.eat(&TokenKind::Pow) {
            let exponent = self.parse_unary()?;
            return Ok(binary(BinaryOp::Pow, base, exponent));
        }
        Ok(base)
    }

    fn parse_primary(&mut self) -> Result<Expr, EvalError> {
        let token = self.next_token()?;
        match &token.kind {
            TokenKind::Number(n) => Ok(Expr::Number(*n)),
            TokenKind::LeftParen => self.nested(|parser| {
                let inner = parser.parse_expr()?;
                parser.expect(&TokenKind::RightParen)?;
                Ok(inner)
            }),
            TokenKind::Ident(name) => match name.as_str() {
                "pi" => Ok(Expr::Number(PI)),
                "e" => Ok(Expr::Number(E)),
                _ => {
                    let function = Builtin::from_name(name)
                        .ok_or_else(|| EvalError::UnknownName(name.clone()))?;
                    self.expect(&TokenKind::LeftParen)?;
                    let arg = self.nested(Self::parse_expr)?;
                    self.expect(&TokenKind::RightParen)?;
                    Ok(Expr::Call {
                        function,
                        arg: Box::new(arg),
                    })
                }
            },
            other => Err(EvalError::syntax(
                format!("unexpected {other:?}"),
                token.position,
            )),
        }
    }
}

fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
    Expr::Binary {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(actual: f64, expected: f64) -> bool {
        (actual - expected).abs() < 1e-9
    }

    #[test]
    fn test_precedence() {
        assert_eq!(evaluate("2+3*4").unwrap(), 14.0);
        assert_eq!(evaluate("(2+3)*4").unwrap(), 20.0);
        assert_eq!(evaluate("10-4-3").unwrap(), 3.0);
        assert_eq!(evaluate("8/4/2").unwrap(), 1.0);
    }

    #[test]
    fn test_power_is_right_associative() {
        assert_eq!(evaluate("2**3**2").unwrap(), 512.0);
        assert_eq!(evaluate("-2**2").unwrap(), -4.0);
        assert_eq!(evaluate("2**-1").unwrap(), 0.5);
    }

    #[test]
    fn test_unary_signs() {
        assert_eq!(evaluate("-5").unwrap(), -5.0);
        assert_eq!(evaluate("3--2").unwrap(), 5.0);
        assert_eq!(evaluate("+4").unwrap(), 4.0);
    }

    #[test]
    fn test_decimal_literals() {
        assert_eq!(evaluate(".5+5.").unwrap(), 5.5);
        assert_eq!(evaluate(" 1.25 * 4 ").unwrap(), 5.0);
        assert!(matches!(evaluate("1.2.3"), Err(EvalError::Syntax { .. })));
        assert!(matches!(evaluate("."), Err(EvalError::Syntax { .. })));
    }

    #[test]
    fn test_exponent_literals() {
        assert_eq!(evaluate("1e5").unwrap(), 100000.0);
        assert_eq!(evaluate("1E3+1").unwrap(), 1001.0);
        assert!(approx(evaluate("2.5e-3*2").unwrap(), 0.005));
        assert_eq!(evaluate("4e+1").unwrap(), 40.0);
        assert!(approx(evaluate("2*e").unwrap(), 2.0 * E));
        assert!(approx(evaluate("e-1").unwrap(), E - 1.0));
        assert!(matches!(evaluate("2e"), Err(EvalError::Syntax { .. })));
        assert!(matches!(evaluate("2e+"), Err(EvalError::Syntax { .. })));
    }

    #[test]
    fn test_deep_nesting_is_a_syntax_error() {
        let nested = |depth: usize| format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
        assert_eq!(evaluate(&nested(50)).unwrap(), 1.0);
        assert!(matches!(evaluate(&nested(300)), Err(EvalError::Syntax { .. })));

        let signs = format!("{}5", "-".repeat(400));
        assert!(matches!(evaluate(&signs), Err(EvalError::Syntax { .. })));
        assert!(matches!(
            evaluate(&format!("{}1)", "sqrt(".repeat(300))),
            Err(EvalError::Syntax { .. })
        ));
    }

    #[test]
    fn test_oversized_input_is_a_syntax_error() {
        let huge = format!("{}1{}", "(".repeat(100_000), ")".repeat(100_000));
        assert_eq!(
            evaluate(&huge),
            Err(EvalError::syntax("expression too long", MAX_TOKENS))
        );

        let long_sum = format!("{}1", "1+".repeat(2000));
        assert!(matches!(evaluate(&long_sum), Err(EvalError::Syntax { .. })));
    }

    #[test]
    fn test_functions_and_constants() {
        assert!(approx(evaluate("sin(pi/2)").unwrap(), 1.0));
        assert!(approx(evaluate("log(1000)").unwrap(), 3.0));
        assert!(approx(evaluate("log10(100)").unwrap(), 2.0));
        assert!(approx(evaluate("ln(e)").unwrap(), 1.0));
        assert_eq!(evaluate("sqrt(16)").unwrap(), 4.0);
        assert!(approx(evaluate("degrees(pi)").unwrap(), 180.0));
        assert!(approx(evaluate("radians(180)").unwrap(), std::f64::consts::PI));
    }

    #[test]
    fn test_domain_errors() {
        assert!(matches!(evaluate("sqrt(-1)"), Err(EvalError::DomainOrParse { .. })));
        assert!(matches!(evaluate("log(0)"), Err(EvalError::DomainOrParse { .. })));
        assert!(matches!(evaluate("ln(-2)"), Err(EvalError::DomainOrParse { .. })));
        assert!(matches!(evaluate("asin(2)"), Err(EvalError::DomainOrParse { .. })));
        assert!(matches!(evaluate("(-8)**0.5"), Err(EvalError::DomainOrParse { .. })));
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(evaluate("10/0"), Err(EvalError::DivisionByZero));
        assert_eq!(evaluate("0**-1"), Err(EvalError::DivisionByZero));
    }

    #[test]
    fn test_overflow_is_rejected() {
        assert_eq!(evaluate("10**400"), Err(EvalError::NotFinite));
    }

    #[test]
    fn test_syntax_errors() {
        assert!(matches!(evaluate("2+*3"), Err(EvalError::Syntax { .. })));
        assert!(matches!(evaluate("(2+3"), Err(EvalError::Syntax { .. })));
        assert!(matches!(evaluate("2+3)"), Err(EvalError::Syntax { .. })));
        assert!(matches!(evaluate("2***3"), Err(EvalError::Syntax { .. })));
        assert!(matches!(evaluate("50%3"), Err(EvalError::Syntax { .. })));
        assert!(matches!(evaluate(""), Err(EvalError::Syntax { .. })));
        assert!(matches!(evaluate("sin 3"), Err(EvalError::Syntax { .. })));
    }

    #[test]
    fn test_unknown_names_are_unreachable() {
        assert_eq!(
            evaluate("open(1)"),
            Err(EvalError::UnknownName("open".to_string()))
        );
        assert_eq!(
            evaluate("__import__(1)"),
            Err(EvalError::UnknownName("__import__".to_string()))
        );
        assert!(evaluate("pi(2)").is_err());
    }

    #[test]
    fn test_error_position_points_at_offending_token() {
        assert_eq!(
            evaluate("1+#"),
            Err(EvalError::syntax("unexpected character '#'", 2))
        );
    }
}
