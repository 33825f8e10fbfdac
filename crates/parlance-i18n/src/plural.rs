//! Plural-form selection
//!
//! A [`PluralRule`] maps a count to a form index in `0..nplurals`. Rules are
//! data: compiled catalogs carry their own `Plural-Forms` header, which is
//! parsed here into a small C-expression tree. Locales without a header use
//! the gettext convention for their language.
//!
//! # Invariants
//!
//! 1. `select` always returns an index below `nplurals`.
//! 2. Evaluation never panics: division by zero yields 0 and arithmetic wraps.

use crate::error::{I18nError, I18nResult};
use std::fmt;
use tracing::error;

const GERMANIC: &str = "nplurals=2; plural=(n != 1);";
const FRENCH: &str = "nplurals=2; plural=(n > 1);";
const SINGLE: &str = "nplurals=1; plural=0;";
const EAST_SLAVIC: &str =
    "nplurals=3; plural=(n%10==1 && n%100!=11 ? 0 : n%10>=2 && n%10<=4 && (n%100<10 || n%100>=20) ? 1 : 2);";
const POLISH: &str =
    "nplurals=3; plural=(n==1 ? 0 : n%10>=2 && n%10<=4 && (n%100<10 || n%100>=20) ? 1 : 2);";
const WEST_SLAVIC: &str = "nplurals=3; plural=(n==1) ? 0 : (n>=2 && n<=4) ? 1 : 2;";
const ARABIC: &str =
    "nplurals=6; plural=(n==0 ? 0 : n==1 ? 1 : n==2 ? 2 : n%100>=3 && n%100<=10 ? 3 : n%100>=11 ? 4 : 5);";

/// Deepest nesting of parentheses, `!` and `?:` a header may use.
const MAX_DEPTH: usize = 64;

/// A language's plural selection rule.
#[derive(Clone, PartialEq, Eq)]
pub struct PluralRule {
    nplurals: usize,
    expr: Expr,
    source: String,
}

impl fmt::Debug for PluralRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluralRule")
            .field("nplurals", &self.nplurals)
            .field("plural", &self.source)
            .finish()
    }
}

impl PluralRule {
    /// English-like: form 0 for exactly one, form 1 otherwise.
    pub fn germanic() -> Self {
        Self {
            nplurals: 2,
            expr: Expr::Binary(BinOp::Ne, Box::new(Expr::N), Box::new(Expr::Num(1))),
            source: "(n != 1)".to_string(),
        }
    }

    /// The conventional gettext rule for a language code such as `fr` or `ru`.
    pub fn for_language(language: &str) -> Self {
        let header = match language.to_ascii_lowercase().as_str() {
            "fr" | "hi" | "bn" | "am" | "fa" | "tl" | "ln" | "oc" => FRENCH,
            "ja" | "zh" | "ko" | "th" | "vi" | "id" | "ms" | "lo" | "my" => SINGLE,
            "ru" | "uk" | "be" | "sr" | "hr" | "bs" => EAST_SLAVIC,
            "pl" => POLISH,
            "cs" | "sk" => WEST_SLAVIC,
            "ar" => ARABIC,
            _ => GERMANIC,
        };

        Self::parse_header(header).unwrap_or_else(|e| {
            error!("Built-in plural rule for '{}' failed to parse: {}", language, e);
            Self::germanic()
        })
    }

    /// Parses a `Plural-Forms` header value: `nplurals=N; plural=EXPR;`
    pub fn parse_header(header: &str) -> I18nResult<Self> {
        let invalid = |reason: &str| I18nError::PluralForms {
            expr: header.to_string(),
            reason: reason.to_string(),
        };

        let nplurals = header
            .split(';')
            .filter_map(|part| part.trim().strip_prefix("nplurals="))
            .next()
            .ok_or_else(|| invalid("missing nplurals"))?
            .trim()
            .parse::<usize>()
            .map_err(|_| invalid("nplurals is not a number"))?;

        let start = header.find("plural=").ok_or_else(|| invalid("missing plural"))?;
        let expression = header[start + "plural=".len()..]
            .trim()
            .trim_end_matches(';')
            .trim();

        Self::from_expression(nplurals, expression)
    }

    /// Builds a rule from a form count and a C expression over `n`.
    pub fn from_expression(nplurals: usize, expression: &str) -> I18nResult<Self> {
        if nplurals == 0 {
            return Err(I18nError::PluralForms {
                expr: expression.to_string(),
                reason: "nplurals must be at least 1".to_string(),
            });
        }

        let expr = Parser::new(expression)
            .and_then(Parser::parse)
            .map_err(|reason| I18nError::PluralForms {
                expr: expression.to_string(),
                reason,
            })?;

        Ok(Self {
            nplurals,
            expr,
            source: expression.to_string(),
        })
    }

    /// Number of distinct forms.
    pub fn nplurals(&self) -> usize {
        self.nplurals
    }

    /// The expression this rule was built from.
    pub fn expression(&self) -> &str {
        &self.source
    }

    /// Selects the form index for `count`. Negative counts use their
    /// magnitude; out-of-range results select form 0.
    pub fn select(&self, count: i64) -> usize {
        let index = self.expr.eval(count.unsigned_abs());
        usize::try_from(index)
            .ok()
            .filter(|index| *index < self.nplurals)
            .unwrap_or(0)
    }
}

impl Default for PluralRule {
    fn default() -> Self {
        Self::germanic()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BinOp {
    Or,
    And,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Expr {
    N,
    Num(u64),
    Not(Box<Expr>),
    Binary(BinOp, Box<Expr>, Box<Expr>),
    Ternary(Box<Expr>, Box<Expr>, Box<Expr>),
}

impl Expr {
    fn eval(&self, n: u64) -> u64 {
        match self {
            Self::N => n,
            Self::Num(value) => *value,
            Self::Not(inner) => u64::from(inner.eval(n) == 0),
            Self::Ternary(cond, then, otherwise) => {
                if cond.eval(n) != 0 {
                    then.eval(n)
                } else {
                    otherwise.eval(n)
                }
            }
            Self::Binary(op, lhs, rhs) => {
                let a = lhs.eval(n);
                // short-circuit like C
                match op {
                    BinOp::Or if a != 0 => return 1,
                    BinOp::And if a == 0 => return 0,
                    _ => {}
                }
                let b = rhs.eval(n);
                match op {
                    BinOp::Or | BinOp::And => u64::from(b != 0),
                    BinOp::Eq => u64::from(a == b),
                    BinOp::Ne => u64::from(a != b),
                    BinOp::Lt => u64::from(a < b),
                    BinOp::Le => u64::from(a <= b),
                    BinOp::Gt => u64::from(a > b),
                    BinOp::Ge => u64::from(a >= b),
                    BinOp::Add => a.wrapping_add(b),
                    BinOp::Sub => a.wrapping_sub(b),
                    BinOp::Mul => a.wrapping_mul(b),
                    BinOp::Div => a.checked_div(b).unwrap_or(0),
                    BinOp::Rem => a.checked_rem(b).unwrap_or(0),
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    N,
    Num(u64),
    Op(&'static str),
    LParen,
    RParen,
    Question,
    Colon,
}

fn tokenize(input: &str) -> Result<Vec<Token>, String> {
    const OPERATORS: [&str; 15] = [
        "||", "&&", "==", "!=", "<=", ">=", "<", ">", "+", "-", "*", "/", "%", "!", "=",
    ];

    let mut tokens = Vec::new();
    let mut rest = input;
    while let Some(c) = rest.chars().next() {
        if c.is_whitespace() {
            rest = &rest[c.len_utf8()..];
            continue;
        }
        if c.is_ascii_digit() {
            let end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
            let value = rest[..end]
                .parse::<u64>()
                .map_err(|_| format!("number out of range: {}", &rest[..end]))?;
            tokens.push(Token::Num(value));
            rest = &rest[end..];
            continue;
        }
        let (token, len) = match c {
            'n' => (Token::N, 1),
            '(' => (Token::LParen, 1),
            ')' => (Token::RParen, 1),
            '?' => (Token::Question, 1),
            ':' => (Token::Colon, 1),
            _ => match OPERATORS.iter().find(|op| rest.starts_with(**op)) {
                // a lone '=' is never valid
                Some(&"=") | None => return Err(format!("unexpected character {c:?}")),
                Some(op) => (Token::Op(*op), op.len()),
            },
        };
        tokens.push(token);
        rest = &rest[len..];
    }
    Ok(tokens)
}

/// Precedence-climbing parser over the C subset used by `Plural-Forms`.
struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn new(input: &str) -> Result<Self, String> {
        Ok(Self {
            tokens: tokenize(input)?,
            pos: 0,
            depth: 0,
        })
    }

    fn parse(mut self) -> Result<Expr, String> {
        let expr = self.ternary()?;
        match self.peek() {
            None => Ok(expr),
            Some(token) => Err(format!("unexpected trailing token {token:?}")),
        }
    }

    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<Token> {
        let token = self.peek();
        self.pos += 1;
        token
    }

    fn expect(&mut self, expected: Token) -> Result<(), String> {
        match self.bump() {
            Some(token) if token == expected => Ok(()),
            other => Err(format!("expected {expected:?}, found {other:?}")),
        }
    }

    /// Runs `f` one nesting level deeper.
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T, String>) -> Result<T, String> {
        if self.depth >= MAX_DEPTH {
            return Err("expression nested too deeply".to_string());
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn ternary(&mut self) -> Result<Expr, String> {
        self.nested(Self::ternary_at_depth)
    }

    fn ternary_at_depth(&mut self) -> Result<Expr, String> {
        let cond = self.binary(0)?;
        if self.peek() != Some(Token::Question) {
            return Ok(cond);
        }
        self.bump();
        let then = self.ternary()?;
        self.expect(Token::Colon)?;
        let otherwise = self.ternary()?;
        Ok(Expr::Ternary(Box::new(cond), Box::new(then), Box::new(otherwise)))
    }

    fn binary(&mut self, min_level: u8) -> Result<Expr, String> {
        let mut lhs = self.unary()?;
        while let Some(Token::Op(symbol)) = self.peek() {
            let Some((op, level)) = binary_op(symbol) else {
                break;
            };
            if level < min_level {
                break;
            }
            self.bump();
            let rhs = self.binary(level + 1)?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> Result<Expr, String> {
        match self.bump() {
            Some(Token::Op("!")) => Ok(Expr::Not(Box::new(self.nested(Self::unary)?))),
            Some(Token::N) => Ok(Expr::N),
            Some(Token::Num(value)) => Ok(Expr::Num(value)),
            Some(Token::LParen) => {
                let inner = self.ternary()?;
                self.expect(Token::RParen)?;
                Ok(inner)
            }
            other => Err(format!("unexpected token {other:?}")),
        }
    }
}

fn binary_op(symbol: &str) -> Option<(BinOp, u8)> {
    let op = match symbol {
        "||" => (BinOp::Or, 0),
        "&&" => (BinOp::And, 1),
        "==" => (BinOp::Eq, 2),
        "!=" => (BinOp::Ne, 2),
        "<" => (BinOp::Lt, 3),
        "<=" => (BinOp::Le, 3),
        ">" => (BinOp::Gt, 3),
        ">=" => (BinOp::Ge, 3),
        "+" => (BinOp::Add, 4),
        "-" => (BinOp::Sub, 4),
        "*" => (BinOp::Mul, 5),
        "/" => (BinOp::Div, 5),
        "%" => (BinOp::Rem, 5),
        _ => return None,
    };
    Some(op)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_germanic_rule() {
        let rule = PluralRule::germanic();
        assert_eq!(rule.nplurals(), 2);
        assert_eq!(rule.select(0), 1);
        assert_eq!(rule.select(1), 0);
        assert_eq!(rule.select(2), 1);
        assert_eq!(rule.select(-1), 0);
    }

    #[test]
    fn test_french_header() {
        let rule = PluralRule::parse_header("nplurals=2; plural=(n > 1);").unwrap();
        assert_eq!(rule.select(0), 0);
        assert_eq!(rule.select(1), 0);
        assert_eq!(rule.select(2), 1);
        assert_eq!(rule.expression(), "(n > 1)");
    }

    #[test]
    fn test_russian_rule() {
        let rule = PluralRule::for_language("ru");
        assert_eq!(rule.nplurals(), 3);
        let forms: Vec<usize> = [1, 2, 5, 11, 21, 22, 25, 111, 112].iter().map(|n| rule.select(*n)).collect();
        assert_eq!(forms, vec![0, 1, 2, 2, 0, 1, 2, 2, 2]);
    }

    #[test]
    fn test_arabic_rule() {
        let rule = PluralRule::for_language("AR");
        let forms: Vec<usize> = [0, 1, 2, 3, 11, 100].iter().map(|n| rule.select(*n)).collect();
        assert_eq!(forms, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_west_slavic_rule_without_outer_parens() {
        let rule = PluralRule::for_language("cs");
        assert_eq!(rule.select(1), 0);
        assert_eq!(rule.select(3), 1);
        assert_eq!(rule.select(5), 2);
    }

    #[test]
    fn test_single_form_languages() {
        let rule = PluralRule::for_language("ja");
        assert_eq!(rule.nplurals(), 1);
        assert_eq!(rule.select(1), 0);
        assert_eq!(rule.select(42), 0);
    }

    #[test]
    fn test_out_of_range_selects_first_form() {
        let rule = PluralRule::from_expression(2, "n").unwrap();
        assert_eq!(rule.select(1), 1);
        assert_eq!(rule.select(7), 0);
    }

    #[test]
    fn test_division_by_zero_is_zero() {
        let rule = PluralRule::from_expression(2, "n / 0 + n % 0").unwrap();
        assert_eq!(rule.select(9), 0);
    }

    #[test]
    fn test_precedence_and_not() {
        let rule = PluralRule::from_expression(3, "!(n == 0) + 1 * (n > 5)").unwrap();
        assert_eq!(rule.select(0), 0);
        assert_eq!(rule.select(3), 1);
        assert_eq!(rule.select(6), 2);
    }

    #[test]
    fn test_invalid_expressions() {
        assert!(PluralRule::from_expression(2, "n = 1").is_err());
        assert!(PluralRule::from_expression(2, "(n > 1").is_err());
        assert!(PluralRule::from_expression(2, "x").is_err());
        assert!(PluralRule::from_expression(0, "0").is_err());
        assert!(PluralRule::parse_header("plural=n;").is_err());
        assert!(PluralRule::parse_header("nplurals=two; plural=n;").is_err());
    }

    #[test]
    fn test_deep_nesting_is_rejected() {
        let parens = format!("{}n{}", "(".repeat(100_000), ")".repeat(100_000));
        let negations = format!("{}n", "!".repeat(100_000));
        let ternaries = format!("{}0", "n ? 1 : ".repeat(100_000));

        for expression in [parens, negations, ternaries] {
            match PluralRule::from_expression(2, &expression) {
                Err(I18nError::PluralForms { reason, .. }) => {
                    assert_eq!(reason, "expression nested too deeply");
                }
                other => panic!("expected a nesting error, got {other:?}"),
            }
        }

        let shallow = format!("{}n > 1{}", "(".repeat(20), ")".repeat(20));
        assert_eq!(PluralRule::from_expression(2, &shallow).unwrap().select(2), 1);
    }
}
