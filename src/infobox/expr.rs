// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Restricted arithmetic evaluator
//!
//! Accepts decimal numbers, parentheses and the operators `+ - * / // **`.
//! There are no names, calls or other expression forms, so nothing but
//! arithmetic can ever run.
//!
//! Precedence, lowest first:
//! - `+`, `-`
//! - `*`, `/`, `//`
//! - unary `+`, `-`
//! - `**` (right-associative; `-2**2` is `-(2**2)`)

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};
use std::fmt;
use thiserror::Error;

/// Longest integer answer, in decimal digits (the REPL's int-to-string limit)
pub const MAX_INT_DIGITS: usize = 4300;

/// Integers with more bits than this always exceed `MAX_INT_DIGITS`
const MAX_RESULT_BITS: u64 = 14_286;

/// Ceiling on intermediate integers; a power that would outgrow it is rejected
/// before it is computed
const MAX_WORKING_BITS: u64 = 1 << 20;

/// Result of an evaluation. Integers are exact and unbounded until an
/// operation needs a float.
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    Int(BigInt),
    Float(f64),
}

/// Reasons an expression cannot be evaluated
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("invalid syntax at offset {0}")]
    Syntax(usize),

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("division by zero")]
    DivisionByZero,

    #[error("numeric overflow")]
    Overflow,

    #[error("integer result too large")]
    TooLarge,

    #[error("math domain error")]
    Domain,
}

type EvalResult = Result<Number, EvalError>;

/// Evaluate an arithmetic expression
pub fn evaluate(input: &str) -> EvalResult {
    let tokens = tokenize(input)?;
    let mut parser = Parser { tokens, pos: 0 };
    let value = parser.expr()?;
    if let Some((_, offset)) = parser.tokens.get(parser.pos) {
        return Err(EvalError::Syntax(*offset));
    }

    if let Number::Int(i) = &value {
        if !fits_digit_limit(i) {
            return Err(EvalError::TooLarge);
        }
    }
    Ok(value)
}

fn fits_digit_limit(i: &BigInt) -> bool {
    i.bits() <= MAX_RESULT_BITS && i.magnitude().to_string().len() <= MAX_INT_DIGITS
}

/// Keep intermediate integers within the working ceiling
fn checked_int(value: BigInt) -> EvalResult {
    if value.bits() > MAX_WORKING_BITS {
        return Err(EvalError::TooLarge);
    }
    Ok(Number::Int(value))
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Num(Number),
    Plus,
    Minus,
    Star,
    DoubleStar,
    Slash,
    DoubleSlash,
    LParen,
    RParen,
}

fn tokenize(input: &str) -> Result<Vec<(Token, usize)>, EvalError> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(offset, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        if c.is_ascii_digit() || c == '.' {
            let mut literal = String::new();
            while let Some(&(_, d)) = chars.peek() {
                if d.is_ascii_digit() || (d == '.' && !literal.contains('.')) {
                    literal.push(d);
                    chars.next();
                } else {
                    break;
                }
            }
            tokens.push((Token::Num(parse_literal(&literal, offset)?), offset));
            continue;
        }

        chars.next();
        let token = match c {
            '+' => Token::Plus,
            '-' => Token::Minus,
            '(' => Token::LParen,
            ')' => Token::RParen,
            '*' if matches!(chars.peek(), Some(&(_, '*'))) => {
                chars.next();
                Token::DoubleStar
            }
            '*' => Token::Star,
            '/' if matches!(chars.peek(), Some(&(_, '/'))) => {
                chars.next();
                Token::DoubleSlash
            }
            '/' => Token::Slash,
            _ => return Err(EvalError::Syntax(offset)),
        };
        tokens.push((token, offset));
    }

    Ok(tokens)
}

fn parse_literal(literal: &str, offset: usize) -> Result<Number, EvalError> {
    if literal == "." {
        return Err(EvalError::Syntax(offset));
    }

    if literal.contains('.') {
        return literal
            .parse::<f64>()
            .map(Number::Float)
            .map_err(|_| EvalError::Syntax(offset));
    }

    // `07` is not a valid integer literal; `0` and `00` are
    if literal.len() > 1 && literal.starts_with('0') && literal.chars().any(|d| d != '0') {
        return Err(EvalError::Syntax(offset));
    }

    if literal.len() > MAX_INT_DIGITS {
        return Err(EvalError::TooLarge);
    }

    literal
        .parse::<BigInt>()
        .map(Number::Int)
        .map_err(|_| EvalError::Syntax(offset))
}

struct Parser {
    tokens: Vec<(Token, usize)>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).map(|(t, _)| t.clone())
    }

    fn advance(&mut self) -> Option<(Token, usize)> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expr(&mut self) -> EvalResult {
        let mut left = self.term()?;
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.advance();
                    left = left.add(self.term()?)?;
                }
                Some(Token::Minus) => {
                    self.advance();
                    left = left.sub(self.term()?)?;
                }
                _ => return Ok(left),
            }
        }
    }

    fn term(&mut self) -> EvalResult {
        let mut left = self.unary()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.advance();
                    left = left.mul(self.unary()?)?;
                }
                Some(Token::Slash) => {
                    self.advance();
                    left = left.div(self.unary()?)?;
                }
                Some(Token::DoubleSlash) => {
                    self.advance();
                    left = left.floor_div(self.unary()?)?;
                }
                _ => return Ok(left),
            }
        }
    }

    fn unary(&mut self) -> EvalResult {
        match self.peek() {
            Some(Token::Plus) => {
                self.advance();
                self.unary()
            }
            Some(Token::Minus) => {
                self.advance();
                self.unary()?.neg()
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> EvalResult {
        let base = self.atom()?;
        if matches!(self.peek(), Some(Token::DoubleStar)) {
            self.advance();
            let exponent = self.unary()?;
            return base.pow(exponent);
        }
        Ok(base)
    }

    fn atom(&mut self) -> EvalResult {
        match self.advance() {
            Some((Token::Num(n), _)) => Ok(n),
            Some((Token::LParen, _)) => {
                let value = self.expr()?;
                match self.advance() {
                    Some((Token::RParen, _)) => Ok(value),
                    Some((_, offset)) => Err(EvalError::Syntax(offset)),
                    None => Err(EvalError::UnexpectedEnd),
                }
            }
            Some((_, offset)) => Err(EvalError::Syntax(offset)),
            None => Err(EvalError::UnexpectedEnd),
        }
    }
}

impl Number {
    /// Float view of the value; integers outside the float range overflow
    fn as_f64(&self) -> Result<f64, EvalError> {
        match self {
            Number::Int(i) => i
                .to_f64()
                .filter(|f| f.is_finite())
                .ok_or(EvalError::Overflow),
            Number::Float(f) => Ok(*f),
        }
    }

    fn is_zero(&self) -> bool {
        match self {
            Number::Int(i) => i.is_zero(),
            Number::Float(f) => *f == 0.0,
        }
    }

    fn arith(
        self,
        rhs: Number,
        int: fn(BigInt, BigInt) -> BigInt,
        float: fn(f64, f64) -> f64,
    ) -> EvalResult {
        match (self, rhs) {
            (Number::Int(a), Number::Int(b)) => checked_int(int(a, b)),
            (a, b) => Ok(Number::Float(float(a.as_f64()?, b.as_f64()?))),
        }
    }

    fn add(self, rhs: Number) -> EvalResult {
        self.arith(rhs, |a, b| a + b, |a, b| a + b)
    }

    fn sub(self, rhs: Number) -> EvalResult {
        self.arith(rhs, |a, b| a - b, |a, b| a - b)
    }

    fn mul(self, rhs: Number) -> EvalResult {
        self.arith(rhs, |a, b| a * b, |a, b| a * b)
    }

    fn div(self, rhs: Number) -> EvalResult {
        if rhs.is_zero() {
            return Err(EvalError::DivisionByZero);
        }
        Ok(Number::Float(self.as_f64()? / rhs.as_f64()?))
    }

    fn floor_div(self, rhs: Number) -> EvalResult {
        if rhs.is_zero() {
            return Err(EvalError::DivisionByZero);
        }
        self.arith(rhs, |a, b| a.div_floor(&b), |a, b| (a / b).floor())
    }

    fn neg(self) -> EvalResult {
        match self {
            Number::Int(i) => Ok(Number::Int(-i)),
            Number::Float(f) => Ok(Number::Float(-f)),
        }
    }

    fn pow(self, exponent: Number) -> EvalResult {
        if let (Number::Int(base), Number::Int(exp)) = (&self, &exponent) {
            if !exp.is_negative() {
                return int_pow(base, exp);
            }
        }

        let (base, exp) = (self.as_f64()?, exponent.as_f64()?);
        if base == 0.0 && exp < 0.0 {
            return Err(EvalError::DivisionByZero);
        }
        if base < 0.0 && exp.fract() != 0.0 {
            return Err(EvalError::Domain);
        }

        let value = base.powf(exp);
        if !value.is_finite() && base.is_finite() && exp.is_finite() {
            return Err(EvalError::Overflow);
        }
        Ok(Number::Float(value))
    }
}

/// Exact power with a non-negative exponent
fn int_pow(base: &BigInt, exp: &BigInt) -> EvalResult {
    if exp.is_zero() {
        return Ok(Number::Int(BigInt::one()));
    }
    if base.is_zero() || base.is_one() {
        return Ok(Number::Int(base.clone()));
    }
    if *base == -BigInt::one() {
        let value = if exp.is_even() { BigInt::one() } else { -BigInt::one() };
        return Ok(Number::Int(value));
    }

    // |base| >= 2, so the result has more than (bits - 1) * exp bits
    let lower_bound = exp
        .to_u64()
        .and_then(|e| e.checked_mul(base.bits() - 1));
    match (lower_bound, exp.to_u32()) {
        (Some(bits), Some(exp)) if bits <= MAX_WORKING_BITS => checked_int(base.pow(exp)),
        _ => Err(EvalError::TooLarge),
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{}", i),
            Number::Float(x) => f.write_str(&format_float(*x)),
        }
    }
}

/// Shortest round-trip float text, always marked as a float (`4.0`, `1e+16`)
fn format_float(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let abs = x.abs();
    if abs != 0.0 && !(1e-4..1e16).contains(&abs) {
        let formatted = format!("{:e}", x);
        return match formatted.split_once('e') {
            Some((mantissa, exp)) => {
                let exp: i32 = exp.parse().unwrap_or(0);
                let sign = if exp < 0 { '-' } else { '+' };
                format!("{}e{}{:02}", mantissa, sign, exp.abs())
            }
            None => formatted,
        };
    }

    if x.fract() == 0.0 {
        format!("{:.1}", x)
    } else {
        format!("{}", x)
    }
}
