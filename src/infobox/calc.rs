// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Arithmetic instant answers

use async_trait::async_trait;
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

use super::expr::evaluate;
use super::strategy::InfoboxStrategy;
use super::types::Infobox;
use crate::search::SearchResultItem;

/// Characters an expression may contain; only a plain space separates tokens
const EXPR_CLASS: &str = r"[+\-/*÷x()0-9.^ ]+";

/// Query templates, tried in order. The first one that matches decides.
fn patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            format!(r"(?i)^what is ({EXPR_CLASS})$"),
            format!(r"(?i)^solve ({EXPR_CLASS})$"),
            format!(r"(?i)^calc ({EXPR_CLASS})$"),
            format!(r"(?i)^calculate ({EXPR_CLASS})$"),
            format!(r"(?i)^({EXPR_CLASS})$"),
            format!(r"(?i)^({EXPR_CLASS})=$"),
        ]
        .iter()
        .filter_map(|p| Regex::new(p).ok())
        .collect()
    })
}

/// Pull the expression out of a query, if any template matches
pub fn extract_expression(query: &str) -> Option<&str> {
    patterns()
        .iter()
        .find_map(|re| re.captures(query))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

/// Rewrite operator aliases: `x` to `*`, `÷` to `/`, `^` to `**`.
/// Templates match case-insensitively, so `X` is a multiplication too.
pub fn normalize_operators(expression: &str) -> String {
    let mut out = String::with_capacity(expression.len());
    for c in expression.chars() {
        match c {
            'x' | 'X' => out.push('*'),
            '÷' => out.push('/'),
            '^' => out.push_str("**"),
            other => out.push(other),
        }
    }
    out
}

/// Evaluates arithmetic queries such as `2+2`, `what is 3x3` or `5^2=`
#[derive(Debug, Default)]
pub struct CalcStrategy;

impl CalcStrategy {
    pub fn new() -> Self {
        Self
    }

    /// Synchronous core of [`InfoboxStrategy::resolve`]
    pub fn solve(&self, query: &str) -> Option<Infobox> {
        let expression = extract_expression(query)?;
        let equ = normalize_operators(expression);

        match evaluate(&equ) {
            Ok(value) => Some(Infobox::Calc {
                result: value.to_string(),
                equ,
            }),
            Err(e) => {
                debug!(equ = %equ, error = %e, "Expression could not be evaluated");
                None
            }
        }
    }
}

#[async_trait]
impl InfoboxStrategy for CalcStrategy {
    async fn resolve(&self, query: &str, _web_results: &[SearchResultItem]) -> Option<Infobox> {
        self.solve(query)
    }

    fn name(&self) -> &'static str {
        "calc"
    }

    fn priority(&self) -> u8 {
        10
    }
}
