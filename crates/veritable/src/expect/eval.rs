//! Operator evaluation: expectation string + actual value → verdict.
//!
//! Coercion policy: `EQ`/`SEQ`/`NE`/`NEQ` compare lexically, operand taken
//! verbatim after the grammar split. The ordering and tolerance operators
//! parse both sides as `f64` after normalization (trim, and strip ASCII
//! thousands-separator commas when the digit groups are well formed). A side
//! that fails to parse is a hard [`VeritableError::NonNumericOperand`] —
//! "could not evaluate" is never reported as FAIL.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VeritableError};

use super::op::{Expectation, Operator};

/// PASS/FAIL outcome of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    /// Whether this verdict is a pass.
    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Pass => write!(f, "PASS"),
            Verdict::Fail => write!(f, "FAIL"),
        }
    }
}

impl From<bool> for Verdict {
    fn from(pass: bool) -> Self {
        if pass { Verdict::Pass } else { Verdict::Fail }
    }
}

/// The full result of evaluating one expectation against one actual value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// Resolved expected value: the comparison operand, or the band center
    /// for tolerance operators.
    pub expected: String,
    /// Human-readable operator description, e.g. `Within ± 2`.
    pub description: String,
    /// The verdict.
    pub verdict: Verdict,
}

/// Parse `expectation` and evaluate it against `actual`.
pub fn evaluate(expectation: &str, actual: &str) -> Result<Evaluation> {
    Expectation::parse(expectation)?.evaluate(actual)
}

impl Expectation {
    /// Evaluate this parsed expectation against an actual value.
    pub fn evaluate(&self, actual: &str) -> Result<Evaluation> {
        let verdict = match self.operator {
            Operator::Equals => Verdict::from(actual == self.operand),
            Operator::NotEquals => Verdict::from(actual != self.operand),
            Operator::GreaterOrEqual => self.ordered(actual, |a, e| a >= e)?,
            Operator::GreaterThan => self.ordered(actual, |a, e| a > e)?,
            Operator::LessOrEqual => self.ordered(actual, |a, e| a <= e)?,
            Operator::LessThan => self.ordered(actual, |a, e| a < e)?,
            Operator::Within => Verdict::from(self.in_band(actual)?),
            Operator::NotWithin => Verdict::from(!self.in_band(actual)?),
        };

        let description = match &self.tolerance {
            Some(tolerance) => format!(
                "{} {} {}",
                self.operator.name(),
                self.operator.symbol(),
                tolerance.trim()
            ),
            None => self.operator.name().to_string(),
        };

        Ok(Evaluation {
            expected: self.operand.clone(),
            description,
            verdict,
        })
    }

    fn ordered(&self, actual: &str, cmp: impl Fn(f64, f64) -> bool) -> Result<Verdict> {
        let a = self.numeric(actual)?;
        let e = self.numeric(&self.operand)?;
        Ok(Verdict::from(cmp(a, e)))
    }

    fn in_band(&self, actual: &str) -> Result<bool> {
        let a = self.numeric(actual)?;
        let center = self.numeric(&self.operand)?;
        // parse() guarantees a tolerance for TL/NTL
        let tolerance = self.tolerance.as_deref().unwrap_or_default();
        let tol = self.numeric(tolerance)?;
        Ok(center - tol <= a && a <= center + tol)
    }

    fn numeric(&self, value: &str) -> Result<f64> {
        parse_number(value).ok_or_else(|| VeritableError::NonNumericOperand {
            operator: self.operator.name().to_string(),
            value: value.to_string(),
        })
    }
}

/// Grouped-thousands numeric literal, e.g. `1,234` or `-12,345.67`.
static GROUPED_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?\d{1,3}(,\d{3})+(\.\d+)?$").unwrap());

/// Parse a value as `f64`, accepting well-formed thousands separators.
///
/// `1,234.5` parses as `1234.5`; `1,2` stays non-numeric because its digit
/// groups do not line up.
pub fn parse_number(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if let Ok(n) = trimmed.parse::<f64>() {
        return Some(n);
    }
    if GROUPED_NUMBER.is_match(trimmed) {
        return trimmed.replace(',', "").parse().ok();
    }
    None
}
