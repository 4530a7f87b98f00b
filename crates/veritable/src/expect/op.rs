//! Expectation grammar: operator tokens and string parsing.

use serde::{Deserialize, Serialize};

use crate::error::{Result, VeritableError};

/// The fixed operator set an expectation string can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    /// `EQ` / `SEQ` — lexical equality.
    Equals,
    /// `NE` / `NEQ` — lexical inequality.
    NotEquals,
    /// `GE` — numeric ≥.
    GreaterOrEqual,
    /// `GT` — numeric >.
    GreaterThan,
    /// `LE` — numeric ≤.
    LessOrEqual,
    /// `LT` — numeric <.
    LessThan,
    /// `TL` — inside the inclusive tolerance band.
    Within,
    /// `NTL` — outside the inclusive tolerance band.
    NotWithin,
}

impl Operator {
    /// Resolve a grammar token. Tokens are case-sensitive.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "EQ" | "SEQ" => Some(Operator::Equals),
            "NE" | "NEQ" => Some(Operator::NotEquals),
            "GE" => Some(Operator::GreaterOrEqual),
            "GT" => Some(Operator::GreaterThan),
            "LE" => Some(Operator::LessOrEqual),
            "LT" => Some(Operator::LessThan),
            "TL" => Some(Operator::Within),
            "NTL" => Some(Operator::NotWithin),
            _ => None,
        }
    }

    /// Natural-language name used in verdict descriptions.
    pub fn name(&self) -> &'static str {
        match self {
            Operator::Equals => "Equals",
            Operator::NotEquals => "Not Equals",
            Operator::GreaterOrEqual => "Greater Than or Equals",
            Operator::GreaterThan => "Greater Than",
            Operator::LessOrEqual => "Less Than or Equals",
            Operator::LessThan => "Less Than",
            Operator::Within => "Within",
            Operator::NotWithin => "Not Within",
        }
    }

    /// Comparison symbol for compact presentation.
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Equals => "=",
            Operator::NotEquals => "<>",
            Operator::GreaterOrEqual => ">=",
            Operator::GreaterThan => ">",
            Operator::LessOrEqual => "<=",
            Operator::LessThan => "<",
            Operator::Within | Operator::NotWithin => "±",
        }
    }

    /// Whether this operator takes a center value and a tolerance.
    pub fn is_tolerance(&self) -> bool {
        matches!(self, Operator::Within | Operator::NotWithin)
    }
}

/// A parsed expectation: operator plus operand(s).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expectation {
    /// The resolved operator.
    pub operator: Operator,
    /// Comparison operand, or the band center for tolerance operators.
    pub operand: String,
    /// Tolerance magnitude; present only for tolerance operators.
    pub tolerance: Option<String>,
}

impl Expectation {
    /// Parse an expectation string of the form `OP,<operand>[,<operand>]`.
    ///
    /// The token is the text before the first comma. For `TL`/`NTL` the
    /// remainder is split on the *last* comma, so the center value may
    /// itself contain commas (formatted numbers). Operands are taken
    /// verbatim after the split.
    pub fn parse(expectation: &str) -> Result<Self> {
        let trimmed = expectation.trim();

        let (token, rest) = match trimmed.split_once(',') {
            Some((token, rest)) => (token.trim(), Some(rest)),
            None => (trimmed, None),
        };

        let operator = Operator::from_token(token)
            .ok_or_else(|| VeritableError::UnsupportedOperator(token.to_string()))?;

        let rest = rest.ok_or_else(|| VeritableError::MalformedExpectation {
            expectation: expectation.to_string(),
            reason: format!("operator {token} requires an operand"),
        })?;

        if operator.is_tolerance() {
            let (center, tolerance) =
                rest.rsplit_once(',')
                    .ok_or_else(|| VeritableError::MalformedExpectation {
                        expectation: expectation.to_string(),
                        reason: format!("operator {token} requires a center value and a tolerance"),
                    })?;
            Ok(Self {
                operator,
                operand: center.to_string(),
                tolerance: Some(tolerance.to_string()),
            })
        } else {
            Ok(Self {
                operator,
                operand: rest.to_string(),
                tolerance: None,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_comparison() {
        let exp = Expectation::parse("EQ,30").unwrap();
        assert_eq!(exp.operator, Operator::Equals);
        assert_eq!(exp.operand, "30");
        assert_eq!(exp.tolerance, None);
    }

    #[test]
    fn test_parse_operand_keeps_commas() {
        // Only the first comma delimits; the operand is verbatim
        let exp = Expectation::parse("EQ,1,234.5").unwrap();
        assert_eq!(exp.operand, "1,234.5");
    }

    #[test]
    fn test_parse_tolerance_splits_on_last_comma() {
        let exp = Expectation::parse("TL,1,234,5").unwrap();
        assert_eq!(exp.operator, Operator::Within);
        assert_eq!(exp.operand, "1,234");
        assert_eq!(exp.tolerance.as_deref(), Some("5"));
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(
            Expectation::parse("SEQ,x").unwrap().operator,
            Operator::Equals
        );
        assert_eq!(
            Expectation::parse("NEQ,x").unwrap().operator,
            Operator::NotEquals
        );
    }

    #[test]
    fn test_unsupported_token() {
        assert!(matches!(
            Expectation::parse("ZZ,1"),
            Err(VeritableError::UnsupportedOperator(t)) if t == "ZZ"
        ));
        // Tokens are case-sensitive
        assert!(matches!(
            Expectation::parse("eq,1"),
            Err(VeritableError::UnsupportedOperator(_))
        ));
    }

    #[test]
    fn test_missing_operand() {
        assert!(matches!(
            Expectation::parse("EQ"),
            Err(VeritableError::MalformedExpectation { .. })
        ));
        assert!(matches!(
            Expectation::parse("TL,100"),
            Err(VeritableError::MalformedExpectation { .. })
        ));
    }

    #[test]
    fn test_leading_whitespace_tolerated() {
        let exp = Expectation::parse("  GE,17").unwrap();
        assert_eq!(exp.operator, Operator::GreaterOrEqual);
        assert_eq!(exp.operand, "17");
    }
}
