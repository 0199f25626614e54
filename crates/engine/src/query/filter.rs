//! `where` terms and their evaluation
//!
//! A [`Term`] is what callers write; a [`Predicate`] is the validated,
//! typed form the engine evaluates. Compilation is where ill-typed terms
//! are rejected, so evaluation itself cannot fail.
//!
//! Wire form (JSON):
//!
//! ```text
//! { "eq": "a" }            { "eq": ["a", "b"] }
//! { "gt": "2024-01-01T00:00:00Z" }
//! { "contains": "sub" }    { "contains": ["tok1", "tok2"] }
//! { "is": null }           { "not": { "eq": "a" } }
//! ```

use super::key::{IndexKey, KeyValue};
use docket_core::{DocketError, DocketResult, Document, Timestamp};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Operand of a term: a single value or a list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Operand {
    /// Scalar
    One(String),
    /// List
    Many(Vec<String>),
}

impl From<&str> for Operand {
    fn from(value: &str) -> Self {
        Operand::One(value.to_string())
    }
}

impl From<String> for Operand {
    fn from(value: String) -> Self {
        Operand::One(value)
    }
}

impl From<Vec<String>> for Operand {
    fn from(values: Vec<String>) -> Self {
        Operand::Many(values)
    }
}

/// One predicate on one key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Term {
    /// Equal to a value, or to any value of a list
    Eq(Operand),
    /// Strictly greater
    Gt(Operand),
    /// Greater or equal
    Gte(Operand),
    /// Strictly less
    Lt(Operand),
    /// Less or equal
    Lte(Operand),
    /// Substring (scalar) or all-tokens-present (list)
    Contains(Operand),
    /// Unset slot
    #[serde(rename = "is")]
    IsNull(()),
    /// Negation of a non-negated term
    Not(Box<Term>),
}

impl Term {
    /// `eq` against one value
    pub fn eq(value: impl Into<String>) -> Self {
        Term::Eq(Operand::One(value.into()))
    }

    /// `eq` against a list (one-of)
    pub fn one_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Term::Eq(Operand::Many(values.into_iter().map(Into::into).collect()))
    }

    /// `gt`
    pub fn gt(value: impl Into<String>) -> Self {
        Term::Gt(Operand::One(value.into()))
    }

    /// `gte`
    pub fn gte(value: impl Into<String>) -> Self {
        Term::Gte(Operand::One(value.into()))
    }

    /// `lt`
    pub fn lt(value: impl Into<String>) -> Self {
        Term::Lt(Operand::One(value.into()))
    }

    /// `lte`
    pub fn lte(value: impl Into<String>) -> Self {
        Term::Lte(Operand::One(value.into()))
    }

    /// Substring match
    pub fn contains(value: impl Into<String>) -> Self {
        Term::Contains(Operand::One(value.into()))
    }

    /// Every listed value is a token of the field
    pub fn contains_all<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Term::Contains(Operand::Many(values.into_iter().map(Into::into).collect()))
    }

    /// `is null`
    pub fn is_null() -> Self {
        Term::IsNull(())
    }

    /// Wrap in `not`
    pub fn negate(self) -> Self {
        Term::Not(Box::new(self))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RangeOp {
    Gt,
    Gte,
    Lt,
    Lte,
}

impl RangeOp {
    fn admits(self, ord: Ordering) -> bool {
        match self {
            RangeOp::Gt => ord == Ordering::Greater,
            RangeOp::Gte => ord != Ordering::Less,
            RangeOp::Lt => ord == Ordering::Less,
            RangeOp::Lte => ord != Ordering::Greater,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Check {
    TextIn(Vec<String>),
    TimeIn(Vec<Timestamp>),
    TextRange(RangeOp, String),
    TimeRange(RangeOp, Timestamp),
    Substring(String),
    Tokens(Vec<String>),
    IsNull,
}

/// Validated predicate on one key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    key: IndexKey,
    negated: bool,
    check: Check,
}

impl Predicate {
    /// Validate `term` against `key`
    ///
    /// # Errors
    ///
    /// `Configuration` for a nested `not`, a list given to a range operator,
    /// an empty list, `contains` on a timestamp key, or a timestamp operand
    /// that is not RFC 3339.
    pub fn compile(key: IndexKey, term: &Term) -> DocketResult<Self> {
        let (negated, inner) = match term {
            Term::Not(inner) => (true, &**inner),
            other => (false, other),
        };

        let check = match inner {
            Term::Eq(operand) => {
                let values = list(key, "eq", operand)?;
                if key.is_timestamp() {
                    Check::TimeIn(
                        values
                            .iter()
                            .map(|v| parse_time(key, v))
                            .collect::<DocketResult<_>>()?,
                    )
                } else {
                    Check::TextIn(values)
                }
            }
            Term::Gt(operand) => range(key, RangeOp::Gt, "gt", operand)?,
            Term::Gte(operand) => range(key, RangeOp::Gte, "gte", operand)?,
            Term::Lt(operand) => range(key, RangeOp::Lt, "lt", operand)?,
            Term::Lte(operand) => range(key, RangeOp::Lte, "lte", operand)?,
            Term::Contains(operand) => {
                if key.is_timestamp() {
                    return Err(DocketError::configuration(format!(
                        "'contains' is not supported on timestamp key '{}'",
                        key
                    )));
                }
                match operand {
                    Operand::One(value) => Check::Substring(value.clone()),
                    Operand::Many(_) => Check::Tokens(list(key, "contains", operand)?),
                }
            }
            Term::IsNull(()) => Check::IsNull,
            Term::Not(_) => {
                return Err(DocketError::configuration(format!(
                    "nested 'not' on key '{}'",
                    key
                )))
            }
        };

        Ok(Predicate {
            key,
            negated,
            check,
        })
    }

    /// Key this predicate tests
    pub fn key(&self) -> IndexKey {
        self.key
    }

    /// Whether the term was wrapped in `not`
    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// Accepted values if this is a non-negated text `eq`
    pub fn equality_values(&self) -> Option<&[String]> {
        match (&self.check, self.negated) {
            (Check::TextIn(values), false) => Some(values),
            _ => None,
        }
    }

    /// Evaluate against a document
    pub fn matches(&self, doc: &Document) -> bool {
        self.check.test(self.key.read(doc)) != self.negated
    }
}

impl Check {
    fn test(&self, value: KeyValue<'_>) -> bool {
        match (self, value) {
            (Check::IsNull, KeyValue::Text(v)) => v.is_none(),
            (Check::IsNull, KeyValue::Time(_)) => false,
            (_, KeyValue::Text(None)) => false,
            (Check::TextIn(values), KeyValue::Text(Some(v))) => values.iter().any(|x| x == v),
            (Check::TextRange(op, bound), KeyValue::Text(Some(v))) => {
                op.admits(v.cmp(bound.as_str()))
            }
            (Check::Substring(needle), KeyValue::Text(Some(v))) => v.contains(needle.as_str()),
            (Check::Tokens(wanted), KeyValue::Text(Some(v))) => {
                let tokens: Vec<&str> = tokenize(v).collect();
                wanted.iter().all(|w| tokens.contains(&w.as_str()))
            }
            (Check::TimeIn(values), KeyValue::Time(t)) => values.contains(&t),
            (Check::TimeRange(op, bound), KeyValue::Time(t)) => op.admits(t.cmp(bound)),
            // Compilation pairs text checks with text keys and time checks
            // with timestamp keys.
            _ => false,
        }
    }
}

/// Tokenized form of a field: split on whitespace and commas
pub fn tokenize(value: &str) -> impl Iterator<Item = &str> {
    value
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
}

fn list(key: IndexKey, op: &str, operand: &Operand) -> DocketResult<Vec<String>> {
    match operand {
        Operand::One(value) => Ok(vec![value.clone()]),
        Operand::Many(values) if values.is_empty() => Err(DocketError::configuration(format!(
            "'{}' on key '{}' has an empty list",
            op, key
        ))),
        Operand::Many(values) => Ok(values.clone()),
    }
}

fn range(key: IndexKey, op: RangeOp, name: &str, operand: &Operand) -> DocketResult<Check> {
    let value = match operand {
        Operand::One(value) => value,
        Operand::Many(_) => {
            return Err(DocketError::configuration(format!(
                "'{}' on key '{}' takes a single value",
                name, key
            )))
        }
    };
    if key.is_timestamp() {
        Ok(Check::TimeRange(op, parse_time(key, value)?))
    } else {
        Ok(Check::TextRange(op, value.clone()))
    }
}

fn parse_time(key: IndexKey, value: &str) -> DocketResult<Timestamp> {
    Timestamp::parse_rfc3339(value).ok_or_else(|| {
        DocketError::configuration(format!(
            "'{}' is not an RFC 3339 timestamp for key '{}'",
            value, key
        ))
    })
}
