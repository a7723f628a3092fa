use crate::error::ValidationError;
use serde_json::Value;
use std::str::FromStr;

/// Comparison operator of a filter condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Equals,
    NotEquals,
    Contains,
    NotContains,
    GreaterThan,
    LessThan,
    GreaterOrEqual,
    LessOrEqual,
    StartsWith,
    EndsWith,
}

impl Operator {
    pub const ALL: [Operator; 10] = [
        Operator::Equals,
        Operator::NotEquals,
        Operator::Contains,
        Operator::NotContains,
        Operator::GreaterThan,
        Operator::LessThan,
        Operator::GreaterOrEqual,
        Operator::LessOrEqual,
        Operator::StartsWith,
        Operator::EndsWith,
    ];

    /// Name accepted by `from_str` and shown in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Operator::Equals => "EQUALS",
            Operator::NotEquals => "NOT_EQUALS",
            Operator::Contains => "CONTAINS",
            Operator::NotContains => "NOT_CONTAINS",
            Operator::GreaterThan => "GREATER_THAN",
            Operator::LessThan => "LESS_THAN",
            Operator::GreaterOrEqual => "GREATER_OR_EQUAL",
            Operator::LessOrEqual => "LESS_OR_EQUAL",
            Operator::StartsWith => "STARTS_WITH",
            Operator::EndsWith => "ENDS_WITH",
        }
    }

    /// Token embedded in the serialized condition.
    pub fn token(&self) -> &'static str {
        match self {
            Operator::Equals => "=",
            Operator::NotEquals => "<>",
            Operator::Contains => "contains",
            Operator::NotContains => "not_contains",
            Operator::GreaterThan => ">",
            Operator::LessThan => "<",
            Operator::GreaterOrEqual => ">=",
            Operator::LessOrEqual => "<=",
            Operator::StartsWith => "starts_with",
            Operator::EndsWith => "ends_with",
        }
    }

    fn accepts(&self, value: &ConditionValue) -> bool {
        match self {
            Operator::Equals | Operator::NotEquals => true,
            Operator::GreaterThan
            | Operator::LessThan
            | Operator::GreaterOrEqual
            | Operator::LessOrEqual => matches!(
                value,
                ConditionValue::Int(_) | ConditionValue::Float(_) | ConditionValue::Date(_)
            ),
            Operator::Contains
            | Operator::NotContains
            | Operator::StartsWith
            | Operator::EndsWith => matches!(value, ConditionValue::Text(_)),
        }
    }
}

impl FromStr for Operator {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::ALL
            .iter()
            .find(|op| op.name() == s)
            .copied()
            .ok_or_else(|| ValidationError::UnknownOperator {
                name: s.to_string(),
            })
    }
}

/// Scalar operand of a condition. Text and dates serialize quoted,
/// numbers and booleans bare. Dates ride through as `YYYY-MM-DD` strings;
/// the API compares them lexicographically.
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionValue {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Date(String),
}

impl ConditionValue {
    pub fn date(value: impl Into<String>) -> Self {
        ConditionValue::Date(value.into())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ConditionValue::Text(_) => "text",
            ConditionValue::Int(_) => "integer",
            ConditionValue::Float(_) => "float",
            ConditionValue::Bool(_) => "boolean",
            ConditionValue::Date(_) => "date",
        }
    }

    fn to_json(&self) -> Value {
        match self {
            ConditionValue::Text(text) | ConditionValue::Date(text) => {
                Value::String(text.clone())
            }
            ConditionValue::Int(n) => Value::from(*n),
            ConditionValue::Float(f) => Value::from(*f),
            ConditionValue::Bool(b) => Value::Bool(*b),
        }
    }
}

impl From<&str> for ConditionValue {
    fn from(value: &str) -> Self {
        ConditionValue::Text(value.to_string())
    }
}

impl From<String> for ConditionValue {
    fn from(value: String) -> Self {
        ConditionValue::Text(value)
    }
}

impl From<i64> for ConditionValue {
    fn from(value: i64) -> Self {
        ConditionValue::Int(value)
    }
}

impl From<i32> for ConditionValue {
    fn from(value: i32) -> Self {
        ConditionValue::Int(value as i64)
    }
}

impl From<u32> for ConditionValue {
    fn from(value: u32) -> Self {
        ConditionValue::Int(value as i64)
    }
}

impl From<f64> for ConditionValue {
    fn from(value: f64) -> Self {
        ConditionValue::Float(value)
    }
}

impl From<bool> for ConditionValue {
    fn from(value: bool) -> Self {
        ConditionValue::Bool(value)
    }
}

/// One column comparison, validated at construction. Invalid combinations
/// never reach the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    column: String,
    operator: Operator,
    value: ConditionValue,
}

impl Condition {
    pub fn new(
        column: impl Into<String>,
        operator: Operator,
        value: impl Into<ConditionValue>,
    ) -> Result<Self, ValidationError> {
        let column = column.into();
        let value = value.into();

        if column.trim().is_empty() {
            return Err(ValidationError::EmptyColumn);
        }
        if let ConditionValue::Float(f) = value {
            if !f.is_finite() {
                return Err(ValidationError::NonFiniteNumber { column });
            }
        }
        if !operator.accepts(&value) {
            return Err(ValidationError::IncompatibleValue {
                column,
                operator: operator.name().to_string(),
                kind: value.kind().to_string(),
            });
        }

        Ok(Condition {
            column,
            operator,
            value,
        })
    }

    /// Builds a condition with the operator given by its upper-case name.
    pub fn parse(
        column: impl Into<String>,
        operator: &str,
        value: impl Into<ConditionValue>,
    ) -> Result<Self, ValidationError> {
        Self::new(column, operator.parse()?, value)
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn value(&self) -> &ConditionValue {
        &self.value
    }

    fn to_fragment(&self) -> Value {
        Value::Array(vec![
            Value::String(self.column.clone()),
            Value::String(self.operator.token().to_string()),
            self.value.to_json(),
        ])
    }
}

/// Ordered, non-empty sequence of conditions. The API combines the entries
/// conjunctively; there is no way to express OR in this grammar.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionSet {
    conditions: Vec<Condition>,
}

impl ConditionSet {
    pub fn new(conditions: Vec<Condition>) -> Result<Self, ValidationError> {
        if conditions.is_empty() {
            return Err(ValidationError::EmptyConditionSet);
        }
        Ok(ConditionSet { conditions })
    }

    pub fn single(condition: Condition) -> Self {
        ConditionSet {
            conditions: vec![condition],
        }
    }

    pub fn and(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Nested-array encoding: one bracketed entry per condition, in
    /// insertion order. Built through `serde_json` so string escaping and
    /// number formatting are exact.
    pub fn serialize(&self) -> String {
        Value::Array(self.conditions.iter().map(Condition::to_fragment).collect()).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_parse_known_names() {
        assert_eq!("EQUALS".parse::<Operator>().unwrap(), Operator::Equals);
        assert_eq!(
            "GREATER_OR_EQUAL".parse::<Operator>().unwrap(),
            Operator::GreaterOrEqual
        );
        assert_eq!(
            "STARTS_WITH".parse::<Operator>().unwrap(),
            Operator::StartsWith
        );
    }

    #[test]
    fn test_operator_parse_rejects_unknown() {
        let err = "BOGUS_OP".parse::<Operator>().unwrap_err();
        assert!(matches!(
            err,
            ValidationError::UnknownOperator { ref name } if name == "BOGUS_OP"
        ));
    }

    #[test]
    fn test_operator_tokens() {
        assert_eq!(Operator::Equals.token(), "=");
        assert_eq!(Operator::NotEquals.token(), "<>");
        assert_eq!(Operator::GreaterOrEqual.token(), ">=");
        assert_eq!(Operator::NotContains.token(), "not_contains");
        assert_eq!(Operator::EndsWith.token(), "ends_with");
    }

    #[test]
    fn test_condition_rejects_empty_column() {
        let err = Condition::new("", Operator::Equals, 1i64).unwrap_err();
        assert!(matches!(err, ValidationError::EmptyColumn));

        let err = Condition::new("   ", Operator::Equals, 1i64).unwrap_err();
        assert!(matches!(err, ValidationError::EmptyColumn));
    }

    #[test]
    fn test_condition_rejects_incompatible_value() {
        let err = Condition::new("anchor", Operator::GreaterThan, "seo").unwrap_err();
        assert!(matches!(
            err,
            ValidationError::IncompatibleValue { ref operator, ref kind, .. }
                if operator == "GREATER_THAN" && kind == "text"
        ));

        let err = Condition::new("domain_rating", Operator::Contains, 50i64).unwrap_err();
        assert!(matches!(err, ValidationError::IncompatibleValue { .. }));
    }

    #[test]
    fn test_condition_rejects_non_finite_float() {
        let err = Condition::new("domain_rating", Operator::LessThan, f64::NAN).unwrap_err();
        assert!(matches!(err, ValidationError::NonFiniteNumber { .. }));

        let err =
            Condition::new("domain_rating", Operator::LessThan, f64::INFINITY).unwrap_err();
        assert!(matches!(err, ValidationError::NonFiniteNumber { .. }));
    }

    #[test]
    fn test_condition_accepts_date_comparison() {
        let condition = Condition::new(
            "first_seen",
            Operator::LessThan,
            ConditionValue::date("2023-01-01"),
        )
        .unwrap();
        assert_eq!(condition.column(), "first_seen");
        assert_eq!(condition.value().kind(), "date");
    }

    #[test]
    fn test_single_condition_serialization() {
        let set = ConditionSet::single(
            Condition::new("domain_rating", Operator::GreaterOrEqual, 50i64).unwrap(),
        );
        assert_eq!(set.serialize(), r#"[["domain_rating",">=",50]]"#);
    }

    #[test]
    fn test_serialization_preserves_insertion_order() {
        let set = ConditionSet::single(
            Condition::new("anchor", Operator::Contains, "seo").unwrap(),
        )
        .and(Condition::new("domain_rating", Operator::GreaterOrEqual, 50i64).unwrap())
        .and(Condition::new("first_seen", Operator::LessThan, ConditionValue::date("2023-01-01")).unwrap());

        assert_eq!(
            set.serialize(),
            r#"[["anchor","contains","seo"],["domain_rating",">=",50],["first_seen","<","2023-01-01"]]"#
        );
        assert_eq!(set.conditions().len(), 3);
    }

    #[test]
    fn test_serialization_is_deterministic() {
        let build = || {
            ConditionSet::single(Condition::new("anchor", Operator::Contains, "seo").unwrap())
                .and(Condition::new("links", Operator::GreaterThan, 10i64).unwrap())
        };
        assert_eq!(build().serialize(), build().serialize());
    }

    #[test]
    fn test_value_quoting_rules() {
        let set = ConditionSet::single(
            Condition::new("ahrefs_rank", Operator::LessOrEqual, 2.5f64).unwrap(),
        )
        .and(Condition::new("nofollow", Operator::Equals, true).unwrap())
        .and(Condition::new("anchor", Operator::StartsWith, "buy").unwrap());

        assert_eq!(
            set.serialize(),
            r#"[["ahrefs_rank","<=",2.5],["nofollow","=",true],["anchor","starts_with","buy"]]"#
        );
    }

    #[test]
    fn test_text_values_are_escaped() {
        let set = ConditionSet::single(
            Condition::new("anchor", Operator::Contains, r#"se"o"#).unwrap(),
        );
        assert_eq!(set.serialize(), r#"[["anchor","contains","se\"o"]]"#);
    }

    #[test]
    fn test_empty_condition_set_rejected() {
        let err = ConditionSet::new(vec![]).unwrap_err();
        assert!(matches!(err, ValidationError::EmptyConditionSet));
    }

    #[test]
    fn test_condition_parse_from_operator_name() {
        let condition = Condition::parse("backlinks", "GREATER_THAN", 100i64).unwrap();
        assert_eq!(condition.operator(), Operator::GreaterThan);

        let err = Condition::parse("backlinks", "BOGUS_OP", 100i64).unwrap_err();
        assert!(matches!(err, ValidationError::UnknownOperator { .. }));
    }
}
