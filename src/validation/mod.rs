//! Declarative request validation.
//!
//! Each route declares a flat list of [`FieldRule`]s evaluated against the
//! raw JSON payload before the handler runs. Every rule is checked and every
//! violation collected, so a client gets the full list of problems in one
//! response instead of fixing them one at a time.

use serde_json::Value;
use uuid::Uuid;

pub use crate::error::Violation;

/// A single validation rule applied to one payload field
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    /// Field must be present, non-null, and non-empty if a string
    Required,
    /// Field must be present when another field of the same payload snapshot
    /// holds the given string value
    RequiredIf {
        field: &'static str,
        equals: &'static str,
    },
    /// Basic email shape (local@domain.tld)
    Email,
    /// String length lower bound
    MinLength(usize),
    /// Numeric range; either bound may be open
    Range {
        min: Option<f64>,
        max: Option<f64>,
    },
    /// String must be one of the listed values
    OneOf(&'static [&'static str]),
    /// String must parse as a UUID
    Uuid,
    /// Field must be an array whose elements each satisfy the nested rules
    Each(&'static [FieldRule]),
}

#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: &'static str,
    pub rule: Rule,
}

impl FieldRule {
    pub const fn new(field: &'static str, rule: Rule) -> Self {
        Self { field, rule }
    }
}

/// Evaluate every rule against the payload, accumulating all violations.
/// Rules other than `Required`/`RequiredIf` are skipped for absent fields.
pub fn validate(rules: &[FieldRule], payload: &Value) -> Vec<Violation> {
    let mut violations = Vec::new();
    for rule in rules {
        check_field(rule.field, rule.field, &rule.rule, payload, &mut violations);
    }
    violations
}

/// Run the rules and convert a non-empty violation list into a 400
pub fn validate_payload(rules: &[FieldRule], payload: &Value) -> Result<(), crate::error::ApiError> {
    let violations = validate(rules, payload);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(crate::error::ApiError::validation(violations))
    }
}

fn check_field(field: &str, path: &str, rule: &Rule, payload: &Value, out: &mut Vec<Violation>) {
    let value = payload.get(field);

    match rule {
        Rule::Required => {
            if is_absent(value) {
                out.push(Violation::new(path, "is required"));
            }
        }
        Rule::RequiredIf {
            field: other,
            equals,
        } => {
            let triggered = payload.get(*other).and_then(Value::as_str) == Some(*equals);
            if triggered && is_absent(value) {
                out.push(Violation::new(
                    path,
                    format!("is required when {} is {}", other, equals),
                ));
            }
        }
        Rule::Email => {
            if let Some(s) = present_str(value) {
                if !is_email_shaped(s) {
                    out.push(Violation::new(path, "must be a valid email address"));
                }
            }
        }
        Rule::MinLength(min) => {
            if let Some(s) = present_str(value) {
                if s.chars().count() < *min {
                    out.push(Violation::new(
                        path,
                        format!("must be at least {} characters", min),
                    ));
                }
            }
        }
        Rule::Range { min, max } => {
            if let Some(value) = value.filter(|v| !v.is_null()) {
                match value.as_f64() {
                    Some(n) => {
                        if min.map_or(false, |m| n < m) {
                            out.push(Violation::new(path, format!("must be at least {}", m_fmt(*min))));
                        } else if max.map_or(false, |m| n > m) {
                            out.push(Violation::new(path, format!("must be at most {}", m_fmt(*max))));
                        }
                    }
                    None => out.push(Violation::new(path, "must be a number")),
                }
            }
        }
        Rule::OneOf(allowed) => {
            if let Some(s) = present_str(value) {
                if !allowed.contains(&s) {
                    out.push(Violation::new(
                        path,
                        format!("must be one of: {}", allowed.join(", ")),
                    ));
                }
            }
        }
        Rule::Uuid => {
            if let Some(s) = present_str(value) {
                if Uuid::parse_str(s).is_err() {
                    out.push(Violation::new(path, "must be a valid id"));
                }
            }
        }
        Rule::Each(item_rules) => {
            let Some(value) = value.filter(|v| !v.is_null()) else {
                return;
            };
            match value.as_array() {
                Some(items) => {
                    for (i, item) in items.iter().enumerate() {
                        for item_rule in *item_rules {
                            let nested_path = format!("{}[{}].{}", path, i, item_rule.field);
                            check_field(item_rule.field, &nested_path, &item_rule.rule, item, out);
                        }
                    }
                }
                None => out.push(Violation::new(path, "must be an array")),
            }
        }
    }
}

fn is_absent(value: Option<&Value>) -> bool {
    match value {
        None => true,
        Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

fn present_str<'a>(value: Option<&'a Value>) -> Option<&'a str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

fn is_email_shaped(s: &str) -> bool {
    if s.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

fn m_fmt(bound: Option<f64>) -> String {
    match bound {
        Some(b) if b.fract() == 0.0 => format!("{}", b as i64),
        Some(b) => format!("{}", b),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const RESERVATION_RULES: &[FieldRule] = &[
        FieldRule::new("name", Rule::Required),
        FieldRule::new("email", Rule::Required),
        FieldRule::new("email", Rule::Email),
        FieldRule::new("type", Rule::OneOf(&["surPlace", "livraison"])),
        FieldRule::new(
            "numberOfPeople",
            Rule::RequiredIf {
                field: "type",
                equals: "surPlace",
            },
        ),
        FieldRule::new(
            "address",
            Rule::RequiredIf {
                field: "type",
                equals: "livraison",
            },
        ),
    ];

    #[test]
    fn missing_required_field_is_named() {
        let violations = validate(RESERVATION_RULES, &json!({ "email": "a@b.com" }));
        assert!(violations.iter().any(|v| v.field == "name"));
    }

    #[test]
    fn all_violations_are_accumulated() {
        let violations = validate(
            RESERVATION_RULES,
            &json!({ "email": "not-an-email", "type": "teleportation" }),
        );
        let fields: Vec<&str> = violations.iter().map(|v| v.field.as_str()).collect();
        assert!(fields.contains(&"name"));
        assert!(fields.contains(&"email"));
        assert!(fields.contains(&"type"));
        assert!(violations.len() >= 3);
    }

    #[test]
    fn livraison_without_address_fails_naming_address() {
        let violations = validate(
            RESERVATION_RULES,
            &json!({
                "name": "Dupont",
                "email": "d@example.com",
                "type": "livraison"
            }),
        );
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "address");
    }

    #[test]
    fn sur_place_without_people_count_fails() {
        let violations = validate(
            RESERVATION_RULES,
            &json!({
                "name": "Dupont",
                "email": "d@example.com",
                "type": "surPlace",
                "address": "ignored"
            }),
        );
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "numberOfPeople");
    }

    #[test]
    fn conditional_rule_passes_when_discriminator_matches_and_field_present() {
        let violations = validate(
            RESERVATION_RULES,
            &json!({
                "name": "Dupont",
                "email": "d@example.com",
                "type": "livraison",
                "address": "1 rue de la Paix"
            }),
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn range_checks_bounds_and_type() {
        let rules = &[FieldRule::new(
            "quantity",
            Rule::Range {
                min: Some(1.0),
                max: None,
            },
        )];
        assert!(validate(rules, &json!({ "quantity": 2 })).is_empty());
        assert_eq!(validate(rules, &json!({ "quantity": 0 }))[0].field, "quantity");
        assert_eq!(
            validate(rules, &json!({ "quantity": "two" }))[0].message,
            "must be a number"
        );
    }

    #[test]
    fn each_validates_elements_with_indexed_paths() {
        const LINE_RULES: &[FieldRule] = &[
            FieldRule::new("menuItemId", Rule::Required),
            FieldRule::new("menuItemId", Rule::Uuid),
            FieldRule::new(
                "quantity",
                Rule::Range {
                    min: Some(1.0),
                    max: None,
                },
            ),
        ];
        let rules = &[
            FieldRule::new("items", Rule::Required),
            FieldRule::new("items", Rule::Each(LINE_RULES)),
        ];

        let violations = validate(
            rules,
            &json!({
                "items": [
                    { "menuItemId": "1f0a2f9e-9b7e-4c82-b1a4-0d7a2c1de111", "quantity": 1 },
                    { "quantity": 0 }
                ]
            }),
        );
        let fields: Vec<&str> = violations.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["items[1].menuItemId", "items[1].quantity"]);
    }

    #[test]
    fn non_array_where_array_expected() {
        let rules = &[FieldRule::new("items", Rule::Each(&[]))];
        let violations = validate(rules, &json!({ "items": "everything" }));
        assert_eq!(violations[0].message, "must be an array");
    }

    #[test]
    fn empty_string_counts_as_missing() {
        let rules = &[FieldRule::new("name", Rule::Required)];
        assert_eq!(validate(rules, &json!({ "name": "  " }))[0].field, "name");
    }
}
