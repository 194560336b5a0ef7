// Copyright 2025 Cowboy AI, LLC.

//! Validation gate for inbound cat commands
//!
//! Request bodies arrive as untyped JSON. Each declared field is checked
//! against its rules in declaration order, and every failed rule produces
//! one message. A value of the wrong type fails every rule of its field.
//! Only a body with no violations is turned into a command.

use crate::commands::{CreateCat, UpdateCat};
use crate::entity::{BreedId, CatId};
use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;

/// Maximum length of a cat name
pub const NAME_MAX_LENGTH: usize = 255;

/// Oldest age accepted for a cat
pub const AGE_MAX: i64 = 9999;

/// The rule a field failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// Value must be a string
    IsString,
    /// String must not be shorter than the bound
    MinLength,
    /// String must not be longer than the bound
    MaxLength,
    /// Value must be an integral number
    IsInt,
    /// Number must not be below the bound
    Min,
    /// Number must not be above the bound
    Max,
}

/// One failed rule on one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Field name as it appears on the wire
    pub property: &'static str,
    /// The rule that failed
    pub constraint: Constraint,
    /// Human readable message
    pub message: String,
}

/// All rule violations of one request body, grouped by field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: IndexMap<&'static str, Vec<Violation>>,
}

impl ValidationErrors {
    fn push(&mut self, violation: Violation) {
        self.fields
            .entry(violation.property)
            .or_default()
            .push(violation);
    }

    /// True when no rule failed
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Violations of a single field, in rule order
    pub fn field(&self, property: &str) -> &[Violation] {
        self.fields.get(property).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every violation, field declaration order first
    pub fn violations(&self) -> impl Iterator<Item = &Violation> {
        self.fields.values().flatten()
    }

    /// One message per violation
    pub fn messages(&self) -> Vec<String> {
        self.violations().map(|v| v.message.clone()).collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.messages().join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

#[derive(Debug, Clone, Copy)]
enum FieldRule {
    Text { min: usize, max: usize },
    Integer { min: i64, max: Option<i64> },
}

#[derive(Debug, Clone, Copy)]
struct FieldSpec {
    property: &'static str,
    rule: FieldRule,
}

const NAME: FieldSpec = FieldSpec {
    property: "name",
    rule: FieldRule::Text {
        min: 1,
        max: NAME_MAX_LENGTH,
    },
};

const AGE: FieldSpec = FieldSpec {
    property: "age",
    rule: FieldRule::Integer {
        min: 1,
        max: Some(AGE_MAX),
    },
};

const BREED_ID: FieldSpec = FieldSpec {
    property: "breedId",
    rule: FieldRule::Integer { min: 1, max: None },
};

/// Fields of both the create and the update body, in declaration order
const CAT_BODY: [FieldSpec; 3] = [NAME, AGE, BREED_ID];

enum Checked {
    Text(String),
    Integer(i64),
}

/// JavaScript-style string length, counted in UTF-16 code units
fn text_length(s: &str) -> usize {
    s.encode_utf16().count()
}

/// 2^63, the first integer past `i64::MAX`
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

fn is_whole(n: &serde_json::Number) -> bool {
    n.is_i64() || n.is_u64() || n.as_f64().map_or(false, |f| f.fract() == 0.0)
}

/// The number as an `i64`, if it is whole and fits
fn integral(n: &serde_json::Number) -> Option<i64> {
    n.as_i64().or_else(|| {
        n.as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= -I64_LIMIT && *f < I64_LIMIT)
            .map(|f| f as i64)
    })
}

fn check_field(spec: FieldSpec, value: Option<&Value>, errors: &mut ValidationErrors) -> Option<Checked> {
    let property = spec.property;
    let before = errors.field(property).len();
    let mut fail = |constraint: Constraint, message: String| {
        errors.push(Violation {
            property,
            constraint,
            message,
        })
    };

    match spec.rule {
        FieldRule::Text { min, max } => {
            let text = value.and_then(Value::as_str);
            let length = text.map(text_length);
            if text.is_none() {
                fail(Constraint::IsString, format!("{property} must be a string"));
            }
            if length.map_or(true, |len| len < min) {
                fail(
                    Constraint::MinLength,
                    format!("{property} must be longer than or equal to {min} characters"),
                );
            }
            if length.map_or(true, |len| len > max) {
                fail(
                    Constraint::MaxLength,
                    format!("{property} must be shorter than or equal to {max} characters"),
                );
            }
            match text {
                Some(text) if errors.field(property).len() == before => {
                    Some(Checked::Text(text.to_string()))
                }
                _ => None,
            }
        }
        FieldRule::Integer { min, max } => {
            let number = match value {
                Some(Value::Number(n)) => Some(n),
                _ => None,
            };
            let whole = number.map_or(false, is_whole);
            let integer = number.and_then(integral);
            let numeric = number.and_then(serde_json::Number::as_f64);
            // Whole numbers past i64::MAX are integers, but no id or age can hold them.
            let too_large = whole && integer.is_none() && numeric.map_or(false, |n| n > 0.0);
            if !whole {
                fail(Constraint::IsInt, format!("{property} must be an integer number"));
            }
            if numeric.map_or(true, |n| n < min as f64) {
                fail(Constraint::Min, format!("{property} must not be less than {min}"));
            }
            let above_max = match (numeric, max) {
                (None, max) => max.is_some(),
                (Some(n), max) => too_large || max.map_or(false, |max| n > max as f64),
            };
            if above_max {
                let max = max.unwrap_or(i64::MAX);
                fail(
                    Constraint::Max,
                    format!("{property} must not be greater than {max}"),
                );
            }
            match integer {
                Some(integer) if errors.field(property).len() == before => {
                    Some(Checked::Integer(integer))
                }
                _ => None,
            }
        }
    }
}

struct CatFields {
    name: String,
    age: u16,
    breed_id: BreedId,
}

fn validate_cat_body(body: &Value) -> Result<CatFields, ValidationErrors> {
    let object = body.as_object();
    let mut errors = ValidationErrors::default();
    let mut checked = CAT_BODY
        .iter()
        .map(|spec| check_field(*spec, object.and_then(|o| o.get(spec.property)), &mut errors))
        .collect::<Vec<_>>()
        .into_iter();

    if !errors.is_empty() {
        return Err(errors);
    }

    match (checked.next(), checked.next(), checked.next()) {
        (
            Some(Some(Checked::Text(name))),
            Some(Some(Checked::Integer(age))),
            Some(Some(Checked::Integer(breed_id))),
        ) => {
            // Bounds were checked above, so both conversions succeed.
            match (u16::try_from(age).ok(), BreedId::new(breed_id)) {
                (Some(age), Some(breed_id)) => Ok(CatFields {
                    name,
                    age,
                    breed_id,
                }),
                _ => Err(errors),
            }
        }
        _ => Err(errors),
    }
}

/// Validate a create body (`{name, age, breedId}`)
///
/// # Examples
///
/// ```rust
/// use cattery::validation::validate_create;
/// use serde_json::json;
///
/// let command = validate_create(&json!({"name": "Mochi", "age": 1, "breedId": 1})).unwrap();
/// assert_eq!(command.name, "Mochi");
///
/// let errors = validate_create(&json!({"name": "", "age": 1, "breedId": 1})).unwrap_err();
/// assert_eq!(
///     errors.messages(),
///     vec!["name must be longer than or equal to 1 characters".to_string()]
/// );
/// ```
pub fn validate_create(body: &Value) -> Result<CreateCat, ValidationErrors> {
    let fields = validate_cat_body(body)?;
    Ok(CreateCat {
        name: fields.name,
        age: fields.age,
        breed_id: fields.breed_id,
    })
}

/// Validate an update body for the cat `id`
pub fn validate_update(id: CatId, body: &Value) -> Result<UpdateCat, ValidationErrors> {
    let fields = validate_cat_body(body)?;
    Ok(UpdateCat {
        id,
        name: fields.name,
        age: fields.age,
        breed_id: fields.breed_id,
    })
}
