//! Field level validation of untrusted payloads.
//!
//! Adapters read each declared field through [`Fields`], which applies one
//! rule and binds its failure to the property name. Rules are plain parse
//! functions from a JSON value to the typed field value.

use serde_json::{Map, Value};

use crate::{
    base::ResourceID,
    error::resource::{ValidationError, ValidationFieldError, Violation},
};

/// Untyped key/value payload, e.g. a deserialized HTTP body.
pub type RawPayload = Map<String, Value>;

pub type RuleResult<T> = Result<T, Violation>;

/// Input shape that can be trusted only after validation.
pub trait ValidatableAdapter: ResourceID + Sized {
    fn new_from_raw_payload(raw: &RawPayload) -> Result<Self, ValidationError>;
}

/// Turns a JSON object into a raw payload, anything else is an empty payload.
pub fn raw_payload(value: Value) -> RawPayload {
    match value {
        Value::Object(map) => map,
        _ => RawPayload::new(),
    }
}

/// Read access to the declared fields of a raw payload.
///
/// Missing keys and `null` values are both absent.
#[derive(Debug, Clone, Copy)]
pub struct Fields<'p> {
    payload: &'p RawPayload,
}

impl<'p> Fields<'p> {
    pub fn new(payload: &'p RawPayload) -> Self {
        Self { payload }
    }

    pub fn required<T, F>(&self, property: &'static str, rule: F) -> Result<T, ValidationFieldError>
    where
        F: FnOnce(&Value) -> RuleResult<T>,
    {
        match self.present(property) {
            Some(value) => rule(value).map_err(|v| ValidationFieldError::new(property, v)),
            None => Err(ValidationFieldError::new(property, Violation::required())),
        }
    }

    /// Absence is accepted, a present value must still satisfy the rule.
    pub fn optional<T, F>(
        &self,
        property: &'static str,
        rule: F,
    ) -> Result<Option<T>, ValidationFieldError>
    where
        F: FnOnce(&Value) -> RuleResult<T>,
    {
        self.present(property)
            .map(|value| rule(value).map_err(|v| ValidationFieldError::new(property, v)))
            .transpose()
    }

    fn present(&self, property: &str) -> Option<&'p Value> {
        self.payload.get(property).filter(|value| !value.is_null())
    }
}

/// Builds the error of a resource from its field results, in declaration order.
pub fn field_errors<R: ResourceID>(
    fields: impl IntoIterator<Item = Option<ValidationFieldError>>,
) -> ValidationError {
    ValidationError::from_fields::<R, _>(fields)
}

pub mod rule {
    use std::{fmt::Display, str::FromStr};

    use serde_json::Value;
    use uuid::Uuid;

    use super::RuleResult;
    use crate::error::resource::{ValidationErrorKind, Violation};

    const HYPHENATED_UUID_LEN: usize = 36;

    pub fn string(value: &Value) -> RuleResult<String> {
        value
            .as_str()
            .map(String::from)
            .ok_or_else(|| Violation::new(ValidationErrorKind::InvalidType, "must be a string"))
    }

    pub fn uuid(value: &Value) -> RuleResult<Uuid> {
        let violation = || Violation::new(ValidationErrorKind::Uuid, "must be a UUID");
        let text = value.as_str().ok_or_else(violation)?;
        if text.len() != HYPHENATED_UUID_LEN {
            return Err(violation());
        }
        Uuid::parse_str(text).map_err(|_| violation())
    }

    pub fn email(value: &Value) -> RuleResult<String> {
        value
            .as_str()
            .filter(|text| email_address::EmailAddress::is_valid(text))
            .map(String::from)
            .ok_or_else(|| Violation::new(ValidationErrorKind::Email, "must be an email"))
    }

    /// Accepts the string form of one of the `allowed` variants.
    pub fn one_of<T>(allowed: &'static [T]) -> impl Fn(&Value) -> RuleResult<T>
    where
        T: FromStr + Display + Copy + PartialEq,
    {
        move |value| {
            value
                .as_str()
                .and_then(|text| text.parse::<T>().ok())
                .filter(|variant| allowed.contains(variant))
                .ok_or_else(|| {
                    let names: Vec<String> = allowed.iter().map(ToString::to_string).collect();
                    Violation::new(
                        ValidationErrorKind::UnknownVariant,
                        format!("must be one of the following values: {}", names.join(", ")),
                    )
                })
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use uuid::Uuid;

    use super::*;
    use crate::{
        domain::entity::iam::UserRole,
        error::resource::ValidationErrorKind,
    };

    fn payload(value: Value) -> RawPayload {
        raw_payload(value)
    }

    #[test]
    fn required_field_missing_or_null() {
        let raw = payload(json!({ "nullable": null }));
        let fields = Fields::new(&raw);

        let missing = fields.required("missing", rule::string).unwrap_err();
        let null = fields.required("nullable", rule::string).unwrap_err();

        assert_eq!(missing.kind, ValidationErrorKind::Required);
        assert_eq!(null.kind, ValidationErrorKind::Required);
        assert_eq!(missing.message, "missing should not be null or undefined");
    }

    #[test]
    fn optional_field_absent_is_unset() {
        let raw = payload(json!({ "content": null }));
        let fields = Fields::new(&raw);

        assert_eq!(fields.optional("content", rule::string), Ok(None));
        assert_eq!(fields.optional("imageId", rule::uuid), Ok(None));
    }

    #[test]
    fn optional_field_present_is_validated() {
        let raw = payload(json!({ "imageId": 42 }));
        let fields = Fields::new(&raw);

        let err = fields.optional("imageId", rule::uuid).unwrap_err();

        assert_eq!(err.property, "imageId");
        assert_eq!(err.kind, ValidationErrorKind::Uuid);
        assert_eq!(err.message, "imageId must be a UUID");
    }

    #[test]
    fn uuid_rule_requires_hyphenated_form() {
        let id = Uuid::new_v4();

        assert_eq!(rule::uuid(&json!(id.to_string())), Ok(id));
        assert!(rule::uuid(&json!(id.simple().to_string())).is_err());
        assert!(rule::uuid(&json!(id.braced().to_string())).is_err());
        assert!(rule::uuid(&json!("not-a-uuid")).is_err());
    }

    #[test]
    fn string_rule_rejects_other_types() {
        assert_eq!(rule::string(&json!("text")), Ok("text".to_string()));
        assert!(rule::string(&json!(1337)).is_err());
        assert!(rule::string(&json!(["text"])).is_err());
    }

    #[test]
    fn email_rule() {
        assert!(rule::email(&json!("someone@email.com")).is_ok());
        assert!(rule::email(&json!("not email")).is_err());
        assert!(rule::email(&json!(12)).is_err());
    }

    #[test]
    fn one_of_rule_limits_variants() {
        let role = rule::one_of(&[UserRole::Author, UserRole::Guest]);

        assert_eq!(role(&json!("GUEST")), Ok(UserRole::Guest));

        let err = role(&json!("ADMIN")).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::UnknownVariant);
        assert_eq!(
            err.constraint,
            "must be one of the following values: AUTHOR, GUEST"
        );
        assert!(role(&json!("guest")).is_err());
    }

    #[test]
    fn non_object_payload_is_empty() {
        assert!(raw_payload(json!([1, 2, 3])).is_empty());
    }
}
