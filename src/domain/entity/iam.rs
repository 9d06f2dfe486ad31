use std::str::FromStr;

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::{
    base::resource_id, domain::datatype::password::PasswordHash,
    error::resource::ValidationErrorKind,
};

use super::EntityData;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    #[display(fmt = "ADMIN")]
    Admin,
    #[display(fmt = "AUTHOR")]
    Author,
    #[display(fmt = "GUEST")]
    Guest,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "ADMIN",
            UserRole::Author => "AUTHOR",
            UserRole::Guest => "GUEST",
        }
    }
}

impl FromStr for UserRole {
    type Err = ValidationErrorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Self::Admin),
            "AUTHOR" => Ok(Self::Author),
            "GUEST" => Ok(Self::Guest),
            _ => Err(ValidationErrorKind::UnknownVariant),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserState {
    pub(in crate::domain) first_name: String,
    pub(in crate::domain) last_name: String,
    pub(in crate::domain) email: String,
    pub(in crate::domain) role: UserRole,
    pub(in crate::domain) password_hash: PasswordHash,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub(in crate::domain) data: EntityData,
    pub(in crate::domain) state: UserState,
}

impl_entity!(User);
resource_id!(User, "iam::User");

impl User {
    state_ref!(first_name, String);
    state_ref!(last_name, String);
    state_ref!(email, String);
    state_copy!(role, UserRole);
    state_ref!(password_hash, PasswordHash);

    pub fn new(
        first_name: String,
        last_name: String,
        email: String,
        role: UserRole,
        password_hash: PasswordHash,
    ) -> Self {
        Self {
            data: EntityData::new(),
            state: UserState {
                first_name,
                last_name,
                email,
                role,
                password_hash,
            },
        }
    }

    pub(in crate::domain) fn restore(data: EntityData, state: UserState) -> Self {
        Self { data, state }
    }
}
