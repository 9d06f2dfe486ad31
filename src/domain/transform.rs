use sqlx::{postgres::PgRow, Row};

use super::entity::{
    blog::{Post, PostState},
    iam::{User, UserState},
    EntityData,
};
use crate::error::persistence::PersistenceError;

impl TryFrom<&PgRow> for EntityData {
    type Error = PersistenceError;

    fn try_from(row: &PgRow) -> Result<Self, Self::Error> {
        let version: i64 = row.try_get("version")?;
        Ok(Self {
            id: row.try_get("id")?,
            created: row.try_get("created")?,
            updated: row.try_get("updated")?,
            removed: row.try_get("removed")?,
            version: u32::try_from(version).map_err(|_| PersistenceError::DecodeData)?,
        })
    }
}

impl TryFrom<&PgRow> for UserState {
    type Error = PersistenceError;

    fn try_from(row: &PgRow) -> Result<Self, Self::Error> {
        let role: &str = row.try_get("role")?;
        let password_hash: &str = row.try_get("password_hash")?;
        Ok(Self {
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            email: row.try_get("email")?,
            role: role.parse().map_err(|_| PersistenceError::DecodeData)?,
            password_hash: password_hash
                .parse()
                .map_err(|_| PersistenceError::DecodeData)?,
        })
    }
}

impl TryFrom<&PgRow> for User {
    type Error = PersistenceError;

    fn try_from(row: &PgRow) -> Result<Self, Self::Error> {
        Ok(Self::restore(row.try_into()?, row.try_into()?))
    }
}

impl TryFrom<&PgRow> for PostState {
    type Error = PersistenceError;

    fn try_from(row: &PgRow) -> Result<Self, Self::Error> {
        let status: &str = row.try_get("status")?;
        Ok(Self {
            owner_id: row.try_get("owner_id")?,
            title: row.try_get("title")?,
            image_id: row.try_get("image_id")?,
            content: row.try_get("content")?,
            status: status.parse().map_err(|_| PersistenceError::DecodeData)?,
            published: row.try_get("published")?,
        })
    }
}

impl TryFrom<&PgRow> for Post {
    type Error = PersistenceError;

    fn try_from(row: &PgRow) -> Result<Self, Self::Error> {
        Ok(Self::restore(row.try_into()?, row.try_into()?))
    }
}
