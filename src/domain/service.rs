use super::datatype::password::{PasswordHash, PasswordHashError};

pub trait PasswordHashService {
    fn hash_password(&self, pwd: &str) -> Result<PasswordHash, PasswordHashError>;
    fn verify_password(&self, pwd: &str, hash: &PasswordHash) -> Result<(), PasswordHashError>;
}
