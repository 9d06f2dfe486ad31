use std::str::FromStr;

use derive_more::Display;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum PasswordHashAlgorithm {
    #[display(fmt = "argon2d")]
    Argon2d,
    #[display(fmt = "argon2i")]
    Argon2i,
    #[display(fmt = "argon2id")]
    Argon2id,
}

impl PasswordHashAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            PasswordHashAlgorithm::Argon2d => "argon2d",
            PasswordHashAlgorithm::Argon2i => "argon2i",
            PasswordHashAlgorithm::Argon2id => "argon2id",
        }
    }
}

impl FromStr for PasswordHashAlgorithm {
    type Err = PasswordHashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "argon2d" => Ok(Self::Argon2d),
            "argon2i" => Ok(Self::Argon2i),
            "argon2id" => Ok(Self::Argon2id),
            _ => Err(PasswordHashError::UnsupportedAlgorithm),
        }
    }
}

/// Password hash.
///
/// A validated PHC string as described in the [PHC string format specification][1]:
///
/// ```text
/// $<id>[$v=<version>][$<param>=<value>(,<param>=<value>)*][$<salt>[$<hash>]]
/// ```
///
/// Only hashes produced by a supported algorithm are accepted, so a stored
/// hash can always be verified by the service that issued it.
///
/// [1]: https://github.com/P-H-C/phc-string-format/blob/master/phc-sf-spec.md#specification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash {
    phc: String,
    algorithm: PasswordHashAlgorithm,
}

impl PasswordHash {
    pub fn as_str(&self) -> &str {
        &self.phc
    }

    pub fn algorithm(&self) -> PasswordHashAlgorithm {
        self.algorithm
    }

    /// Borrowed view used by the hashing services to verify a password.
    pub fn as_phc(&self) -> Result<password_hash::PasswordHash<'_>, PasswordHashError> {
        Ok(password_hash::PasswordHash::new(&self.phc)?)
    }
}

impl FromStr for PasswordHash {
    type Err = PasswordHashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hash = password_hash::PasswordHash::new(s)?;
        Self::try_from(hash)
    }
}

impl TryFrom<password_hash::PasswordHash<'_>> for PasswordHash {
    type Error = PasswordHashError;

    fn try_from(hash: password_hash::PasswordHash<'_>) -> Result<Self, Self::Error> {
        let algorithm = hash.algorithm.as_str().parse()?;
        if hash.salt.is_none() || hash.hash.is_none() {
            return Err(PasswordHashError::InvalidPasswordHash);
        }

        Ok(Self {
            phc: hash.to_string(),
            algorithm,
        })
    }
}

impl std::fmt::Display for PasswordHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.phc)
    }
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum PasswordHashError {
    /// Unsupported Algorithm.
    UnsupportedAlgorithm,

    /// Invalid password.
    InvalidPassword,

    /// Invalid password hash.
    InvalidPasswordHash,

    /// Cryptographic error.
    Cryptographic,

    /// Error in the hasher configuration.
    Config,

    Unknown,
}

impl std::error::Error for PasswordHashError {}

impl From<password_hash::Error> for PasswordHashError {
    fn from(err: password_hash::Error) -> Self {
        match err {
            password_hash::Error::Algorithm => Self::UnsupportedAlgorithm,
            password_hash::Error::B64Encoding(_) => Self::InvalidPasswordHash,
            password_hash::Error::Crypto => Self::Cryptographic,
            password_hash::Error::OutputTooShort => Self::Cryptographic,
            password_hash::Error::OutputTooLong => Self::Cryptographic,
            password_hash::Error::ParamNameDuplicated => Self::Config,
            password_hash::Error::ParamNameInvalid => Self::Config,
            password_hash::Error::ParamValueInvalid(_) => Self::Config,
            password_hash::Error::ParamsMaxExceeded => Self::Config,
            password_hash::Error::Password => Self::InvalidPassword,
            password_hash::Error::PhcStringInvalid => Self::InvalidPasswordHash,
            password_hash::Error::PhcStringTooShort => Self::InvalidPasswordHash,
            password_hash::Error::PhcStringTooLong => Self::InvalidPasswordHash,
            password_hash::Error::SaltInvalid(_) => Self::Config,
            password_hash::Error::Version => Self::UnsupportedAlgorithm,
            _ => Self::Unknown,
        }
    }
}

impl From<argon2::Error> for PasswordHashError {
    fn from(err: argon2::Error) -> Self {
        match err {
            argon2::Error::AdTooLong => Self::Config,
            argon2::Error::AlgorithmInvalid => Self::UnsupportedAlgorithm,
            argon2::Error::B64Encoding(_) => Self::Config,
            argon2::Error::KeyIdTooLong => Self::InvalidPasswordHash,
            argon2::Error::MemoryTooLittle => Self::Config,
            argon2::Error::MemoryTooMuch => Self::Config,
            argon2::Error::OutputTooShort => Self::Config,
            argon2::Error::OutputTooLong => Self::Config,
            argon2::Error::PwdTooLong => Self::InvalidPassword,
            argon2::Error::SaltTooShort => Self::Config,
            argon2::Error::SaltTooLong => Self::Config,
            argon2::Error::SecretTooLong => Self::Config,
            argon2::Error::ThreadsTooFew => Self::Config,
            argon2::Error::ThreadsTooMany => Self::Config,
            argon2::Error::TimeTooSmall => Self::Config,
            argon2::Error::VersionInvalid => Self::UnsupportedAlgorithm,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARGON2ID_HASH: &str = "$argon2id$v=19$m=4096,t=3,p=1$c29tZXNhbHRzb21lc2FsdA$Zm9vYmFyYmF6cXV4cXV1eGZvb2JhcmJhenF1eHF1dXg";

    #[test]
    fn parses_argon2_phc_string() {
        let hash: PasswordHash = ARGON2ID_HASH.parse().unwrap();

        assert_eq!(hash.algorithm(), PasswordHashAlgorithm::Argon2id);
        assert_eq!(hash.to_string(), ARGON2ID_HASH);
    }

    #[test]
    fn rejects_unsupported_algorithm() {
        let bcrypt = "$2b$v=1$c29tZXNhbHRzb21lc2FsdA$Zm9vYmFyYmF6cXV4cXV1eGZvb2JhcmJhenF1eHF1dXg";

        assert_eq!(
            bcrypt.parse::<PasswordHash>(),
            Err(PasswordHashError::UnsupportedAlgorithm)
        );
    }

    #[test]
    fn rejects_hash_without_output() {
        assert_eq!(
            "$argon2id$v=19$m=4096,t=3,p=1".parse::<PasswordHash>(),
            Err(PasswordHashError::InvalidPasswordHash)
        );
    }
}
