pub mod security {
    use argon2::{Algorithm, Argon2, Params, PasswordHasher, PasswordVerifier, Version};

    use crate::{
        config::env_var::PasswordHashEnv,
        domain::{
            datatype::password::{PasswordHash, PasswordHashAlgorithm, PasswordHashError},
            service::PasswordHashService,
        },
    };

    pub struct Argon2HashService(Argon2<'static>);

    impl Argon2HashService {
        pub const ALGORITHM: PasswordHashAlgorithm = PasswordHashAlgorithm::Argon2id;

        pub fn new() -> Self {
            Self::with_params(Params::default())
        }

        pub fn with_params(params: Params) -> Self {
            Self(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
        }

        /// Service with configured costs, e.g. cheap ones for tests.
        pub fn from_env(env: &PasswordHashEnv) -> Result<Self, PasswordHashError> {
            let params = Params::new(env.memory_cost, env.time_cost, env.parallelism, None)?;
            Ok(Self::with_params(params))
        }
    }

    impl Default for Argon2HashService {
        fn default() -> Self {
            Self::new()
        }
    }

    impl PasswordHashService for Argon2HashService {
        fn hash_password(&self, pwd: &str) -> Result<PasswordHash, PasswordHashError> {
            let salt = password_hash::SaltString::generate(&mut rand_core::OsRng);
            let hash = self.0.hash_password(pwd.as_bytes(), &salt)?;
            PasswordHash::try_from(hash)
        }

        fn verify_password(&self, pwd: &str, hash: &PasswordHash) -> Result<(), PasswordHashError> {
            self.0
                .verify_password(pwd.as_bytes(), &hash.as_phc()?)
                .map_err(|_| PasswordHashError::InvalidPassword)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn service() -> Argon2HashService {
            Argon2HashService::from_env(&PasswordHashEnv {
                memory_cost: 8,
                time_cost: 1,
                parallelism: 1,
            })
            .unwrap()
        }

        #[test]
        fn hash_verifies_only_the_hashed_password() {
            let service = service();

            let hash = service.hash_password("secure:12345678").unwrap();

            assert_eq!(hash.algorithm(), Argon2HashService::ALGORITHM);
            assert!(service.verify_password("secure:12345678", &hash).is_ok());
            assert_eq!(
                service.verify_password("wrong", &hash),
                Err(PasswordHashError::InvalidPassword)
            );
        }

        #[test]
        fn salts_every_hash() {
            let service = service();

            let first = service.hash_password("password").unwrap();
            let second = service.hash_password("password").unwrap();

            assert_ne!(first, second);
        }

        #[test]
        fn rejects_out_of_range_costs() {
            let cheap = PasswordHashEnv {
                memory_cost: 8,
                time_cost: 1,
                parallelism: 1,
            };

            for env in [
                PasswordHashEnv {
                    memory_cost: 1,
                    ..cheap
                },
                PasswordHashEnv {
                    time_cost: 0,
                    ..cheap
                },
                PasswordHashEnv {
                    parallelism: 0,
                    ..cheap
                },
            ] {
                assert_eq!(
                    Argon2HashService::from_env(&env).err(),
                    Some(PasswordHashError::Config),
                    "{env:?}"
                );
            }
        }
    }
}
