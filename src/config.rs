pub mod env_var {
    use derive_more::Display;
    use lazy_static::lazy_static;

    lazy_static! {
        static ref ENV_VAR: EnvVar = load_env();
    }

    const DEFAULT_PORT: u16 = 3000;
    const DEFAULT_DATABASE_PORT: u16 = 5432;

    #[derive(Debug, Clone)]
    pub struct EnvVar {
        pub port: u16,
        pub log_level: tracing::Level,
        /// Postgres settings, the in-memory repositories are used when absent
        pub database: Option<DatabaseEnv>,
        pub password_hash: PasswordHashEnv,
    }

    /// Argon2 costs used to hash new passwords.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PasswordHashEnv {
        /// Memory size in KiB
        pub memory_cost: u32,
        pub time_cost: u32,
        pub parallelism: u32,
    }

    impl Default for PasswordHashEnv {
        fn default() -> Self {
            Self {
                memory_cost: argon2::Params::DEFAULT_M_COST,
                time_cost: argon2::Params::DEFAULT_T_COST,
                parallelism: argon2::Params::DEFAULT_P_COST,
            }
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct DatabaseEnv {
        pub host: String,
        pub port: u16,
        pub name: String,
        pub user: String,
        pub password: String,
    }

    impl DatabaseEnv {
        pub fn url(&self) -> String {
            let DatabaseEnv {
                host,
                port,
                name,
                user,
                password,
            } = self;
            format!("postgres://{user}:{password}@{host}:{port}/{name}")
        }
    }

    #[derive(Debug, Display, Clone, PartialEq, Eq)]
    pub enum ConfigError {
        #[display(fmt = "Missing env var {_0}")]
        Missing(&'static str),
        #[display(fmt = "Invalid env var {_0}")]
        Invalid(&'static str),
    }

    impl std::error::Error for ConfigError {}

    impl EnvVar {
        /// Reads the configuration through `lookup`, usually `std::env::var`.
        pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
        where
            F: Fn(&str) -> Option<String>,
        {
            let port = match lookup("PORT") {
                Some(port) => port.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
                None => DEFAULT_PORT,
            };
            let log_level = match lookup("LOG_LEVEL") {
                Some(level) => level
                    .parse()
                    .map_err(|_| ConfigError::Invalid("LOG_LEVEL"))?,
                None => tracing::Level::INFO,
            };

            let database = match lookup("DATABASE_HOST") {
                None => None,
                Some(host) => {
                    let get = |name: &'static str| lookup(name).ok_or(ConfigError::Missing(name));
                    let port = match lookup("DATABASE_PORT") {
                        Some(port) => port
                            .parse()
                            .map_err(|_| ConfigError::Invalid("DATABASE_PORT"))?,
                        None => DEFAULT_DATABASE_PORT,
                    };
                    Some(DatabaseEnv {
                        host,
                        port,
                        name: get("DATABASE_NAME")?,
                        user: get("DATABASE_USER")?,
                        password: get("DATABASE_PASSWORD")?,
                    })
                }
            };

            let defaults = PasswordHashEnv::default();
            let cost = |name: &'static str, default: u32| match lookup(name) {
                Some(value) => value.parse().map_err(|_| ConfigError::Invalid(name)),
                None => Ok(default),
            };
            let password_hash = PasswordHashEnv {
                memory_cost: cost("PASSWORD_HASH_MEMORY_COST", defaults.memory_cost)?,
                time_cost: cost("PASSWORD_HASH_TIME_COST", defaults.time_cost)?,
                parallelism: cost("PASSWORD_HASH_PARALLELISM", defaults.parallelism)?,
            };

            Ok(EnvVar {
                port,
                log_level,
                database,
                password_hash,
            })
        }
    }

    fn load_env() -> EnvVar {
        match EnvVar::from_vars(|name| std::env::var(name).ok()) {
            Ok(env) => env,
            Err(err) => panic!("{err}"),
        }
    }

    /// Process configuration, loaded on first access.
    ///
    /// # Panic
    ///
    /// Panics if an environment variable is missing or malformed
    pub fn get() -> &'static EnvVar {
        &ENV_VAR
    }

}
