use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

use crate::domain::User;

const DEFAULT_BIND: &str = "127.0.0.1:5221";
const DEFAULT_BUFFER_SIZE: usize = 32;
const DEFAULT_SECRET: &str = "development-secret-change-me-0123456789";
const DEFAULT_TOKEN_LIFETIME_DAYS: i64 = 7;
const DEFAULT_FRONTEND_DIR: &str = "frontend";
const DEFAULT_FRONTEND_ENTRY: &str = "front.html";

#[derive(Debug, Clone, Deserialize)]
pub struct Server {
    pub bind: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Store {
    pub buffer_size: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Auth {
    pub secret: String,
    pub token_lifetime_days: i64,
}

impl Auth {
    pub fn uses_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }

    pub fn token_lifetime(&self) -> chrono::Duration {
        chrono::Duration::days(self.token_lifetime_days)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Frontend {
    pub dir: String,
    pub entry: String,
}

/// An account entry as written in configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct UserEntry {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub password: String,
}

impl From<UserEntry> for User {
    fn from(entry: UserEntry) -> Self {
        User::new(entry.id, entry.first_name, entry.last_name, entry.username, entry.password)
    }
}

fn default_users() -> Vec<UserEntry> {
    vec![UserEntry {
        id: 1,
        first_name: "Test".into(),
        last_name: "User".into(),
        username: "test".into(),
        password: "test".into(),
    }]
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: Server,
    pub store: Store,
    pub auth: Auth,
    pub frontend: Frontend,
    #[serde(default = "default_users")]
    pub users: Vec<UserEntry>,
}

impl Settings {
    /// Defaults, then `config.toml` if present, then `INVENTORY__*` environment variables.
    pub fn new() -> Result<Self, ConfigError> {
        let builder = Self::builder()?
            .add_source(
                File::with_name("config.toml")
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix("INVENTORY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );
        Self::load(builder)
    }

    /// Builds and checks the settings from an assembled set of sources.
    pub(crate) fn load(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let settings: Self = builder.build()?.try_deserialize()?;
        if settings.store.buffer_size == 0 {
            return Err(ConfigError::Message("store.buffer_size must be at least 1".into()));
        }
        Ok(settings)
    }

    /// Built-in defaults for every key except `users`, which defaults through serde.
    pub(crate) fn builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.bind", DEFAULT_BIND)?
            .set_default("store.buffer_size", DEFAULT_BUFFER_SIZE as i64)?
            .set_default("auth.secret", DEFAULT_SECRET)?
            .set_default("auth.token_lifetime_days", DEFAULT_TOKEN_LIFETIME_DAYS)?
            .set_default("frontend.dir", DEFAULT_FRONTEND_DIR)?
            .set_default("frontend.entry", DEFAULT_FRONTEND_ENTRY)
    }

    pub fn users(&self) -> Vec<User> {
        self.users.iter().cloned().map(User::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn try_from_toml(toml: &str) -> Result<Settings, ConfigError> {
        Settings::load(Settings::builder().unwrap().add_source(File::from_str(toml, FileFormat::Toml)))
    }

    fn from_toml(toml: &str) -> Settings {
        try_from_toml(toml).unwrap()
    }

    #[test]
    fn test_defaults() {
        let settings = from_toml("");
        assert_eq!(settings.server.bind, "127.0.0.1:5221");
        assert_eq!(settings.store.buffer_size, 32);
        assert_eq!(settings.auth.token_lifetime().num_days(), 7);
        assert!(settings.auth.uses_default_secret());
        assert_eq!(settings.frontend.entry, "front.html");

        let users = settings.users();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].username, "test");
        assert_eq!(users[0].password, "test");
    }

    #[test]
    fn test_file_overrides() {
        let settings = from_toml(
            r#"
            [auth]
            secret = "from-file"
            token_lifetime_days = 1

            [[users]]
            id = 5
            first_name = "Ada"
            last_name = "Lovelace"
            username = "ada"
            password = "engine"
            "#,
        );
        assert_eq!(settings.auth.secret, "from-file");
        assert!(!settings.auth.uses_default_secret());
        assert_eq!(settings.auth.token_lifetime().num_days(), 1);
        assert_eq!(settings.server.bind, "127.0.0.1:5221");
        assert_eq!(settings.users().iter().map(|u| u.id).collect::<Vec<_>>(), vec![5]);
    }

    #[test]
    fn test_zero_buffer_size_is_rejected() {
        let err = try_from_toml("[store]\nbuffer_size = 0").unwrap_err();
        assert!(err.to_string().contains("buffer_size"));
        assert_eq!(from_toml("[store]\nbuffer_size = 1").store.buffer_size, 1);
    }
}
