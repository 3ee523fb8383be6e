//! Where the handed-out secret comes from.

use std::env;

use crate::config::SecretConfig;

/// Supplies the secret at invocation time.
///
/// A missing secret is not an error: it is passed through to the response.
pub trait SecretSource: Send + Sync {
    fn secret(&self) -> Option<String>;
}

/// Reads an environment variable on every call.
#[derive(Debug, Clone)]
pub struct EnvSecret {
    var: String,
}

impl EnvSecret {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }

    pub fn from_config(config: &SecretConfig) -> Self {
        Self::new(config.env_var.clone())
    }

    pub fn var(&self) -> &str {
        &self.var
    }
}

impl SecretSource for EnvSecret {
    fn secret(&self) -> Option<String> {
        match env::var(&self.var) {
            Ok(value) => Some(value),
            Err(env::VarError::NotPresent) => None,
            Err(env::VarError::NotUnicode(raw)) => Some(raw.to_string_lossy().into_owned()),
        }
    }
}

/// Fixed secret, for tests and local invocation.
#[derive(Debug, Clone, Default)]
pub struct StaticSecret(Option<String>);

impl StaticSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(Some(secret.into()))
    }

    pub fn unset() -> Self {
        Self(None)
    }
}

impl SecretSource for StaticSecret {
    fn secret(&self) -> Option<String> {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_secret() {
        assert_eq!(StaticSecret::new("fnAE").secret().as_deref(), Some("fnAE"));
        assert_eq!(StaticSecret::unset().secret(), None);
    }

    #[test]
    fn test_env_secret_unset_variable() {
        let source = EnvSecret::new(format!("FAUNAKEY_TEST_UNSET_{}", uuid::Uuid::new_v4().simple()));
        assert_eq!(source.secret(), None);
    }

    #[test]
    fn test_env_secret_reads_variable_on_each_call() {
        let var = format!("FAUNAKEY_TEST_SET_{}", uuid::Uuid::new_v4().simple());
        let source = EnvSecret::new(var.clone());

        std::env::set_var(&var, "fnAEfirst");
        assert_eq!(source.secret().as_deref(), Some("fnAEfirst"));

        std::env::set_var(&var, "fnAErotated");
        assert_eq!(source.secret().as_deref(), Some("fnAErotated"));

        std::env::remove_var(&var);
        assert_eq!(source.secret(), None);
    }

    #[test]
    fn test_env_secret_from_config() {
        let source = EnvSecret::from_config(&SecretConfig::default());
        assert_eq!(source.var(), "FAUNADB_SERVER_SECRET");
    }
}
