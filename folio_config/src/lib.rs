use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context};
use config::{Environment, File, FileFormat};
use folio_models::{
    email_address::{EmailAddress, EmailAddressWithName},
    Sensitive,
};
use serde::Deserialize;
use url::Url;

pub use duration::Duration;

mod duration;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Colon separated list of config files, read in order.
pub const CONFIG_PATH_ENV: &str = "FOLIO_CONFIG";

/// Prefix of environment variables overriding config values,
/// e.g. `FOLIO__EMAIL__PASSWORD`.
pub const ENV_PREFIX: &str = "FOLIO";

/// Load the config from the files listed in `FOLIO_CONFIG` (or the default
/// `config.toml`) with overrides from the process environment.
pub fn load() -> anyhow::Result<Config> {
    let paths = match std::env::var_os(CONFIG_PATH_ENV) {
        Some(paths) => std::env::split_paths(&paths).collect(),
        None => vec![PathBuf::from(DEFAULT_CONFIG_PATH)],
    };

    load_from(&paths, environment())
}

pub fn load_from(paths: &[impl AsRef<Path>], environment: Environment) -> anyhow::Result<Config> {
    paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?
        .add_source(environment)
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

pub fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub email: EmailConfig,
    pub contact: ContactConfig,
    pub health: HealthConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub address: SocketAddr,
    pub allowed_origin: Url,
}

#[derive(Debug, Deserialize)]
pub struct EmailConfig {
    pub smtp_url: Sensitive<String>,
    pub from: EmailAddressWithName,
    pub username: Option<String>,
    pub password: Option<Sensitive<String>>,
    pub timeout: Option<Duration>,
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    pub email: EmailAddress,
    #[serde(default = "default_impersonate_sender")]
    pub impersonate_sender: bool,
}

#[derive(Debug, Deserialize)]
pub struct HealthConfig {
    pub cache_ttl: Duration,
}

fn default_impersonate_sender() -> bool {
    true
}

impl HttpConfig {
    /// The allowed origin in its serialized form (`scheme://host[:port]`).
    pub fn origin(&self) -> anyhow::Result<String> {
        let origin = self.allowed_origin.origin();
        if !origin.is_tuple() {
            bail!("{} is not a valid http origin", self.allowed_origin);
        }
        Ok(origin.ascii_serialization())
    }
}

impl EmailConfig {
    pub fn credentials(&self) -> anyhow::Result<Option<(String, Sensitive<String>)>> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => Ok(Some((username.clone(), password.clone()))),
            (None, None) => Ok(None),
            _ => bail!("email.username and email.password must be set together"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let vars = vars
            .iter()
            .map(|&(k, v)| (k.to_owned(), v.to_owned()))
            .collect::<config::Map<_, _>>();
        environment().source(Some(vars))
    }

    #[test]
    fn load_default_config() {
        let config = load_from(&[Path::new(DEFAULT_CONFIG_PATH)], env(&[])).unwrap();

        assert_eq!(config.http.origin().unwrap(), "http://localhost:5173");
        assert_eq!(config.contact.email.as_str(), "owner@example.com");
        assert!(config.contact.impersonate_sender);
        assert_eq!(config.email.credentials().unwrap(), None);
        assert_eq!(config.email.timeout, None);
    }

    #[test]
    fn environment_overrides() {
        let config = load_from(
            &[Path::new(DEFAULT_CONFIG_PATH)],
            env(&[
                ("FOLIO__HTTP__ALLOWED_ORIGIN", "https://portfolio.example.com/"),
                ("FOLIO__EMAIL__USERNAME", "account@gmail.com"),
                ("FOLIO__EMAIL__PASSWORD", "app password"),
                ("FOLIO__EMAIL__TIMEOUT", "30s"),
                ("FOLIO__CONTACT__IMPERSONATE_SENDER", "false"),
            ]),
        )
        .unwrap();

        assert_eq!(config.http.origin().unwrap(), "https://portfolio.example.com");
        assert!(!config.contact.impersonate_sender);
        assert_eq!(config.email.timeout.map(|t| t.as_secs()), Some(30));

        let (username, password) = config.email.credentials().unwrap().unwrap();
        assert_eq!(username, "account@gmail.com");
        assert_eq!(*password, "app password");
    }

    #[test]
    fn incomplete_credentials() {
        let config = load_from(
            &[Path::new(DEFAULT_CONFIG_PATH)],
            env(&[("FOLIO__EMAIL__USERNAME", "account@gmail.com")]),
        )
        .unwrap();

        assert!(config.email.credentials().is_err());
    }

    #[test]
    fn opaque_origin_is_rejected() {
        let config = load_from(
            &[Path::new(DEFAULT_CONFIG_PATH)],
            env(&[("FOLIO__HTTP__ALLOWED_ORIGIN", "file:///srv/site")]),
        )
        .unwrap();

        assert!(config.http.origin().is_err());
    }

    #[test]
    fn missing_file() {
        let result = load_from(&[Path::new("/nonexistent/folio.toml")], env(&[]));
        assert!(result.is_err());
    }

    #[test]
    fn secrets_are_redacted() {
        let config = load_from(
            &[Path::new(DEFAULT_CONFIG_PATH)],
            env(&[
                ("FOLIO__EMAIL__USERNAME", "account@gmail.com"),
                ("FOLIO__EMAIL__PASSWORD", "app password"),
            ]),
        )
        .unwrap();

        let debug = format!("{config:?}");
        assert!(!debug.contains("app password"));
    }
}
