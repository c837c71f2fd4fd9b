use folio_api_rest::RestServerConfig;
use folio_config::Config;
use folio_core_contact_impl::ContactFeatureConfig;
use folio_core_health_impl::HealthFeatureConfig;
use types::{ContactFeature, Email, HealthFeature, RestServer, Time};

pub mod types;

/// Wires the services of the relay together.
#[derive(Debug, Clone)]
pub struct Provider {
    config: ConfigProvider,
    email: Email,
    time: Time,
}

impl Provider {
    pub fn new(config: ConfigProvider, email: Email) -> Self {
        Self {
            config,
            email,
            time: Time::default(),
        }
    }

    pub fn rest_server(&self) -> RestServer {
        RestServer::new(
            self.health_feature(),
            self.contact_feature(),
            self.config.rest_server_config.clone(),
        )
    }

    pub fn contact_feature(&self) -> ContactFeature {
        ContactFeature::new(
            self.email.clone(),
            self.config.contact_feature_config.clone(),
        )
    }

    pub fn health_feature(&self) -> HealthFeature {
        HealthFeature::new(
            self.time,
            self.email.clone(),
            self.config.health_feature_config.clone(),
        )
    }
}

/// Service configs derived from the loaded [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigProvider {
    // API
    pub rest_server_config: RestServerConfig,

    // Core
    pub contact_feature_config: ContactFeatureConfig,
    pub health_feature_config: HealthFeatureConfig,
}

impl ConfigProvider {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        // API
        let rest_server_config =
            RestServerConfig::new(config.http.address, &config.http.origin()?)?;

        // Core
        let contact_feature_config = ContactFeatureConfig {
            email: config.contact.email.clone().into(),
            impersonate_sender: config.contact.impersonate_sender,
        };

        let health_feature_config = HealthFeatureConfig {
            cache_ttl: config.health.cache_ttl.into(),
        };

        Ok(Self {
            // API
            rest_server_config,

            // Core
            contact_feature_config,
            health_feature_config,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use folio_config::DEFAULT_CONFIG_PATH;
    use folio_email_impl::EmailServiceImpl;
    use pretty_assertions::assert_eq;

    use super::*;

    fn config() -> Config {
        let environment = folio_config::environment().source(Some(Default::default()));
        folio_config::load_from(&[Path::new(DEFAULT_CONFIG_PATH)], environment).unwrap()
    }

    #[test]
    fn config_provider() {
        let config_provider = ConfigProvider::new(&config()).unwrap();

        assert_eq!(
            config_provider.rest_server_config.addr,
            ([127, 0, 0, 1], 5000).into()
        );
        assert_eq!(
            config_provider.rest_server_config.allowed_origin,
            "http://localhost:5173"
        );
        assert_eq!(
            config_provider.contact_feature_config.email.as_str(),
            "owner@example.com"
        );
        assert_eq!(
            config_provider.health_feature_config.cache_ttl.as_secs(),
            10
        );
    }

    #[tokio::test]
    async fn provide_rest_server() {
        let config_provider = ConfigProvider::new(&config()).unwrap();
        let email = EmailServiceImpl::dummy().await;

        let provider = Provider::new(config_provider, email);
        let _: RestServer = provider.rest_server();
    }
}
