use folio_config::Config;
use folio_email_contracts::EmailService;
use tracing::{info, warn};

use crate::{
    email,
    environment::{ConfigProvider, Provider},
};

pub async fn serve(config: Config) -> anyhow::Result<()> {
    let config_provider = ConfigProvider::new(&config)?;

    info!("Connecting to smtp server");
    let email = email::connect(&config.email).await?;
    if let Err(err) = email.ping().await {
        warn!("SMTP server is not reachable, contact messages will fail until it is: {err:#}");
    }

    let provider = Provider::new(config_provider, email);
    let server = provider.rest_server();
    info!(
        "Starting http server on {} for {}",
        config.http.address, config.http.allowed_origin
    );
    server.serve().await
}
