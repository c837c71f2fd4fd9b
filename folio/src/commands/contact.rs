use anyhow::bail;
use clap::Subcommand;
use folio_client::{ContactField, ContactForm, HttpContactApi};
use folio_config::Config;
use url::Url;

#[derive(Debug, Subcommand)]
pub enum ContactCommand {
    /// Submit a message through a running relay, the same way the website does
    Send {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        project: String,
        /// Base url of the relay [default: the configured http address]
        #[arg(long)]
        url: Option<Url>,
    },
}

impl ContactCommand {
    /// `config` is only loaded when no `--url` is given.
    pub async fn invoke(
        self,
        config: impl FnOnce() -> anyhow::Result<Config>,
    ) -> anyhow::Result<()> {
        match self {
            ContactCommand::Send {
                name,
                email,
                project,
                url,
            } => {
                let url = match url {
                    Some(url) => url,
                    None => format!("http://{}", config()?.http.address).parse()?,
                };
                send(&url, name, email, project).await
            }
        }
    }
}

async fn send(url: &Url, name: String, email: String, project: String) -> anyhow::Result<()> {
    let api = HttpContactApi::new(url)?;
    let mut form = ContactForm::new()
        .with(ContactField::Name, name)
        .with(ContactField::Email, email)
        .with(ContactField::Project, project);

    let notification = form.submit(&api).await?;
    if !notification.is_success() {
        bail!("{notification}");
    }

    println!("{notification}");
    Ok(())
}
