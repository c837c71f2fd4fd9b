use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use folio_config::Config;
use tracing_subscriber::EnvFilter;

use crate::{
    commands::{contact::ContactCommand, email::EmailCommand, serve::serve},
    environment::ConfigProvider,
};

/// Relay for the contact form of a portfolio website
#[derive(Debug, Parser)]
#[command(name = "folio", version)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the contact api
    #[command(aliases(["run", "start", "r", "s"]))]
    Serve,
    /// Check the SMTP setup
    #[command(aliases(["e"]))]
    Email {
        #[command(subcommand)]
        command: EmailCommand,
    },
    /// Talk to a running relay like the website would
    #[command(aliases(["c"]))]
    Contact {
        #[command(subcommand)]
        command: ContactCommand,
    },
    /// Load and validate the configuration
    CheckConfig {
        /// Also print the loaded config (secrets are redacted)
        #[arg(short, long)]
        verbose: bool,
    },
    /// Print shell completions to stdout
    Completion {
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let command = match self.command {
            Command::Completion { shell } => {
                let mut cli = Cli::command();
                let name = cli.get_name().to_owned();
                clap_complete::generate(shell, &mut cli, name, &mut std::io::stdout());
                return Ok(());
            }
            command => command,
        };

        init_tracing();

        match command {
            Command::Serve => serve(load_config()?).await,
            Command::Email { command } => command.invoke(load_config()?).await,
            Command::Contact { command } => command.invoke(load_config).await,
            Command::CheckConfig { verbose } => {
                let config = load_config()?;
                ConfigProvider::new(&config)?;
                config.email.credentials()?;
                if verbose {
                    println!("{config:#?}");
                }
                Ok(())
            }
            Command::Completion { .. } => unreachable!(),
        }
    }
}

fn load_config() -> anyhow::Result<Config> {
    folio_config::load().context("Failed to load config")
}

/// Logs go to stderr, filtered by `RUST_LOG`.
fn init_tracing() {
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env());

    #[cfg(tracing_pretty)]
    let subscriber = subscriber.pretty();

    subscriber.init();
}
