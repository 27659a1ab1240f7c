use std::net::Ipv4Addr;
use std::sync::Arc;

use anyhow::Context as _;
use tracing_subscriber::EnvFilter;

use gf_application::api::{self, AppState};
use gf_application::config::Config;
use gf_application::mail::{Mailer, SmtpMailer};
use gf_application::serve;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Arc::new(Config::from_env().context("could not load configuration")?);
    let port = config.port;

    let mailer: Option<Arc<dyn Mailer>> = match config.mail_credentials() {
        Ok(creds) => {
            let mailer = SmtpMailer::new(&config.smtp_host, creds.user, creds.password)
                .context("could not build SMTP mailer")?;
            tracing::info!(recipient = %creds.recipient, "email service active");
            Some(Arc::new(mailer))
        }
        Err(missing) => {
            tracing::warn!(
                missing = %missing.join(", "),
                "missing or placeholder environment variables; email sending disabled until configured"
            );
            None
        }
    };

    let state = AppState {
        config: config.clone(),
        mailer,
    };

    let routes = api::router(state);
    serve::serve((Ipv4Addr::UNSPECIFIED, port), routes)
        .await
        .context("error running HTTP server")?;
    Ok(())
}
