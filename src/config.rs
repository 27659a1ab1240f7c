//! Environment-backed configuration, read once at startup.
//!
//! All settings come from the process environment (a `.env` file is honored
//! in development). The resulting [`Config`] is immutable and shared behind
//! an `Arc`; nothing reads the environment after startup.

use std::fmt;

use serde::Deserialize;

pub use config::ConfigError;

/// Runtime mode. Controls CORS strictness and static-asset serving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppEnv {
    #[default]
    Development,
    Production,
}

impl fmt::Display for AppEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppEnv::Development => f.write_str("development"),
            AppEnv::Production => f.write_str("production"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Mail account identity, also used as the message sender.
    #[serde(default)]
    pub email_user: Option<String>,

    /// Mail account credential (an app password for Gmail).
    #[serde(default)]
    pub email_password: Option<String>,

    /// Mailbox every application is delivered to.
    #[serde(default)]
    pub recipient_email: Option<String>,

    /// SMTP relay hostname.
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,

    /// Deployed frontend origin, added to the CORS allow-list.
    #[serde(default)]
    pub frontend_url: Option<String>,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub app_env: AppEnv,
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}

fn default_port() -> u16 {
    5000
}

/// The credential triple required before any mail can be sent.
#[derive(Debug, Clone)]
pub struct MailCredentials {
    pub user: String,
    pub password: String,
    pub recipient: String,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// Reads `EMAIL_USER`, `EMAIL_PASSWORD`, `RECIPIENT_EMAIL`, `SMTP_HOST`,
    /// `FRONTEND_URL`, `PORT`, and `APP_ENV`.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let c = config::Config::builder()
            .add_source(config::Environment::default())
            .build()?;
        c.try_deserialize()
    }

    /// The mail credentials, or the names of the variables still unset.
    ///
    /// Values copied verbatim from a template (they contain `your-`) count
    /// as unset. A missing credential disables the mail path but must not
    /// prevent the HTTP listener from starting.
    pub fn mail_credentials(&self) -> Result<MailCredentials, Vec<&'static str>> {
        let mut missing = Vec::new();
        if !is_set(&self.email_user) {
            missing.push("EMAIL_USER");
        }
        if !is_set(&self.email_password) {
            missing.push("EMAIL_PASSWORD");
        }
        if !is_set(&self.recipient_email) {
            missing.push("RECIPIENT_EMAIL");
        }
        if !missing.is_empty() {
            return Err(missing);
        }

        // All three checked non-empty above.
        Ok(MailCredentials {
            user: self.email_user.clone().unwrap_or_default(),
            password: self.email_password.clone().unwrap_or_default(),
            recipient: self.recipient_email.clone().unwrap_or_default(),
        })
    }

    /// Origins allowed to call the API cross-origin in production.
    pub fn allowed_origins(&self) -> Vec<String> {
        let mut origins = vec![
            "http://localhost:3000".to_string(),
            "http://localhost:3001".to_string(),
        ];
        if let Some(url) = &self.frontend_url {
            if !url.is_empty() {
                origins.push(url.clone());
            }
        }
        origins
    }
}

fn is_set(value: &Option<String>) -> bool {
    matches!(value, Some(v) if !v.is_empty() && !v.contains("your-"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            email_user: Some("sender@gmail.com".into()),
            email_password: Some("app-password".into()),
            recipient_email: Some("recipient@example.com".into()),
            smtp_host: default_smtp_host(),
            frontend_url: None,
            port: default_port(),
            app_env: AppEnv::Development,
        }
    }

    #[test]
    fn mail_credentials_available_when_all_set() {
        let creds = base_config().mail_credentials().unwrap();
        assert_eq!(creds.user, "sender@gmail.com");
        assert_eq!(creds.recipient, "recipient@example.com");
    }

    #[test]
    fn placeholder_values_count_as_unset() {
        let config = Config {
            email_user: Some("your-email@gmail.com".into()),
            email_password: Some("your-app-password".into()),
            ..base_config()
        };

        let missing = config.mail_credentials().unwrap_err();
        assert_eq!(missing, vec!["EMAIL_USER", "EMAIL_PASSWORD"]);
    }

    #[test]
    fn empty_values_count_as_unset() {
        let config = Config {
            recipient_email: Some(String::new()),
            ..base_config()
        };

        let missing = config.mail_credentials().unwrap_err();
        assert_eq!(missing, vec!["RECIPIENT_EMAIL"]);
    }

    #[test]
    fn frontend_url_joins_the_allow_list() {
        let config = Config {
            frontend_url: Some("https://apply.example.com".into()),
            ..base_config()
        };

        let origins = config.allowed_origins();
        assert!(origins.contains(&"http://localhost:3000".to_string()));
        assert!(origins.contains(&"https://apply.example.com".to_string()));
    }
}
