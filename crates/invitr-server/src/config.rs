use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use invitr_mail::SmtpSettings;

/// JWT secrets that must never reach production.
const PLACEHOLDER_SECRETS: &[&str] = &["change-me-to-a-random-string", "dev-secret-change-me"];

const DEFAULT_SENDER: &str = "Invitr <noreply@localhost>";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    pub jwt_secret: String,
    pub public_url: String,
    pub qr_dir: PathBuf,
    pub mail_sender: String,
    /// `None` when no relay is configured; mail is then only logged.
    pub smtp: Option<SmtpSettings>,
    pub geocoder_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let or = |key: &str, default: &str| var(key).unwrap_or_else(|| default.to_string());

        let jwt_secret = var("INVITR_JWT_SECRET").unwrap_or_default();
        if jwt_secret.is_empty() || PLACEHOLDER_SECRETS.contains(&jwt_secret.as_str()) {
            bail!("INVITR_JWT_SECRET is unset or still a placeholder; set it in your .env file");
        }

        let port = or("INVITR_PORT", "5000")
            .parse()
            .context("INVITR_PORT must be a port number")?;

        let mail_sender = or("INVITR_MAIL_SENDER", DEFAULT_SENDER);
        let smtp = match var("INVITR_SMTP_HOST") {
            Some(host) => Some(SmtpSettings {
                host,
                port: or("INVITR_SMTP_PORT", "587")
                    .parse()
                    .context("INVITR_SMTP_PORT must be a port number")?,
                username: var("INVITR_SMTP_USERNAME"),
                password: var("INVITR_SMTP_PASSWORD"),
                sender: mail_sender.clone(),
            }),
            None => None,
        };

        Ok(Self {
            host: or("INVITR_HOST", "0.0.0.0"),
            port,
            db_path: or("INVITR_DB_PATH", "invitr.db").into(),
            jwt_secret,
            public_url: or("INVITR_PUBLIC_URL", "http://localhost:5000")
                .trim_end_matches('/')
                .to_string(),
            qr_dir: or("INVITR_QR_DIR", "./static/qrcodes").into(),
            mail_sender,
            smtp,
            geocoder_url: or("INVITR_GEOCODER_URL", "https://nominatim.openstreetmap.org"),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_with_only_a_secret() {
        let config = config(&[("INVITR_JWT_SECRET", "s3cret")]).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 5000);
        assert_eq!(config.db_path, PathBuf::from("invitr.db"));
        assert_eq!(config.public_url, "http://localhost:5000");
        assert_eq!(config.qr_dir, PathBuf::from("./static/qrcodes"));
        assert!(config.smtp.is_none());
    }

    #[test]
    fn placeholder_or_missing_secret_is_rejected() {
        assert!(config(&[]).is_err());
        assert!(config(&[("INVITR_JWT_SECRET", "  ")]).is_err());
        assert!(config(&[("INVITR_JWT_SECRET", "dev-secret-change-me")]).is_err());
    }

    #[test]
    fn smtp_settings_follow_the_host() {
        let config = config(&[
            ("INVITR_JWT_SECRET", "s3cret"),
            ("INVITR_SMTP_HOST", "smtp.example.com"),
            ("INVITR_SMTP_USERNAME", "mailer"),
            ("INVITR_MAIL_SENDER", "Party <party@example.com>"),
            ("INVITR_PUBLIC_URL", "https://invitr.example/"),
        ])
        .unwrap();

        let smtp = config.smtp.unwrap();
        assert_eq!(smtp.port, 587);
        assert_eq!(smtp.username.as_deref(), Some("mailer"));
        assert_eq!(smtp.password, None);
        assert_eq!(smtp.sender, "Party <party@example.com>");
        assert_eq!(config.public_url, "https://invitr.example");
    }

    #[test]
    fn bad_port_is_an_error() {
        assert!(config(&[("INVITR_JWT_SECRET", "s3cret"), ("INVITR_PORT", "http")]).is_err());
    }
}
