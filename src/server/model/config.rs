use std::env;
use std::net::{Ipv4Addr, SocketAddrV4};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use anyhow::{anyhow, Context};
use derive_more::Display;

const DEFAULT_HOST: Ipv4Addr = Ipv4Addr::UNSPECIFIED;
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_SMTP_RELAY: &str = "smtp.gmail.com";
const DEFAULT_MAIL_TIMEOUT_SECONDS: u64 = 30;
const DOTENV_FILE: &str = ".env";
const DEV_DOTENV_FILE: &str = ".env.dev";

/// Server configs, loaded once at startup and read-only afterwards
#[derive(Debug, Clone)]
pub(crate) struct ServerConfig {
    pub addr: SocketAddrV4,
    pub env: Env,
    pub mail: MailConfig,
}

/// Mailbox settings. The sending mailbox doubles as the restaurant inbox.
#[derive(Debug, Clone)]
pub(crate) struct MailConfig {
    pub user: String,
    pub password: String,
    pub relay: String,
    pub timeout: Duration,
    pub transport: Transport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[non_exhaustive]
pub(crate) enum Env {
    #[display("dev")]
    Dev,
    #[display("stg")]
    Stg,
    #[display("prod")]
    Prod,
}

impl FromStr for Env {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dev" => Ok(Self::Dev),
            "stg" => Ok(Self::Stg),
            "prod" => Ok(Self::Prod),
            s => Err(format!("Invalid Env: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub(crate) enum Transport {
    #[display("smtp")]
    Smtp,
    #[display("console")]
    Console,
}

impl FromStr for Transport {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "smtp" => Ok(Self::Smtp),
            "console" => Ok(Self::Console),
            s => Err(format!("Invalid mail transport: {s}")),
        }
    }
}

fn app_env() -> Env {
    env::var("APP_ENV")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(Env::Prod)
}

/// Load the optional dotenv files found in `dir` into the process env and return the resulting env.
/// dotenvy never overrides a set var, so the first file loaded wins: `.env.dev` before `.env` in dev.
pub(crate) fn load_dotenv(dir: &Path) -> Env {
    let before = app_env();
    if before == Env::Dev {
        dotenvy::from_path(dir.join(DEV_DOTENV_FILE)).ok();
    }
    dotenvy::from_path(dir.join(DOTENV_FILE)).ok();

    // APP_ENV=dev may itself come from .env
    let env = app_env();
    if env == Env::Dev && before != Env::Dev {
        dotenvy::from_path(dir.join(DEV_DOTENV_FILE)).ok();
    }
    env
}

impl ServerConfig {
    pub fn new(addr: SocketAddrV4, env: Env, mail: MailConfig) -> Self {
        Self { addr, env, mail }
    }

    /// verbose request logging is only enabled in dev
    pub fn is_dev(&self) -> bool {
        self.env == Env::Dev
    }

    /// Build the config from a variable lookup, e.g. `|k| std::env::var(k).ok()`.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = match lookup("APP_ENV") {
            Some(v) => v.parse::<Env>().map_err(|e| anyhow!(e))?,
            None => Env::Prod,
        };
        let host = match lookup("HOST") {
            Some(v) => v.parse::<Ipv4Addr>().with_context(|| format!("invalid HOST: {v}"))?,
            None => DEFAULT_HOST,
        };
        let port = match lookup("PORT") {
            Some(v) => v.parse::<u16>().with_context(|| format!("invalid PORT: {v}"))?,
            None => DEFAULT_PORT,
        };
        let transport = match lookup("MAIL_TRANSPORT") {
            Some(v) => v.parse::<Transport>().map_err(|e| anyhow!(e))?,
            None => Transport::Smtp,
        };
        let timeout = match lookup("MAIL_TIMEOUT_SECONDS") {
            Some(v) => Duration::from_secs(
                v.parse::<u64>().with_context(|| format!("invalid MAIL_TIMEOUT_SECONDS: {v}"))?,
            ),
            None => Duration::from_secs(DEFAULT_MAIL_TIMEOUT_SECONDS),
        };

        let (user, password) = (
            lookup("EMAIL_USER").unwrap_or_default(),
            lookup("EMAIL_PASS").unwrap_or_default(),
        );
        if transport == Transport::Smtp && (user.is_empty() || password.is_empty()) {
            return Err(anyhow!("EMAIL_USER and EMAIL_PASS are required for the smtp transport"));
        }

        Ok(Self::new(
            SocketAddrV4::new(host, port),
            env,
            MailConfig {
                user,
                password,
                relay: lookup("SMTP_RELAY").unwrap_or(DEFAULT_SMTP_RELAY.to_string()),
                timeout,
                transport,
            },
        ))
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashMap;
    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| vars.get(k).cloned()
    }

    #[test]
    fn defaults() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("EMAIL_USER", "kitchen@example.com"),
            ("EMAIL_PASS", "secret"),
        ]))
        .unwrap();
        assert_eq!(config.addr, SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 5000));
        assert_eq!(config.env, Env::Prod);
        assert!(!config.is_dev());
        assert_eq!(config.mail.relay, "smtp.gmail.com");
        assert_eq!(config.mail.timeout, Duration::from_secs(30));
        assert_eq!(config.mail.transport, Transport::Smtp);
    }

    #[test]
    fn overrides() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("APP_ENV", "dev"),
            ("HOST", "127.0.0.1"),
            ("PORT", "8081"),
            ("MAIL_TRANSPORT", "console"),
            ("MAIL_TIMEOUT_SECONDS", "5"),
            ("SMTP_RELAY", "smtp.example.com"),
        ]))
        .unwrap();
        assert_eq!(config.addr, SocketAddrV4::new(Ipv4Addr::LOCALHOST, 8081));
        assert!(config.is_dev());
        assert_eq!(config.mail.transport, Transport::Console);
        assert_eq!(config.mail.timeout, Duration::from_secs(5));
        assert_eq!(config.mail.relay, "smtp.example.com");
    }

    #[test]
    fn smtp_requires_credentials() {
        let err = ServerConfig::from_lookup(lookup_from(&[("EMAIL_USER", "kitchen@example.com")]));
        assert!(err.is_err());
    }

    #[test]
    fn dev_dotenv_takes_precedence() {
        let dir = env::temp_dir().join(format!("order-mailer-dotenv-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(".env"), "ORDER_MAILER_LAYERED=base\nORDER_MAILER_BASE_ONLY=base\n").unwrap();
        std::fs::write(dir.join(".env.dev"), "ORDER_MAILER_LAYERED=dev\n").unwrap();
        env::set_var("APP_ENV", "dev");

        let loaded = load_dotenv(&dir);
        std::fs::remove_dir_all(&dir).ok();

        assert_eq!(loaded, Env::Dev);
        assert_eq!(env::var("ORDER_MAILER_LAYERED").unwrap(), "dev");
        assert_eq!(env::var("ORDER_MAILER_BASE_ONLY").unwrap(), "base");
    }

    #[test]
    fn rejects_bad_values() {
        assert!(ServerConfig::from_lookup(lookup_from(&[("MAIL_TRANSPORT", "console"), ("PORT", "abc")])).is_err());
        assert!(ServerConfig::from_lookup(lookup_from(&[("MAIL_TRANSPORT", "pigeon")])).is_err());
        assert!(ServerConfig::from_lookup(lookup_from(&[("MAIL_TRANSPORT", "console"), ("APP_ENV", "qa")])).is_err());
    }
}
