use std::sync::Arc;
use std::time::Duration;
use crate::server::mail::Mailer;
use crate::server::model::config::ServerConfig;

/// Shared by every worker, never mutated after startup
#[derive(Clone)]
pub(crate) struct AppState {
    mailbox: String,
    mail_timeout: Duration,
    verbose: bool,
    mailer: Arc<dyn Mailer>,
}

impl AppState {
    pub fn new(config: &ServerConfig, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            mailbox: config.mail.user.clone(),
            mail_timeout: config.mail.timeout,
            verbose: config.is_dev(),
            mailer,
        }
    }

    pub fn get_mailbox(&self) -> &str {
        &self.mailbox
    }

    pub fn get_mail_timeout(&self) -> Duration {
        self.mail_timeout
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn get_mailer(&self) -> Arc<dyn Mailer> {
        self.mailer.clone()
    }
}
