use anyhow::Context;
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use log::debug;
use crate::server::mail::{Confirmation, MailError, Mailer, OrderMail};
use crate::server::model::config::MailConfig;

/// Sends through an authenticated SMTP relay
pub(crate) struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(config: &MailConfig) -> anyhow::Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.relay)
            .with_context(|| format!("failed to set up smtp relay {}", config.relay))?
            .credentials(Credentials::new(config.user.clone(), config.password.clone()))
            .timeout(Some(config.timeout))
            .build();
        Ok(Self { transport })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, mail: OrderMail) -> Result<Confirmation, MailError> {
        let message = build_message(&mail)?;
        let response = self
            .transport
            .send(message)
            .await
            .map_err(MailError::Transport)?;
        debug!("smtp relay answered {}", response.code());
        Ok(Confirmation(format!(
            "{} {}",
            response.code(),
            response.message().collect::<Vec<_>>().join(" ")
        )))
    }
}

fn mailbox(addr: &str) -> Result<Mailbox, MailError> {
    addr.parse::<Mailbox>()
        .map_err(|_| MailError::Address(addr.to_string()))
}

fn build_message(mail: &OrderMail) -> Result<Message, MailError> {
    Message::builder()
        .from(mailbox(&mail.from)?)
        .to(mailbox(&mail.to)?)
        .reply_to(mailbox(&mail.reply_to)?)
        .subject(mail.subject.as_str())
        .header(ContentType::TEXT_HTML)
        .body(mail.html.clone())
        .map_err(MailError::Build)
}
