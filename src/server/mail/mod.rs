//! outbound mail: the message we hand over and the transports that send it

mod console;
mod smtp;
pub(crate) mod template;

use std::sync::Arc;
use async_trait::async_trait;
use derive_more::{Display, Error};
use crate::server::model::config::{MailConfig, Transport};
use crate::server::model::order::OrderSubmission;

pub(crate) use console::ConsoleMailer;
pub(crate) use smtp::SmtpMailer;

pub(crate) const ORDER_SUBJECT: &str = "New Order Received";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OrderMail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
    pub reply_to: String,
}

impl OrderMail {
    /// Orders always go from the service mailbox to the same mailbox, replies go to the customer.
    pub fn for_order(order: &OrderSubmission, mailbox: &str) -> Self {
        Self {
            from: mailbox.to_string(),
            to: mailbox.to_string(),
            subject: ORDER_SUBJECT.to_string(),
            html: template::order_summary(order),
            reply_to: order.user_email.clone(),
        }
    }
}

/// What the transport reported back on success
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub(crate) struct Confirmation(pub String);

#[derive(Debug, Display, Error)]
pub(crate) enum MailError {
    #[display("invalid address {_0:?}")]
    Address(#[error(not(source))] String),
    #[display("failed to build message: {_0}")]
    Build(lettre::error::Error),
    #[display("transport error: {_0}")]
    Transport(lettre::transport::smtp::Error),
    #[display("mail transport did not answer in time")]
    Timeout,
}

#[async_trait]
pub(crate) trait Mailer: Send + Sync {
    async fn send(&self, mail: OrderMail) -> Result<Confirmation, MailError>;
}

/// Pick the transport named in the config
pub(crate) fn from_config(config: &MailConfig) -> anyhow::Result<Arc<dyn Mailer>> {
    let mailer: Arc<dyn Mailer> = match config.transport {
        Transport::Smtp => Arc::new(SmtpMailer::new(config)?),
        Transport::Console => Arc::new(ConsoleMailer),
    };
    Ok(mailer)
}
