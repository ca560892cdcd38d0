use async_trait::async_trait;
use log::info;
use crate::server::mail::{Confirmation, MailError, Mailer, OrderMail};

/// Logs mails instead of sending them, for local runs without a mailbox
pub(crate) struct ConsoleMailer;

#[async_trait]
impl Mailer for ConsoleMailer {
    async fn send(&self, mail: OrderMail) -> Result<Confirmation, MailError> {
        info!(
            "mail from={} to={} reply_to={} subject={:?}\n{}",
            mail.from, mail.to, mail.reply_to, mail.subject, mail.html
        );
        Ok(Confirmation("logged to console".to_string()))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[actix_web::test]
    async fn always_confirms() {
        let mail = OrderMail {
            from: String::new(),
            to: String::new(),
            subject: "New Order Received".to_string(),
            html: String::new(),
            reply_to: "a@b.com".to_string(),
        };
        assert!(ConsoleMailer.send(mail).await.is_ok());
    }
}
