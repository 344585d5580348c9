//! Customer notifications about robots becoming available
//!
//! When a robot is registered, every customer with a matching order gets one
//! email. Failures are returned to the caller, which only logs them: a
//! registration is never undone because mail could not be sent.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use shared::{validate_email, Language};
use thiserror::Error;

use crate::config::EmailConfig;
use crate::error::AppError;
use crate::repositories::OrderRepository;

/// Notification failures
#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("order lookup failed: {0}")]
    OrderLookup(#[from] AppError),

    #[error("invalid email address: {0}")]
    InvalidAddress(#[from] lettre::address::AddressError),

    #[error("could not build email: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("email transport failed: {0}")]
    Transport(String),
}

/// A plain-text email ready to be sent
#[derive(Debug, Clone, PartialEq)]
pub struct EmailMessage {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub body: String,
}

/// Outgoing mail transport
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver one message to all of its recipients
    async fn send(&self, message: &EmailMessage) -> Result<(), NotificationError>;
}

/// SMTP mailer
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    /// Build the transport; no connection is made until the first send
    pub fn from_config(config: &EmailConfig) -> Result<Self, NotificationError> {
        let mut builder = if config.smtp_starttls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
                .map_err(|e| NotificationError::Transport(e.to_string()))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_host)
        };
        builder = builder.port(config.smtp_port);

        if let (Some(username), Some(password)) = (&config.smtp_username, &config.smtp_password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        Ok(Self {
            transport: builder.build(),
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), NotificationError> {
        let mut builder = Message::builder()
            .from(message.from.parse::<Mailbox>()?)
            .subject(message.subject.clone())
            .header(ContentType::TEXT_PLAIN);
        for recipient in &message.to {
            builder = builder.to(recipient.parse::<Mailbox>()?);
        }
        let email = builder.body(message.body.clone())?;

        self.transport
            .send(email)
            .await
            .map_err(|e| NotificationError::Transport(e.to_string()))?;
        Ok(())
    }
}

/// Sends "your robot is available" emails
pub struct NotificationDispatcher<O> {
    orders: O,
    mailer: Arc<dyn Mailer>,
    sender: String,
    language: Language,
}

impl<O: OrderRepository> NotificationDispatcher<O> {
    pub fn new(orders: O, mailer: Arc<dyn Mailer>, config: &EmailConfig, language: Language) -> Self {
        Self {
            orders,
            mailer,
            sender: config.admin_address.clone(),
            language,
        }
    }

    /// Email every customer who ordered this model/version.
    ///
    /// Returns the number of recipients; zero means nothing was sent.
    pub async fn notify_new_robot(&self, model: &str, version: &str) -> Result<usize, NotificationError> {
        let orders = self.orders.find_by_robot(model, version).await?;

        let mut seen = HashSet::new();
        let mut recipients = Vec::new();
        for order in orders.iter().filter(|order| order.matches(model, version)) {
            let email = order.customer.email.trim();
            if let Err(reason) = validate_email(email) {
                tracing::warn!(order_id = %order.id, email, reason, "Skipping customer address");
                continue;
            }
            if seen.insert(email.to_lowercase()) {
                recipients.push(email.to_string());
            }
        }

        if recipients.is_empty() {
            tracing::debug!(model, version, "No customers waiting for this robot");
            return Ok(0);
        }

        let (subject, body) = compose_availability_message(self.language, model, version);
        let message = EmailMessage {
            from: self.sender.clone(),
            to: recipients,
            subject,
            body,
        };
        self.mailer.send(&message).await?;

        tracing::info!(model, version, recipients = message.to.len(), "Customers notified");
        Ok(message.to.len())
    }
}

/// Subject and body of the availability email
pub fn compose_availability_message(language: Language, model: &str, version: &str) -> (String, String) {
    match language {
        Language::Russian => (
            "Уведомление о наличии запрошенного робота".to_string(),
            format!(
                "Добрый день!\n\
                 Недавно вы интересовались нашим роботом модели {}, версии {}.\n\
                 Этот робот теперь в наличии. \
                 Если вам подходит этот вариант - пожалуйста, свяжитесь с нами.",
                model, version
            ),
        ),
        Language::English => (
            "The robot you asked about is available".to_string(),
            format!(
                "Good afternoon!\n\
                 Recently you were interested in our robot model {}, version {}.\n\
                 This robot is now in stock. \
                 If this option suits you, please contact us.",
                model, version
            ),
        ),
    }
}
