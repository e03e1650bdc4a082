use std::time::Duration;

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use serde_json::json;
use thiserror::Error;

use crate::domain::notification::Channel;
use crate::domain::settings::StoreSettings;

/// Errors raised by the concrete message providers.
#[derive(Debug, Error)]
pub enum SendError {
    #[error("smtp transport error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
    #[error("invalid email message: {0}")]
    Email(#[from] lettre::error::Error),
    #[error("invalid email address: {0}")]
    Address(#[from] lettre::address::AddressError),
    #[error("gateway request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("gateway rejected the message with status {0}")]
    GatewayStatus(u16),
}

/// A fully rendered message ready for delivery. The body is plain text for
/// SMS and WhatsApp and HTML for email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub channel: Channel,
    /// Phone number or email address, depending on the channel.
    pub recipient: String,
    /// Subject line, used by the email channel only.
    pub subject: String,
    pub body: String,
}

/// Delivery seam between the dispatcher and the outside world.
///
/// `Ok(true)` means the provider accepted the message, `Ok(false)` means the
/// channel is not configured for this deployment. Transport failures surface
/// as `Err` and are recorded by the caller, never propagated further.
#[cfg_attr(test, mockall::automock)]
pub trait MessageSender: Send + Sync {
    fn send(&self, settings: &StoreSettings, message: &OutboundMessage)
    -> Result<bool, SendError>;
}

/// Global provider endpoints, read from the environment at startup.
/// Per-tenant overrides from the settings bag take precedence field by field.
#[derive(Debug, Clone, Default)]
pub struct ProviderConfig {
    pub smtp_host: Option<String>,
    pub smtp_port: u16,
    pub smtp_username: Option<String>,
    pub smtp_password: Option<String>,
    pub smtp_from: Option<String>,
    pub sms_gateway_url: Option<String>,
    pub sms_api_key: Option<String>,
    pub whatsapp_gateway_url: Option<String>,
    pub whatsapp_api_key: Option<String>,
}

impl ProviderConfig {
    /// Reads the provider endpoints from the environment. Unset channels are
    /// simply disabled rather than an error.
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());

        Self {
            smtp_host: var("SMTP_HOST"),
            smtp_port: var("SMTP_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(587),
            smtp_username: var("SMTP_USERNAME"),
            smtp_password: var("SMTP_PASSWORD"),
            smtp_from: var("SMTP_FROM"),
            sms_gateway_url: var("SMS_GATEWAY_URL"),
            sms_api_key: var("SMS_API_KEY"),
            whatsapp_gateway_url: var("WHATSAPP_GATEWAY_URL"),
            whatsapp_api_key: var("WHATSAPP_API_KEY"),
        }
    }
}

/// Production `MessageSender` backed by SMTP for email and JSON HTTP
/// gateways for SMS and WhatsApp.
pub struct GatewayProviders {
    config: ProviderConfig,
}

impl GatewayProviders {
    pub fn new(config: ProviderConfig) -> Self {
        Self { config }
    }

    fn send_email(
        &self,
        settings: &StoreSettings,
        message: &OutboundMessage,
    ) -> Result<bool, SendError> {
        let Some(host) = self.config.smtp_host.as_deref() else {
            log::warn!("email channel requested but SMTP_HOST is not configured");
            return Ok(false);
        };

        let from = settings
            .smtp_from
            .as_deref()
            .or(self.config.smtp_from.as_deref())
            .unwrap_or("noreply@ironpress.local");

        let email = Message::builder()
            .from(from.parse()?)
            .to(message.recipient.parse()?)
            .subject(&message.subject)
            .header(ContentType::TEXT_HTML)
            .body(message.body.clone())?;

        let mut builder = SmtpTransport::relay(host)?.port(self.config.smtp_port);
        if let (Some(username), Some(password)) = (
            self.config.smtp_username.clone(),
            self.config.smtp_password.clone(),
        ) {
            builder = builder.credentials(Credentials::new(username, password));
        }

        builder.build().send(&email)?;
        Ok(true)
    }

    fn send_via_gateway(
        &self,
        url: &str,
        api_key: Option<&str>,
        message: &OutboundMessage,
    ) -> Result<bool, SendError> {
        // Built per call; sends run on dispatcher threads, never on the
        // async executor, and notification volume is low.
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()?;

        let mut request = client.post(url).json(&json!({
            "to": message.recipient,
            "message": message.body,
        }));
        if let Some(key) = api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(SendError::GatewayStatus(status.as_u16()));
        }

        Ok(true)
    }
}

impl MessageSender for GatewayProviders {
    fn send(
        &self,
        settings: &StoreSettings,
        message: &OutboundMessage,
    ) -> Result<bool, SendError> {
        match message.channel {
            Channel::Email => self.send_email(settings, message),
            Channel::Sms => {
                let url = settings
                    .sms_gateway_url
                    .as_deref()
                    .or(self.config.sms_gateway_url.as_deref());
                match url {
                    Some(url) => {
                        self.send_via_gateway(url, self.config.sms_api_key.as_deref(), message)
                    }
                    None => {
                        log::warn!("sms channel requested but no gateway is configured");
                        Ok(false)
                    }
                }
            }
            Channel::Whatsapp => {
                let url = settings
                    .whatsapp_gateway_url
                    .as_deref()
                    .or(self.config.whatsapp_gateway_url.as_deref());
                match url {
                    Some(url) => {
                        self.send_via_gateway(url, self.config.whatsapp_api_key.as_deref(), message)
                    }
                    None => {
                        log::warn!("whatsapp channel requested but no gateway is configured");
                        Ok(false)
                    }
                }
            }
        }
    }
}
