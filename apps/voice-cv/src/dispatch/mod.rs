//! Dispatcher — emails the rendered artifact to the address in the record.
//!
//! Pluggable behind the `Dispatcher` trait. `SmtpDispatcher` sends over
//! STARTTLS with `lettre`'s tokio transport. Failures are returned to the
//! session, which reports them by voice; they never touch the artifact.

use std::path::Path;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;
use tracing::info;

use crate::config::SmtpConfig;
use crate::models::Record;

pub const SUBJECT: &str = "Your CV from BlindCVBuilder";
pub const BODY: &str = "Hello! Attached is the CV you just created.";

const EMAIL_FIELD: &str = "email";
const ATTACHMENT_TYPE: &str = "application/x-tex";

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Message could not be built: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    #[error("Attachment unreadable: {0}")]
    Attachment(#[from] std::io::Error),

    #[error("Dispatch failed: {0}")]
    Other(String),
}

#[async_trait]
pub trait Dispatcher: Send + Sync {
    async fn send(
        &self,
        to: &str,
        subject: &str,
        body: &str,
        attachment: &Path,
    ) -> Result<(), DispatchError>;
}

/// The record's email, if present and shaped like an address.
pub fn dispatch_target(record: &Record) -> Option<&str> {
    record
        .provided_text(EMAIL_FIELD)
        .map(str::trim)
        .filter(|email| email.contains('@'))
}

// ────────────────────────────────────────────────────────────────────────────
// SmtpDispatcher
// ────────────────────────────────────────────────────────────────────────────

pub struct SmtpDispatcher {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpDispatcher {
    pub fn new(config: &SmtpConfig) -> Result<Self, DispatchError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Self {
            transport,
            from: config.from.parse()?,
        })
    }
}

#[async_trait]
impl Dispatcher for SmtpDispatcher {
    async fn send(
        &self,
        to: &str,
        subject: &str,
        body: &str,
        attachment: &Path,
    ) -> Result<(), DispatchError> {
        let bytes = tokio::fs::read(attachment).await?;
        let filename = attachment
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "cv.tex".to_string());

        let message = build_message(self.from.clone(), to, subject, body, filename, bytes)?;
        self.transport.send(message).await?;

        info!("CV emailed to {to}");
        Ok(())
    }
}

fn build_message(
    from: Mailbox,
    to: &str,
    subject: &str,
    body: &str,
    filename: String,
    bytes: Vec<u8>,
) -> Result<Message, DispatchError> {
    let content_type = ContentType::parse(ATTACHMENT_TYPE)
        .map_err(|e| DispatchError::Other(e.to_string()))?;

    let message = Message::builder()
        .from(from)
        .to(to.parse()?)
        .subject(subject)
        .multipart(
            MultiPart::mixed()
                .singlepart(SinglePart::plain(body.to_string()))
                .singlepart(Attachment::new(filename).body(bytes, content_type)),
        )?;
    Ok(message)
}

// ────────────────────────────────────────────────────────────────────────────
// Test support
// ────────────────────────────────────────────────────────────────────────────
