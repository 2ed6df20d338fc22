use crate::config::SmtpConfig;
use crate::errors::{AppError, AppResult};
use crate::export::ReportFile;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use std::fmt::Display;
use std::fs;

pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Mails generated reports to the fixed recipient.
pub struct ReportMailer<T: Transport> {
    transport: T,
    sender: Mailbox,
    recipient: Mailbox,
    subject: String,
    body: String,
}

impl ReportMailer<SmtpTransport> {
    /// STARTTLS relay built from the `smtp` config section.
    pub fn from_config(smtp: &SmtpConfig) -> AppResult<Self> {
        let mut builder = SmtpTransport::starttls_relay(smtp.host.trim())
            .map_err(to_dispatch_error)?
            .port(smtp.port);

        if !smtp.username.trim().is_empty() {
            builder = builder.credentials(Credentials::new(
                smtp.username.trim().to_string(),
                smtp.effective_password(),
            ));
        }

        Self::with_transport(builder.build(), smtp)
    }
}

impl<T> ReportMailer<T>
where
    T: Transport,
    T::Error: Display,
{
    pub fn with_transport(transport: T, smtp: &SmtpConfig) -> AppResult<Self> {
        let missing = smtp.missing_fields();
        if !missing.is_empty() {
            return Err(AppError::Config(format!(
                "missing mail settings: {}",
                missing.join(", ")
            )));
        }

        Ok(Self {
            transport,
            sender: parse_mailbox(&smtp.sender)?,
            recipient: parse_mailbox(&smtp.recipient)?,
            subject: smtp.subject.clone(),
            body: smtp.body.clone(),
        })
    }

    /// Send one message with the report attached. No retry.
    pub fn send_report(&self, report: &ReportFile) -> AppResult<()> {
        let bytes = fs::read(&report.path).map_err(|e| {
            AppError::Dispatch(format!("cannot read {}: {}", report.path.display(), e))
        })?;

        let filename = report
            .path
            .file_name()
            .map(|f| f.to_string_lossy().to_string())
            .unwrap_or_else(|| "attendance_report.xlsx".to_string());

        let content_type = ContentType::parse(XLSX_MIME).map_err(to_dispatch_error)?;

        let message = Message::builder()
            .from(self.sender.clone())
            .to(self.recipient.clone())
            .subject(self.subject.clone())
            .multipart(
                MultiPart::mixed()
                    .singlepart(SinglePart::plain(self.body.clone()))
                    .singlepart(Attachment::new(filename).body(bytes, content_type)),
            )
            .map_err(to_dispatch_error)?;

        self.transport.send(&message).map_err(to_dispatch_error)?;
        Ok(())
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

fn parse_mailbox(addr: &str) -> AppResult<Mailbox> {
    addr.trim()
        .parse::<Mailbox>()
        .map_err(|e| AppError::Config(format!("invalid address '{}': {}", addr, e)))
}

fn to_dispatch_error<E: Display>(e: E) -> AppError {
    AppError::Dispatch(e.to_string())
}
