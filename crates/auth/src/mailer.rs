use super::*;
use async_trait::async_trait;

/// Outbound mail capability. The auth core sends exactly one kind of email:
/// the password-reset link.
#[async_trait]
pub trait Emailer: Send + Sync {
    async fn send_reset_email(&self, to: &str, url: &str) -> Result<(), AuthError>;
}

/// SMTP-backed mailer.
pub struct Smtp {
    transport: lettre::AsyncSmtpTransport<lettre::Tokio1Executor>,
    from: lettre::message::Mailbox,
}

impl Smtp {
    /// Missing or malformed `SMTP_URL`/`SMTP_FROM` is fatal at startup.
    pub fn from_env() -> Self {
        let ref url = std::env::var("SMTP_URL").expect("SMTP_URL must be set");
        let from = std::env::var("SMTP_FROM")
            .expect("SMTP_FROM must be set")
            .parse()
            .expect("SMTP_FROM must be a valid mailbox");
        let transport = lettre::AsyncSmtpTransport::<lettre::Tokio1Executor>::from_url(url)
            .expect("SMTP_URL must be a valid transport url")
            .build();
        Self { transport, from }
    }
}

#[async_trait]
impl Emailer for Smtp {
    async fn send_reset_email(&self, to: &str, url: &str) -> Result<(), AuthError> {
        use lettre::AsyncTransport;
        let message = lettre::Message::builder()
            .from(self.from.clone())
            .to(to.parse().map_err(AuthError::upstream)?)
            .subject("Reset your password for smush-tracker")
            .header(lettre::message::header::ContentType::TEXT_HTML)
            .body(body(url))
            .map_err(AuthError::upstream)?;
        self.transport
            .send(message)
            .await
            .map(|_| ())
            .map_err(AuthError::upstream)
    }
}

fn body(url: &str) -> String {
    format!(
        r#"<p>Hallo friend,</p>

<p>We received a request to reset your password. You can do so by visiting the following link:</p>

<a href="{url}">{url}</a>

<p>If you did not initiate this request, you can safely ignore it as it will expire shortly.</p>

<p>Keep smushing! :)</p>
"#
    )
}
