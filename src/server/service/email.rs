//! Email dispatch.
//!
//! Mail delivery is an external collaborator. The dispatcher renders the subject and
//! body of each template and hands the message to its sink: the log in production, an
//! in-memory outbox in tests.

use std::sync::{Arc, Mutex};

/// Emails the panel sends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailTemplate {
    LoginSucceeded { ip: String },
    LoginFailed { ip: String },
    PasswordReset { ip: String, key: String },
    NewPassword { email: String, password: String },
}

/// A rendered message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
    pub template: EmailTemplate,
}

#[derive(Clone)]
enum EmailSink {
    Log,
    Capture(Arc<Mutex<Vec<OutgoingEmail>>>),
}

#[derive(Clone)]
pub struct EmailService {
    company_name: String,
    app_url: String,
    sink: EmailSink,
}

impl EmailService {
    pub fn new(company_name: impl Into<String>, app_url: impl Into<String>) -> Self {
        Self {
            company_name: company_name.into(),
            app_url: app_url.into(),
            sink: EmailSink::Log,
        }
    }

    /// Creates a dispatcher that keeps every message in the returned outbox.
    pub fn capturing(
        company_name: impl Into<String>,
        app_url: impl Into<String>,
    ) -> (Self, Arc<Mutex<Vec<OutgoingEmail>>>) {
        let outbox = Arc::new(Mutex::new(Vec::new()));

        let service = Self {
            company_name: company_name.into(),
            app_url: app_url.into(),
            sink: EmailSink::Capture(outbox.clone()),
        };

        (service, outbox)
    }

    /// Renders and dispatches one email.
    pub fn dispatch(&self, to: &str, template: EmailTemplate) {
        let email = OutgoingEmail {
            to: to.to_string(),
            subject: self.subject(&template),
            body: self.body(&template),
            template,
        };

        match &self.sink {
            EmailSink::Log => {
                tracing::info!(to = %email.to, subject = %email.subject, "Dispatching email");
            }
            EmailSink::Capture(outbox) => match outbox.lock() {
                Ok(mut outbox) => outbox.push(email),
                Err(_) => tracing::error!("Email outbox lock poisoned"),
            },
        }
    }

    fn subject(&self, template: &EmailTemplate) -> String {
        let title = match template {
            EmailTemplate::LoginSucceeded { .. } => "Account Login Notification",
            EmailTemplate::LoginFailed { .. } => "Account Login Failure Notification",
            EmailTemplate::PasswordReset { .. } => "Reset Your Password",
            EmailTemplate::NewPassword { .. } => "New Password",
        };

        format!("{} - {}", self.company_name, title)
    }

    fn body(&self, template: &EmailTemplate) -> String {
        match template {
            EmailTemplate::LoginSucceeded { ip } => {
                format!("Your account was logged into from {ip}.")
            }
            EmailTemplate::LoginFailed { ip } => {
                format!("A failed login attempt was made on your account from {ip}.")
            }
            EmailTemplate::PasswordReset { ip, key } => format!(
                "A password reset was requested from {ip}. Visit {}/auth/password/verify/{key} within 4 hours to receive a new password.",
                self.app_url.trim_end_matches('/')
            ),
            EmailTemplate::NewPassword { email, password } => format!(
                "The password for {email} has been reset. Your new password is: {password}"
            ),
        }
    }
}
