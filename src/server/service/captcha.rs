//! reCAPTCHA verification.

use serde::Deserialize;

use crate::server::model::auth::CaptchaOutcome;

pub const SITEVERIFY_URL: &str = "https://www.google.com/recaptcha/api/siteverify";

#[derive(Deserialize)]
struct SiteverifyResponse {
    #[serde(default)]
    success: bool,
}

pub struct CaptchaService<'a> {
    http: &'a reqwest::Client,
    secret: Option<&'a str>,
    endpoint: &'a str,
}

impl<'a> CaptchaService<'a> {
    /// Creates a verifier; with no secret every check passes.
    pub fn new(http: &'a reqwest::Client, secret: Option<&'a str>) -> Self {
        Self {
            http,
            secret,
            endpoint: SITEVERIFY_URL,
        }
    }

    /// Overrides the verification endpoint.
    pub fn with_endpoint(mut self, endpoint: &'a str) -> Self {
        self.endpoint = endpoint;
        self
    }

    /// Verifies a captcha response for the client at `ip`.
    ///
    /// # Returns
    /// - `Passed` - Captcha disabled, or the provider accepted the response
    /// - `Failed` - The provider rejected the response
    /// - `Unavailable` - The provider could not be queried
    pub async fn verify(&self, response: Option<&str>, ip: &str) -> CaptchaOutcome {
        let Some(secret) = self.secret else {
            return CaptchaOutcome::Passed;
        };

        let result = self
            .siteverify(secret, response.unwrap_or_default(), ip)
            .await;

        match result {
            Ok(body) if body.success => CaptchaOutcome::Passed,
            Ok(_) => CaptchaOutcome::Failed,
            Err(e) => {
                tracing::warn!("Captcha verification unavailable: {}", e);
                CaptchaOutcome::Unavailable
            }
        }
    }

    async fn siteverify(
        &self,
        secret: &str,
        response: &str,
        ip: &str,
    ) -> Result<SiteverifyResponse, reqwest::Error> {
        let params = [("secret", secret), ("response", response), ("remoteip", ip)];

        self.http
            .post(self.endpoint)
            .form(&params)
            .send()
            .await?
            .json::<SiteverifyResponse>()
            .await
    }
}
