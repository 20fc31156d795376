use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use configs::OtpConfig;

use super::errors::AuthError;

const APPROVED: &str = "approved";

/// SMS one-time password delivery and verification.
#[async_trait]
pub trait OtpProvider: Send + Sync {
    async fn send_otp(&self, phone: &str) -> Result<(), AuthError>;
    /// `Ok` only when the provider approves `code` for `phone`.
    async fn verify_otp(&self, phone: &str, code: &str) -> Result<(), AuthError>;
}

#[derive(Debug, Deserialize)]
struct VerificationResponse {
    status: String,
}

/// Twilio Verify v2 client.
pub struct TwilioVerifyClient {
    http: reqwest::Client,
    cfg: OtpConfig,
}

impl TwilioVerifyClient {
    pub fn new(cfg: OtpConfig) -> Self {
        Self { http: reqwest::Client::new(), cfg }
    }

    pub fn with_client(http: reqwest::Client, cfg: OtpConfig) -> Self {
        Self { http, cfg }
    }

    fn endpoint(&self, action: &str) -> String {
        format!("{}/v2/Services/{}/{}", self.cfg.base_url.trim_end_matches('/'), self.cfg.service_sid, action)
    }

    async fn post(&self, action: &str, form: &[(&str, &str)]) -> Result<VerificationResponse, AuthError> {
        let resp = self.http
            .post(self.endpoint(action))
            .basic_auth(&self.cfg.account_sid, Some(&self.cfg.auth_token))
            .form(form)
            .send()
            .await
            .map_err(|e| AuthError::Provider(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!(%status, action, "twilio request failed");
            return Err(AuthError::Provider(format!("twilio {}: {}", status, body)));
        }
        resp.json::<VerificationResponse>().await.map_err(|e| AuthError::Provider(e.to_string()))
    }
}

#[async_trait]
impl OtpProvider for TwilioVerifyClient {
    async fn send_otp(&self, phone: &str) -> Result<(), AuthError> {
        let res = self.post("Verifications", &[("To", phone), ("Channel", "sms")]).await?;
        debug!(status = %res.status, "otp sent");
        Ok(())
    }

    async fn verify_otp(&self, phone: &str, code: &str) -> Result<(), AuthError> {
        let res = self.post("VerificationCheck", &[("To", phone), ("Code", code)]).await?;
        if res.status == APPROVED {
            Ok(())
        } else {
            debug!(status = %res.status, "otp not approved");
            Err(AuthError::OtpRejected)
        }
    }
}

/// In-memory provider accepting one fixed code.
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    pub struct MockOtpProvider {
        code: String,
        fail_delivery: bool,
        sent: Mutex<Vec<String>>,
    }

    impl MockOtpProvider {
        pub fn accepting(code: &str) -> Self {
            Self { code: code.to_string(), fail_delivery: false, sent: Mutex::new(Vec::new()) }
        }

        /// Every call fails as if the provider were unreachable.
        pub fn unreachable() -> Self {
            Self { code: String::new(), fail_delivery: true, sent: Mutex::new(Vec::new()) }
        }

        pub fn sent_to(&self) -> Vec<String> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl OtpProvider for MockOtpProvider {
        async fn send_otp(&self, phone: &str) -> Result<(), AuthError> {
            if self.fail_delivery {
                return Err(AuthError::Provider("provider unreachable".into()));
            }
            self.sent.lock().unwrap().push(phone.to_string());
            Ok(())
        }

        async fn verify_otp(&self, _phone: &str, code: &str) -> Result<(), AuthError> {
            if self.fail_delivery {
                return Err(AuthError::Provider("provider unreachable".into()));
            }
            if code == self.code { Ok(()) } else { Err(AuthError::OtpRejected) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> TwilioVerifyClient {
        TwilioVerifyClient::new(OtpConfig {
            account_sid: "AC123".into(),
            auth_token: "token".into(),
            service_sid: "VA123".into(),
            base_url: server.uri(),
        })
    }

    #[tokio::test]
    async fn send_posts_sms_verification() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/Services/VA123/Verifications"))
            .and(header_exists("authorization"))
            .and(body_string_contains("To=%2B15550100"))
            .and(body_string_contains("Channel=sms"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({"status": "pending"})))
            .expect(1)
            .mount(&server)
            .await;

        client(&server).send_otp("+15550100").await.unwrap();
    }

    #[tokio::test]
    async fn verify_accepts_only_approved() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/Services/VA123/VerificationCheck"))
            .and(body_string_contains("Code=1234"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "approved"})))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v2/Services/VA123/VerificationCheck"))
            .and(body_string_contains("Code=0000"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "pending"})))
            .mount(&server)
            .await;

        let c = client(&server);
        assert!(c.verify_otp("+15550100", "1234").await.is_ok());
        assert!(matches!(c.verify_otp("+15550100", "0000").await, Err(AuthError::OtpRejected)));
    }

    #[tokio::test]
    async fn provider_error_status_is_not_a_rejection() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
            .mount(&server)
            .await;

        let c = client(&server);
        assert!(matches!(c.send_otp("+15550100").await, Err(AuthError::Provider(_))));
        assert!(matches!(c.verify_otp("+15550100", "1234").await, Err(AuthError::Provider(_))));
    }
}
