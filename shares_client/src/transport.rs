//! Blocking HTTP transport used by the fetch pipeline.
//!
//! The pipeline only needs `GET` with a status and a text body, so the transport
//! is a one-method trait. Production code uses `reqwest`'s blocking client; tests
//! plug in a scripted stub.
use std::time::Duration;

use log::debug;
use shares_common::SharesError;

/// Status and body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// The API answers `200` and nothing else on success.
    pub const fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Transport contract: a failed exchange is a [`SharesError::Server`].
pub trait HttpTransport: Send + Sync {
    fn get(&self, url: &str) -> Result<HttpResponse, SharesError>;
}

/// Transport backed by `reqwest::blocking`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, SharesError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("shares/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| SharesError::Config(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

impl HttpTransport for ReqwestTransport {
    fn get(&self, url: &str) -> Result<HttpResponse, SharesError> {
        // Errors carry the URL, and the URL carries the token.
        let response = self.client.get(url).send().map_err(|e| {
            let e = e.without_url();
            if e.is_timeout() {
                SharesError::Server(format!("request timeout: {}", e))
            } else if e.is_connect() {
                SharesError::Server(format!("connection failed: {}", e))
            } else {
                SharesError::Server(format!("request failed: {}", e))
            }
        })?;

        let status = response.status().as_u16();
        let body = response.text().map_err(|e| {
            SharesError::Server(format!("failed to read response body: {}", e.without_url()))
        })?;
        debug!("HTTP {} ({} bytes)", status, body.len());

        Ok(HttpResponse { status, body })
    }
}


#[cfg(test)]
mod tests {
    use super::stub::StubTransport;
    use super::*;

    #[test]
    fn only_200_counts_as_ok() {
        assert!(HttpResponse::new(200, "{}").is_ok());
        assert!(!HttpResponse::new(204, "").is_ok());
        assert!(!HttpResponse::new(500, "").is_ok());
    }

    #[test]
    fn stub_answers_first_matching_route_and_counts_hits() {
        let stub = StubTransport::new()
            .route("/quote", 200, "{}")
            .fail("/logo", "boom");

        assert_eq!(stub.get("http://x/stock/AAPL/quote?token=t").expect("ok").status, 200);
        assert!(stub.get("http://x/stock/AAPL/logo?token=t").is_err());
        assert_eq!(stub.get("http://x/other").expect("ok").status, 404);
        assert_eq!(stub.hits_for("/quote"), 1);
        assert_eq!(stub.hits_for("http://x"), 3);
    }

    #[test]
    fn reqwest_transport_builds() {
        assert!(ReqwestTransport::new(Duration::from_millis(500)).is_ok());
    }
}
