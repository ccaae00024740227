use anyhow::Context;

/// Decoded name-value pairs of a gateway response.
#[derive(Debug)]
pub struct NvpResponse(Vec<(String, String)>);

impl NvpResponse {
    pub fn parse(body: &str) -> anyhow::Result<Self> {
        serde_urlencoded::from_str(body)
            .map(Self)
            .context("gateway response is not nvp encoded")
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Fails unless the gateway acknowledged the call.
    pub fn ensure_success(&self) -> anyhow::Result<()> {
        match self.get("ACK") {
            Some("Success" | "SuccessWithWarning") => Ok(()),
            ack => {
                let reason = self
                    .get("L_LONGMESSAGE0")
                    .or_else(|| self.get("L_SHORTMESSAGE0"))
                    .unwrap_or("no error message");
                anyhow::bail!(
                    "gateway call failed (ACK={}): {reason}",
                    ack.unwrap_or("missing")
                )
            }
        }
    }

    pub fn token(&self) -> anyhow::Result<&str> {
        self.get("TOKEN")
            .context("TOKEN is missing from gateway response")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_token_from_successful_response() {
        let response = NvpResponse::parse(
            "TOKEN=EC%2d8TW23961VR2227913&TIMESTAMP=2026%2d10%2d19T10%3a00%3a00Z&ACK=Success&VERSION=204%2e0",
        )
        .unwrap();
        response.ensure_success().unwrap();
        assert_eq!(response.token().unwrap(), "EC-8TW23961VR2227913");
        assert_eq!(response.get("VERSION"), Some("204.0"));
    }

    #[test]
    fn failure_carries_gateway_message() {
        let response = NvpResponse::parse(
            "ACK=Failure&L_ERRORCODE0=10002&L_SHORTMESSAGE0=Security%20error\
             &L_LONGMESSAGE0=Security%20header%20is%20not%20valid",
        )
        .unwrap();
        let err = response.ensure_success().unwrap_err();
        assert_eq!(
            err.to_string(),
            "gateway call failed (ACK=Failure): Security header is not valid"
        );
        assert!(response.token().is_err());
    }

    #[test]
    fn missing_ack_is_a_failure() {
        let response = NvpResponse::parse("TOKEN=EC-1").unwrap();
        let err = response.ensure_success().unwrap_err();
        assert!(err.to_string().contains("ACK=missing"));
    }
}
