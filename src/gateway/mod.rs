use encoding_rs::Encoding;
use tracing::instrument;

use crate::gateway::{
    checkout::{DetailsFields, InitiationFields},
    wire::{PreparedRequest, RawResponse, TextDecoding},
};

/// Request payloads
mod checkout;
mod error;
/// Payload to wire parameter conversions
mod from;
/// Credential masking for logs
pub mod mask;
pub mod wire;

pub use checkout::{CheckoutDetailsRequest, CheckoutInitiationRequest};
pub use error::GatewayError;

pub type Result<T> = std::result::Result<T, GatewayError>;

/// Client for the express checkout operations of the classic NVP API.
///
/// The gateway is stateless: every call builds its own HTTP client, sends exactly one
/// request and returns the raw response text. Responses are not parsed, a gateway side
/// failure (`ACK=Failure`) is returned as text like any other response.
///
/// Each operation comes in a blocking and an async flavour. Both prepare the request with
/// the same function, so they put identical bytes on the wire.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExpressCheckoutGateway;

impl ExpressCheckoutGateway {
    pub fn new() -> Self {
        Self
    }

    /// Builds the `SetExpressCheckout` request: a form encoded POST to `endpoint`.
    pub fn initiation_request(
        payload: &CheckoutInitiationRequest,
        endpoint: &str,
    ) -> Result<PreparedRequest> {
        let fields = InitiationFields::from(payload);
        tracing::debug!(
            %endpoint,
            data = %mask::secure_serializable(&fields),
            "Gateway API SetExpressCheckout request"
        );
        PreparedRequest::form_post(endpoint, &fields)
    }

    /// Builds the `GetExpressCheckoutDetails` request: a GET to `endpoint` with the
    /// parameters in the query string.
    pub fn details_request(
        payload: &CheckoutDetailsRequest,
        endpoint: &str,
    ) -> Result<PreparedRequest> {
        let fields = DetailsFields::from(payload);
        tracing::debug!(
            %endpoint,
            data = %mask::secure_serializable(&fields),
            "Gateway API GetExpressCheckoutDetails request"
        );
        PreparedRequest::query_get(endpoint, &fields)
    }

    /// Executes `SetExpressCheckout`, blocking the current thread.
    ///
    /// The response body is decoded with `encoding`; bytes that are invalid in it fail the
    /// call with [`GatewayError::Decode`].
    ///
    /// # Panics
    ///
    /// Panics when called from within an async runtime, as the blocking HTTP client runs its
    /// own. Async callers use the `_async` variant or `tokio::task::spawn_blocking`.
    #[instrument(skip_all)]
    pub fn initiate_checkout(
        &self,
        payload: &CheckoutInitiationRequest,
        encoding: &'static Encoding,
        endpoint: &str,
    ) -> Result<String> {
        let request = Self::initiation_request(payload, endpoint)?;
        let response = request.send_blocking()?;
        Self::finish(response, TextDecoding::Strict(encoding))
    }

    /// Async equivalent of [`ExpressCheckoutGateway::initiate_checkout`].
    #[instrument(skip_all)]
    pub async fn initiate_checkout_async(
        &self,
        payload: &CheckoutInitiationRequest,
        encoding: &'static Encoding,
        endpoint: &str,
    ) -> Result<String> {
        let request = Self::initiation_request(payload, endpoint)?;
        let response = request.send().await?;
        Self::finish(response, TextDecoding::Strict(encoding))
    }

    /// Executes `GetExpressCheckoutDetails`, blocking the current thread.
    ///
    /// Unlike [`ExpressCheckoutGateway::initiate_checkout`] there is no caller supplied
    /// encoding: the body is decoded with the charset announced by the gateway, falling back
    /// to UTF-8, and malformed bytes are replaced instead of failing the call.
    ///
    /// # Panics
    ///
    /// Panics when called from within an async runtime, as the blocking HTTP client runs its
    /// own. Async callers use the `_async` variant or `tokio::task::spawn_blocking`.
    #[instrument(skip_all)]
    pub fn get_checkout_details(
        &self,
        payload: &CheckoutDetailsRequest,
        endpoint: &str,
    ) -> Result<String> {
        let request = Self::details_request(payload, endpoint)?;
        let response = request.send_blocking()?;
        Self::finish(response, TextDecoding::ResponseCharset)
    }

    /// Async equivalent of [`ExpressCheckoutGateway::get_checkout_details`].
    #[instrument(skip_all)]
    pub async fn get_checkout_details_async(
        &self,
        payload: &CheckoutDetailsRequest,
        endpoint: &str,
    ) -> Result<String> {
        let request = Self::details_request(payload, endpoint)?;
        let response = request.send().await?;
        Self::finish(response, TextDecoding::ResponseCharset)
    }

    fn finish(response: RawResponse, decoding: TextDecoding) -> Result<String> {
        let text = response.decode(decoding)?;
        tracing::debug!(
            status = response.status.as_u16(),
            data = %mask::secure_nvp(&text),
            "Gateway API response"
        );
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use reqwest::Method;

    use super::*;

    fn details_request() -> CheckoutDetailsRequest {
        CheckoutDetailsRequest {
            user: "u1".into(),
            password: "p1".into(),
            signature: "s1".into(),
            method: "GetExpressCheckoutDetails".into(),
            version: "2.3".into(),
            access_token: "EC-123".into(),
        }
    }

    #[test]
    fn details_request_is_a_query_get() {
        let request =
            ExpressCheckoutGateway::details_request(&details_request(), "http://gw/nvp").unwrap();
        assert_eq!(request.method, Method::GET);
        assert_eq!(
            request.url,
            "http://gw/nvp?USER=u1&PWD=p1&SIGNATURE=s1&METHOD=GetExpressCheckoutDetails\
             &VERSION=2.3&TOKEN=EC-123"
        );
        assert!(request.body.is_none());
    }

    #[test]
    fn initiation_request_is_a_form_post() {
        let payload = CheckoutInitiationRequest {
            amount: "10.00".into(),
            return_url: "http://x/return".into(),
            ..Default::default()
        };
        let request = ExpressCheckoutGateway::initiation_request(&payload, "http://gw/nvp").unwrap();
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.url, "http://gw/nvp");
        let body = request.body.unwrap();
        assert!(body.contains("PAYMENTREQUEST_0_AMT=10.00"));
        assert!(body.contains("returnUrl=http%3A%2F%2Fx%2Freturn"));
        assert!(body.contains("PWD=&"));
    }

    #[test]
    fn preparation_is_deterministic() {
        let first = ExpressCheckoutGateway::details_request(&details_request(), "http://gw/nvp");
        let second = ExpressCheckoutGateway::details_request(&details_request(), "http://gw/nvp");
        assert_eq!(first.unwrap(), second.unwrap());
    }
}
