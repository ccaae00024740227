//! Request preparation and response decoding shared by the blocking and async call paths.
//!
//! A call is split in three steps: the parameters are serialized into a [`PreparedRequest`],
//! the request is sent either with [`PreparedRequest::send`] or
//! [`PreparedRequest::send_blocking`], and the [`RawResponse`] body is decoded into text.
//! Only the middle step differs between the two execution modes, so both send the same bytes.

use std::borrow::Cow;

use encoding_rs::{Encoding, UTF_8};
use reqwest::{
    Method, StatusCode,
    header::{CONTENT_TYPE, HeaderValue},
};
use serde::Serialize;

use crate::gateway::{GatewayError, Result};

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Fully serialized outbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: String,
    /// Form encoded body, `None` for query string requests
    pub body: Option<String>,
}

impl PreparedRequest {
    /// POST with the fields form encoded in the body.
    pub fn form_post(endpoint: &str, fields: &impl Serialize) -> Result<Self> {
        Ok(Self {
            method: Method::POST,
            url: endpoint.to_owned(),
            body: Some(serde_urlencoded::to_string(fields)?),
        })
    }

    /// GET with the fields form encoded in a query string appended to the endpoint.
    pub fn query_get(endpoint: &str, fields: &impl Serialize) -> Result<Self> {
        let query = serde_urlencoded::to_string(fields)?;
        Ok(Self {
            method: Method::GET,
            url: format!("{endpoint}?{query}"),
            body: None,
        })
    }

    /// Sends the request on a client owned by this call.
    pub async fn send(&self) -> Result<RawResponse> {
        let client = reqwest::Client::builder().build()?;
        let mut request = client.request(self.method.clone(), &self.url);
        if let Some(body) = &self.body {
            request = request
                .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
                .body(body.clone());
        }
        let response = request.send().await?.error_for_status()?;
        let status = response.status();
        let content_type = response.headers().get(CONTENT_TYPE).cloned();
        let body = response.bytes().await?.to_vec();
        Ok(RawResponse {
            status,
            content_type,
            body,
        })
    }

    /// Blocking equivalent of [`PreparedRequest::send`].
    ///
    /// Must not be called from within an async runtime.
    pub fn send_blocking(&self) -> Result<RawResponse> {
        let client = reqwest::blocking::Client::builder().build()?;
        let mut request = client.request(self.method.clone(), &self.url);
        if let Some(body) = &self.body {
            request = request
                .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
                .body(body.clone());
        }
        let response = request.send()?.error_for_status()?;
        let status = response.status();
        let content_type = response.headers().get(CONTENT_TYPE).cloned();
        let body = response.bytes()?.to_vec();
        Ok(RawResponse {
            status,
            content_type,
            body,
        })
    }
}

/// How response bytes become text.
#[derive(Debug, Clone, Copy)]
pub enum TextDecoding {
    /// Caller selected encoding, malformed input is an error
    Strict(&'static Encoding),
    /// Charset from the response `Content-Type`, UTF-8 otherwise, malformed input replaced
    ResponseCharset,
}

/// Successful response as received from the gateway.
#[derive(Debug)]
pub struct RawResponse {
    pub status: StatusCode,
    pub content_type: Option<HeaderValue>,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn decode(&self, decoding: TextDecoding) -> Result<String> {
        match decoding {
            TextDecoding::Strict(encoding) => encoding
                .decode_without_bom_handling_and_without_replacement(&self.body)
                .map(Cow::into_owned)
                .ok_or(GatewayError::Decode {
                    encoding: encoding.name(),
                }),
            TextDecoding::ResponseCharset => {
                let encoding = self.charset().unwrap_or(UTF_8);
                let (text, _, _) = encoding.decode(&self.body);
                Ok(text.into_owned())
            }
        }
    }

    /// Encoding named by the `charset` parameter of the `Content-Type` header.
    fn charset(&self) -> Option<&'static Encoding> {
        let content_type: mime::Mime = self.content_type.as_ref()?.to_str().ok()?.parse().ok()?;
        let label = content_type.get_param(mime::CHARSET)?;
        Encoding::for_label(label.as_str().as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use encoding_rs::WINDOWS_1252;

    use super::*;

    fn response(content_type: Option<&'static str>, body: &[u8]) -> RawResponse {
        RawResponse {
            status: StatusCode::OK,
            content_type: content_type.map(HeaderValue::from_static),
            body: body.to_vec(),
        }
    }

    #[test]
    fn form_post_keeps_endpoint_and_fills_body() {
        let request = PreparedRequest::form_post(
            "https://api-3t.sandbox.example/nvp",
            &vec![("USER", "u1"), ("cancelUrl", "http://x/cancel")],
        )
        .unwrap();
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.url, "https://api-3t.sandbox.example/nvp");
        assert_eq!(
            request.body.as_deref(),
            Some("USER=u1&cancelUrl=http%3A%2F%2Fx%2Fcancel")
        );
    }

    #[test]
    fn query_get_appends_query_to_endpoint() {
        let request = PreparedRequest::query_get(
            "https://api-3t.sandbox.example/nvp",
            &vec![("USER", "a b"), ("TOKEN", "EC-123")],
        )
        .unwrap();
        assert_eq!(request.method, Method::GET);
        assert_eq!(
            request.url,
            "https://api-3t.sandbox.example/nvp?USER=a+b&TOKEN=EC-123"
        );
        assert!(request.body.is_none());
    }

    #[test]
    fn strict_decoding_uses_requested_encoding() {
        let response = response(Some("text/plain; charset=utf-8"), b"ACK=Success&NAME=Jos\xe9");
        assert_eq!(
            response.decode(TextDecoding::Strict(WINDOWS_1252)).unwrap(),
            "ACK=Success&NAME=José"
        );
    }

    #[test]
    fn strict_decoding_rejects_malformed_bytes() {
        let response = response(None, b"NAME=Jos\xe9");
        let err = response.decode(TextDecoding::Strict(UTF_8)).unwrap_err();
        assert!(matches!(err, GatewayError::Decode { encoding: "UTF-8" }));
    }

    #[test]
    fn strict_decoding_keeps_bom() {
        let response = response(None, b"\xef\xbb\xbfACK=Success");
        assert_eq!(
            response.decode(TextDecoding::Strict(UTF_8)).unwrap(),
            "\u{feff}ACK=Success"
        );
    }

    #[test]
    fn response_charset_is_honoured() {
        let response = response(
            Some("text/plain; charset=\"windows-1252\""),
            b"NAME=Jos\xe9",
        );
        assert_eq!(
            response.decode(TextDecoding::ResponseCharset).unwrap(),
            "NAME=José"
        );
    }

    #[test]
    fn response_charset_falls_back_to_lossy_utf8() {
        let response = response(Some("text/plain"), b"NAME=Jos\xe9");
        assert_eq!(
            response.decode(TextDecoding::ResponseCharset).unwrap(),
            "NAME=Jos\u{fffd}"
        );

        let unknown = RawResponse {
            content_type: Some(HeaderValue::from_static("text/plain; charset=klingon")),
            ..response
        };
        assert_eq!(
            unknown.decode(TextDecoding::ResponseCharset).unwrap(),
            "NAME=Jos\u{fffd}"
        );
    }

    #[test]
    fn charset_inside_quoted_parameter_is_ignored() {
        let response = response(
            Some("text/plain; note=\"a;charset=windows-1252\""),
            b"NAME=Jos\xe9",
        );
        assert_eq!(
            response.decode(TextDecoding::ResponseCharset).unwrap(),
            "NAME=Jos\u{fffd}"
        );
    }
}
