#![doc = include_str!("../README.md")]

/// Express checkout operations of the classic NVP gateway API
///
/// This module builds the name-value payloads, sends them with either a blocking or an async
/// HTTP client and hands back the raw NVP response text.
pub mod gateway;

pub use encoding_rs;
pub use gateway::{
    CheckoutDetailsRequest, CheckoutInitiationRequest, ExpressCheckoutGateway, GatewayError,
};
