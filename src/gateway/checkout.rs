use serde::Serialize;

/// Arguments of a `SetExpressCheckout` call.
///
/// Values are sent to the gateway verbatim. Nothing is validated here, the gateway
/// answers malformed input with its own error response.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CheckoutInitiationRequest {
    pub user: String,
    pub password: String,
    pub signature: String,
    pub method: String,
    pub version: String,
    /// Payment action, e.g. `Sale` or `Authorization`
    pub action: String,
    /// Decimal amount as the gateway expects it, e.g. `10.00`
    pub amount: String,
    pub currency_code: String,
    pub cancel_url: String,
    pub return_url: String,
}

/// Arguments of a `GetExpressCheckoutDetails` call.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CheckoutDetailsRequest {
    pub user: String,
    pub password: String,
    pub signature: String,
    pub method: String,
    pub version: String,
    /// Token returned by a previous `SetExpressCheckout` call
    pub access_token: String,
}

// Debug is implemented manually so credentials never end up in logs or panic messages
impl std::fmt::Debug for CheckoutInitiationRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutInitiationRequest")
            .field("user", &self.user)
            .field("password", &"***")
            .field("signature", &"***")
            .field("method", &self.method)
            .field("version", &self.version)
            .field("action", &self.action)
            .field("amount", &self.amount)
            .field("currency_code", &self.currency_code)
            .field("cancel_url", &self.cancel_url)
            .field("return_url", &self.return_url)
            .finish()
    }
}

impl std::fmt::Debug for CheckoutDetailsRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutDetailsRequest")
            .field("user", &self.user)
            .field("password", &"***")
            .field("signature", &"***")
            .field("method", &self.method)
            .field("version", &self.version)
            .field("access_token", &self.access_token)
            .finish()
    }
}

/// Wire parameters of `SetExpressCheckout`.
///
/// Field order is the serialization order.
#[derive(Debug, Serialize)]
pub struct InitiationFields<'a> {
    #[serde(rename = "USER")]
    pub user: &'a str,
    #[serde(rename = "PWD")]
    pub password: &'a str,
    #[serde(rename = "SIGNATURE")]
    pub signature: &'a str,
    #[serde(rename = "METHOD")]
    pub method: &'a str,
    #[serde(rename = "VERSION")]
    pub version: &'a str,
    #[serde(rename = "PAYMENTREQUEST_0_PAYMENTACTION")]
    pub action: &'a str,
    #[serde(rename = "PAYMENTREQUEST_0_AMT")]
    pub amount: &'a str,
    #[serde(rename = "PAYMENTREQUEST_0_CURRENCYCODE")]
    pub currency_code: &'a str,
    #[serde(rename = "cancelUrl")]
    pub cancel_url: &'a str,
    #[serde(rename = "returnUrl")]
    pub return_url: &'a str,
}

/// Wire parameters of `GetExpressCheckoutDetails`.
#[derive(Debug, Serialize)]
pub struct DetailsFields<'a> {
    #[serde(rename = "USER")]
    pub user: &'a str,
    #[serde(rename = "PWD")]
    pub password: &'a str,
    #[serde(rename = "SIGNATURE")]
    pub signature: &'a str,
    #[serde(rename = "METHOD")]
    pub method: &'a str,
    #[serde(rename = "VERSION")]
    pub version: &'a str,
    #[serde(rename = "TOKEN")]
    pub access_token: &'a str,
}
