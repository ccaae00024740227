use anyhow::Context;
use nvp_gateway_connect::{
    CheckoutDetailsRequest, CheckoutInitiationRequest, encoding_rs::Encoding,
};

#[derive(Clone)]
pub struct Config {
    pub endpoint: String,
    pub user: String,
    pub password: String,
    pub signature: String,
    pub version: String,
    pub response_encoding: &'static Encoding,
    pub action: String,
    pub amount: String,
    pub currency: String,
    pub return_url: String,
    pub cancel_url: String,
}

impl Config {
    #[cfg(debug_assertions)]
    const DEFAULT_ENDPOINT: &str = "https://api-3t.sandbox.paypal.com/nvp";
    #[cfg(not(debug_assertions))]
    const DEFAULT_ENDPOINT: &str = "https://api-3t.paypal.com/nvp";

    #[cfg(debug_assertions)]
    const APPROVAL_URL: &str = "https://www.sandbox.paypal.com/cgi-bin/webscr?cmd=_express-checkout";
    #[cfg(not(debug_assertions))]
    const APPROVAL_URL: &str = "https://www.paypal.com/cgi-bin/webscr?cmd=_express-checkout";

    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let required = |key: &str| lookup(key).with_context(|| format!("{key} env is not defined"));
        let optional = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_owned());

        let endpoint = lookup("NVP_ENDPOINT").unwrap_or_else(|| {
            tracing::warn!("NVP_ENDPOINT is not defined, using default one");
            Self::DEFAULT_ENDPOINT.to_owned()
        });
        let label = optional("NVP_RESPONSE_ENCODING", "utf-8");
        let response_encoding = Encoding::for_label(label.as_bytes())
            .with_context(|| format!("unknown response encoding: {label}"))?;

        Ok(Self {
            endpoint,
            user: required("NVP_USER")?,
            password: required("NVP_PWD")?,
            signature: required("NVP_SIGNATURE")?,
            version: optional("NVP_VERSION", "204.0"),
            response_encoding,
            action: optional("CHECKOUT_ACTION", "Sale"),
            amount: required("CHECKOUT_AMOUNT")?,
            currency: optional("CHECKOUT_CURRENCY", "USD"),
            return_url: required("CHECKOUT_RETURN_URL")?,
            cancel_url: required("CHECKOUT_CANCEL_URL")?,
        })
    }

    pub fn initiation_request(&self) -> CheckoutInitiationRequest {
        CheckoutInitiationRequest {
            user: self.user.clone(),
            password: self.password.clone(),
            signature: self.signature.clone(),
            method: "SetExpressCheckout".into(),
            version: self.version.clone(),
            action: self.action.clone(),
            amount: self.amount.clone(),
            currency_code: self.currency.clone(),
            cancel_url: self.cancel_url.clone(),
            return_url: self.return_url.clone(),
        }
    }

    pub fn details_request(&self, token: &str) -> CheckoutDetailsRequest {
        CheckoutDetailsRequest {
            user: self.user.clone(),
            password: self.password.clone(),
            signature: self.signature.clone(),
            method: "GetExpressCheckoutDetails".into(),
            version: self.version.clone(),
            access_token: token.to_owned(),
        }
    }

    /// Page the payer has to visit to approve the checkout.
    pub fn approval_url(&self, token: &str) -> String {
        format!("{}&token={token}", Self::APPROVAL_URL)
    }
}
