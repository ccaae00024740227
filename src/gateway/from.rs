use crate::gateway::checkout::{
    CheckoutDetailsRequest, CheckoutInitiationRequest, DetailsFields, InitiationFields,
};

impl<'a> From<&'a CheckoutInitiationRequest> for InitiationFields<'a> {
    fn from(
        CheckoutInitiationRequest {
            user,
            password,
            signature,
            method,
            version,
            action,
            amount,
            currency_code,
            cancel_url,
            return_url,
        }: &'a CheckoutInitiationRequest,
    ) -> Self {
        Self {
            user,
            password,
            signature,
            method,
            version,
            action,
            amount,
            currency_code,
            cancel_url,
            return_url,
        }
    }
}

impl<'a> From<&'a CheckoutDetailsRequest> for DetailsFields<'a> {
    fn from(
        CheckoutDetailsRequest {
            user,
            password,
            signature,
            method,
            version,
            access_token,
        }: &'a CheckoutDetailsRequest,
    ) -> Self {
        Self {
            user,
            password,
            signature,
            method,
            version,
            access_token,
        }
    }
}
