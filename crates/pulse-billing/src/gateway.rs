//! Payment gateway client.
//!
//! Thin delegation to Stripe's payment-intent endpoint: the service
//! creates an intent and hands the client secret back to the caller.
//! Everything else about the charge lifecycle belongs to the gateway.

use serde::Deserialize;
use tracing::info;

use crate::error::BillingError;

const PAYMENT_INTENTS_URL: &str = "https://api.stripe.com/v1/payment_intents";

/// A created payment intent, ready for client-side confirmation.
#[derive(Debug, Clone)]
pub struct PaymentIntent {
    pub client_secret: String,
}

#[derive(Debug, Deserialize)]
struct IntentResponse {
    client_secret: String,
}

/// Stripe payment-intent client.
#[derive(Clone)]
pub struct StripeGateway {
    client: reqwest::Client,
    secret_key: String,
}

impl StripeGateway {
    pub fn new(secret_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            secret_key,
        }
    }

    /// Create a payment intent for the given amount in cents.
    pub async fn create_intent(
        &self,
        amount_cents: i64,
        currency: &str,
    ) -> Result<PaymentIntent, BillingError> {
        if amount_cents <= 0 {
            return Err(BillingError::InvalidAmount);
        }

        let params = [
            ("amount", amount_cents.to_string()),
            ("currency", currency.to_string()),
            ("payment_method_types[]", "card".to_string()),
        ];

        let response = self
            .client
            .post(PAYMENT_INTENTS_URL)
            .basic_auth(&self.secret_key, None::<&str>)
            .form(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(BillingError::Gateway(format!(
                "payment intent creation returned {status}: {body}"
            )));
        }

        let intent: IntentResponse = response.json().await?;
        info!(amount_cents, currency, "Created payment intent");

        Ok(PaymentIntent {
            client_secret: intent.client_secret,
        })
    }
}
