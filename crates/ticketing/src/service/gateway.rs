use crate::abstract_trait::payment::{ChargeHandle, ChargeRequest, PaymentGatewayTrait};
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::{collections::HashMap, sync::Mutex};
use tracing::info;
use uuid::Uuid;

/// In-process gateway for development and tests.
///
/// Charges start as `pending`; `set_status` plays the part of the provider
/// moving a charge along.
#[derive(Debug, Default)]
pub struct SandboxPaymentGateway {
    charges: Mutex<HashMap<String, String>>,
}

impl SandboxPaymentGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_status(&self, transaction_id: &str, status: &str) -> Result<(), ServiceError> {
        let mut charges = self.lock()?;
        match charges.get_mut(transaction_id) {
            Some(current) => {
                *current = status.to_string();
                Ok(())
            }
            None => Err(ServiceError::Upstream(format!(
                "unknown charge {transaction_id}"
            ))),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, ServiceError> {
        self.charges
            .lock()
            .map_err(|_| ServiceError::Upstream("sandbox gateway unavailable".into()))
    }
}

#[async_trait]
impl PaymentGatewayTrait for SandboxPaymentGateway {
    async fn create_charge(&self, req: &ChargeRequest) -> Result<ChargeHandle, ServiceError> {
        if req.amount <= 0 {
            return Err(ServiceError::Upstream(format!(
                "gateway rejected amount {} for {}",
                req.amount, req.order_ref
            )));
        }

        let transaction_id = format!("SBX-{}", Uuid::new_v4());
        self.lock()?
            .insert(transaction_id.clone(), "pending".to_string());

        info!(
            "💳 Sandbox charge {transaction_id} created for {} ({})",
            req.order_ref, req.amount
        );

        Ok(ChargeHandle {
            redirect_url: Some(format!("https://sandbox.invalid/pay/{transaction_id}")),
            transaction_id,
        })
    }

    async fn get_charge_status(&self, transaction_id: &str) -> Result<String, ServiceError> {
        self.lock()?
            .get(transaction_id)
            .cloned()
            .ok_or_else(|| ServiceError::Upstream(format!("unknown charge {transaction_id}")))
    }
}
