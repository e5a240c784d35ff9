use crate::{
    abstract_trait::{
        order::{DynOrderCommandRepository, DynOrderQueryRepository, PaymentServiceTrait},
        payment::{ChargeRequest, CustomerDetails, DynPaymentGateway},
        user::DynUserQueryRepository,
    },
    domain::{
        requests::order::PaymentNotificationRequest,
        response::order::{ChargeResponse, OrderResponse},
    },
    model::{Order, PaymentStatus},
    policy::{Action, Actor, Resource, authorize},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use shared::{
    domain::responses::ApiResponse,
    errors::ServiceError,
    utils::{Method, ServiceTracer},
};
use tracing::{info, warn};

/// Gateway status to order payment status. `None` leaves the order as it is.
pub fn map_gateway_status(status: &str) -> Option<PaymentStatus> {
    match status.trim().to_ascii_lowercase().as_str() {
        "capture" | "settlement" => Some(PaymentStatus::Completed),
        _ => None,
    }
}

#[derive(Clone)]
pub struct PaymentServiceDeps {
    pub order_query: DynOrderQueryRepository,
    pub order_command: DynOrderCommandRepository,
    pub user_query: DynUserQueryRepository,
    pub gateway: DynPaymentGateway,
}

#[derive(Clone)]
pub struct PaymentService {
    order_query: DynOrderQueryRepository,
    order_command: DynOrderCommandRepository,
    user_query: DynUserQueryRepository,
    gateway: DynPaymentGateway,
    tracer: ServiceTracer,
}

impl PaymentService {
    pub fn new(deps: PaymentServiceDeps, tracer: ServiceTracer) -> Self {
        let PaymentServiceDeps {
            order_query,
            order_command,
            user_query,
            gateway,
        } = deps;

        Self {
            order_query,
            order_command,
            user_query,
            gateway,
            tracer,
        }
    }

    async fn load_order(&self, id: i32) -> Result<Order, ServiceError> {
        self.order_query
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Order"))
    }

    /// Records the gateway's view of a charge. Never touches inventory, never
    /// changes which charge the order is bound to.
    async fn apply_status(
        &self,
        order: Order,
        transaction_id: &str,
        status: &str,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        match order.transaction_id.as_deref() {
            Some(stored) if stored == transaction_id => {}
            Some(_) => {
                warn!(
                    "⚠️ Transaction {transaction_id} does not match order {}",
                    order.order_id
                );
                return Err(ServiceError::Conflict(format!(
                    "transaction {transaction_id} does not belong to order {}",
                    order.order_id
                )));
            }
            None => {
                warn!(
                    "⚠️ Notification for order {} which has no charge",
                    order.order_id
                );
                return Err(ServiceError::Conflict(format!(
                    "order {} has no charge awaiting notification",
                    order.order_id
                )));
            }
        }

        let Some(resolved) = map_gateway_status(status) else {
            info!(
                "⏳ Order {} still unresolved, gateway says '{status}'",
                order.order_id
            );
            return Ok(ApiResponse::success(
                "Payment status recorded",
                OrderResponse::from(order),
            ));
        };

        let updated = self
            .order_command
            .settle_payment(order.order_id, transaction_id, resolved)
            .await?
            .ok_or_else(|| {
                ServiceError::Conflict(format!(
                    "order {} is no longer bound to transaction {transaction_id}",
                    order.order_id
                ))
            })?;

        info!("💰 Order {} paid via {transaction_id}", order.order_id);
        Ok(ApiResponse::success(
            "Payment completed",
            OrderResponse::from(updated),
        ))
    }
}

#[async_trait]
impl PaymentServiceTrait for PaymentService {
    async fn create_charge(
        &self,
        actor: &Actor,
        order_id: i32,
    ) -> Result<ApiResponse<ChargeResponse>, ServiceError> {
        let tracing_ctx = self.tracer.start_tracing(
            "CreateCharge",
            vec![
                KeyValue::new("component", "payment"),
                KeyValue::new("order.id", order_id as i64),
            ],
        );

        let result = async {
            let order = self.load_order(order_id).await?;
            authorize(
                actor,
                Action::PayOrder,
                Resource::Order {
                    owner_id: order.user_id,
                },
            )?;

            if order.payment_status != PaymentStatus::Pending {
                return Err(ServiceError::Conflict(format!(
                    "order {order_id} is {} and not awaiting payment",
                    order.payment_status
                )));
            }

            let user = self
                .user_query
                .find_by_id(order.user_id)
                .await?
                .ok_or_else(|| ServiceError::not_found("User"))?;

            let handle = self
                .gateway
                .create_charge(&ChargeRequest {
                    order_ref: format!("ORDER-{order_id}"),
                    amount: order.total_amount,
                    customer: CustomerDetails {
                        user_id: user.user_id,
                        email: user.email,
                        first_name: user.first_name,
                        last_name: user.last_name,
                    },
                })
                .await?;

            self.order_command
                .attach_charge(order_id, &handle.transaction_id)
                .await?
                .ok_or_else(|| {
                    ServiceError::Conflict(format!("order {order_id} is no longer awaiting payment"))
                })?;

            Ok::<_, ServiceError>(ApiResponse::success(
                "Charge created",
                ChargeResponse {
                    order_id,
                    transaction_id: handle.transaction_id,
                    redirect_url: handle.redirect_url,
                },
            ))
        }
        .await;

        self.tracer
            .complete_with(&tracing_ctx, Method::Post, &result, "Charge created");
        result
    }

    async fn reconcile_payment(
        &self,
        req: &PaymentNotificationRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        info!(
            "🔔 Gateway notification for order {}: {}",
            req.order_id, req.transaction_status
        );

        let tracing_ctx = self.tracer.start_tracing(
            "ReconcilePayment",
            vec![
                KeyValue::new("component", "payment"),
                KeyValue::new("order.id", req.order_id as i64),
                KeyValue::new("gateway.status", req.transaction_status.clone()),
            ],
        );

        let result = match self.load_order(req.order_id).await {
            Ok(order) => {
                self.apply_status(order, &req.transaction_id, &req.transaction_status)
                    .await
            }
            Err(e) => Err(e),
        };

        self.tracer
            .complete_with(&tracing_ctx, Method::Put, &result, "Payment reconciled");
        result
    }

    async fn sync_payment(
        &self,
        actor: &Actor,
        order_id: i32,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        let tracing_ctx = self.tracer.start_tracing(
            "SyncPayment",
            vec![
                KeyValue::new("component", "payment"),
                KeyValue::new("order.id", order_id as i64),
            ],
        );

        let result = async {
            let order = self.load_order(order_id).await?;
            authorize(
                actor,
                Action::PayOrder,
                Resource::Order {
                    owner_id: order.user_id,
                },
            )?;

            let Some(transaction_id) = order.transaction_id.clone() else {
                warn!("⚠️ Order {order_id} has no charge to poll");
                return Err(ServiceError::Validation(vec![format!(
                    "order {order_id} has no charge to synchronize"
                )]));
            };

            let status = self.gateway.get_charge_status(&transaction_id).await?;
            self.apply_status(order, &transaction_id, &status).await
        }
        .await;

        self.tracer
            .complete_with(&tracing_ctx, Method::Get, &result, "Payment synchronized");
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_and_settlement_complete_the_order() {
        assert_eq!(map_gateway_status("capture"), Some(PaymentStatus::Completed));
        assert_eq!(
            map_gateway_status("settlement"),
            Some(PaymentStatus::Completed)
        );
        assert_eq!(
            map_gateway_status(" Settlement "),
            Some(PaymentStatus::Completed)
        );
    }

    #[test]
    fn other_statuses_stay_unresolved() {
        for status in ["pending", "deny", "expire", "cancel", ""] {
            assert_eq!(map_gateway_status(status), None, "status {status:?}");
        }
    }
}
