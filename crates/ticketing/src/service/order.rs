use crate::{
    abstract_trait::order::{DynOrderQueryRepository, OrderServiceTrait},
    domain::response::order::OrderResponse,
    model::{NewOrder, NewTicket, PaymentMethod, PaymentStatus},
    policy::{Action, Actor, Resource, authorize},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use shared::{
    config::PaymentPolicy,
    domain::responses::ApiResponse,
    errors::ServiceError,
    utils::{Method, ServiceTracer},
};
use tracing::info;

/// Groups the tickets of one booking into an order.
pub struct OrderAggregator;

impl OrderAggregator {
    /// `unit_price × tickets.len()`, checked against the tickets' own price snapshots.
    pub fn build_order(
        user_id: i32,
        tickets: &[NewTicket],
        unit_price: i64,
        payment_method: PaymentMethod,
        policy: PaymentPolicy,
    ) -> Result<NewOrder, ServiceError> {
        if tickets.is_empty() {
            return Err(ServiceError::Validation(vec![
                "an order must reference at least one ticket".into(),
            ]));
        }

        let total_amount = unit_price
            .checked_mul(tickets.len() as i64)
            .ok_or_else(|| ServiceError::Validation(vec!["order total overflows".into()]))?;

        let ticket_sum: i64 = tickets.iter().map(|t| t.price).sum();
        if ticket_sum != total_amount {
            return Err(ServiceError::Internal(format!(
                "order total {total_amount} does not match ticket prices {ticket_sum}"
            )));
        }

        Ok(NewOrder {
            user_id,
            total_amount,
            payment_status: initial_payment_status(policy),
            payment_method,
        })
    }
}

pub fn initial_payment_status(policy: PaymentPolicy) -> PaymentStatus {
    match policy {
        PaymentPolicy::AssumeCompleted => PaymentStatus::Completed,
        PaymentPolicy::AwaitGateway => PaymentStatus::Pending,
    }
}

#[derive(Clone)]
pub struct OrderService {
    query: DynOrderQueryRepository,
    tracer: ServiceTracer,
}

impl OrderService {
    pub fn new(query: DynOrderQueryRepository, tracer: ServiceTracer) -> Self {
        Self { query, tracer }
    }
}

#[async_trait]
impl OrderServiceTrait for OrderService {
    async fn get_order(
        &self,
        actor: &Actor,
        id: i32,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        let tracing_ctx = self
            .tracer
            .start_tracing("GetOrder", vec![KeyValue::new("order.id", id as i64)]);

        let result = async {
            let order = self
                .query
                .find_by_id(id)
                .await?
                .ok_or_else(|| ServiceError::not_found("Order"))?;

            authorize(
                actor,
                Action::ViewOrder,
                Resource::Order {
                    owner_id: order.user_id,
                },
            )?;

            Ok::<_, ServiceError>(ApiResponse::success(
                "Order retrieved successfully",
                OrderResponse::from(order),
            ))
        }
        .await;

        self.tracer
            .complete_with(&tracing_ctx, Method::Get, &result, "Order retrieved");
        result
    }

    async fn list_user_orders(
        &self,
        actor: &Actor,
    ) -> Result<ApiResponse<Vec<OrderResponse>>, ServiceError> {
        info!("📦 Listing orders for user {}", actor.user_id);

        let tracing_ctx = self.tracer.start_tracing(
            "ListUserOrders",
            vec![KeyValue::new("user.id", actor.user_id as i64)],
        );

        let result = self.query.find_by_user(actor.user_id).await;

        match result {
            Ok(orders) => {
                self.tracer
                    .complete_tracing_success(&tracing_ctx, Method::Get, "Orders listed");
                Ok(ApiResponse::success(
                    "Orders retrieved successfully",
                    orders.into_iter().map(OrderResponse::from).collect(),
                ))
            }
            Err(e) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, Method::Get, &e.to_string());
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{TicketStatus, TicketType};

    fn tickets(n: usize, price: i64) -> Vec<NewTicket> {
        (0..n)
            .map(|i| NewTicket {
                event_id: 1,
                user_id: 1,
                ticket_type: TicketType::General,
                price,
                status: TicketStatus::Confirmed,
                seat_number: None,
                code: format!("TKT-TEST-{i}"),
            })
            .collect()
    }

    #[test]
    fn total_is_unit_price_times_quantity() {
        let order = OrderAggregator::build_order(
            1,
            &tickets(3, 20),
            20,
            PaymentMethod::CreditCard,
            PaymentPolicy::AssumeCompleted,
        )
        .unwrap();
        assert_eq!(order.total_amount, 60);
        assert_eq!(order.payment_status, PaymentStatus::Completed);
    }

    #[test]
    fn awaiting_gateway_starts_pending() {
        let order = OrderAggregator::build_order(
            1,
            &tickets(1, 5),
            5,
            PaymentMethod::Paypal,
            PaymentPolicy::AwaitGateway,
        )
        .unwrap();
        assert_eq!(order.payment_status, PaymentStatus::Pending);
    }

    #[test]
    fn empty_orders_are_rejected() {
        let err = OrderAggregator::build_order(
            1,
            &[],
            20,
            PaymentMethod::Cash,
            PaymentPolicy::AssumeCompleted,
        )
        .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[test]
    fn mismatched_snapshot_prices_are_rejected() {
        let err = OrderAggregator::build_order(
            1,
            &tickets(2, 15),
            20,
            PaymentMethod::Cash,
            PaymentPolicy::AssumeCompleted,
        )
        .unwrap_err();
        assert!(matches!(err, ServiceError::Internal(_)));
    }
}
