use crate::{
    domain::{
        requests::ticket::{BookTicketRequest, IssueTicketsRequest, UpdateTicketRequest},
        response::ticket::{BookingResponse, TicketResponse},
    },
    policy::Actor,
};
use async_trait::async_trait;
use shared::{domain::responses::ApiResponse, errors::ServiceError};
use std::sync::Arc;

pub type DynBookingService = Arc<dyn BookingServiceTrait + Send + Sync>;
pub type DynTicketService = Arc<dyn TicketServiceTrait + Send + Sync>;

#[async_trait]
pub trait BookingServiceTrait {
    async fn book_tickets(
        &self,
        actor: &Actor,
        req: &BookTicketRequest,
    ) -> Result<ApiResponse<BookingResponse>, ServiceError>;
}

#[async_trait]
pub trait TicketServiceTrait {
    async fn issue_tickets(
        &self,
        actor: &Actor,
        req: &IssueTicketsRequest,
    ) -> Result<ApiResponse<Vec<TicketResponse>>, ServiceError>;
    async fn cancel_ticket(
        &self,
        actor: &Actor,
        id: i32,
    ) -> Result<ApiResponse<TicketResponse>, ServiceError>;
    async fn check_in(
        &self,
        actor: &Actor,
        id: i32,
    ) -> Result<ApiResponse<TicketResponse>, ServiceError>;
    async fn delete_ticket(&self, actor: &Actor, id: i32) -> Result<ApiResponse<()>, ServiceError>;
    async fn get_ticket(
        &self,
        actor: &Actor,
        id: i32,
    ) -> Result<ApiResponse<TicketResponse>, ServiceError>;
    async fn get_ticket_by_code(
        &self,
        actor: &Actor,
        code: &str,
    ) -> Result<ApiResponse<TicketResponse>, ServiceError>;
    async fn update_ticket(
        &self,
        actor: &Actor,
        id: i32,
        req: &UpdateTicketRequest,
    ) -> Result<ApiResponse<TicketResponse>, ServiceError>;
    async fn list_user_tickets(
        &self,
        actor: &Actor,
        user_id: i32,
    ) -> Result<ApiResponse<Vec<TicketResponse>>, ServiceError>;
    async fn list_event_tickets(
        &self,
        actor: &Actor,
        event_id: i32,
    ) -> Result<ApiResponse<Vec<TicketResponse>>, ServiceError>;
    /// Admins see every ticket, organizers the tickets of their own events.
    async fn list_all_tickets(
        &self,
        actor: &Actor,
    ) -> Result<ApiResponse<Vec<TicketResponse>>, ServiceError>;
}
