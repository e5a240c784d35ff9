use crate::{
    domain::{
        requests::event::{CreateEventRequest, FindAllEvents, UpdateEventRequest},
        response::event::EventResponse,
    },
    policy::Actor,
};
use async_trait::async_trait;
use shared::{
    domain::responses::{ApiResponse, ApiResponsePagination},
    errors::ServiceError,
};
use std::sync::Arc;

pub type DynEventService = Arc<dyn EventServiceTrait + Send + Sync>;

#[async_trait]
pub trait EventServiceTrait {
    async fn create_event(
        &self,
        actor: &Actor,
        req: &CreateEventRequest,
    ) -> Result<ApiResponse<EventResponse>, ServiceError>;
    async fn get_event(&self, id: i32) -> Result<ApiResponse<EventResponse>, ServiceError>;
    async fn list_events(
        &self,
        req: &FindAllEvents,
    ) -> Result<ApiResponsePagination<Vec<EventResponse>>, ServiceError>;
    async fn update_event(
        &self,
        actor: &Actor,
        id: i32,
        req: &UpdateEventRequest,
    ) -> Result<ApiResponse<EventResponse>, ServiceError>;
    async fn publish_event(
        &self,
        actor: &Actor,
        id: i32,
    ) -> Result<ApiResponse<EventResponse>, ServiceError>;
    async fn delete_event(&self, actor: &Actor, id: i32) -> Result<ApiResponse<()>, ServiceError>;
}
