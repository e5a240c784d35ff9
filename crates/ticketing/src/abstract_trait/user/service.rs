use crate::{
    domain::{
        requests::user::{LoginRequest, RegisterRequest, UpdateRolesRequest},
        response::user::{TokenResponse, UserResponse},
    },
    policy::Actor,
};
use async_trait::async_trait;
use shared::{domain::responses::ApiResponse, errors::ServiceError};
use std::sync::Arc;

pub type DynIdentityService = Arc<dyn IdentityServiceTrait + Send + Sync>;

#[async_trait]
pub trait IdentityServiceTrait {
    async fn register(
        &self,
        req: &RegisterRequest,
    ) -> Result<ApiResponse<UserResponse>, ServiceError>;
    async fn login(&self, req: &LoginRequest) -> Result<ApiResponse<TokenResponse>, ServiceError>;
    /// Credential token to actor; every failure is an authentication error.
    async fn resolve_actor(&self, token: &str) -> Result<Actor, ServiceError>;
    async fn get_profile(&self, actor: &Actor) -> Result<ApiResponse<UserResponse>, ServiceError>;
    async fn update_roles(
        &self,
        actor: &Actor,
        user_id: i32,
        req: &UpdateRolesRequest,
    ) -> Result<ApiResponse<UserResponse>, ServiceError>;
}
