use crate::{
    abstract_trait::user::{DynUserCommandRepository, DynUserQueryRepository, IdentityServiceTrait},
    domain::{
        requests::user::{LoginRequest, NewUser, RegisterRequest, UpdateRolesRequest},
        response::user::{TokenResponse, UserResponse},
    },
    model::{Role, RoleSet, User},
    policy::{Action, Actor, Resource, authorize},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use shared::{
    abstract_trait::{DynHashing, DynJwtService},
    domain::responses::ApiResponse,
    errors::ServiceError,
    utils::{Method, ServiceTracer},
};
use tracing::{error, info, warn};

const ACCESS_TOKEN_TTL_SECS: i64 = 60 * 60;

#[derive(Clone)]
pub struct IdentityServiceDeps {
    pub query: DynUserQueryRepository,
    pub command: DynUserCommandRepository,
    pub hashing: DynHashing,
    pub jwt: DynJwtService,
}

/// Accounts, credentials and the token-to-actor lookup.
#[derive(Clone)]
pub struct IdentityService {
    query: DynUserQueryRepository,
    command: DynUserCommandRepository,
    hashing: DynHashing,
    jwt: DynJwtService,
    tracer: ServiceTracer,
}

impl IdentityService {
    pub fn new(deps: IdentityServiceDeps, tracer: ServiceTracer) -> Self {
        let IdentityServiceDeps {
            query,
            command,
            hashing,
            jwt,
        } = deps;

        Self {
            query,
            command,
            hashing,
            jwt,
            tracer,
        }
    }

    async fn load(&self, id: i32) -> Result<User, ServiceError> {
        self.query
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User"))
    }
}

#[async_trait]
impl IdentityServiceTrait for IdentityService {
    async fn register(
        &self,
        req: &RegisterRequest,
    ) -> Result<ApiResponse<UserResponse>, ServiceError> {
        info!("🏗️ Registering user");

        let method = Method::Post;
        let tracing_ctx = self.tracer.start_tracing(
            "Register",
            vec![
                KeyValue::new("component", "identity"),
                KeyValue::new("operation", "register"),
            ],
        );

        if req.password != req.confirm_password {
            let err = ServiceError::Validation(vec![
                "password and confirm_password do not match".into(),
            ]);
            self.tracer
                .complete_tracing_error(&tracing_ctx, method, &err.to_string());
            return Err(err);
        }

        match self.query.find_by_email(&req.email).await {
            Ok(Some(_)) => {
                warn!("⚠️ Registration refused: email already in use");
                let err = ServiceError::Conflict("email already registered".into());
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, &err.to_string());
                return Err(err);
            }
            Ok(None) => {}
            Err(e) => {
                error!("❌ Failed to look up email: {e}");
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, &e.to_string());
                return Err(e.into());
            }
        }

        let password = match self.hashing.hash_password(&req.password).await {
            Ok(hash) => hash,
            Err(e) => {
                error!("❌ Failed to hash password: {e}");
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Failed to hash password");
                return Err(e);
            }
        };

        let new_user = NewUser {
            email: req.email.clone(),
            password,
            first_name: req.first_name.clone(),
            last_name: req.last_name.clone(),
            phone: req.phone.clone(),
        };

        let roles = if req.request_organizer_access {
            RoleSet::new([Role::Attendee, Role::Organizer])
        } else {
            RoleSet::attendee()
        };

        let result = self
            .command
            .create_user(&new_user, &roles)
            .await
            .map(|user| ApiResponse::success("User registered successfully", user.into()))
            .map_err(ServiceError::from);

        self.tracer
            .complete_with(&tracing_ctx, method, &result, "User registered");
        result
    }

    async fn login(&self, req: &LoginRequest) -> Result<ApiResponse<TokenResponse>, ServiceError> {
        let tracing_ctx = self
            .tracer
            .start_tracing("Login", vec![KeyValue::new("component", "identity")]);

        let result = async {
            let user = self
                .query
                .find_by_email(&req.email)
                .await?
                .ok_or(ServiceError::InvalidCredentials)?;

            self.hashing
                .compare_password(&user.password, &req.password)
                .await
                .map_err(|_| ServiceError::InvalidCredentials)?;

            let access_token = self.jwt.generate_token(user.user_id, "access")?;

            Ok::<_, ServiceError>(ApiResponse::success(
                "Login successful",
                TokenResponse {
                    access_token,
                    token_type: "Bearer".into(),
                    expires_in: ACCESS_TOKEN_TTL_SECS,
                },
            ))
        }
        .await;

        self.tracer
            .complete_with(&tracing_ctx, Method::Post, &result, "User logged in");
        result
    }

    async fn resolve_actor(&self, token: &str) -> Result<Actor, ServiceError> {
        let user_id = self.jwt.verify_token(token, "access")?;

        match self.query.find_by_id(user_id).await? {
            Some(user) => Ok(Actor::new(user.user_id, user.roles)),
            None => {
                warn!("⚠️ Token for unknown user {user_id}");
                Err(ServiceError::InvalidCredentials)
            }
        }
    }

    async fn get_profile(&self, actor: &Actor) -> Result<ApiResponse<UserResponse>, ServiceError> {
        let tracing_ctx = self.tracer.start_tracing(
            "GetProfile",
            vec![KeyValue::new("user.id", actor.user_id as i64)],
        );

        let result = self
            .load(actor.user_id)
            .await
            .map(|user| ApiResponse::success("Profile retrieved successfully", user.into()));

        self.tracer
            .complete_with(&tracing_ctx, Method::Get, &result, "Profile retrieved");
        result
    }

    async fn update_roles(
        &self,
        actor: &Actor,
        user_id: i32,
        req: &UpdateRolesRequest,
    ) -> Result<ApiResponse<UserResponse>, ServiceError> {
        let tracing_ctx = self.tracer.start_tracing(
            "UpdateRoles",
            vec![
                KeyValue::new("component", "identity"),
                KeyValue::new("user.id", user_id as i64),
            ],
        );

        let result = async {
            authorize(actor, Action::ManageUserRoles, Resource::Global)?;

            let roles = RoleSet::new(req.roles.iter().copied());
            if roles.is_empty() {
                return Err(ServiceError::Validation(vec![
                    "a user must keep at least one role".into(),
                ]));
            }

            self.load(user_id).await?;
            let user = self.command.update_roles(user_id, &roles).await?;
            info!("🔐 Roles of user {user_id} set to {:?}", user.roles.to_strings());

            Ok(ApiResponse::success(
                "Roles updated successfully",
                UserResponse::from(user),
            ))
        }
        .await;

        self.tracer
            .complete_with(&tracing_ctx, Method::Put, &result, "Roles updated");
        result
    }
}
