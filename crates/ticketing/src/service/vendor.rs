use crate::{
    abstract_trait::vendor::{
        DynVendorCommandRepository, DynVendorQueryRepository, VendorServiceTrait,
    },
    domain::{requests::vendor::VendorRequest, response::vendor::VendorResponse},
    model::Vendor,
    policy::{Action, Actor, Resource, authorize},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use shared::{
    domain::responses::ApiResponse,
    errors::ServiceError,
    utils::{Method, ServiceTracer},
};
use tracing::info;

#[derive(Clone)]
pub struct VendorService {
    query: DynVendorQueryRepository,
    command: DynVendorCommandRepository,
    tracer: ServiceTracer,
}

fn responses(vendors: Vec<Vendor>) -> Vec<VendorResponse> {
    vendors.into_iter().map(VendorResponse::from).collect()
}

impl VendorService {
    pub fn new(
        query: DynVendorQueryRepository,
        command: DynVendorCommandRepository,
        tracer: ServiceTracer,
    ) -> Self {
        Self {
            query,
            command,
            tracer,
        }
    }

    async fn load_owned(&self, actor: &Actor, id: i32, action: Action) -> Result<Vendor, ServiceError> {
        let vendor = self
            .query
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Vendor"))?;

        authorize(
            actor,
            action,
            Resource::Vendor {
                owner_id: vendor.user_id,
            },
        )?;
        Ok(vendor)
    }

    /// Names are unique per owning user.
    async fn ensure_name_free(
        &self,
        user_id: i32,
        name: &str,
        except: Option<i32>,
    ) -> Result<(), ServiceError> {
        match self.query.find_by_user_and_name(user_id, name).await? {
            Some(existing) if Some(existing.vendor_id) != except => Err(ServiceError::Conflict(
                format!("a vendor named '{name}' already exists for this user"),
            )),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl VendorServiceTrait for VendorService {
    async fn create_vendor(
        &self,
        actor: &Actor,
        req: &VendorRequest,
    ) -> Result<ApiResponse<VendorResponse>, ServiceError> {
        info!("🏗️ Creating vendor '{}' for user {}", req.name, actor.user_id);

        let tracing_ctx = self.tracer.start_tracing(
            "CreateVendor",
            vec![
                KeyValue::new("component", "vendor"),
                KeyValue::new("vendor.name", req.name.clone()),
            ],
        );

        let result = async {
            authorize(actor, Action::CreateVendor, Resource::Global)?;
            self.ensure_name_free(actor.user_id, &req.name, None).await?;

            let vendor = self.command.create_vendor(actor.user_id, req).await?;
            Ok::<_, ServiceError>(ApiResponse::success(
                "Vendor created successfully",
                VendorResponse::from(vendor),
            ))
        }
        .await;

        self.tracer
            .complete_with(&tracing_ctx, Method::Post, &result, "Vendor created");
        result
    }

    async fn get_vendor(
        &self,
        actor: &Actor,
        id: i32,
    ) -> Result<ApiResponse<VendorResponse>, ServiceError> {
        let tracing_ctx = self
            .tracer
            .start_tracing("GetVendor", vec![KeyValue::new("vendor.id", id as i64)]);

        let result = self
            .load_owned(actor, id, Action::ViewVendor)
            .await
            .map(|v| ApiResponse::success("Vendor retrieved successfully", v.into()));

        self.tracer
            .complete_with(&tracing_ctx, Method::Get, &result, "Vendor retrieved");
        result
    }

    async fn list_vendors(
        &self,
        actor: &Actor,
    ) -> Result<ApiResponse<Vec<VendorResponse>>, ServiceError> {
        let tracing_ctx = self
            .tracer
            .start_tracing("ListVendors", vec![KeyValue::new("component", "vendor")]);

        let vendors = if actor.is_admin() {
            self.query.find_all().await
        } else {
            self.query.find_by_user(actor.user_id).await
        };
        let result = vendors
            .map(|v| ApiResponse::success("Vendors retrieved successfully", responses(v)))
            .map_err(ServiceError::from);

        self.tracer
            .complete_with(&tracing_ctx, Method::Get, &result, "Vendors listed");
        result
    }

    async fn list_user_vendors(
        &self,
        actor: &Actor,
        user_id: i32,
    ) -> Result<ApiResponse<Vec<VendorResponse>>, ServiceError> {
        let tracing_ctx = self.tracer.start_tracing(
            "ListUserVendors",
            vec![KeyValue::new("user.id", user_id as i64)],
        );

        let result = async {
            authorize(actor, Action::ViewUserVendors, Resource::User { user_id })?;
            let vendors = self.query.find_by_user(user_id).await?;
            Ok::<_, ServiceError>(ApiResponse::success(
                "Vendors retrieved successfully",
                responses(vendors),
            ))
        }
        .await;

        self.tracer
            .complete_with(&tracing_ctx, Method::Get, &result, "User vendors listed");
        result
    }

    async fn update_vendor(
        &self,
        actor: &Actor,
        id: i32,
        req: &VendorRequest,
    ) -> Result<ApiResponse<VendorResponse>, ServiceError> {
        let tracing_ctx = self.tracer.start_tracing(
            "UpdateVendor",
            vec![
                KeyValue::new("component", "vendor"),
                KeyValue::new("vendor.id", id as i64),
            ],
        );

        let result = async {
            let vendor = self.load_owned(actor, id, Action::ManageVendor).await?;
            self.ensure_name_free(vendor.user_id, &req.name, Some(id))
                .await?;

            let updated = self.command.update_vendor(id, req).await?;
            Ok::<_, ServiceError>(ApiResponse::success(
                "Vendor updated successfully",
                VendorResponse::from(updated),
            ))
        }
        .await;

        self.tracer
            .complete_with(&tracing_ctx, Method::Put, &result, "Vendor updated");
        result
    }

    async fn delete_vendor(&self, actor: &Actor, id: i32) -> Result<ApiResponse<()>, ServiceError> {
        let tracing_ctx = self.tracer.start_tracing(
            "DeleteVendor",
            vec![
                KeyValue::new("component", "vendor"),
                KeyValue::new("vendor.id", id as i64),
            ],
        );

        let result = async {
            self.load_owned(actor, id, Action::ManageVendor).await?;
            self.command.delete_vendor(id).await?;
            info!("🗑️ Vendor {id} deleted");
            Ok::<_, ServiceError>(ApiResponse::success("Vendor deleted successfully", ()))
        }
        .await;

        self.tracer
            .complete_with(&tracing_ctx, Method::Delete, &result, "Vendor deleted");
        result
    }
}
