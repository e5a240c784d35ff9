use crate::model::Vendor;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct VendorResponse {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub website: Option<String>,
    pub address: Option<String>,
    pub is_active: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<Vendor> for VendorResponse {
    fn from(value: Vendor) -> Self {
        VendorResponse {
            id: value.vendor_id,
            user_id: value.user_id,
            name: value.name,
            description: value.description,
            contact_email: value.contact_email,
            contact_phone: value.contact_phone,
            website: value.website,
            address: value.address,
            is_active: value.is_active,
            created_at: value.created_at.map(|dt| dt.to_string()),
            updated_at: value.updated_at.map(|dt| dt.to_string()),
        }
    }
}
