use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema, Clone, Default)]
pub struct VendorRequest {
    #[validate(length(min = 1, max = 120))]
    pub name: String,

    pub description: Option<String>,

    #[validate(email)]
    pub contact_email: Option<String>,

    pub contact_phone: Option<String>,

    #[validate(url)]
    pub website: Option<String>,

    pub address: Option<String>,

    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}
