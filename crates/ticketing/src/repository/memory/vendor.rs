use super::{MemoryStore, now};
use crate::{
    abstract_trait::vendor::{VendorCommandRepositoryTrait, VendorQueryRepositoryTrait},
    domain::requests::vendor::VendorRequest,
    model::Vendor,
};
use async_trait::async_trait;
use shared::errors::RepositoryError;

#[async_trait]
impl VendorQueryRepositoryTrait for MemoryStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<Vendor>, RepositoryError> {
        Ok(self.lock()?.vendors.get(&id).cloned())
    }

    async fn find_by_user(&self, user_id: i32) -> Result<Vec<Vendor>, RepositoryError> {
        Ok(self
            .lock()?
            .vendors
            .values()
            .filter(|v| v.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_all(&self) -> Result<Vec<Vendor>, RepositoryError> {
        Ok(self.lock()?.vendors.values().cloned().collect())
    }

    async fn find_by_user_and_name(
        &self,
        user_id: i32,
        name: &str,
    ) -> Result<Option<Vendor>, RepositoryError> {
        Ok(self
            .lock()?
            .vendors
            .values()
            .find(|v| v.user_id == user_id && v.name == name)
            .cloned())
    }
}

#[async_trait]
impl VendorCommandRepositoryTrait for MemoryStore {
    async fn create_vendor(
        &self,
        user_id: i32,
        req: &VendorRequest,
    ) -> Result<Vendor, RepositoryError> {
        let mut state = self.lock()?;

        if state
            .vendors
            .values()
            .any(|v| v.user_id == user_id && v.name == req.name)
        {
            return Err(RepositoryError::AlreadyExists(format!(
                "vendor {} already exists for this user",
                req.name
            )));
        }

        let id = state.next_id();
        let stamp = now();
        let vendor = Vendor {
            vendor_id: id,
            user_id,
            name: req.name.clone(),
            description: req.description.clone(),
            contact_email: req.contact_email.clone(),
            contact_phone: req.contact_phone.clone(),
            website: req.website.clone(),
            address: req.address.clone(),
            is_active: req.is_active,
            created_at: Some(stamp),
            updated_at: Some(stamp),
        };
        state.vendors.insert(id, vendor.clone());

        Ok(vendor)
    }

    async fn update_vendor(&self, id: i32, req: &VendorRequest) -> Result<Vendor, RepositoryError> {
        let mut state = self.lock()?;

        let owner = state
            .vendors
            .get(&id)
            .map(|v| v.user_id)
            .ok_or(RepositoryError::NotFound)?;
        if state
            .vendors
            .values()
            .any(|v| v.vendor_id != id && v.user_id == owner && v.name == req.name)
        {
            return Err(RepositoryError::AlreadyExists(format!(
                "vendor {} already exists for this user",
                req.name
            )));
        }

        let vendor = state.vendors.get_mut(&id).ok_or(RepositoryError::NotFound)?;
        vendor.name = req.name.clone();
        vendor.description = req.description.clone();
        vendor.contact_email = req.contact_email.clone();
        vendor.contact_phone = req.contact_phone.clone();
        vendor.website = req.website.clone();
        vendor.address = req.address.clone();
        vendor.is_active = req.is_active;
        vendor.updated_at = Some(now());

        Ok(vendor.clone())
    }

    async fn delete_vendor(&self, id: i32) -> Result<(), RepositoryError> {
        let mut state = self.lock()?;

        state.vendors.remove(&id).ok_or(RepositoryError::NotFound)?;
        for event in state.events.values_mut() {
            if event.vendor_id == Some(id) {
                event.vendor_id = None;
            }
        }

        Ok(())
    }
}
