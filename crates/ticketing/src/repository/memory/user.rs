use super::{MemoryStore, now};
use crate::{
    abstract_trait::user::{UserCommandRepositoryTrait, UserQueryRepositoryTrait},
    domain::requests::user::NewUser,
    model::{RoleSet, User},
};
use async_trait::async_trait;
use shared::errors::RepositoryError;

#[async_trait]
impl UserQueryRepositoryTrait for MemoryStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepositoryError> {
        Ok(self.lock()?.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .lock()?
            .users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }
}

#[async_trait]
impl UserCommandRepositoryTrait for MemoryStore {
    async fn create_user(&self, user: &NewUser, roles: &RoleSet) -> Result<User, RepositoryError> {
        let mut state = self.lock()?;

        if state
            .users
            .values()
            .any(|u| u.email.eq_ignore_ascii_case(&user.email))
        {
            return Err(RepositoryError::AlreadyExists(format!(
                "email {} already registered",
                user.email
            )));
        }

        let id = state.next_id();
        let stamp = now();
        let row = User {
            user_id: id,
            email: user.email.clone(),
            password: user.password.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            roles: roles.clone(),
            is_verified: false,
            phone: user.phone.clone(),
            created_at: Some(stamp),
            updated_at: Some(stamp),
        };
        state.users.insert(id, row.clone());

        Ok(row)
    }

    async fn update_roles(&self, id: i32, roles: &RoleSet) -> Result<User, RepositoryError> {
        let mut state = self.lock()?;
        let user = state.users.get_mut(&id).ok_or(RepositoryError::NotFound)?;

        user.roles = roles.clone();
        user.updated_at = Some(now());

        Ok(user.clone())
    }
}
