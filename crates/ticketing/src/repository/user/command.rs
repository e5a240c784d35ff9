use crate::{
    abstract_trait::user::UserCommandRepositoryTrait,
    domain::requests::user::NewUser,
    model::{RoleSet, User},
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::error;

pub struct UserCommandRepository {
    db: ConnectionPool,
}

impl UserCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserCommandRepositoryTrait for UserCommandRepository {
    async fn create_user(&self, user: &NewUser, roles: &RoleSet) -> Result<User, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (
                email, password, first_name, last_name, roles, is_verified,
                phone, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, FALSE, $6, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)
            RETURNING *
            "#,
        )
        .bind(&user.email)
        .bind(&user.password)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(roles.to_strings())
        .bind(&user.phone)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to insert user: {:?}", e);
            RepositoryError::from(e)
        })
    }

    async fn update_roles(&self, id: i32, roles: &RoleSet) -> Result<User, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET roles = $2,
                updated_at = CURRENT_TIMESTAMP
            WHERE user_id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(roles.to_strings())
        .fetch_one(&mut *conn)
        .await
        .map_err(RepositoryError::from)
    }
}
