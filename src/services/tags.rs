use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    error::StoreError,
    models::tag::{CreateTagRequest, Tag},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TagStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Tag>, StoreError>;
    async fn create(&self, req: &CreateTagRequest) -> Result<Tag, StoreError>;
}

pub struct PgTagStore {
    pool: PgPool,
}

impl PgTagStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TagStore for PgTagStore {
    async fn list(&self) -> Result<Vec<Tag>, StoreError> {
        let tags = sqlx::query_as::<_, Tag>("SELECT id, name, color FROM tags ORDER BY name, id")
            .fetch_all(&self.pool)
            .await?;
        Ok(tags)
    }

    async fn create(&self, req: &CreateTagRequest) -> Result<Tag, StoreError> {
        let tag = sqlx::query_as::<_, Tag>(
            "INSERT INTO tags (name, color)
             VALUES ($1, $2)
             RETURNING id, name, color",
        )
        .bind(&req.name)
        .bind(&req.color)
        .fetch_one(&self.pool)
        .await?;
        Ok(tag)
    }
}
