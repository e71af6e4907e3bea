use async_trait::async_trait;
use sea_orm::ActiveValue::{Set, Unchanged};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbBackend, DbErr, EntityTrait, FromQueryResult,
    QueryOrder, Statement,
};
use std::collections::HashMap;

use crate::{
    entity,
    error::{RepositoryError, RepositoryResult},
    models::{Item, NewItem, UpdateItem},
    repository::ItemRepository,
};

impl From<DbErr> for RepositoryError {
    fn from(err: DbErr) -> Self {
        RepositoryError::Database(format!("Database error: {}", err))
    }
}

/// PostgreSQL-backed ItemRepository
pub struct PgItemRepository {
    db: DatabaseConnection,
}

impl PgItemRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[derive(Debug, FromQueryResult)]
struct CategoryCount {
    category: String,
    count: i64,
}

#[async_trait]
impl ItemRepository for PgItemRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<Item>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Item::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Item> {
        entity::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Item::from)
            .ok_or(RepositoryError::NotFound(id))
    }

    async fn create(&self, item: NewItem) -> RepositoryResult<Item> {
        let active_model: entity::ActiveModel = item.into();
        let model = active_model.insert(&self.db).await?;

        tracing::info!(item_id = %model.id, "Created item");
        Ok(model.into())
    }

    async fn update(&self, id: i64, changes: UpdateItem) -> RepositoryResult<Item> {
        // Absent fields stay NotSet and are left out of the UPDATE
        let mut active_model = entity::ActiveModel {
            id: Unchanged(id),
            updated_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        };
        if let Some(name) = changes.name {
            active_model.name = Set(name);
        }
        if let Some(brand) = changes.brand {
            active_model.brand = Set(brand);
        }
        if let Some(price) = changes.purchase_price {
            active_model.purchase_price = Set(price);
        }

        let model = active_model.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated | DbErr::RecordNotFound(_) => RepositoryError::NotFound(id),
            other => other.into(),
        })?;

        tracing::info!(item_id = %id, "Updated item");
        Ok(model.into())
    }

    async fn delete(&self, id: i64) -> RepositoryResult<()> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound(id));
        }

        tracing::info!(item_id = %id, "Deleted item");
        Ok(())
    }

    async fn summary_by_category(&self) -> RepositoryResult<HashMap<String, i64>> {
        let sql = "SELECT category, COUNT(*) AS count FROM items GROUP BY category";
        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, []);

        let rows = CategoryCount::find_by_statement(stmt).all(&self.db).await?;

        Ok(rows.into_iter().map(|r| (r.category, r.count)).collect())
    }
}
