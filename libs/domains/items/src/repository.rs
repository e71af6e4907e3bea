use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::error::{RepositoryError, RepositoryResult};
use crate::models::{Item, NewItem, UpdateItem};

/// Repository trait for Item persistence
///
/// `find_by_id`, `update` and `delete` report a missing row as
/// [`RepositoryError::NotFound`], never as a database failure.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// All items, ordered by id
    async fn find_all(&self) -> RepositoryResult<Vec<Item>>;

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Item>;

    /// Persist a new item and return it with its generated id
    async fn create(&self, item: NewItem) -> RepositoryResult<Item>;

    /// Apply the present fields of `changes`; absent fields are left untouched
    async fn update(&self, id: i64, changes: UpdateItem) -> RepositoryResult<Item>;

    async fn delete(&self, id: i64) -> RepositoryResult<()>;

    /// Raw item counts keyed by stored category
    async fn summary_by_category(&self) -> RepositoryResult<HashMap<String, i64>>;
}

/// In-memory implementation of ItemRepository (for development/testing)
#[derive(Clone)]
pub struct InMemoryItemRepository {
    items: Arc<RwLock<BTreeMap<i64, Item>>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self {
            items: Arc::new(RwLock::new(BTreeMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }
}

impl Default for InMemoryItemRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<Item>> {
        let items = self.items.read().await;
        Ok(items.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Item> {
        let items = self.items.read().await;
        items.get(&id).cloned().ok_or(RepositoryError::NotFound(id))
    }

    async fn create(&self, item: NewItem) -> RepositoryResult<Item> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();

        let item = Item {
            id,
            name: item.name,
            category: item.category.to_string(),
            brand: item.brand,
            purchase_price: item.purchase_price,
            purchase_date: item.purchase_date,
            created_at: now,
            updated_at: now,
        };

        self.items.write().await.insert(id, item.clone());

        tracing::info!(item_id = %id, "Created item in memory");
        Ok(item)
    }

    async fn update(&self, id: i64, changes: UpdateItem) -> RepositoryResult<Item> {
        let mut items = self.items.write().await;
        let item = items.get_mut(&id).ok_or(RepositoryError::NotFound(id))?;

        if let Some(name) = changes.name {
            item.name = name;
        }
        if let Some(brand) = changes.brand {
            item.brand = brand;
        }
        if let Some(price) = changes.purchase_price {
            item.purchase_price = price;
        }
        item.updated_at = Utc::now();

        tracing::info!(item_id = %id, "Updated item in memory");
        Ok(item.clone())
    }

    async fn delete(&self, id: i64) -> RepositoryResult<()> {
        let mut items = self.items.write().await;
        items.remove(&id).ok_or(RepositoryError::NotFound(id))?;

        tracing::info!(item_id = %id, "Deleted item from memory");
        Ok(())
    }

    async fn summary_by_category(&self) -> RepositoryResult<HashMap<String, i64>> {
        let items = self.items.read().await;

        let mut counts = HashMap::new();
        for item in items.values() {
            *counts.entry(item.category.clone()).or_insert(0) += 1;
        }

        Ok(counts)
    }
}
