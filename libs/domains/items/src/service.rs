use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::instrument;

use crate::error::{ItemError, ItemResult, RepositoryError};
use crate::models::{
    Category, CategorySummary, CreateItem, Item, MAX_TEXT_LEN, NewItem, UpdateItem,
};
use crate::repository::ItemRepository;

impl From<RepositoryError> for ItemError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(id) => ItemError::NotFound(id),
            RepositoryError::Database(msg) => ItemError::Database(msg),
        }
    }
}

/// Service layer for Item business logic
pub struct ItemService<R: ItemRepository> {
    repository: Arc<R>,
}

impl<R: ItemRepository> Clone for ItemService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: ItemRepository> ItemService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// All items, ordered by id
    #[instrument(skip(self))]
    pub async fn get_all_items(&self) -> ItemResult<Vec<Item>> {
        self.repository
            .find_all()
            .await
            .map_err(|e| ItemError::Database(format!("failed to retrieve items: {}", e)))
    }

    #[instrument(skip(self))]
    pub async fn get_item_by_id(&self, id: i64) -> ItemResult<Item> {
        check_id(id)?;
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Validate and persist a new item
    #[instrument(skip(self, input), fields(name = %input.name, category = %input.category))]
    pub async fn create_item(&self, input: CreateItem) -> ItemResult<Item> {
        let item = NewItem::try_from(input)?;
        Ok(self.repository.create(item).await?)
    }

    /// Apply a partial update to `name`, `brand` and `purchase_price`
    ///
    /// Every violated field rule is reported, joined with `", "`.
    #[instrument(skip(self, input))]
    pub async fn update_item(&self, id: i64, input: UpdateItem) -> ItemResult<Item> {
        check_id(id)?;

        if input.is_empty() {
            return Err(ItemError::InvalidInput("no fields to update".to_string()));
        }

        let mut violations = Vec::new();
        if let Some(name) = &input.name {
            check_update_text("name", name, &mut violations);
        }
        if let Some(brand) = &input.brand {
            check_update_text("brand", brand, &mut violations);
        }
        if input.purchase_price.is_some_and(|price| price < 0) {
            violations.push("purchase_price must be 0 or greater".to_string());
        }
        if !violations.is_empty() {
            return Err(ItemError::InvalidInput(violations.join(", ")));
        }

        Ok(self.repository.update(id, input).await?)
    }

    /// Delete an item after confirming it exists
    #[instrument(skip(self))]
    pub async fn delete_item(&self, id: i64) -> ItemResult<()> {
        check_id(id)?;

        self.repository.find_by_id(id).await?;
        Ok(self.repository.delete(id).await?)
    }

    /// Item counts for every known category
    #[instrument(skip(self))]
    pub async fn get_category_summary(&self) -> ItemResult<CategorySummary> {
        let counts = self.repository.summary_by_category().await?;

        let total = counts.values().sum();
        let categories: BTreeMap<String, i64> = Category::all()
            .map(|category| {
                let label = category.as_str();
                (label.to_string(), counts.get(label).copied().unwrap_or(0))
            })
            .collect();

        Ok(CategorySummary { categories, total })
    }
}

fn check_id(id: i64) -> ItemResult<()> {
    if id <= 0 {
        return Err(ItemError::InvalidInput(
            "id must be a positive integer".to_string(),
        ));
    }
    Ok(())
}

fn check_update_text(field: &str, value: &str, violations: &mut Vec<String>) {
    if value.is_empty() {
        violations.push(format!("{} cannot be empty", field));
    } else if value.chars().count() > MAX_TEXT_LEN {
        violations.push(format!(
            "{} must be {} characters or less",
            field, MAX_TEXT_LEN
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockItemRepository;
    use chrono::Utc;
    use mockall::predicate::*;
    use std::collections::HashMap;

    fn sample_item(id: i64) -> Item {
        let now = Utc::now();
        Item {
            id,
            name: "Datejust".to_string(),
            category: "時計".to_string(),
            brand: "ROLEX".to_string(),
            purchase_price: 1_500_000,
            purchase_date: "2023-01-15".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    fn datejust() -> CreateItem {
        CreateItem {
            name: "Datejust".to_string(),
            category: "時計".to_string(),
            brand: "ROLEX".to_string(),
            purchase_price: 1_500_000,
            purchase_date: "2023-01-15".to_string(),
        }
    }

    fn invalid_input(err: ItemError) -> String {
        match err {
            ItemError::InvalidInput(msg) => msg,
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_positive_ids_never_reach_the_store() {
        let mut mock_repo = MockItemRepository::new();
        mock_repo.expect_find_by_id().times(0);
        mock_repo.expect_update().times(0);
        mock_repo.expect_delete().times(0);

        let service = ItemService::new(mock_repo);

        for id in [0, -1, i64::MIN] {
            let err = service.get_item_by_id(id).await.unwrap_err();
            assert_eq!(invalid_input(err), "id must be a positive integer");

            let err = service
                .update_item(
                    id,
                    UpdateItem {
                        name: Some("x".to_string()),
                        ..Default::default()
                    },
                )
                .await
                .unwrap_err();
            assert_eq!(invalid_input(err), "id must be a positive integer");

            let err = service.delete_item(id).await.unwrap_err();
            assert_eq!(invalid_input(err), "id must be a positive integer");
        }
    }

    #[tokio::test]
    async fn test_get_all_items_wraps_store_failure() {
        let mut mock_repo = MockItemRepository::new();
        mock_repo
            .expect_find_all()
            .times(1)
            .returning(|| Err(RepositoryError::Database("timeout".to_string())));

        let service = ItemService::new(mock_repo);

        match service.get_all_items().await.unwrap_err() {
            ItemError::Database(msg) => assert_eq!(msg, "failed to retrieve items: timeout"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_item_by_id_not_found() {
        let mut mock_repo = MockItemRepository::new();
        mock_repo
            .expect_find_by_id()
            .with(eq(99))
            .times(1)
            .returning(|id| Err(RepositoryError::NotFound(id)));

        let service = ItemService::new(mock_repo);

        assert!(matches!(
            service.get_item_by_id(99).await,
            Err(ItemError::NotFound(99))
        ));
    }

    #[tokio::test]
    async fn test_create_item_passes_fields_verbatim() {
        let mut mock_repo = MockItemRepository::new();
        mock_repo
            .expect_create()
            .withf(|item: &NewItem| {
                item.name == "Datejust"
                    && item.category == Category::Watch
                    && item.brand == "ROLEX"
                    && item.purchase_price == 1_500_000
                    && item.purchase_date == "2023-01-15"
            })
            .times(1)
            .returning(|_| Ok(sample_item(1)));

        let service = ItemService::new(mock_repo);

        let item = service.create_item(datejust()).await.unwrap();
        assert_eq!(item.id, 1);
        assert_eq!(item.name, "Datejust");
    }

    #[tokio::test]
    async fn test_create_item_rejects_invalid_input_before_store() {
        let mut mock_repo = MockItemRepository::new();
        mock_repo.expect_create().times(0);

        let service = ItemService::new(mock_repo);

        let cases = [
            (CreateItem { name: String::new(), ..datejust() }, "name is required"),
            (CreateItem { category: "家具".to_string(), ..datejust() }, "invalid category: 家具"),
            (CreateItem { brand: String::new(), ..datejust() }, "brand is required"),
            (CreateItem { purchase_date: String::new(), ..datejust() }, "purchase_date is required"),
        ];

        for (input, expected) in cases {
            let err = service.create_item(input).await.unwrap_err();
            assert_eq!(invalid_input(err), expected);
        }
    }

    #[tokio::test]
    async fn test_update_item_requires_a_field() {
        let mut mock_repo = MockItemRepository::new();
        mock_repo.expect_update().times(0);

        let service = ItemService::new(mock_repo);

        let err = service
            .update_item(1, UpdateItem::default())
            .await
            .unwrap_err();
        assert_eq!(invalid_input(err), "no fields to update");
    }

    #[tokio::test]
    async fn test_update_item_collects_all_violations() {
        let mut mock_repo = MockItemRepository::new();
        mock_repo.expect_update().times(0);

        let service = ItemService::new(mock_repo);

        let input = UpdateItem {
            name: Some(String::new()),
            brand: Some("b".repeat(MAX_TEXT_LEN + 1)),
            purchase_price: Some(-1),
        };
        let err = service.update_item(1, input).await.unwrap_err();

        assert_eq!(
            invalid_input(err),
            "name cannot be empty, brand must be 100 characters or less, \
             purchase_price must be 0 or greater"
        );
    }

    #[tokio::test]
    async fn test_update_item_sends_only_present_field() {
        let mut mock_repo = MockItemRepository::new();
        mock_repo
            .expect_update()
            .with(
                eq(1),
                eq(UpdateItem {
                    name: None,
                    brand: None,
                    purchase_price: Some(1_200_000),
                }),
            )
            .times(1)
            .returning(|id, changes| {
                let mut item = sample_item(id);
                item.purchase_price = changes.purchase_price.unwrap_or(item.purchase_price);
                Ok(item)
            });

        let service = ItemService::new(mock_repo);

        let input: UpdateItem = serde_json::from_str(r#"{"purchase_price": 1200000}"#).unwrap();
        let item = service.update_item(1, input).await.unwrap();
        assert_eq!(item.purchase_price, 1_200_000);
    }

    #[tokio::test]
    async fn test_update_item_not_found() {
        let mut mock_repo = MockItemRepository::new();
        mock_repo
            .expect_update()
            .times(1)
            .returning(|id, _| Err(RepositoryError::NotFound(id)));

        let service = ItemService::new(mock_repo);

        let input = UpdateItem {
            brand: Some("OMEGA".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            service.update_item(7, input).await,
            Err(ItemError::NotFound(7))
        ));
    }

    #[tokio::test]
    async fn test_delete_item_checks_existence_first() {
        let mut mock_repo = MockItemRepository::new();
        mock_repo
            .expect_find_by_id()
            .with(eq(3))
            .times(1)
            .returning(|id| Err(RepositoryError::NotFound(id)));
        mock_repo.expect_delete().times(0);

        let service = ItemService::new(mock_repo);

        assert!(matches!(
            service.delete_item(3).await,
            Err(ItemError::NotFound(3))
        ));
    }

    #[tokio::test]
    async fn test_delete_item_success() {
        let mut mock_repo = MockItemRepository::new();
        mock_repo
            .expect_find_by_id()
            .with(eq(3))
            .times(1)
            .returning(|id| Ok(sample_item(id)));
        mock_repo
            .expect_delete()
            .with(eq(3))
            .times(1)
            .returning(|_| Ok(()));

        let service = ItemService::new(mock_repo);

        assert!(service.delete_item(3).await.is_ok());
    }

    #[tokio::test]
    async fn test_summary_lists_every_category_even_when_store_is_empty() {
        let mut mock_repo = MockItemRepository::new();
        mock_repo
            .expect_summary_by_category()
            .times(1)
            .returning(|| Ok(HashMap::new()));

        let service = ItemService::new(mock_repo);

        let summary = service.get_category_summary().await.unwrap();
        assert_eq!(summary.total, 0);
        assert_eq!(summary.categories.len(), 5);
        assert!(summary.categories.values().all(|&count| count == 0));
    }

    #[tokio::test]
    async fn test_summary_total_includes_unknown_categories() {
        let mut mock_repo = MockItemRepository::new();
        mock_repo.expect_summary_by_category().times(1).returning(|| {
            Ok(HashMap::from([
                ("時計".to_string(), 2),
                ("バッグ".to_string(), 1),
                ("家具".to_string(), 4),
            ]))
        });

        let service = ItemService::new(mock_repo);

        let summary = service.get_category_summary().await.unwrap();
        assert_eq!(summary.total, 7);
        assert_eq!(summary.categories["時計"], 2);
        assert_eq!(summary.categories["バッグ"], 1);
        assert_eq!(summary.categories["靴"], 0);
        assert!(!summary.categories.contains_key("家具"));
        assert_eq!(summary.categories.values().sum::<i64>(), 3);
    }
}
