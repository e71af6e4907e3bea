use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

use crate::models::{Item, NewItem};

/// Sea-ORM Entity for the items table
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub category: String,
    pub brand: String,
    pub purchase_price: i64,
    pub purchase_date: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Item {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            category: model.category,
            brand: model.brand,
            purchase_price: model.purchase_price,
            purchase_date: model.purchase_date,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

// id is assigned by the database sequence
impl From<NewItem> for ActiveModel {
    fn from(input: NewItem) -> Self {
        let now = chrono::Utc::now();

        ActiveModel {
            id: NotSet,
            name: Set(input.name),
            category: Set(input.category.to_string()),
            brand: Set(input.brand),
            purchase_price: Set(input.purchase_price),
            purchase_date: Set(input.purchase_date),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
    }
}
