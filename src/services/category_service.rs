use crate::entities::{categories, prelude::*};
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, TryIntoModel};

/// Category lookups and persistence.
pub struct CategoryService {
    db: DatabaseConnection,
}

impl CategoryService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// All categories in id order.
    pub async fn list_all(&self) -> Result<Vec<categories::Model>, DbErr> {
        Categories::find()
            .order_by_asc(categories::Column::Id)
            .all(&self.db)
            .await
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<categories::Model>, DbErr> {
        Categories::find_by_id(id).one(&self.db).await
    }

    /// Inserts when the id is unset, updates otherwise.
    pub async fn save(&self, category: categories::ActiveModel) -> Result<categories::Model, DbErr> {
        category.save(&self.db).await?.try_into_model()
    }
}
