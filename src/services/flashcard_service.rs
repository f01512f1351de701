use crate::entities::{categories, flashcards, prelude::*};
use crate::services::image_resolver::ImageResolver;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    TryIntoModel,
};
use std::sync::Arc;
use tracing::info;

/// Flashcard CRUD plus image backfill.
///
/// Reads return models whose missing `image_url` is filled in from the image
/// resolver without touching the store; only [`randomize_missing_images`]
/// persists assignments.
///
/// [`randomize_missing_images`]: FlashcardService::randomize_missing_images
pub struct FlashcardService {
    db: DatabaseConnection,
    images: Arc<ImageResolver>,
}

impl FlashcardService {
    pub fn new(db: DatabaseConnection, images: Arc<ImageResolver>) -> Self {
        Self { db, images }
    }

    /// All flashcards in id order, view-backfilled.
    pub async fn list_all(&self) -> Result<Vec<flashcards::Model>, DbErr> {
        let mut cards = Flashcards::find()
            .order_by_asc(flashcards::Column::Id)
            .all(&self.db)
            .await?;
        for card in &mut cards {
            self.backfill(card);
        }
        Ok(cards)
    }

    /// One flashcard by id, view-backfilled.
    pub async fn get_by_id(&self, id: i32) -> Result<Option<flashcards::Model>, DbErr> {
        let mut card = Flashcards::find_by_id(id).one(&self.db).await?;
        if let Some(card) = card.as_mut() {
            self.backfill(card);
        }
        Ok(card)
    }

    /// Flashcards owned by the given category, view-backfilled.
    pub async fn list_by_category(
        &self,
        category: &categories::Model,
    ) -> Result<Vec<flashcards::Model>, DbErr> {
        self.list_by_category_id(category.id).await
    }

    /// Flashcards owned by the given category id, view-backfilled.
    pub async fn list_by_category_id(
        &self,
        category_id: i32,
    ) -> Result<Vec<flashcards::Model>, DbErr> {
        let mut cards = Flashcards::find()
            .filter(flashcards::Column::CategoryId.eq(category_id))
            .order_by_asc(flashcards::Column::Id)
            .all(&self.db)
            .await?;
        for card in &mut cards {
            self.backfill(card);
        }
        Ok(cards)
    }

    /// Inserts when the id is unset, updates otherwise.
    pub async fn save(&self, card: flashcards::ActiveModel) -> Result<flashcards::Model, DbErr> {
        card.save(&self.db).await?.try_into_model()
    }

    /// Deletes by id; a missing id is a no-op.
    pub async fn delete_by_id(&self, id: i32) -> Result<(), DbErr> {
        Flashcards::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }

    /// Assigns and **persists** a random image to every flashcard lacking one.
    ///
    /// Unlike the plain read paths this works on the stored rows, so the
    /// returned count reflects actual updates and a second call returns 0
    /// once every flashcard has an image.
    pub async fn randomize_missing_images(&self) -> Result<u64, DbErr> {
        let cards = Flashcards::find().all(&self.db).await?;

        let mut updated = 0;
        for card in cards {
            if !missing_image(&card) {
                continue;
            }
            if let Some(image) = self.images.pick_random_image() {
                let mut active: flashcards::ActiveModel = card.into();
                active.image_url = Set(Some(image));
                active.update(&self.db).await?;
                updated += 1;
            }
        }

        if updated > 0 {
            info!("🖼️  Assigned random images to {} flashcards", updated);
        }
        Ok(updated)
    }

    /// Random image for a new flashcard, resolved but not persisted here.
    pub fn random_image(&self) -> Option<String> {
        self.images.pick_random_image()
    }

    /// Every image currently available for selection in the add form.
    pub fn available_images(&self) -> Vec<String> {
        self.images.list_all_images()
    }

    fn backfill(&self, card: &mut flashcards::Model) {
        if missing_image(card) {
            if let Some(image) = self.images.pick_random_image() {
                card.image_url = Some(image);
            }
        }
    }
}

fn missing_image(card: &flashcards::Model) -> bool {
    card.image_url.as_deref().map_or(true, |url| url.is_empty())
}
