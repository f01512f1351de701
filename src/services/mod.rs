pub mod category_service;
pub mod flashcard_service;
pub mod image_resolver;
