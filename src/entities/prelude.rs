pub use super::categories::Entity as Categories;
pub use super::flashcards::Entity as Flashcards;
