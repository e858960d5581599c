pub mod ingredient;
pub mod recipe;
pub mod user;

pub use ingredient::Ingredient;
pub use recipe::{IngredientAmount, Recipe, RecipeIngredientRow};
pub use user::{NewUser, User};
