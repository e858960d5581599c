use serde::Serialize;

/// Catalog ingredient: a (title, unit) pair, globally deduplicated
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Ingredient {
    pub id: i64,
    pub title: String,
    pub unit: String,
}

impl Ingredient {
    /// Case-insensitive deduplication key for a (title, unit) pair
    pub fn dedup_key(title: &str, unit: &str) -> (String, String) {
        (title.to_lowercase(), unit.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_key_is_case_insensitive() {
        assert_eq!(
            Ingredient::dedup_key("Flour", "G"),
            Ingredient::dedup_key("flour", "g")
        );
        assert_ne!(
            Ingredient::dedup_key("flour", "g"),
            Ingredient::dedup_key("flour", "kg")
        );
    }
}
