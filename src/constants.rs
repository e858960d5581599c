/// Minimum preparation time for a recipe, in minutes
pub const DEFAULT_MIN_COOKING_TIME: i64 = 1;

/// Maximum preparation time for a recipe, in minutes
pub const DEFAULT_MAX_COOKING_TIME: i64 = 32_000;

/// Minimum quantity for a single recipe ingredient
pub const DEFAULT_MIN_INGREDIENT_AMOUNT: i64 = 1;

/// Maximum quantity for a single recipe ingredient
pub const DEFAULT_MAX_INGREDIENT_AMOUNT: i64 = 32_000;

/// Default page size for recipe and author listings
pub const DEFAULT_PAGE_SIZE: i64 = 6;

/// Hard cap on the client-supplied `limit` query parameter
pub const MAX_PAGE_SIZE: i64 = 1000;

// =============================================================================
// Error Messages
// =============================================================================

/// Error message for an empty ingredient list on recipe create/update
pub const ERR_EMPTY_INGREDIENTS: &str = "Add at least one ingredient";

/// Error message for a repeated ingredient id within one submission
pub const ERR_DUPLICATE_INGREDIENTS: &str = "Duplicate ingredients are not allowed";

/// Error message for an omitted ingredient list on update
pub const ERR_INGREDIENTS_REQUIRED: &str = "The ingredients field is required on every update";

/// Error message for a subscription targeting the subscriber themselves
pub const ERR_SELF_SUBSCRIPTION: &str = "You cannot subscribe to yourself";

/// Error message for a duplicate subscription
pub const ERR_ALREADY_SUBSCRIBED: &str = "You are already subscribed to this user";

/// Error message for unsubscribing without an existing subscription
pub const ERR_NOT_SUBSCRIBED: &str = "You are not subscribed to this user";
