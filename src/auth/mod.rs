pub mod extractor;
pub mod tokens;

pub use extractor::{AuthUser, MaybeAuthUser};
pub use tokens::{hash_password, issue_token, revoke_token, user_for_token, verify_password};
