// User profile and social-graph endpoints. All of these sit behind the
// token-verification middleware.

pub mod friend_toggle;
pub mod friends_get;
pub mod user_get;

pub use friend_toggle::friend_toggle;
pub use friends_get::friends_get;
pub use user_get::user_get;
