// Post creation, feeds and like toggling. All of these sit behind the
// token-verification middleware; creation additionally reads a multipart
// form so a picture can ride along with the post.

pub mod feed_get;
pub mod like_toggle;
pub mod post_create;
pub mod user_posts_get;

pub use feed_get::feed_get;
pub use like_toggle::like_toggle;
pub use post_create::post_create;
pub use user_posts_get::user_posts_get;
