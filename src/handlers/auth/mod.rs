// Credential registration and login, the only public (unauthenticated)
// endpoints besides the health check.

pub mod login;
pub mod register;

pub use login::login;
pub use register::register;
