//! Auth HTTP handlers: login, refresh, logout.

pub mod login;
pub mod logout;
pub mod refresh;
pub mod types;

pub use login::login;
pub use logout::logout;
pub use refresh::refresh;
