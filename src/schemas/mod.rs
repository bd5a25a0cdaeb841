pub mod auth;
pub mod boss;

pub use auth::*;
pub use boss::*;
