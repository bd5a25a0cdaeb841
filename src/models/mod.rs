pub mod admin;
pub mod admin_session;
pub mod boss;

#[allow(unused_imports)]
pub mod prelude {
    pub use super::admin::{self, Entity as Admin};
    pub use super::admin_session::{self, Entity as AdminSession};
    pub use super::boss::{self, BossStatus, Entity as Boss, Player};
}
