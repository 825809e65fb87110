pub mod admin;
pub mod order;
pub mod user;

pub use admin::{Admin, AdminView, CurrentAdmin, Permissions};
pub use order::{Order, OrderChange, OrderEvent, OrderKind, OrderStatus};
pub use user::User;
