mod auth;
mod users;

pub use auth::handle_login;
pub use users::{create_user, delete_user, list_users};
