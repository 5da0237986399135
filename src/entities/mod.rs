pub mod prelude;

pub mod authentication_reset_password_token;
pub mod authentication_user_password;
pub mod authorization_permission;
pub mod authorization_role;
pub mod authorization_role_permission;
pub mod authorization_role_user;
pub mod configuration;
pub mod user_simple;
