pub mod configuration;
pub mod password;
pub mod reset_token;
pub mod role;
pub mod user;
