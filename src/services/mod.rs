pub mod access_service;
pub mod access_service_impl;
pub mod password_service;
pub mod password_service_impl;

pub use access_service::{AccessError, AccessService, PermissionRef};
pub use access_service_impl::SeaOrmAccessService;
pub use password_service::{PasswordError, PasswordService};
pub use password_service_impl::SeaOrmPasswordService;
