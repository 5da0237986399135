pub use super::authentication_reset_password_token::Entity as ResetPasswordToken;
pub use super::authentication_user_password::Entity as UserPassword;
pub use super::authorization_permission::Entity as Permission;
pub use super::authorization_role::Entity as Role;
pub use super::authorization_role_permission::Entity as RolePermission;
pub use super::authorization_role_user::Entity as RoleUser;
pub use super::configuration::Entity as Configuration;
pub use super::user_simple::Entity as UserSimple;
