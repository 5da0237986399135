use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user_simple")]
pub struct Model {
    #[sea_orm(unique)]
    pub id: Uuid,

    pub first_name: String,

    pub last_name: Option<String>,

    #[sea_orm(primary_key, auto_increment = false)]
    pub email: String,

    #[sea_orm(unique)]
    pub phone: Option<String>,

    pub created_at: DateTimeUtc,

    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::authorization_role_user::Entity")]
    RoleUser,
    #[sea_orm(has_one = "super::authentication_user_password::Entity")]
    UserPassword,
    #[sea_orm(has_one = "super::authentication_reset_password_token::Entity")]
    ResetPasswordToken,
}

impl Related<super::authorization_role_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RoleUser.def()
    }
}

impl Related<super::authentication_user_password::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserPassword.def()
    }
}

impl Related<super::authentication_reset_password_token::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ResetPasswordToken.def()
    }
}

impl Related<super::authorization_role::Entity> for Entity {
    fn to() -> RelationDef {
        super::authorization_role_user::Relation::Role.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::authorization_role_user::Relation::User.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
