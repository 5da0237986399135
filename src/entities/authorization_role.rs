use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "authorization_role")]
pub struct Model {
    #[sea_orm(unique)]
    pub id: Uuid,

    #[sea_orm(primary_key, auto_increment = false)]
    pub name: String,

    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::authorization_role_permission::Entity")]
    RolePermission,
    #[sea_orm(has_many = "super::authorization_role_user::Entity")]
    RoleUser,
}

impl Related<super::authorization_role_permission::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RolePermission.def()
    }
}

impl Related<super::authorization_role_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RoleUser.def()
    }
}

impl Related<super::authorization_permission::Entity> for Entity {
    fn to() -> RelationDef {
        super::authorization_role_permission::Relation::Permission.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::authorization_role_permission::Relation::Role.def().rev())
    }
}

impl Related<super::user_simple::Entity> for Entity {
    fn to() -> RelationDef {
        super::authorization_role_user::Relation::User.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::authorization_role_user::Relation::Role.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
