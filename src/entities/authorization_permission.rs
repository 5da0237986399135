use sea_orm::entity::prelude::*;

/// A permission is identified by the pair (name, type), e.g. ("users", "read").
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "authorization_permission")]
pub struct Model {
    #[sea_orm(unique)]
    pub id: Uuid,

    #[sea_orm(primary_key, auto_increment = false)]
    pub name: String,

    /// Access type: "page", "read" or "write".
    #[sea_orm(primary_key, auto_increment = false, column_name = "type")]
    pub access_type: String,

    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::authorization_role_permission::Entity")]
    RolePermission,
}

impl Related<super::authorization_role_permission::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RolePermission.def()
    }
}

impl Related<super::authorization_role::Entity> for Entity {
    fn to() -> RelationDef {
        super::authorization_role_permission::Relation::Role.def()
    }

    fn via() -> Option<RelationDef> {
        Some(
            super::authorization_role_permission::Relation::Permission
                .def()
                .rev(),
        )
    }
}

impl ActiveModelBehavior for ActiveModel {}
