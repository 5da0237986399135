use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "authentication_reset_password_token")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub token: String,

    /// Unique: a user holds at most one outstanding token.
    #[sea_orm(unique)]
    pub user_id: Uuid,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user_simple::Entity",
        from = "Column::UserId",
        to = "super::user_simple::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user_simple::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
