use crate::constants::seed;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::prelude::Uuid;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        create_user_table(manager).await?;
        create_role_tables(manager).await?;
        create_authentication_tables(manager).await?;
        create_configuration_table(manager).await?;

        seed_permissions(manager).await?;
        seed_admin_role(manager).await?;
        link_admin_permissions(manager).await?;
        seed_configuration(manager).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AuthenticationUserPassword::Table).to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(AuthenticationResetPasswordToken::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(AuthorizationRoleUser::Table).to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(AuthorizationRolePermission::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(AuthorizationPermission::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AuthorizationRole::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserSimple::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Configuration::Table).to_owned())
            .await?;

        Ok(())
    }
}

async fn create_user_table(manager: &SchemaManager<'_>) -> Result<(), DbErr> {
    manager
        .create_table(
            Table::create()
                .table(UserSimple::Table)
                .col(ColumnDef::new(UserSimple::Id).uuid().not_null().unique_key())
                .col(ColumnDef::new(UserSimple::FirstName).string().not_null())
                .col(ColumnDef::new(UserSimple::LastName).string().null())
                .col(
                    ColumnDef::new(UserSimple::Email)
                        .string()
                        .not_null()
                        .primary_key(),
                )
                .col(ColumnDef::new(UserSimple::Phone).string().null().unique_key())
                .col(
                    ColumnDef::new(UserSimple::CreatedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                        .default(Expr::current_timestamp()),
                )
                .col(
                    ColumnDef::new(UserSimple::UpdatedAt)
                        .timestamp_with_time_zone()
                        .null(),
                )
                .to_owned(),
        )
        .await
}

async fn create_role_tables(manager: &SchemaManager<'_>) -> Result<(), DbErr> {
    manager
        .create_table(
            Table::create()
                .table(AuthorizationRole::Table)
                .col(
                    ColumnDef::new(AuthorizationRole::Id)
                        .uuid()
                        .not_null()
                        .unique_key(),
                )
                .col(
                    ColumnDef::new(AuthorizationRole::Name)
                        .string()
                        .not_null()
                        .primary_key(),
                )
                .col(ColumnDef::new(AuthorizationRole::Description).string().null())
                .to_owned(),
        )
        .await?;

    manager
        .create_table(
            Table::create()
                .table(AuthorizationPermission::Table)
                .col(
                    ColumnDef::new(AuthorizationPermission::Id)
                        .uuid()
                        .not_null()
                        .unique_key(),
                )
                .col(
                    ColumnDef::new(AuthorizationPermission::Name)
                        .string()
                        .not_null(),
                )
                .col(
                    ColumnDef::new(AuthorizationPermission::Type)
                        .string()
                        .not_null(),
                )
                .col(
                    ColumnDef::new(AuthorizationPermission::Description)
                        .string()
                        .null(),
                )
                .primary_key(
                    Index::create()
                        .name("pk_authorization_permission")
                        .col(AuthorizationPermission::Name)
                        .col(AuthorizationPermission::Type),
                )
                .to_owned(),
        )
        .await?;

    manager
        .create_table(
            Table::create()
                .table(AuthorizationRolePermission::Table)
                .col(
                    ColumnDef::new(AuthorizationRolePermission::RoleId)
                        .uuid()
                        .not_null(),
                )
                .col(
                    ColumnDef::new(AuthorizationRolePermission::PermissionId)
                        .uuid()
                        .not_null(),
                )
                .primary_key(
                    Index::create()
                        .name("pk_authorization_role_permission")
                        .col(AuthorizationRolePermission::RoleId)
                        .col(AuthorizationRolePermission::PermissionId),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_authorization_role_permission_role_id")
                        .from(
                            AuthorizationRolePermission::Table,
                            AuthorizationRolePermission::RoleId,
                        )
                        .to(AuthorizationRole::Table, AuthorizationRole::Id)
                        .on_delete(ForeignKeyAction::Cascade),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_authorization_role_permission_permission_id")
                        .from(
                            AuthorizationRolePermission::Table,
                            AuthorizationRolePermission::PermissionId,
                        )
                        .to(AuthorizationPermission::Table, AuthorizationPermission::Id)
                        .on_delete(ForeignKeyAction::Cascade),
                )
                .to_owned(),
        )
        .await?;

    manager
        .create_table(
            Table::create()
                .table(AuthorizationRoleUser::Table)
                .col(
                    ColumnDef::new(AuthorizationRoleUser::RoleId)
                        .uuid()
                        .not_null(),
                )
                .col(
                    ColumnDef::new(AuthorizationRoleUser::UserId)
                        .uuid()
                        .not_null(),
                )
                .col(
                    ColumnDef::new(AuthorizationRoleUser::Description)
                        .string()
                        .null(),
                )
                .primary_key(
                    Index::create()
                        .name("pk_authorization_role_user")
                        .col(AuthorizationRoleUser::RoleId)
                        .col(AuthorizationRoleUser::UserId),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_authorization_role_user_role_id")
                        .from(AuthorizationRoleUser::Table, AuthorizationRoleUser::RoleId)
                        .to(AuthorizationRole::Table, AuthorizationRole::Id)
                        .on_delete(ForeignKeyAction::Cascade),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_authorization_role_user_user_id")
                        .from(AuthorizationRoleUser::Table, AuthorizationRoleUser::UserId)
                        .to(UserSimple::Table, UserSimple::Id)
                        .on_delete(ForeignKeyAction::Cascade),
                )
                .to_owned(),
        )
        .await
}

async fn create_authentication_tables(manager: &SchemaManager<'_>) -> Result<(), DbErr> {
    manager
        .create_table(
            Table::create()
                .table(AuthenticationUserPassword::Table)
                .col(
                    ColumnDef::new(AuthenticationUserPassword::Id)
                        .uuid()
                        .not_null()
                        .primary_key(),
                )
                .col(
                    ColumnDef::new(AuthenticationUserPassword::UserId)
                        .uuid()
                        .not_null()
                        .unique_key(),
                )
                .col(
                    ColumnDef::new(AuthenticationUserPassword::Password)
                        .string_len(60)
                        .not_null(),
                )
                .col(
                    ColumnDef::new(AuthenticationUserPassword::PreviousPassword)
                        .string_len(60)
                        .null(),
                )
                .col(
                    ColumnDef::new(AuthenticationUserPassword::CreatedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                        .default(Expr::current_timestamp()),
                )
                .col(
                    ColumnDef::new(AuthenticationUserPassword::UpdatedAt)
                        .timestamp_with_time_zone()
                        .null(),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_authentication_user_password_user_id")
                        .from(
                            AuthenticationUserPassword::Table,
                            AuthenticationUserPassword::UserId,
                        )
                        .to(UserSimple::Table, UserSimple::Id)
                        .on_delete(ForeignKeyAction::Cascade),
                )
                .to_owned(),
        )
        .await?;

    manager
        .create_table(
            Table::create()
                .table(AuthenticationResetPasswordToken::Table)
                .col(
                    ColumnDef::new(AuthenticationResetPasswordToken::Token)
                        .string()
                        .not_null()
                        .primary_key(),
                )
                .col(
                    ColumnDef::new(AuthenticationResetPasswordToken::UserId)
                        .uuid()
                        .not_null()
                        .unique_key(),
                )
                .col(
                    ColumnDef::new(AuthenticationResetPasswordToken::CreatedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                        .default(Expr::current_timestamp()),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_authentication_reset_password_token_user_id")
                        .from(
                            AuthenticationResetPasswordToken::Table,
                            AuthenticationResetPasswordToken::UserId,
                        )
                        .to(UserSimple::Table, UserSimple::Id)
                        .on_delete(ForeignKeyAction::Cascade),
                )
                .to_owned(),
        )
        .await
}

async fn create_configuration_table(manager: &SchemaManager<'_>) -> Result<(), DbErr> {
    manager
        .create_table(
            Table::create()
                .table(Configuration::Table)
                .col(
                    ColumnDef::new(Configuration::Key)
                        .string()
                        .not_null()
                        .primary_key(),
                )
                .col(ColumnDef::new(Configuration::Value).string().null())
                .col(
                    ColumnDef::new(Configuration::Hashed)
                        .boolean()
                        .not_null()
                        .default(false),
                )
                .to_owned(),
        )
        .await
}

async fn seed_permissions(manager: &SchemaManager<'_>) -> Result<(), DbErr> {
    let mut insert = Query::insert()
        .into_table(AuthorizationPermission::Table)
        .columns([
            AuthorizationPermission::Id,
            AuthorizationPermission::Name,
            AuthorizationPermission::Type,
        ])
        .to_owned();

    for (name, access_type) in seed::PERMISSIONS {
        insert.values_panic([
            Uuid::new_v4().into(),
            (*name).into(),
            (*access_type).into(),
        ]);
    }

    manager.exec_stmt(insert).await
}

async fn seed_admin_role(manager: &SchemaManager<'_>) -> Result<(), DbErr> {
    let insert = Query::insert()
        .into_table(AuthorizationRole::Table)
        .columns([AuthorizationRole::Id, AuthorizationRole::Name])
        .values_panic([Uuid::new_v4().into(), seed::ADMIN_ROLE.into()])
        .to_owned();

    manager.exec_stmt(insert).await
}

/// Links every permission to the `ADMIN` role. Existing links are left alone,
/// so running this again is a no-op.
pub(crate) async fn link_admin_permissions(manager: &SchemaManager<'_>) -> Result<(), DbErr> {
    let admin_id = Query::select()
        .column(AuthorizationRole::Id)
        .from(AuthorizationRole::Table)
        .and_where(Expr::col(AuthorizationRole::Name).eq(seed::ADMIN_ROLE))
        .to_owned();

    // The WHERE clause keeps SQLite from reading ON CONFLICT as a join constraint.
    let permissions = Query::select()
        .expr(SimpleExpr::SubQuery(
            None,
            Box::new(admin_id.into_sub_query_statement()),
        ))
        .column(AuthorizationPermission::Id)
        .from(AuthorizationPermission::Table)
        .and_where(Expr::col(AuthorizationPermission::Id).is_not_null())
        .to_owned();

    let insert = Query::insert()
        .into_table(AuthorizationRolePermission::Table)
        .columns([
            AuthorizationRolePermission::RoleId,
            AuthorizationRolePermission::PermissionId,
        ])
        .select_from(permissions)
        .map_err(|e| DbErr::Migration(e.to_string()))?
        .on_conflict(
            OnConflict::columns([
                AuthorizationRolePermission::RoleId,
                AuthorizationRolePermission::PermissionId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .to_owned();

    manager.exec_stmt(insert).await
}

async fn seed_configuration(manager: &SchemaManager<'_>) -> Result<(), DbErr> {
    let mut insert = Query::insert()
        .into_table(Configuration::Table)
        .columns([Configuration::Key, Configuration::Value, Configuration::Hashed])
        .to_owned();

    for (key, value) in seed::CONFIGURATION {
        insert.values_panic([(*key).into(), (*value).into(), false.into()]);
    }

    manager.exec_stmt(insert).await
}

#[derive(DeriveIden)]
enum UserSimple {
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    Phone,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum AuthorizationRole {
    Table,
    Id,
    Name,
    Description,
}

#[derive(DeriveIden)]
enum AuthorizationPermission {
    Table,
    Id,
    Name,
    Type,
    Description,
}

#[derive(DeriveIden)]
enum AuthorizationRolePermission {
    Table,
    RoleId,
    PermissionId,
}

#[derive(DeriveIden)]
enum AuthorizationRoleUser {
    Table,
    RoleId,
    UserId,
    Description,
}

#[derive(DeriveIden)]
enum AuthenticationUserPassword {
    Table,
    Id,
    UserId,
    Password,
    PreviousPassword,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum AuthenticationResetPasswordToken {
    Table,
    Token,
    UserId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Configuration {
    Table,
    Key,
    Value,
    Hashed,
}
