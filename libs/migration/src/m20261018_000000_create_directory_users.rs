use sea_orm_migration::sea_query::extension::postgres::Type;
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

const ROLES: [UserRole; 5] = [
    UserRole::Customer,
    UserRole::Driver,
    UserRole::Provider,
    UserRole::BackofficeManager,
    UserRole::Administrator,
];

const STATUSES: [UserStatus; 2] = [UserStatus::Active, UserStatus::Inactive];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(UserRole::Enum)
                    .values(ROLES)
                    .to_owned(),
            )
            .await?;

        manager
            .create_type(
                Type::create()
                    .as_enum(UserStatus::Enum)
                    .values(STATUSES)
                    .to_owned(),
            )
            .await?;

        manager.create_table(users_table()).await?;

        // Role and status back the listing filters; the name index comes from the unique key
        manager
            .create_index(
                Index::create()
                    .name("idx_directory_users_role")
                    .table(DirectoryUsers::Table)
                    .col(DirectoryUsers::Role)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_directory_users_status")
                    .table(DirectoryUsers::Table)
                    .col(DirectoryUsers::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DirectoryUsers::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(UserStatus::Enum).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(UserRole::Enum).to_owned())
            .await?;

        Ok(())
    }
}

fn users_table() -> TableCreateStatement {
    Table::create()
        .table(DirectoryUsers::Table)
        .if_not_exists()
        .col(pk_auto(DirectoryUsers::Id))
        // Byte-wise collation keeps name order identical across stores
        .col(string_len_uniq(DirectoryUsers::UserName, 25).extra(r#"COLLATE "C""#))
        .col(string_len_null(DirectoryUsers::PasswordHash, 128))
        .col(string_len(DirectoryUsers::Email, 320))
        .col(
            ColumnDef::new(DirectoryUsers::Role)
                .enumeration(UserRole::Enum, ROLES)
                .not_null()
                .default("customer"),
        )
        .col(
            ColumnDef::new(DirectoryUsers::Status)
                .enumeration(UserStatus::Enum, STATUSES)
                .not_null()
                .default("active"),
        )
        .to_owned()
}

#[derive(DeriveIden)]
enum DirectoryUsers {
    Table,
    Id,
    UserName,
    PasswordHash,
    Email,
    Role,
    Status,
}

#[derive(DeriveIden, Clone, Copy)]
enum UserRole {
    #[sea_orm(iden = "user_role")]
    Enum,
    #[sea_orm(iden = "customer")]
    Customer,
    #[sea_orm(iden = "driver")]
    Driver,
    #[sea_orm(iden = "provider")]
    Provider,
    #[sea_orm(iden = "backoffice_manager")]
    BackofficeManager,
    #[sea_orm(iden = "administrator")]
    Administrator,
}

#[derive(DeriveIden, Clone, Copy)]
enum UserStatus {
    #[sea_orm(iden = "user_status")]
    Enum,
    #[sea_orm(iden = "active")]
    Active,
    #[sea_orm(iden = "inactive")]
    Inactive,
}
