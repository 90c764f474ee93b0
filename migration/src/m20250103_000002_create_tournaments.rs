use sea_orm::Iterable;
use sea_orm_migration::prelude::*;

use crate::enums::*;
use crate::extension::postgres::Type;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(TournamentStatus::Table)
                    .values(TournamentStatus::iter().skip(1))
                    .to_owned(),
            )
            .await?;

        manager
            .create_type(
                Type::create()
                    .as_enum(RegistrationStatus::Table)
                    .values(RegistrationStatus::iter().skip(1))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Tournament::Table)
                    .col(
                        ColumnDef::new(Tournament::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Tournament::ExternalId)
                            .string()
                            .unique_key()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Tournament::Name).string().not_null())
                    .col(ColumnDef::new(Tournament::Year).integer().not_null())
                    .col(
                        ColumnDef::new(Tournament::Status)
                            .custom(TournamentStatus::Table)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Tournament::StartDate).date())
                    .col(ColumnDef::new(Tournament::EndDate).date())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TournamentPlayer::Table)
                    .col(
                        ColumnDef::new(TournamentPlayer::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TournamentPlayer::TournamentId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TournamentPlayer::PlayerId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TournamentPlayer::Status)
                            .custom(RegistrationStatus::Table)
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TournamentPlayer::Table, TournamentPlayer::TournamentId)
                            .to(Tournament::Table, Tournament::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TournamentPlayer::Table, TournamentPlayer::PlayerId)
                            .to(Player::Table, Player::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .index(
                        Index::create()
                            .name("unique_tournament_player")
                            .col(TournamentPlayer::TournamentId)
                            .col(TournamentPlayer::PlayerId)
                            .unique(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PlayerScore::Table)
                    .col(
                        ColumnDef::new(PlayerScore::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PlayerScore::TournamentId).integer().not_null())
                    .col(ColumnDef::new(PlayerScore::PlayerId).integer().not_null())
                    .col(ColumnDef::new(PlayerScore::Round).integer().not_null())
                    .col(ColumnDef::new(PlayerScore::RoundScore).integer())
                    .col(ColumnDef::new(PlayerScore::TotalScore).integer())
                    .col(ColumnDef::new(PlayerScore::Position).integer())
                    .col(
                        ColumnDef::new(PlayerScore::MadeCut)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(PlayerScore::Table, PlayerScore::TournamentId)
                            .to(Tournament::Table, Tournament::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(PlayerScore::Table, PlayerScore::PlayerId)
                            .to(Player::Table, Player::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .index(
                        Index::create()
                            .name("unique_player_tournament_round")
                            .col(PlayerScore::TournamentId)
                            .col(PlayerScore::PlayerId)
                            .col(PlayerScore::Round)
                            .unique(),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PlayerScore::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TournamentPlayer::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tournament::Table).to_owned())
            .await?;
        manager
            .drop_type(Type::drop().name(RegistrationStatus::Table).to_owned())
            .await?;
        manager
            .drop_type(Type::drop().name(TournamentStatus::Table).to_owned())
            .await?;
        Ok(())
    }
}
