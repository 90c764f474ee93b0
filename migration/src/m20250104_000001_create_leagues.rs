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
                    .as_enum(LeagueStatus::Table)
                    .values(LeagueStatus::iter().skip(1))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(League::Table)
                    .col(
                        ColumnDef::new(League::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(League::TournamentId).integer().not_null())
                    .col(ColumnDef::new(League::AdminId).integer().not_null())
                    .col(ColumnDef::new(League::Name).string().not_null())
                    .col(
                        ColumnDef::new(League::InviteCode)
                            .string_len(8)
                            .unique_key()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(League::MaxMembers)
                            .integer()
                            .not_null()
                            .check(Expr::col(League::MaxMembers).gt(0)),
                    )
                    .col(
                        ColumnDef::new(League::TeamSize)
                            .integer()
                            .not_null()
                            .check(Expr::col(League::TeamSize).gt(0)),
                    )
                    .col(
                        ColumnDef::new(League::Status)
                            .custom(LeagueStatus::Table)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(League::DraftDeadline)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(League::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(League::Table, League::TournamentId)
                            .to(Tournament::Table, Tournament::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(League::Table, League::AdminId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Team::Table)
                    .col(
                        ColumnDef::new(Team::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Team::LeagueId).integer().not_null())
                    .col(ColumnDef::new(Team::UserId).integer().not_null())
                    .col(ColumnDef::new(Team::Name).string().not_null())
                    .col(
                        ColumnDef::new(Team::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Team::Table, Team::LeagueId)
                            .to(League::Table, League::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Team::Table, Team::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .index(
                        Index::create()
                            .name("unique_user_per_league")
                            .col(Team::LeagueId)
                            .col(Team::UserId)
                            .unique(),
                    )
                    .to_owned(),
            )
            .await?;

        // league_id is denormalized onto the roster so league-wide player
        // exclusivity can be a plain unique index checked at commit.
        manager
            .create_table(
                Table::create()
                    .table(TeamPlayer::Table)
                    .col(
                        ColumnDef::new(TeamPlayer::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TeamPlayer::TeamId).integer().not_null())
                    .col(ColumnDef::new(TeamPlayer::LeagueId).integer().not_null())
                    .col(ColumnDef::new(TeamPlayer::PlayerId).integer().not_null())
                    .col(
                        ColumnDef::new(TeamPlayer::DraftedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TeamPlayer::Table, TeamPlayer::TeamId)
                            .to(Team::Table, Team::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TeamPlayer::Table, TeamPlayer::LeagueId)
                            .to(League::Table, League::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TeamPlayer::Table, TeamPlayer::PlayerId)
                            .to(Player::Table, Player::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .index(
                        Index::create()
                            .name("unique_player_per_team")
                            .col(TeamPlayer::TeamId)
                            .col(TeamPlayer::PlayerId)
                            .unique(),
                    )
                    .index(
                        Index::create()
                            .name("unique_player_per_league")
                            .col(TeamPlayer::LeagueId)
                            .col(TeamPlayer::PlayerId)
                            .unique(),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TeamPlayer::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Team::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(League::Table).to_owned())
            .await?;
        manager
            .drop_type(Type::drop().name(LeagueStatus::Table).to_owned())
            .await?;
        Ok(())
    }
}
