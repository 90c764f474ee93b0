use sea_orm::EnumIter;
use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
pub(crate) enum User {
    Table,
    Id,
    Name,
    Admin,
}

#[derive(DeriveIden)]
pub(crate) enum Player {
    Table,
    Id,
    ExternalId,
    FirstName,
    LastName,
    Country,
}

#[derive(DeriveIden)]
pub(crate) enum Tournament {
    Table,
    Id,
    ExternalId,
    Name,
    Year,
    Status,
    StartDate,
    EndDate,
}

#[derive(Iden, EnumIter)]
pub(crate) enum TournamentStatus {
    Table,
    #[iden = "Upcoming"]
    Upcoming,
    #[iden = "Active"]
    Active,
    #[iden = "Completed"]
    Completed,
}

#[derive(DeriveIden)]
pub(crate) enum TournamentPlayer {
    Table,
    Id,
    TournamentId,
    PlayerId,
    Status,
}

#[derive(Iden, EnumIter)]
pub(crate) enum RegistrationStatus {
    Table,
    #[iden = "Registered"]
    Registered,
    #[iden = "Withdrawn"]
    Withdrawn,
    #[iden = "MissedCut"]
    MissedCut,
    #[iden = "Active"]
    Active,
    #[iden = "Completed"]
    Completed,
}

#[derive(DeriveIden)]
pub(crate) enum PlayerScore {
    Table,
    Id,
    TournamentId,
    PlayerId,
    Round,
    RoundScore,
    TotalScore,
    Position,
    MadeCut,
}

#[derive(DeriveIden)]
pub(crate) enum League {
    Table,
    Id,
    TournamentId,
    AdminId,
    Name,
    InviteCode,
    MaxMembers,
    TeamSize,
    Status,
    DraftDeadline,
    CreatedAt,
}

#[derive(Iden, EnumIter)]
pub(crate) enum LeagueStatus {
    Table,
    #[iden = "Draft"]
    Draft,
    #[iden = "Active"]
    Active,
    #[iden = "Completed"]
    Completed,
}

#[derive(DeriveIden)]
pub(crate) enum Team {
    Table,
    Id,
    LeagueId,
    UserId,
    Name,
    CreatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum TeamPlayer {
    Table,
    Id,
    TeamId,
    LeagueId,
    PlayerId,
    DraftedAt,
}
