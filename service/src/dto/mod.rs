pub mod forms;
mod import;

use entity::sea_orm_active_enums;
use rocket::serde::{Deserialize, Serialize};
use rocket_okapi::okapi::schemars::{self, JsonSchema};
use sea_orm::prelude::DateTimeWithTimeZone;

pub use import::*;

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TournamentStatus {
    Upcoming,
    Active,
    Completed,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationStatus {
    Registered,
    Withdrawn,
    MissedCut,
    Active,
    Completed,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeagueStatus {
    Draft,
    Active,
    Completed,
}

impl From<sea_orm_active_enums::TournamentStatus> for TournamentStatus {
    fn from(status: sea_orm_active_enums::TournamentStatus) -> Self {
        match status {
            sea_orm_active_enums::TournamentStatus::Upcoming => Self::Upcoming,
            sea_orm_active_enums::TournamentStatus::Active => Self::Active,
            sea_orm_active_enums::TournamentStatus::Completed => Self::Completed,
        }
    }
}

impl From<TournamentStatus> for sea_orm_active_enums::TournamentStatus {
    fn from(status: TournamentStatus) -> Self {
        match status {
            TournamentStatus::Upcoming => Self::Upcoming,
            TournamentStatus::Active => Self::Active,
            TournamentStatus::Completed => Self::Completed,
        }
    }
}

impl From<sea_orm_active_enums::RegistrationStatus> for RegistrationStatus {
    fn from(status: sea_orm_active_enums::RegistrationStatus) -> Self {
        match status {
            sea_orm_active_enums::RegistrationStatus::Registered => Self::Registered,
            sea_orm_active_enums::RegistrationStatus::Withdrawn => Self::Withdrawn,
            sea_orm_active_enums::RegistrationStatus::MissedCut => Self::MissedCut,
            sea_orm_active_enums::RegistrationStatus::Active => Self::Active,
            sea_orm_active_enums::RegistrationStatus::Completed => Self::Completed,
        }
    }
}

impl From<RegistrationStatus> for sea_orm_active_enums::RegistrationStatus {
    fn from(status: RegistrationStatus) -> Self {
        match status {
            RegistrationStatus::Registered => Self::Registered,
            RegistrationStatus::Withdrawn => Self::Withdrawn,
            RegistrationStatus::MissedCut => Self::MissedCut,
            RegistrationStatus::Active => Self::Active,
            RegistrationStatus::Completed => Self::Completed,
        }
    }
}

impl From<sea_orm_active_enums::LeagueStatus> for LeagueStatus {
    fn from(status: sea_orm_active_enums::LeagueStatus) -> Self {
        match status {
            sea_orm_active_enums::LeagueStatus::Draft => Self::Draft,
            sea_orm_active_enums::LeagueStatus::Active => Self::Active,
            sea_orm_active_enums::LeagueStatus::Completed => Self::Completed,
        }
    }
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone)]
pub struct PlayerView {
    pub id: i32,
    pub external_id: String,
    pub name: String,
    pub country: Option<String>,
}

impl From<entity::player::Model> for PlayerView {
    fn from(model: entity::player::Model) -> Self {
        Self {
            id: model.id,
            external_id: model.external_id,
            name: format!("{} {}", model.first_name, model.last_name),
            country: model.country,
        }
    }
}

#[derive(Serialize, Deserialize, JsonSchema, Debug)]
pub struct TournamentView {
    pub id: i32,
    pub external_id: String,
    pub name: String,
    pub year: i32,
    pub status: TournamentStatus,
    pub start_date: Option<chrono::NaiveDate>,
    pub end_date: Option<chrono::NaiveDate>,
}

impl From<entity::tournament::Model> for TournamentView {
    fn from(model: entity::tournament::Model) -> Self {
        Self {
            id: model.id,
            external_id: model.external_id,
            name: model.name,
            year: model.year,
            status: model.status.into(),
            start_date: model.start_date,
            end_date: model.end_date,
        }
    }
}

#[derive(Serialize, Deserialize, JsonSchema, Debug)]
pub struct LeagueSummary {
    pub id: i32,
    pub name: String,
    pub tournament_id: i32,
    pub admin_id: i32,
    pub invite_code: String,
    pub max_members: i32,
    pub team_size: i32,
    pub status: LeagueStatus,
    pub draft_deadline: DateTimeWithTimeZone,
    pub member_count: u64,
}

impl LeagueSummary {
    pub(crate) fn new(league: entity::league::Model, member_count: u64) -> Self {
        Self {
            id: league.id,
            name: league.name,
            tournament_id: league.tournament_id,
            admin_id: league.admin_id,
            invite_code: league.invite_code,
            max_members: league.max_members,
            team_size: league.team_size,
            status: league.status.into(),
            draft_deadline: league.draft_deadline,
            member_count,
        }
    }
}

#[derive(Serialize, Deserialize, JsonSchema, Debug)]
pub struct LeagueMember {
    pub team_id: i32,
    pub team_name: String,
    pub user_id: i32,
    pub username: Option<String>,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug)]
pub struct TeamDetail {
    pub id: i32,
    pub league_id: i32,
    pub user_id: i32,
    pub name: String,
    pub players: Vec<PlayerView>,
    pub total_score: Option<i32>,
}

/// One roster player's line in the standings breakdown. Every field besides
/// the id is nullable on its own: a player can be on a roster without a score
/// record for the round.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone)]
pub struct PlayerStandingLine {
    pub player_id: i32,
    pub name: Option<String>,
    pub score: Option<i32>,
    pub position: Option<i32>,
    pub made_cut: Option<bool>,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone)]
pub struct TeamStanding {
    pub team_id: i32,
    pub team_name: String,
    pub user_id: i32,
    pub username: Option<String>,
    pub total_score: Option<i32>,
    pub rank: Option<u32>,
    pub players: Vec<PlayerStandingLine>,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug)]
pub struct LeagueStandings {
    pub league_id: i32,
    pub league_name: String,
    pub round: i32,
    pub standings: Vec<TeamStanding>,
}
