//! Already-validated facts handed over by the tournament-data collaborator.
//! The wire format of the upstream golf API never reaches this crate; the
//! import surface accepts these shapes and upserts them by natural key.

use rocket::serde::{Deserialize, Serialize};
use rocket_okapi::okapi::schemars::{self, JsonSchema};

use super::{RegistrationStatus, TournamentStatus};

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone)]
pub struct TournamentImport {
    pub external_id: String,
    pub name: String,
    pub year: i32,
    pub status: TournamentStatus,
    pub start_date: Option<chrono::NaiveDate>,
    pub end_date: Option<chrono::NaiveDate>,
    pub players: Vec<PlayerImport>,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone)]
pub struct PlayerImport {
    pub external_id: String,
    pub first_name: String,
    pub last_name: String,
    pub country: Option<String>,
    pub status: RegistrationStatus,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone)]
pub struct ScoreSync {
    pub rows: Vec<ScoreRow>,
}

/// One player's figures for one round, keyed by the player's external id.
/// `total_score` is the running total relative to par, negative is under.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone)]
pub struct ScoreRow {
    pub player_external_id: String,
    pub round: i32,
    pub round_score: Option<i32>,
    pub total_score: Option<i32>,
    pub position: Option<i32>,
    pub made_cut: bool,
}
