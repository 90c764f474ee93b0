use rocket::serde::Deserialize;
use rocket_okapi::okapi::schemars::{self, JsonSchema};
use sea_orm::prelude::DateTimeWithTimeZone;

#[derive(Deserialize, JsonSchema, Debug, Clone)]
pub struct CreateUser {
    pub username: String,
}

#[derive(Deserialize, JsonSchema, Debug, Clone)]
pub struct CreateLeague {
    pub tournament_id: i32,
    pub name: String,
    pub max_members: Option<i32>,
    pub team_size: Option<i32>,
    pub draft_deadline: DateTimeWithTimeZone,
}

#[derive(Deserialize, JsonSchema, Debug, Clone)]
pub struct JoinLeague {
    pub team_name: String,
}

#[derive(Deserialize, JsonSchema, Debug, Clone)]
pub struct DraftRequest {
    pub player_id: i32,
}
