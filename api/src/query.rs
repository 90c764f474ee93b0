use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;
use sea_orm::DatabaseConnection;

use service::dto::{LeagueMember, LeagueStandings, LeagueSummary, PlayerView, TeamDetail, TournamentView};
use service::error::GenericError;
use service::FINAL_ROUND;

use crate::guard::ActingUser;

#[openapi(tag = "League")]
#[get("/leagues/<id>")]
pub(crate) async fn get_league(
    db: &State<DatabaseConnection>,
    user: ActingUser,
    id: i32,
) -> Result<Json<LeagueSummary>, GenericError> {
    service::query::league_detail(db.inner(), &user.actor(), id)
        .await
        .map(Json)
}

#[openapi(tag = "League")]
#[get("/my-leagues")]
pub(crate) async fn my_leagues(
    db: &State<DatabaseConnection>,
    user: ActingUser,
) -> Result<Json<Vec<LeagueSummary>>, GenericError> {
    service::query::leagues_for_user(db.inner(), &user.actor())
        .await
        .map(Json)
}

#[openapi(tag = "League")]
#[get("/leagues/<id>/members")]
pub(crate) async fn league_members(
    db: &State<DatabaseConnection>,
    user: ActingUser,
    id: i32,
) -> Result<Json<Vec<LeagueMember>>, GenericError> {
    service::query::league_members(db.inner(), &user.actor(), id)
        .await
        .map(Json)
}

/// # League standings
///
/// Ranked teams as of the given round, the final round when omitted. Teams
/// without a complete score sort last and carry no rank.
#[openapi(tag = "League")]
#[get("/leagues/<id>/standings?<round>")]
pub(crate) async fn league_standings(
    db: &State<DatabaseConnection>,
    user: ActingUser,
    id: i32,
    round: Option<i32>,
) -> Result<Json<LeagueStandings>, GenericError> {
    let actor = user.actor();
    if !service::query::is_league_member(db.inner(), &actor, id).await? && !actor.admin {
        return Err(service::error::LeagueError::NotMember(
            "Only league members can view the standings",
        )
        .into());
    }
    service::standings(db.inner(), id, round.unwrap_or(FINAL_ROUND))
        .await
        .map(Json)
}

#[openapi(tag = "Team")]
#[get("/teams/<id>")]
pub(crate) async fn get_team(
    db: &State<DatabaseConnection>,
    user: ActingUser,
    id: i32,
) -> Result<Json<TeamDetail>, GenericError> {
    service::query::team_detail(db.inner(), &user.actor(), id)
        .await
        .map(Json)
}

/// # Available players
///
/// Players registered for the league's tournament and not yet on any roster
/// in the league, ordered by last name.
#[openapi(tag = "Team")]
#[get("/teams/<id>/available-players")]
pub(crate) async fn available_players(
    db: &State<DatabaseConnection>,
    user: ActingUser,
    id: i32,
) -> Result<Json<Vec<PlayerView>>, GenericError> {
    service::available_players(db.inner(), &user.actor(), id)
        .await
        .map(Json)
}

#[openapi(tag = "Tournament")]
#[get("/tournaments")]
pub(crate) async fn list_tournaments(
    db: &State<DatabaseConnection>,
) -> Result<Json<Vec<TournamentView>>, GenericError> {
    service::query::list_tournaments(db.inner()).await.map(Json)
}

#[openapi(tag = "Tournament")]
#[get("/tournaments/<id>")]
pub(crate) async fn get_tournament(
    db: &State<DatabaseConnection>,
    id: i32,
) -> Result<Json<TournamentView>, GenericError> {
    service::query::get_tournament(db.inner(), id).await.map(Json)
}
