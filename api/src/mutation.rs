use chrono::Utc;
use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;
use sea_orm::DatabaseConnection;

use service::dto::forms::{CreateLeague, CreateUser, DraftRequest, JoinLeague};
use service::dto::{LeagueSummary, PlayerView, ScoreSync, TournamentImport, TournamentView};
use service::error::GenericError;

use crate::guard::ActingUser;

/// # Create a user
///
/// Takes a unique username and returns the new user's id. Conflicting
/// usernames are rejected with `409`.
#[openapi(tag = "User")]
#[post("/create-user", format = "json", data = "<user>")]
pub(crate) async fn create_user(
    db: &State<DatabaseConnection>,
    user: Json<CreateUser>,
) -> Result<Json<i32>, GenericError> {
    service::mutation::create_user(db.inner(), user.into_inner())
        .await
        .map(Json)
}

/// # Create a league
///
/// The caller becomes the league admin and fields its first team. Member and
/// roster limits fall back to 10 and 4 when omitted.
#[openapi(tag = "League")]
#[post("/leagues", format = "json", data = "<league>")]
pub(crate) async fn create_league(
    db: &State<DatabaseConnection>,
    user: ActingUser,
    league: Json<CreateLeague>,
) -> Result<Json<LeagueSummary>, GenericError> {
    league
        .into_inner()
        .insert(db.inner(), &user.actor())
        .await
        .map(Json)
}

/// # Join a league
///
/// Joins the league behind the invite code with a fresh, empty team.
#[openapi(tag = "League")]
#[post("/leagues/join/<invite_code>", format = "json", data = "<form>")]
pub(crate) async fn join_league(
    db: &State<DatabaseConnection>,
    user: ActingUser,
    invite_code: &str,
    form: Json<JoinLeague>,
) -> Result<Json<LeagueSummary>, GenericError> {
    service::mutation::join_league(db.inner(), &user.actor(), invite_code, form.into_inner())
        .await
        .map(Json)
}

#[openapi(tag = "League")]
#[delete("/leagues/<id>")]
pub(crate) async fn delete_league(
    db: &State<DatabaseConnection>,
    user: ActingUser,
    id: i32,
) -> Result<(), GenericError> {
    service::mutation::delete_league(db.inner(), &user.actor(), id).await
}

/// # Draft a player
///
/// Adds the player to the caller's team and returns the updated roster.
/// Rejected when the deadline has passed, the player is not registered for
/// the league's tournament, the player is already on a roster in the league,
/// or the roster is full.
#[openapi(tag = "Team")]
#[post("/teams/<id>/players", format = "json", data = "<request>")]
pub(crate) async fn draft_player(
    db: &State<DatabaseConnection>,
    user: ActingUser,
    id: i32,
    request: Json<DraftRequest>,
) -> Result<Json<Vec<PlayerView>>, GenericError> {
    let now = Utc::now().fixed_offset();
    service::draft_player(db.inner(), &user.actor(), id, request.player_id, now)
        .await
        .map(Json)
}

/// # Drop a player
///
/// Removes the player from the caller's team and returns the updated roster.
/// Rosters freeze once the draft deadline passes.
#[openapi(tag = "Team")]
#[delete("/teams/<id>/players/<player_id>")]
pub(crate) async fn drop_player(
    db: &State<DatabaseConnection>,
    user: ActingUser,
    id: i32,
    player_id: i32,
) -> Result<Json<Vec<PlayerView>>, GenericError> {
    let now = Utc::now().fixed_offset();
    service::drop_player(db.inner(), &user.actor(), id, player_id, now)
        .await
        .map(Json)
}

/// # Import a tournament
///
/// Upserts a tournament, its players and their registrations from the
/// tournament-data collaborator. Site admins only.
#[openapi(tag = "Tournament")]
#[post("/tournaments/import", format = "json", data = "<import>")]
pub(crate) async fn import_tournament(
    db: &State<DatabaseConnection>,
    user: ActingUser,
    import: Json<TournamentImport>,
) -> Result<Json<TournamentView>, GenericError> {
    service::mutation::import_tournament(db.inner(), &user.actor(), import.into_inner())
        .await
        .map(Json)
}

/// # Sync scores
///
/// Overwrites per-round score rows for a tournament and returns the number
/// of rows applied. Site admins only.
#[openapi(tag = "Tournament")]
#[put("/tournaments/<id>/scores", format = "json", data = "<sync>")]
pub(crate) async fn sync_scores(
    db: &State<DatabaseConnection>,
    user: ActingUser,
    id: i32,
    sync: Json<ScoreSync>,
) -> Result<Json<u32>, GenericError> {
    service::mutation::sync_scores(db.inner(), &user.actor(), id, sync.into_inner())
        .await
        .map(Json)
}
