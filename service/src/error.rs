use log::error;
use rocket::response::Responder;
use rocket::serde::Serialize;
use rocket_okapi::gen::OpenApiGenerator;
use rocket_okapi::okapi::openapi3::Responses;
use rocket_okapi::okapi::schemars;
use rocket_okapi::okapi::schemars::{JsonSchema, Map};
use rocket_okapi::response::OpenApiResponderInner;
use sea_orm::DbErr;
use std::fmt::Debug;

#[derive(Serialize, JsonSchema, Debug, Responder)]
pub enum GenericError {
    DraftError(DraftError),
    LeagueError(LeagueError),
    #[response(status = 404)]
    NotFound(&'static str),
    #[response(status = 409)]
    Conflict(&'static str),
    #[response(status = 403)]
    NotPermitted(&'static str),
    #[response(status = 400)]
    BadRequest(&'static str),
    #[response(status = 422)]
    CheckError(&'static str),
    #[response(status = 500)]
    UnknownError(&'static str),
}

/// Every precondition the draft arbiter can reject, reported as its own
/// condition so the caller can surface an accurate message.
#[derive(Serialize, JsonSchema, Debug, Clone, PartialEq, Eq, Responder)]
pub enum DraftError {
    #[response(status = 403)]
    Forbidden(&'static str),
    #[response(status = 400)]
    DeadlineExpired(&'static str),
    #[response(status = 400)]
    PlayerNotEligible(&'static str),
    #[response(status = 409)]
    PlayerAlreadyDrafted(&'static str),
    #[response(status = 400)]
    RosterFull(&'static str),
    #[response(status = 404)]
    NotOnRoster(&'static str),
}

#[derive(Serialize, JsonSchema, Debug, Clone, PartialEq, Eq, Responder)]
pub enum LeagueError {
    #[response(status = 404)]
    NotFound(&'static str),
    #[response(status = 400)]
    Full(&'static str),
    #[response(status = 409)]
    AlreadyMember(&'static str),
    #[response(status = 403)]
    NotMember(&'static str),
    #[response(status = 403)]
    NotPermitted(&'static str),
    #[response(status = 422)]
    InvalidSettings(&'static str),
}

impl From<DraftError> for GenericError {
    fn from(e: DraftError) -> Self {
        Self::DraftError(e)
    }
}

impl From<LeagueError> for GenericError {
    fn from(e: LeagueError) -> Self {
        Self::LeagueError(e)
    }
}

impl From<DbErr> for GenericError {
    fn from(e: DbErr) -> Self {
        error!("Database error: {:#?}", e);
        Self::UnknownError("Internal database error")
    }
}

impl OpenApiResponderInner for GenericError {
    fn responses(_: &mut OpenApiGenerator) -> rocket_okapi::Result<Responses> {
        use rocket_okapi::okapi::openapi3::{RefOr, Response as OpenApiResponse};

        let mut responses = Map::new();
        responses.insert(
            "400".to_string(),
            RefOr::Object(OpenApiResponse {
                description: "\
                # [400 Bad Request](https://developer.mozilla.org/en-US/docs/Web/HTTP/Status/400)\n\
                The request was rejected by a league rule, such as an expired draft deadline. \
                "
                .to_string(),
                ..Default::default()
            }),
        );
        responses.insert(
            "403".to_string(),
            RefOr::Object(OpenApiResponse {
                description: "\
                # [403 Forbidden](https://developer.mozilla.org/en-US/docs/Web/HTTP/Status/403)\n\
                You do not have the rights to act on this team or league. \
                "
                .to_string(),
                ..Default::default()
            }),
        );
        responses.insert(
            "404".to_string(),
            RefOr::Object(OpenApiResponse {
                description: "\
                # [404 Not Found](https://developer.mozilla.org/en-US/docs/Web/HTTP/Status/404)\n\
                This response is given when you request a resource that does not exist.\
                "
                .to_string(),
                ..Default::default()
            }),
        );
        responses.insert(
            "409".to_string(),
            RefOr::Object(OpenApiResponse {
                description: "\
                # [409 Conflict](https://developer.mozilla.org/en-US/docs/Web/HTTP/Status/409)\n\
                This response is given when the resource already exists, for example a player \
                already drafted in the league. \
                "
                .to_string(),
                ..Default::default()
            }),
        );
        responses.insert(
            "422".to_string(),
            RefOr::Object(OpenApiResponse {
                description: "\
                # [422 Unprocessable Entity](https://developer.mozilla.org/en-US/docs/Web/HTTP/Status/422)\n\
                This response is given when your request body is not correctly formatted. \
                ".to_string(),
                ..Default::default()
            }),
        );
        responses.insert(
            "500".to_string(),
            RefOr::Object(OpenApiResponse {
                description: "\
                # [500 Internal Server Error](https://developer.mozilla.org/en-US/docs/Web/HTTP/Status/500)\n\
                This response is given when something went wrong on the server. \
                ".to_string(),
                ..Default::default()
            }),
        );
        Ok(Responses {
            responses,
            ..Default::default()
        })
    }
}
