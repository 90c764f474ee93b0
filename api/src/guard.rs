use entity::prelude::User;
use entity::user;

use rocket::http::Status;
use rocket::request::{self, FromRequest, Outcome};
use rocket::Request;
use rocket_okapi::request::OpenApiFromRequest;
use sea_orm::{DatabaseConnection, EntityTrait};

use service::error::GenericError;
use service::Actor;

/// The caller, resolved from the `X-User-Id` header. Session handling lives
/// in the gateway in front of this service, which forwards the verified id.
#[derive(OpenApiFromRequest, Debug)]
pub struct ActingUser(pub user::Model);

impl ActingUser {
    pub fn actor(&self) -> Actor {
        Actor {
            user_id: self.0.id,
            admin: self.0.admin,
        }
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for ActingUser {
    type Error = GenericError;

    async fn from_request(request: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        let db = request
            .rocket()
            .state::<DatabaseConnection>()
            .expect("Database not found");

        let Some(raw) = request.headers().get_one("X-User-Id") else {
            return Outcome::Error((
                Status::Unauthorized,
                GenericError::BadRequest("Missing X-User-Id header"),
            ));
        };
        let Ok(user_id) = raw.parse::<i32>() else {
            return Outcome::Error((
                Status::BadRequest,
                GenericError::BadRequest("Malformed X-User-Id header"),
            ));
        };

        match User::find_by_id(user_id).one(db).await {
            Ok(Some(user)) => Outcome::Success(ActingUser(user)),
            Ok(None) => Outcome::Error((
                Status::Unauthorized,
                GenericError::NotFound("User not found"),
            )),
            Err(e) => Outcome::Error((Status::InternalServerError, e.into())),
        }
    }
}
