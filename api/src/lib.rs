mod guard;
mod mutation;
mod query;

use rocket_okapi::openapi_get_routes;

#[macro_use]
extern crate rocket;

use dotenvy::dotenv;
use mutation::*;
use query::*;
use rocket::{Build, Rocket};

use rocket_okapi::rapidoc::{make_rapidoc, GeneralConfig, HideShowConfig, RapiDocConfig};
use rocket_okapi::settings::UrlObject;
use rocket_okapi::swagger_ui::{make_swagger_ui, SwaggerUIConfig};

#[catch(404)]
fn general_not_found() -> &'static str {
    "Api endpoint not found"
}

pub async fn launch() -> Rocket<Build> {
    dotenv().ok();

    let db =
        sea_orm::Database::connect(std::env::var("DATABASE_URL").expect("DATABASE_URL not set"))
            .await
            .unwrap();

    rocket::build()
        .manage(db)
        .mount(
            "/api",
            openapi_get_routes![
                create_user,
                create_league,
                join_league,
                delete_league,
                draft_player,
                drop_player,
                import_tournament,
                sync_scores,
                get_league,
                my_leagues,
                league_members,
                league_standings,
                get_team,
                available_players,
                list_tournaments,
                get_tournament,
            ],
        )
        .mount(
            "/api/swagger",
            make_swagger_ui(&SwaggerUIConfig {
                url: "../openapi.json".to_owned(),
                ..Default::default()
            }),
        )
        .mount(
            "/api/",
            make_rapidoc(&RapiDocConfig {
                general: GeneralConfig {
                    spec_urls: vec![UrlObject::new("General", "./openapi.json")],
                    ..Default::default()
                },
                hide_show: HideShowConfig {
                    allow_spec_url_load: false,
                    allow_spec_file_load: false,
                    ..Default::default()
                },
                ..Default::default()
            }),
        )
        .register("/api", catchers![general_not_found])
}
