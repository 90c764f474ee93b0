pub use sea_orm_migration::prelude::*;

mod enums;
mod m20250103_000001_create_users_and_players;
mod m20250103_000002_create_tournaments;
mod m20250104_000001_create_leagues;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250103_000001_create_users_and_players::Migration),
            Box::new(m20250103_000002_create_tournaments::Migration),
            Box::new(m20250104_000001_create_leagues::Migration),
        ]
    }
}
