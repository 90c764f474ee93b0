use chrono::Utc;
use entity::prelude::*;
use entity::sea_orm_active_enums::LeagueStatus;
use entity::{league, player, player_score, team, team_player, tournament, tournament_player, user};
use log::warn;
use rand::Rng;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, QueryFilter, SqlErr, TransactionTrait,
};

use crate::dto::forms::{CreateLeague, CreateUser, JoinLeague};
use crate::dto::{LeagueSummary, PlayerImport, ScoreSync, TournamentImport, TournamentView};
use crate::error::{GenericError, LeagueError};
use crate::query::{count_members, find_league_by_invite_code, is_league_member};
use crate::Actor;

pub async fn create_user(db: &impl ConnectionTrait, form: CreateUser) -> Result<i32, GenericError> {
    let new_user = user::ActiveModel {
        id: NotSet,
        name: Set(form.username),
        admin: Set(false),
    };
    match new_user.insert(db).await {
        Ok(model) => Ok(model.id),
        Err(e) => Err(match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                GenericError::Conflict("Username already taken")
            }
            _ => e.into(),
        }),
    }
}

impl CreateLeague {
    pub async fn insert(
        self,
        db: &DatabaseConnection,
        actor: &Actor,
    ) -> Result<LeagueSummary, GenericError> {
        let txn = db.begin().await?;
        let summary = self.insert_in_txn(&txn, actor).await?;
        txn.commit().await?;
        Ok(summary)
    }

    async fn insert_in_txn(
        self,
        db: &impl ConnectionTrait,
        actor: &Actor,
    ) -> Result<LeagueSummary, GenericError> {
        let max_members = self.max_members.unwrap_or(10);
        let team_size = self.team_size.unwrap_or(4);
        if max_members <= 0 || team_size <= 0 {
            return Err(
                LeagueError::InvalidSettings("Member and roster limits must be positive").into(),
            );
        }

        Tournament::find_by_id(self.tournament_id)
            .one(db)
            .await?
            .ok_or(GenericError::NotFound("Tournament not found"))?;
        let admin = User::find_by_id(actor.user_id)
            .one(db)
            .await?
            .ok_or(GenericError::NotFound("User not found"))?;

        let mut invite_code = generate_invite_code();
        while find_league_by_invite_code(db, &invite_code).await?.is_some() {
            invite_code = generate_invite_code();
        }

        let league = league::ActiveModel {
            id: NotSet,
            tournament_id: Set(self.tournament_id),
            admin_id: Set(admin.id),
            name: Set(self.name),
            invite_code: Set(invite_code),
            max_members: Set(max_members),
            team_size: Set(team_size),
            status: Set(LeagueStatus::Draft),
            draft_deadline: Set(self.draft_deadline),
            created_at: Set(Utc::now().fixed_offset()),
        }
        .insert(db)
        .await?;

        // The creator always fields the first team.
        team::ActiveModel {
            id: NotSet,
            league_id: Set(league.id),
            user_id: Set(admin.id),
            name: Set(format!("{}'s Team", admin.name)),
            created_at: Set(Utc::now().fixed_offset()),
        }
        .insert(db)
        .await?;

        Ok(LeagueSummary::new(league, 1))
    }
}

pub async fn join_league(
    db: &DatabaseConnection,
    actor: &Actor,
    invite_code: &str,
    form: JoinLeague,
) -> Result<LeagueSummary, GenericError> {
    let txn = db.begin().await?;

    let league = find_league_by_invite_code(&txn, invite_code)
        .await?
        .ok_or(LeagueError::NotFound("Invalid invite code"))?;
    if is_league_member(&txn, actor, league.id).await? {
        return Err(LeagueError::AlreadyMember("You are already a member of this league").into());
    }
    let member_count = count_members(&txn, league.id).await?;
    if member_count >= league.max_members as u64 {
        return Err(LeagueError::Full("League is full").into());
    }

    team::ActiveModel {
        id: NotSet,
        league_id: Set(league.id),
        user_id: Set(actor.user_id),
        name: Set(form.team_name),
        created_at: Set(Utc::now().fixed_offset()),
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;
    Ok(LeagueSummary::new(league, member_count + 1))
}

/// Deletes a league with its teams and roster slots. Explicit cleanup rather
/// than relying on the relationship graph.
pub async fn delete_league(
    db: &DatabaseConnection,
    actor: &Actor,
    league_id: i32,
) -> Result<(), GenericError> {
    let league = League::find_by_id(league_id)
        .one(db)
        .await?
        .ok_or(LeagueError::NotFound("League not found"))?;
    if !actor.admin && league.admin_id != actor.user_id {
        return Err(LeagueError::NotPermitted("Only the league admin can delete it").into());
    }

    let txn = db.begin().await?;
    TeamPlayer::delete_many()
        .filter(team_player::Column::LeagueId.eq(league.id))
        .exec(&txn)
        .await?;
    Team::delete_many()
        .filter(team::Column::LeagueId.eq(league.id))
        .exec(&txn)
        .await?;
    League::delete_by_id(league.id).exec(&txn).await?;
    txn.commit().await?;
    Ok(())
}

/// One-time import from the tournament-data collaborator: the tournament, its
/// field of players, and their registrations, upserted by natural key.
pub async fn import_tournament(
    db: &DatabaseConnection,
    actor: &Actor,
    import: TournamentImport,
) -> Result<TournamentView, GenericError> {
    if !actor.may_import() {
        return Err(GenericError::NotPermitted(
            "You do not have permission to import tournament data",
        ));
    }

    let txn = db.begin().await?;
    let tournament = upsert_tournament(&txn, &import).await?;
    for player_import in &import.players {
        let player = upsert_player(&txn, player_import).await?;
        upsert_registration(&txn, tournament.id, player.id, player_import).await?;
    }
    txn.commit().await?;
    Ok(TournamentView::from(tournament))
}

/// Periodic sync from the collaborator, overwriting per-round score rows.
/// Returns the number of rows applied; rows for players the store does not
/// know are skipped, since the feed was validated upstream.
pub async fn sync_scores(
    db: &DatabaseConnection,
    actor: &Actor,
    tournament_id: i32,
    sync: ScoreSync,
) -> Result<u32, GenericError> {
    if !actor.may_import() {
        return Err(GenericError::NotPermitted(
            "You do not have permission to sync scores",
        ));
    }
    let tournament = Tournament::find_by_id(tournament_id)
        .one(db)
        .await?
        .ok_or(GenericError::NotFound("Tournament not found"))?;

    let txn = db.begin().await?;
    let mut applied = 0;
    for row in &sync.rows {
        let player = Player::find()
            .filter(player::Column::ExternalId.eq(&row.player_external_id))
            .one(&txn)
            .await?;
        let Some(player) = player else {
            warn!(
                "Skipping score row for unknown player {}",
                row.player_external_id
            );
            continue;
        };

        let existing = PlayerScore::find()
            .filter(
                player_score::Column::TournamentId
                    .eq(tournament.id)
                    .and(player_score::Column::PlayerId.eq(player.id))
                    .and(player_score::Column::Round.eq(row.round)),
            )
            .one(&txn)
            .await?;
        match existing {
            Some(model) => {
                let mut active = model.into_active_model();
                active.round_score = Set(row.round_score);
                active.total_score = Set(row.total_score);
                active.position = Set(row.position);
                active.made_cut = Set(row.made_cut);
                active.update(&txn).await?;
            }
            None => {
                player_score::ActiveModel {
                    id: NotSet,
                    tournament_id: Set(tournament.id),
                    player_id: Set(player.id),
                    round: Set(row.round),
                    round_score: Set(row.round_score),
                    total_score: Set(row.total_score),
                    position: Set(row.position),
                    made_cut: Set(row.made_cut),
                }
                .insert(&txn)
                .await?;
            }
        }
        applied += 1;
    }
    txn.commit().await?;
    Ok(applied)
}

async fn upsert_tournament(
    db: &impl ConnectionTrait,
    import: &TournamentImport,
) -> Result<tournament::Model, GenericError> {
    let existing = Tournament::find()
        .filter(tournament::Column::ExternalId.eq(&import.external_id))
        .one(db)
        .await?;
    let model = match existing {
        Some(model) => {
            let mut active = model.into_active_model();
            active.name = Set(import.name.clone());
            active.year = Set(import.year);
            active.status = Set(import.status.into());
            active.start_date = Set(import.start_date);
            active.end_date = Set(import.end_date);
            active.update(db).await?
        }
        None => {
            tournament::ActiveModel {
                id: NotSet,
                external_id: Set(import.external_id.clone()),
                name: Set(import.name.clone()),
                year: Set(import.year),
                status: Set(import.status.into()),
                start_date: Set(import.start_date),
                end_date: Set(import.end_date),
            }
            .insert(db)
            .await?
        }
    };
    Ok(model)
}

async fn upsert_player(
    db: &impl ConnectionTrait,
    import: &PlayerImport,
) -> Result<player::Model, GenericError> {
    let existing = Player::find()
        .filter(player::Column::ExternalId.eq(&import.external_id))
        .one(db)
        .await?;
    let model = match existing {
        Some(model) => {
            let mut active = model.into_active_model();
            active.first_name = Set(import.first_name.clone());
            active.last_name = Set(import.last_name.clone());
            active.country = Set(import.country.clone());
            active.update(db).await?
        }
        None => {
            player::ActiveModel {
                id: NotSet,
                external_id: Set(import.external_id.clone()),
                first_name: Set(import.first_name.clone()),
                last_name: Set(import.last_name.clone()),
                country: Set(import.country.clone()),
            }
            .insert(db)
            .await?
        }
    };
    Ok(model)
}

async fn upsert_registration(
    db: &impl ConnectionTrait,
    tournament_id: i32,
    player_id: i32,
    import: &PlayerImport,
) -> Result<(), GenericError> {
    let existing = TournamentPlayer::find()
        .filter(
            tournament_player::Column::TournamentId
                .eq(tournament_id)
                .and(tournament_player::Column::PlayerId.eq(player_id)),
        )
        .one(db)
        .await?;
    match existing {
        Some(model) => {
            let mut active = model.into_active_model();
            active.status = Set(import.status.into());
            active.update(db).await?;
        }
        None => {
            tournament_player::ActiveModel {
                id: NotSet,
                tournament_id: Set(tournament_id),
                player_id: Set(player_id),
                status: Set(import.status.into()),
            }
            .insert(db)
            .await?;
        }
    }
    Ok(())
}

fn generate_invite_code() -> String {
    const CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
    let mut rng = rand::thread_rng();
    (0..8)
        .map(|_| CHARS[rng.gen_range(0..CHARS.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invite_codes_are_eight_uppercase_alphanumerics() {
        for _ in 0..32 {
            let code = generate_invite_code();
            assert_eq!(code.len(), 8);
            assert!(code
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
        }
    }
}
