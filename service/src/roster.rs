//! The roster ledger: which player sits on which team, per league.
//!
//! Membership queries and slot mutation only. The draft arbiter is the single
//! caller allowed to mutate, after it has validated the league rules; the
//! unique indexes on `team_player` back the exclusivity invariants at commit.

use entity::prelude::*;
use entity::team_player;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, ModelTrait, QueryFilter, QueryOrder,
};

/// True if any team in the league holds the player.
pub async fn player_drafted_in_league(
    db: &impl ConnectionTrait,
    league_id: i32,
    player_id: i32,
) -> Result<bool, DbErr> {
    Ok(TeamPlayer::find()
        .filter(
            team_player::Column::LeagueId
                .eq(league_id)
                .and(team_player::Column::PlayerId.eq(player_id)),
        )
        .one(db)
        .await?
        .is_some())
}

pub async fn player_on_team(
    db: &impl ConnectionTrait,
    team_id: i32,
    player_id: i32,
) -> Result<bool, DbErr> {
    Ok(find_slot(db, team_id, player_id).await?.is_some())
}

/// The team's slots, in draft order.
pub async fn roster_of(
    db: &impl ConnectionTrait,
    team_id: i32,
) -> Result<Vec<team_player::Model>, DbErr> {
    TeamPlayer::find()
        .filter(team_player::Column::TeamId.eq(team_id))
        .order_by_asc(team_player::Column::Id)
        .all(db)
        .await
}

pub async fn roster_size(db: &impl ConnectionTrait, team_id: i32) -> Result<usize, DbErr> {
    Ok(roster_of(db, team_id).await?.len())
}

pub async fn add_slot(
    db: &impl ConnectionTrait,
    team_id: i32,
    league_id: i32,
    player_id: i32,
    drafted_at: sea_orm::prelude::DateTimeWithTimeZone,
) -> Result<(), DbErr> {
    let slot = team_player::ActiveModel {
        id: NotSet,
        team_id: Set(team_id),
        league_id: Set(league_id),
        player_id: Set(player_id),
        drafted_at: Set(drafted_at),
    };
    TeamPlayer::insert(slot).exec(db).await?;
    Ok(())
}

/// Returns false when no such slot exists.
pub async fn remove_slot(
    db: &impl ConnectionTrait,
    team_id: i32,
    player_id: i32,
) -> Result<bool, DbErr> {
    if let Some(slot) = find_slot(db, team_id, player_id).await? {
        slot.delete(db).await?;
        Ok(true)
    } else {
        Ok(false)
    }
}

async fn find_slot(
    db: &impl ConnectionTrait,
    team_id: i32,
    player_id: i32,
) -> Result<Option<team_player::Model>, DbErr> {
    TeamPlayer::find()
        .filter(
            team_player::Column::TeamId
                .eq(team_id)
                .and(team_player::Column::PlayerId.eq(player_id)),
        )
        .one(db)
        .await
}
