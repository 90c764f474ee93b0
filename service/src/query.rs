use entity::prelude::*;
use entity::{league, team, tournament};
use log::error;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};

use crate::dto::{LeagueMember, LeagueSummary, TeamDetail, TournamentView};
use crate::error::{GenericError, LeagueError};
use crate::scoring;
use crate::{current_roster, Actor, FINAL_ROUND};

pub async fn league_detail(
    db: &impl ConnectionTrait,
    actor: &Actor,
    league_id: i32,
) -> Result<LeagueSummary, GenericError> {
    let league = League::find_by_id(league_id)
        .one(db)
        .await?
        .ok_or(LeagueError::NotFound("League not found"))?;
    if !is_league_member(db, actor, league.id).await? {
        return Err(LeagueError::NotMember("You are not a member of this league").into());
    }
    let member_count = count_members(db, league.id).await?;
    Ok(LeagueSummary::new(league, member_count))
}

pub async fn leagues_for_user(
    db: &impl ConnectionTrait,
    actor: &Actor,
) -> Result<Vec<LeagueSummary>, GenericError> {
    let teams = Team::find()
        .filter(team::Column::UserId.eq(actor.user_id))
        .all(db)
        .await?;

    let mut out = Vec::new();
    for team in teams {
        if let Some(league) = League::find_by_id(team.league_id).one(db).await.map_err(|e| {
            error!("Error while getting league behind team: {:#?}", e);
            GenericError::UnknownError("Unknown error while getting leagues")
        })? {
            let member_count = count_members(db, league.id).await?;
            out.push(LeagueSummary::new(league, member_count));
        }
    }
    Ok(out)
}

pub async fn league_members(
    db: &impl ConnectionTrait,
    actor: &Actor,
    league_id: i32,
) -> Result<Vec<LeagueMember>, GenericError> {
    let league = League::find_by_id(league_id)
        .one(db)
        .await?
        .ok_or(LeagueError::NotFound("League not found"))?;
    if !is_league_member(db, actor, league.id).await? {
        return Err(LeagueError::NotMember("You are not a member of this league").into());
    }

    let teams = Team::find()
        .filter(team::Column::LeagueId.eq(league.id))
        .order_by_asc(team::Column::Id)
        .all(db)
        .await?;

    let mut out = Vec::new();
    for team in teams {
        let username = User::find_by_id(team.user_id)
            .one(db)
            .await?
            .map(|u| u.name);
        out.push(LeagueMember {
            team_id: team.id,
            team_name: team.name,
            user_id: team.user_id,
            username,
        });
    }
    Ok(out)
}

/// Team with roster and its final-round total. Visible to league members, and
/// to site admins.
pub async fn team_detail(
    db: &impl ConnectionTrait,
    actor: &Actor,
    team_id: i32,
) -> Result<TeamDetail, GenericError> {
    let team = Team::find_by_id(team_id)
        .one(db)
        .await?
        .ok_or(GenericError::NotFound("Team not found"))?;
    if !actor.admin && !is_league_member(db, actor, team.league_id).await? {
        return Err(LeagueError::NotMember("You do not have access to this team").into());
    }

    let players = current_roster(db, team.id).await?;
    let total_score = scoring::team_score(db, team.id, FINAL_ROUND).await?;
    Ok(TeamDetail {
        id: team.id,
        league_id: team.league_id,
        user_id: team.user_id,
        name: team.name,
        players,
        total_score,
    })
}

pub async fn list_tournaments(
    db: &impl ConnectionTrait,
) -> Result<Vec<TournamentView>, GenericError> {
    let tournaments = Tournament::find()
        .order_by_asc(tournament::Column::Id)
        .all(db)
        .await?;
    Ok(tournaments.into_iter().map(TournamentView::from).collect())
}

pub async fn get_tournament(
    db: &impl ConnectionTrait,
    tournament_id: i32,
) -> Result<TournamentView, GenericError> {
    Tournament::find_by_id(tournament_id)
        .one(db)
        .await?
        .map(TournamentView::from)
        .ok_or(GenericError::NotFound("Tournament not found"))
}

pub async fn is_league_member(
    db: &impl ConnectionTrait,
    actor: &Actor,
    league_id: i32,
) -> Result<bool, GenericError> {
    Ok(Team::find()
        .filter(
            team::Column::LeagueId
                .eq(league_id)
                .and(team::Column::UserId.eq(actor.user_id)),
        )
        .one(db)
        .await?
        .is_some())
}

pub(crate) async fn count_members(
    db: &impl ConnectionTrait,
    league_id: i32,
) -> Result<u64, GenericError> {
    Team::find()
        .filter(team::Column::LeagueId.eq(league_id))
        .count(db)
        .await
        .map_err(GenericError::from)
}

pub(crate) async fn find_league_by_invite_code(
    db: &impl ConnectionTrait,
    invite_code: &str,
) -> Result<Option<league::Model>, GenericError> {
    League::find()
        .filter(league::Column::InviteCode.eq(invite_code.to_uppercase()))
        .one(db)
        .await
        .map_err(GenericError::from)
}
