//! Team score aggregation and league standings.
//!
//! A team's total for a round is the sum of its players' running totals, and
//! only exists once every roster player has one ("all or nothing"). Missing
//! scores are first-class values here, never errors.

use entity::prelude::*;
use entity::{player_score, team};
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};
use std::cmp::Ordering;

use crate::dto::{LeagueStandings, PlayerStandingLine, TeamStanding};
use crate::error::GenericError;
use crate::roster;

/// Round 4 is conventionally the last one of a golf tournament.
pub const FINAL_ROUND: i32 = 4;

/// Sum of per-player totals; `None` as soon as a single player has none, and
/// for an empty roster.
pub fn team_total(per_player: &[Option<i32>]) -> Option<i32> {
    if per_player.is_empty() {
        return None;
    }
    per_player.iter().copied().sum()
}

/// Ascending by total, lower is better. Teams without a total sort after every
/// scored team and stay in input order; ranks are 1-based over the scored
/// teams only.
pub fn rank_teams(mut rows: Vec<TeamStanding>) -> Vec<TeamStanding> {
    rows.sort_by(|a, b| match (a.total_score, b.total_score) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    for (i, row) in rows.iter_mut().enumerate() {
        row.rank = row.total_score.is_some().then(|| i as u32 + 1);
    }
    rows
}

pub async fn team_score(
    db: &impl ConnectionTrait,
    team_id: i32,
    round: i32,
) -> Result<Option<i32>, GenericError> {
    let team = Team::find_by_id(team_id)
        .one(db)
        .await?
        .ok_or(GenericError::NotFound("Team not found"))?;
    let league = League::find_by_id(team.league_id)
        .one(db)
        .await?
        .ok_or(GenericError::NotFound("League not found"))?;

    let mut totals = Vec::new();
    for slot in roster::roster_of(db, team.id).await? {
        let score = round_score(db, league.tournament_id, slot.player_id, round).await?;
        totals.push(score.and_then(|s| s.total_score));
    }
    Ok(team_total(&totals))
}

pub async fn standings(
    db: &impl ConnectionTrait,
    league_id: i32,
    round: i32,
) -> Result<LeagueStandings, GenericError> {
    let league = League::find_by_id(league_id)
        .one(db)
        .await?
        .ok_or(GenericError::NotFound("League not found"))?;

    // Team-creation order doubles as the tie-break, so standings are
    // reproducible for the same snapshot.
    let teams = Team::find()
        .filter(team::Column::LeagueId.eq(league.id))
        .order_by_asc(team::Column::Id)
        .all(db)
        .await?;

    let mut rows = Vec::new();
    for team in teams {
        let mut lines = Vec::new();
        for slot in roster::roster_of(db, team.id).await? {
            let player = Player::find_by_id(slot.player_id).one(db).await?;
            let score = round_score(db, league.tournament_id, slot.player_id, round).await?;
            lines.push(PlayerStandingLine {
                player_id: slot.player_id,
                name: player.map(|p| format!("{} {}", p.first_name, p.last_name)),
                score: score.as_ref().and_then(|s| s.total_score),
                position: score.as_ref().and_then(|s| s.position),
                made_cut: score.as_ref().map(|s| s.made_cut),
            });
        }
        let username = User::find_by_id(team.user_id)
            .one(db)
            .await?
            .map(|u| u.name);

        let totals: Vec<Option<i32>> = lines.iter().map(|line| line.score).collect();
        rows.push(TeamStanding {
            team_id: team.id,
            team_name: team.name,
            user_id: team.user_id,
            username,
            total_score: team_total(&totals),
            rank: None,
            players: lines,
        });
    }

    Ok(LeagueStandings {
        league_id: league.id,
        league_name: league.name,
        round,
        standings: rank_teams(rows),
    })
}

async fn round_score(
    db: &impl ConnectionTrait,
    tournament_id: i32,
    player_id: i32,
    round: i32,
) -> Result<Option<player_score::Model>, DbErr> {
    PlayerScore::find()
        .filter(
            player_score::Column::TournamentId
                .eq(tournament_id)
                .and(player_score::Column::PlayerId.eq(player_id))
                .and(player_score::Column::Round.eq(round)),
        )
        .one(db)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standing(team_id: i32, total_score: Option<i32>) -> TeamStanding {
        TeamStanding {
            team_id,
            team_name: format!("team {team_id}"),
            user_id: team_id,
            username: None,
            total_score,
            rank: None,
            players: Vec::new(),
        }
    }

    #[test]
    fn empty_roster_has_no_total() {
        assert_eq!(team_total(&[]), None);
    }

    #[test]
    fn complete_roster_sums_signed_totals() {
        assert_eq!(team_total(&[Some(-3), Some(-5)]), Some(-8));
        assert_eq!(team_total(&[Some(2), Some(-1), Some(0)]), Some(1));
    }

    #[test]
    fn one_missing_score_voids_the_whole_total() {
        assert_eq!(team_total(&[Some(-3), None, Some(-5)]), None);
    }

    #[test]
    fn scored_teams_rank_ascending_and_unscored_trail_unranked() {
        // {A: -8, B: None, C: -2} must come out as [A (1), C (2), B (unranked)].
        let ranked = rank_teams(vec![
            standing(1, Some(-8)),
            standing(2, None),
            standing(3, Some(-2)),
        ]);
        let order: Vec<(i32, Option<u32>)> =
            ranked.iter().map(|r| (r.team_id, r.rank)).collect();
        assert_eq!(order, vec![(1, Some(1)), (3, Some(2)), (2, None)]);
    }

    #[test]
    fn ties_keep_input_order() {
        let ranked = rank_teams(vec![
            standing(5, Some(-4)),
            standing(6, Some(-4)),
            standing(7, Some(-6)),
        ]);
        let order: Vec<i32> = ranked.iter().map(|r| r.team_id).collect();
        assert_eq!(order, vec![7, 5, 6]);
    }

    #[test]
    fn multiple_unscored_teams_keep_input_order() {
        let ranked = rank_teams(vec![standing(9, None), standing(8, None)]);
        let order: Vec<(i32, Option<u32>)> =
            ranked.iter().map(|r| (r.team_id, r.rank)).collect();
        assert_eq!(order, vec![(9, None), (8, None)]);
    }
}
