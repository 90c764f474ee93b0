//! The draft arbiter: the one decision point for putting a player on a roster
//! or taking one off.
//!
//! The rule checks themselves are pure functions over a gathered fact set, so
//! they can be exercised without a database. The async wrappers gather those
//! facts and commit inside a single transaction, so the check-then-insert
//! sequence cannot interleave with a competing draft for the same player; a
//! unique-index conflict slipping through at commit is reported as
//! `PlayerAlreadyDrafted` rather than retried.

use chrono::{DateTime, FixedOffset};
use entity::prelude::*;
use entity::{player, team, team_player, tournament_player};
use itertools::Itertools;
use log::warn;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, SqlErr,
    TransactionTrait,
};
use std::collections::HashSet;

use crate::dto::PlayerView;
use crate::error::{DraftError, GenericError, LeagueError};
use crate::roster;

/// Role snapshot taken by the caller; the core never reads user state itself.
#[derive(Clone, Copy, Debug)]
pub struct Actor {
    pub user_id: i32,
    pub admin: bool,
}

impl Actor {
    pub fn manages_team(&self, team: &team::Model) -> bool {
        self.user_id == team.user_id
    }

    pub fn may_import(&self) -> bool {
        self.admin
    }
}

/// Everything the draft decision depends on, gathered under one transaction.
#[derive(Clone, Copy, Debug)]
pub struct DraftFacts {
    pub owns_team: bool,
    pub now: DateTime<FixedOffset>,
    pub deadline: DateTime<FixedOffset>,
    pub registered: bool,
    pub already_drafted: bool,
    pub roster_len: usize,
    pub team_size: i32,
}

/// Preconditions in order, first failure wins.
pub fn check_draft(facts: &DraftFacts) -> Result<(), DraftError> {
    if !facts.owns_team {
        return Err(DraftError::Forbidden("You can only modify your own team"));
    }
    if facts.now >= facts.deadline {
        return Err(DraftError::DeadlineExpired("Draft deadline has passed"));
    }
    if !facts.registered {
        return Err(DraftError::PlayerNotEligible(
            "Player is not registered for this tournament",
        ));
    }
    if facts.already_drafted {
        return Err(DraftError::PlayerAlreadyDrafted(
            "Player already drafted by a team in this league",
        ));
    }
    if facts.roster_len >= facts.team_size.max(0) as usize {
        return Err(DraftError::RosterFull("Team roster is full"));
    }
    Ok(())
}

#[derive(Clone, Copy, Debug)]
pub struct DropFacts {
    pub owns_team: bool,
    pub now: DateTime<FixedOffset>,
    pub deadline: DateTime<FixedOffset>,
    pub on_roster: bool,
}

/// Drops are frozen after the deadline too: once drafting closes, rosters are
/// locked in both directions.
pub fn check_drop(facts: &DropFacts) -> Result<(), DraftError> {
    if !facts.owns_team {
        return Err(DraftError::Forbidden("You can only modify your own team"));
    }
    if facts.now >= facts.deadline {
        return Err(DraftError::DeadlineExpired("Draft deadline has passed"));
    }
    if !facts.on_roster {
        return Err(DraftError::NotOnRoster("Player is not on this team"));
    }
    Ok(())
}

pub async fn draft_player(
    db: &DatabaseConnection,
    actor: &Actor,
    team_id: i32,
    player_id: i32,
    now: DateTime<FixedOffset>,
) -> Result<Vec<PlayerView>, GenericError> {
    let txn = db.begin().await?;
    match draft_in_txn(&txn, actor, team_id, player_id, now).await {
        Ok(roster) => {
            txn.commit().await?;
            Ok(roster)
        }
        Err(e) => {
            if let Err(rollback) = txn.rollback().await {
                warn!("Rollback after failed draft also failed: {:#?}", rollback);
            }
            Err(e)
        }
    }
}

/// The check-and-commit body. Callers holding their own transaction handle can
/// use this directly; `draft_player` wraps it with commit/rollback.
pub async fn draft_in_txn(
    db: &impl ConnectionTrait,
    actor: &Actor,
    team_id: i32,
    player_id: i32,
    now: DateTime<FixedOffset>,
) -> Result<Vec<PlayerView>, GenericError> {
    let team = Team::find_by_id(team_id)
        .one(db)
        .await?
        .ok_or(GenericError::NotFound("Team not found"))?;
    let league = League::find_by_id(team.league_id)
        .one(db)
        .await?
        .ok_or(GenericError::NotFound("League not found"))?;

    let registered = TournamentPlayer::find()
        .filter(
            tournament_player::Column::TournamentId
                .eq(league.tournament_id)
                .and(tournament_player::Column::PlayerId.eq(player_id)),
        )
        .one(db)
        .await?
        .is_some();
    let already_drafted = roster::player_drafted_in_league(db, league.id, player_id).await?;
    let roster_len = roster::roster_size(db, team.id).await?;

    check_draft(&DraftFacts {
        owns_team: actor.manages_team(&team),
        now,
        deadline: league.draft_deadline,
        registered,
        already_drafted,
        roster_len,
        team_size: league.team_size,
    })?;

    if let Err(e) = roster::add_slot(db, team.id, league.id, player_id, now).await {
        return Err(commit_conflict(e.sql_err(), e));
    }

    current_roster(db, team.id).await
}

/// A unique-index violation on the slot insert means a concurrent draft for
/// the same player won the race to commit; the loser gets the same error the
/// pre-check would have given. Anything else stays a database error.
fn commit_conflict(sql_err: Option<SqlErr>, fallback: DbErr) -> GenericError {
    match sql_err {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            DraftError::PlayerAlreadyDrafted("Player already drafted by a team in this league")
                .into()
        }
        _ => fallback.into(),
    }
}

pub async fn drop_player(
    db: &DatabaseConnection,
    actor: &Actor,
    team_id: i32,
    player_id: i32,
    now: DateTime<FixedOffset>,
) -> Result<Vec<PlayerView>, GenericError> {
    let txn = db.begin().await?;
    match drop_in_txn(&txn, actor, team_id, player_id, now).await {
        Ok(roster) => {
            txn.commit().await?;
            Ok(roster)
        }
        Err(e) => {
            if let Err(rollback) = txn.rollback().await {
                warn!("Rollback after failed drop also failed: {:#?}", rollback);
            }
            Err(e)
        }
    }
}

pub async fn drop_in_txn(
    db: &impl ConnectionTrait,
    actor: &Actor,
    team_id: i32,
    player_id: i32,
    now: DateTime<FixedOffset>,
) -> Result<Vec<PlayerView>, GenericError> {
    let team = Team::find_by_id(team_id)
        .one(db)
        .await?
        .ok_or(GenericError::NotFound("Team not found"))?;
    let league = League::find_by_id(team.league_id)
        .one(db)
        .await?
        .ok_or(GenericError::NotFound("League not found"))?;

    let on_roster = roster::player_on_team(db, team.id, player_id).await?;

    check_drop(&DropFacts {
        owns_team: actor.manages_team(&team),
        now,
        deadline: league.draft_deadline,
        on_roster,
    })?;

    if !roster::remove_slot(db, team.id, player_id).await? {
        return Err(DraftError::NotOnRoster("Player is not on this team").into());
    }

    current_roster(db, team.id).await
}

/// Registered players for the team's tournament, minus every player already
/// drafted anywhere in the league. Ordered by surname then id so the listing
/// is deterministic.
pub async fn available_players(
    db: &impl ConnectionTrait,
    actor: &Actor,
    team_id: i32,
) -> Result<Vec<PlayerView>, GenericError> {
    let team = Team::find_by_id(team_id)
        .one(db)
        .await?
        .ok_or(GenericError::NotFound("Team not found"))?;
    let league = League::find_by_id(team.league_id)
        .one(db)
        .await?
        .ok_or(GenericError::NotFound("League not found"))?;

    let member = Team::find()
        .filter(
            team::Column::LeagueId
                .eq(league.id)
                .and(team::Column::UserId.eq(actor.user_id)),
        )
        .one(db)
        .await?
        .is_some();
    if !member {
        return Err(LeagueError::NotMember("You are not a member of this league").into());
    }

    let registered: Vec<i32> = TournamentPlayer::find()
        .filter(tournament_player::Column::TournamentId.eq(league.tournament_id))
        .all(db)
        .await?
        .iter()
        .map(|tp| tp.player_id)
        .collect();
    let drafted: HashSet<i32> = TeamPlayer::find()
        .filter(team_player::Column::LeagueId.eq(league.id))
        .all(db)
        .await?
        .iter()
        .map(|slot| slot.player_id)
        .collect();
    let open: Vec<i32> = registered
        .into_iter()
        .filter(|id| !drafted.contains(id))
        .collect();

    let players = Player::find()
        .filter(player::Column::Id.is_in(open))
        .all(db)
        .await?;
    Ok(players
        .into_iter()
        .sorted_by(|a, b| a.last_name.cmp(&b.last_name).then(a.id.cmp(&b.id)))
        .map(PlayerView::from)
        .collect())
}

pub(crate) async fn current_roster(
    db: &impl ConnectionTrait,
    team_id: i32,
) -> Result<Vec<PlayerView>, GenericError> {
    let mut out = Vec::new();
    for slot in roster::roster_of(db, team_id).await? {
        if let Some(player) = Player::find_by_id(slot.player_id).one(db).await? {
            out.push(PlayerView::from(player));
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn open_facts() -> DraftFacts {
        let now = Utc::now().fixed_offset();
        DraftFacts {
            owns_team: true,
            now,
            deadline: now + Duration::hours(1),
            registered: true,
            already_drafted: false,
            roster_len: 0,
            team_size: 4,
        }
    }

    #[test]
    fn draft_passes_when_all_rules_hold() {
        assert_eq!(check_draft(&open_facts()), Ok(()));
    }

    #[test]
    fn ownership_is_checked_before_everything_else() {
        // All other rules broken too; the ownership failure must win.
        let facts = DraftFacts {
            owns_team: false,
            registered: false,
            already_drafted: true,
            roster_len: 4,
            ..open_facts()
        };
        assert!(matches!(check_draft(&facts), Err(DraftError::Forbidden(_))));
    }

    #[test]
    fn deadline_is_exclusive_of_the_instant_itself() {
        let mut facts = open_facts();
        facts.now = facts.deadline;
        assert!(matches!(
            check_draft(&facts),
            Err(DraftError::DeadlineExpired(_))
        ));
    }

    #[test]
    fn unregistered_player_is_not_eligible() {
        let facts = DraftFacts {
            registered: false,
            ..open_facts()
        };
        assert!(matches!(
            check_draft(&facts),
            Err(DraftError::PlayerNotEligible(_))
        ));
    }

    #[test]
    fn player_held_elsewhere_in_league_is_rejected() {
        let facts = DraftFacts {
            already_drafted: true,
            ..open_facts()
        };
        assert!(matches!(
            check_draft(&facts),
            Err(DraftError::PlayerAlreadyDrafted(_))
        ));
    }

    #[test]
    fn full_roster_rejects_the_next_draft() {
        let facts = DraftFacts {
            roster_len: 2,
            team_size: 2,
            ..open_facts()
        };
        assert!(matches!(check_draft(&facts), Err(DraftError::RosterFull(_))));
    }

    #[test]
    fn roster_below_capacity_accepts() {
        let facts = DraftFacts {
            roster_len: 1,
            team_size: 2,
            ..open_facts()
        };
        assert_eq!(check_draft(&facts), Ok(()));
    }

    #[test]
    fn drop_is_frozen_after_deadline() {
        let now = Utc::now().fixed_offset();
        let facts = DropFacts {
            owns_team: true,
            now,
            deadline: now - Duration::minutes(1),
            on_roster: true,
        };
        assert!(matches!(
            check_drop(&facts),
            Err(DraftError::DeadlineExpired(_))
        ));
    }

    #[test]
    fn drop_of_absent_player_reports_not_on_roster() {
        let now = Utc::now().fixed_offset();
        let facts = DropFacts {
            owns_team: true,
            now,
            deadline: now + Duration::hours(1),
            on_roster: false,
        };
        assert!(matches!(
            check_drop(&facts),
            Err(DraftError::NotOnRoster(_))
        ));
    }

    #[test]
    fn losing_the_commit_race_reports_already_drafted() {
        // Two simultaneous drafts for the same player: the loser's insert
        // trips the league-wide unique index instead of the pre-check.
        let err = commit_conflict(
            Some(SqlErr::UniqueConstraintViolation(
                "duplicate key value violates unique constraint \"unique_player_per_league\""
                    .to_string(),
            )),
            DbErr::Custom("duplicate key".to_string()),
        );
        assert!(matches!(
            err,
            GenericError::DraftError(DraftError::PlayerAlreadyDrafted(_))
        ));
    }

    #[test]
    fn other_insert_failures_stay_internal_errors() {
        let err = commit_conflict(None, DbErr::Custom("connection reset".to_string()));
        assert!(matches!(err, GenericError::UnknownError(_)));
    }

    #[test]
    fn drop_checks_ownership_first() {
        let now = Utc::now().fixed_offset();
        let facts = DropFacts {
            owns_team: false,
            now,
            deadline: now - Duration::hours(1),
            on_roster: false,
        };
        assert!(matches!(check_drop(&facts), Err(DraftError::Forbidden(_))));
    }
}
