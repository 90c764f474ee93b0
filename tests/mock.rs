//! Service-layer scenarios against a mocked connection: every database result
//! is scripted in the order the gather-then-check flow consumes them.

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, FixedOffset, Utc};
    use entity::sea_orm_active_enums::{LeagueStatus, RegistrationStatus};
    use entity::{league, player, player_score, team, team_player, tournament_player, user};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use service::error::{DraftError, GenericError};
    use service::{draft_player, drop_player, standings, team_score, Actor, FINAL_ROUND};

    const OWNER: Actor = Actor {
        user_id: 1,
        admin: false,
    };

    fn now() -> DateTime<FixedOffset> {
        Utc::now().fixed_offset()
    }

    fn team_one() -> team::Model {
        team::Model {
            id: 10,
            league_id: 20,
            user_id: 1,
            name: "Bogey Free".to_string(),
            created_at: now(),
        }
    }

    fn league_with_deadline(deadline: DateTime<FixedOffset>) -> league::Model {
        league::Model {
            id: 20,
            tournament_id: 30,
            admin_id: 1,
            name: "Office Major".to_string(),
            invite_code: "A1B2C3D4".to_string(),
            max_members: 10,
            team_size: 2,
            status: LeagueStatus::Draft,
            draft_deadline: deadline,
            created_at: now(),
        }
    }

    fn registration(player_id: i32) -> tournament_player::Model {
        tournament_player::Model {
            id: player_id,
            tournament_id: 30,
            player_id,
            status: RegistrationStatus::Registered,
        }
    }

    fn slot(id: i32, team_id: i32, player_id: i32) -> team_player::Model {
        team_player::Model {
            id,
            team_id,
            league_id: 20,
            player_id,
            drafted_at: now(),
        }
    }

    fn player(id: i32, first: &str, last: &str) -> player::Model {
        player::Model {
            id,
            external_id: format!("ext-{id}"),
            first_name: first.to_string(),
            last_name: last.to_string(),
            country: Some("SWE".to_string()),
        }
    }

    fn score(player_id: i32, total: Option<i32>) -> player_score::Model {
        player_score::Model {
            id: player_id,
            tournament_id: 30,
            player_id,
            round: FINAL_ROUND,
            round_score: total,
            total_score: total,
            position: Some(1),
            made_cut: true,
        }
    }

    #[tokio::test]
    async fn draft_commits_and_returns_the_roster() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![team_one()]])
            .append_query_results([vec![league_with_deadline(now() + Duration::hours(1))]])
            .append_query_results([vec![registration(100)]])
            // Nobody in the league holds the player, roster is empty.
            .append_query_results([Vec::<team_player::Model>::new()])
            .append_query_results([Vec::<team_player::Model>::new()])
            // The insert reads the new slot back.
            .append_query_results([vec![slot(1, 10, 100)]])
            .append_query_results([vec![slot(1, 10, 100)]])
            .append_query_results([vec![player(100, "Ann", "Fairway")]])
            .into_connection();

        let roster = draft_player(&db, &OWNER, 10, 100, now())
            .await
            .expect("draft should commit");
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].id, 100);
        assert_eq!(roster[0].name, "Ann Fairway");
    }

    #[tokio::test]
    async fn draft_after_deadline_is_rejected() {
        // Facts are still gathered in full before the rules run.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![team_one()]])
            .append_query_results([vec![league_with_deadline(now() - Duration::minutes(5))]])
            .append_query_results([vec![registration(100)]])
            .append_query_results([Vec::<team_player::Model>::new()])
            .append_query_results([Vec::<team_player::Model>::new()])
            .into_connection();

        let res = draft_player(&db, &OWNER, 10, 100, now()).await;
        assert!(matches!(
            res,
            Err(GenericError::DraftError(DraftError::DeadlineExpired(_)))
        ));
    }

    #[tokio::test]
    async fn draft_of_player_held_elsewhere_is_rejected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![team_one()]])
            .append_query_results([vec![league_with_deadline(now() + Duration::hours(1))]])
            .append_query_results([vec![registration(100)]])
            // Another team in the league already holds the player.
            .append_query_results([vec![slot(7, 11, 100)]])
            .append_query_results([Vec::<team_player::Model>::new()])
            .into_connection();

        let res = draft_player(&db, &OWNER, 10, 100, now()).await;
        assert!(matches!(
            res,
            Err(GenericError::DraftError(DraftError::PlayerAlreadyDrafted(
                _
            )))
        ));
    }

    #[tokio::test]
    async fn draft_onto_full_roster_is_rejected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![team_one()]])
            .append_query_results([vec![league_with_deadline(now() + Duration::hours(1))]])
            .append_query_results([vec![registration(100)]])
            .append_query_results([Vec::<team_player::Model>::new()])
            // team_size is 2 and both slots are taken.
            .append_query_results([vec![slot(1, 10, 101), slot(2, 10, 102)]])
            .into_connection();

        let res = draft_player(&db, &OWNER, 10, 100, now()).await;
        assert!(matches!(
            res,
            Err(GenericError::DraftError(DraftError::RosterFull(_)))
        ));
    }

    #[tokio::test]
    async fn draft_by_non_owner_is_forbidden() {
        let stranger = Actor {
            user_id: 99,
            admin: false,
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![team_one()]])
            .append_query_results([vec![league_with_deadline(now() + Duration::hours(1))]])
            .append_query_results([vec![registration(100)]])
            .append_query_results([Vec::<team_player::Model>::new()])
            .append_query_results([Vec::<team_player::Model>::new()])
            .into_connection();

        let res = draft_player(&db, &stranger, 10, 100, now()).await;
        assert!(matches!(
            res,
            Err(GenericError::DraftError(DraftError::Forbidden(_)))
        ));
    }

    #[tokio::test]
    async fn drop_removes_the_slot_before_the_deadline() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![team_one()]])
            .append_query_results([vec![league_with_deadline(now() + Duration::hours(1))]])
            // Once for the fact gather, once for the delete lookup.
            .append_query_results([vec![slot(1, 10, 100)]])
            .append_query_results([vec![slot(1, 10, 100)]])
            .append_query_results([Vec::<team_player::Model>::new()])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let roster = drop_player(&db, &OWNER, 10, 100, now())
            .await
            .expect("drop should commit");
        assert!(roster.is_empty());
    }

    #[tokio::test]
    async fn drop_of_absent_player_reports_not_on_roster() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![team_one()]])
            .append_query_results([vec![league_with_deadline(now() + Duration::hours(1))]])
            .append_query_results([Vec::<team_player::Model>::new()])
            .into_connection();

        let res = drop_player(&db, &OWNER, 10, 100, now()).await;
        assert!(matches!(
            res,
            Err(GenericError::DraftError(DraftError::NotOnRoster(_)))
        ));
    }

    #[tokio::test]
    async fn available_players_excludes_everyone_drafted_in_the_league() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![team_one()]])
            .append_query_results([vec![league_with_deadline(now() + Duration::hours(1))]])
            // Membership probe finds the caller's own team.
            .append_query_results([vec![team_one()]])
            .append_query_results([vec![registration(100), registration(101)]])
            // Player 100 is held by another team in the league.
            .append_query_results([vec![slot(7, 11, 100)]])
            .append_query_results([vec![player(101, "Bo", "Rough")]])
            .into_connection();

        let open = service::available_players(&db, &OWNER, 10).await.unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].id, 101);
    }

    #[tokio::test]
    async fn team_score_sums_a_fully_scored_roster() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![team_one()]])
            .append_query_results([vec![league_with_deadline(now() + Duration::hours(1))]])
            .append_query_results([vec![slot(1, 10, 100), slot(2, 10, 101)]])
            .append_query_results([vec![score(100, Some(-5))]])
            .append_query_results([vec![score(101, Some(-3))]])
            .into_connection();

        let total = team_score(&db, 10, FINAL_ROUND).await.unwrap();
        assert_eq!(total, Some(-8));
    }

    #[tokio::test]
    async fn team_score_is_none_when_any_player_is_unscored() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![team_one()]])
            .append_query_results([vec![league_with_deadline(now() + Duration::hours(1))]])
            .append_query_results([vec![slot(1, 10, 100), slot(2, 10, 101)]])
            .append_query_results([vec![score(100, Some(-5))]])
            .append_query_results([Vec::<player_score::Model>::new()])
            .into_connection();

        let total = team_score(&db, 10, FINAL_ROUND).await.unwrap();
        assert_eq!(total, None);
    }

    #[tokio::test]
    async fn team_score_is_none_for_an_empty_roster() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![team_one()]])
            .append_query_results([vec![league_with_deadline(now() + Duration::hours(1))]])
            .append_query_results([Vec::<team_player::Model>::new()])
            .into_connection();

        let total = team_score(&db, 10, FINAL_ROUND).await.unwrap();
        assert_eq!(total, None);
    }

    #[tokio::test]
    async fn standings_rank_scored_teams_and_push_unscored_last() {
        let second_team = team::Model {
            id: 11,
            league_id: 20,
            user_id: 2,
            name: "Sand Trap".to_string(),
            created_at: now(),
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![league_with_deadline(now() + Duration::hours(1))]])
            .append_query_results([vec![team_one(), second_team]])
            // First team: one player with a final total.
            .append_query_results([vec![slot(1, 10, 100)]])
            .append_query_results([vec![player(100, "Ann", "Fairway")]])
            .append_query_results([vec![score(100, Some(-5))]])
            .append_query_results([vec![user::Model {
                id: 1,
                name: "ann".to_string(),
                admin: false,
            }]])
            // Second team: one player with no score row yet.
            .append_query_results([vec![slot(2, 11, 101)]])
            .append_query_results([vec![player(101, "Bo", "Rough")]])
            .append_query_results([Vec::<player_score::Model>::new()])
            .append_query_results([vec![user::Model {
                id: 2,
                name: "bo".to_string(),
                admin: false,
            }]])
            .into_connection();

        let standings = standings(&db, 20, FINAL_ROUND).await.unwrap();
        assert_eq!(standings.league_id, 20);
        assert_eq!(standings.standings.len(), 2);

        let first = &standings.standings[0];
        assert_eq!(first.team_id, 10);
        assert_eq!(first.total_score, Some(-5));
        assert_eq!(first.rank, Some(1));

        let last = &standings.standings[1];
        assert_eq!(last.team_id, 11);
        assert_eq!(last.total_score, None);
        assert_eq!(last.rank, None);
        assert_eq!(last.players[0].made_cut, None);
    }
}
