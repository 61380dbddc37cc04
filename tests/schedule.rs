//! Integration tests for schedule generation: pool partitioning, match sets,
//! preservation of completed matches.

use chrono::NaiveDate;
use squash_tournament_web::{
    generate_schedule, partition_pools, pool_label, GameScore, Match, MatchStatus, ScoringRules,
    Tournament, TournamentError, TournamentStatus, TournamentType,
};

fn tournament(kind: TournamentType, pool_size: u32, players: usize) -> Tournament {
    let mut t = Tournament::new(
        "Club Open",
        "",
        NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
        kind,
        pool_size,
        ScoringRules::default(),
        "p0",
    )
    .unwrap();
    for i in 1..players {
        t.add_participant(format!("p{i}")).unwrap();
    }
    t
}

#[test]
fn pool_partition_deals_players_round_robin() {
    let participants: Vec<String> = (0..10).map(|i| format!("p{i}")).collect();
    let pools = partition_pools(&participants, 4);
    assert_eq!(pools.len(), 3);
    assert_eq!(pools[0], ["p0", "p3", "p6", "p9"]);
    assert_eq!(pools[1], ["p1", "p4", "p7"]);
    assert_eq!(pools[2], ["p2", "p5", "p8"]);
}

#[test]
fn pool_labels_run_alphabetically() {
    assert_eq!(pool_label(0), "Pool A");
    assert_eq!(pool_label(1), "Pool B");
    assert_eq!(pool_label(25), "Pool Z");
    assert_eq!(pool_label(26), "Pool 27");
}

#[test]
fn round_robin_emits_every_unordered_pair() {
    let mut t = tournament(TournamentType::RoundRobin, 4, 4);
    let generated = generate_schedule(&mut t, &[]).unwrap();

    assert_eq!(t.status, TournamentStatus::Active);
    assert_eq!(generated.matches.len(), 6);
    for m in &generated.matches {
        assert_eq!(m.pool_id.as_deref(), Some("Pool A"));
        assert_eq!(m.status, MatchStatus::Scheduled);
        assert!(m.scores.is_empty());
        assert!(m.winner_login.is_none());
        assert_ne!(m.player_a_login, m.player_b_login);
    }
    // every pair exactly once
    let mut pairs: Vec<(String, String)> = generated
        .matches
        .iter()
        .map(|m| {
            let mut p = [m.player_a_login.clone(), m.player_b_login.clone()];
            p.sort();
            (p[0].clone(), p[1].clone())
        })
        .collect();
    pairs.sort();
    pairs.dedup();
    assert_eq!(pairs.len(), 6);
}

#[test]
fn multiple_pools_get_their_own_round_robins() {
    let mut t = tournament(TournamentType::RoundRobin, 3, 6);
    let generated = generate_schedule(&mut t, &[]).unwrap();

    let pool_a: Vec<&Match> = generated
        .matches
        .iter()
        .filter(|m| m.pool_id.as_deref() == Some("Pool A"))
        .collect();
    let pool_b: Vec<&Match> = generated
        .matches
        .iter()
        .filter(|m| m.pool_id.as_deref() == Some("Pool B"))
        .collect();
    assert_eq!(pool_a.len(), 3);
    assert_eq!(pool_b.len(), 3);
}

#[test]
fn generation_materializes_zero_standings_per_pool() {
    let mut t = tournament(TournamentType::RoundRobin, 3, 6);
    let generated = generate_schedule(&mut t, &[]).unwrap();

    assert_eq!(generated.standings.len(), 6);
    for row in &generated.standings {
        assert_eq!(row.matches_played, 0);
        assert_eq!(row.points_diff, 0);
    }
    assert!(generated
        .standings
        .iter()
        .any(|r| r.pool_id == "Pool B"));
}

#[test]
fn elimination_pairs_sequentially_with_bye() {
    let mut t = tournament(TournamentType::SingleElimination, 4, 5);
    let generated = generate_schedule(&mut t, &[]).unwrap();

    assert_eq!(generated.matches.len(), 2);
    assert_eq!(generated.matches[0].player_a_login, "p0");
    assert_eq!(generated.matches[0].player_b_login, "p1");
    assert_eq!(generated.matches[1].player_a_login, "p2");
    assert_eq!(generated.matches[1].player_b_login, "p3");
    for m in &generated.matches {
        assert_eq!(m.round, Some(1));
        assert!(m.pool_id.is_none());
    }
    // p4 sits out round 1; no standings in an elimination draw
    assert!(generated.standings.is_empty());
}

#[test]
fn non_draft_tournament_is_refused() {
    let mut t = tournament(TournamentType::RoundRobin, 4, 4);
    t.status = TournamentStatus::Active;
    assert_eq!(
        generate_schedule(&mut t, &[]).unwrap_err(),
        TournamentError::NotDraft
    );
    assert_eq!(t.status, TournamentStatus::Active);
}

#[test]
fn regeneration_preserves_completed_matches() {
    let mut t = tournament(TournamentType::RoundRobin, 4, 4);
    let first = generate_schedule(&mut t, &[]).unwrap();

    let mut existing = first.matches.clone();
    existing[0].scores = vec![GameScore::new(11, 1), GameScore::new(11, 2)];
    existing[0].status = MatchStatus::Completed;
    existing[0].winner_login = Some(existing[0].player_a_login.clone());
    let completed_id = existing[0].id;

    t.status = TournamentStatus::Draft;
    let second = generate_schedule(&mut t, &existing).unwrap();

    // 1 preserved + 6 fresh
    assert_eq!(second.matches.len(), 7);
    let preserved = second
        .matches
        .iter()
        .find(|m| m.id == completed_id)
        .unwrap();
    assert_eq!(preserved.status, MatchStatus::Completed);
    assert_eq!(preserved.scores.len(), 2);
    // the discarded scheduled matches are gone, replaced by new ids
    for old in &existing[1..] {
        assert!(second.matches.iter().all(|m| m.id != old.id));
    }
}

#[test]
fn regeneration_is_idempotent_before_any_results() {
    let mut t = tournament(TournamentType::RoundRobin, 4, 4);
    let first = generate_schedule(&mut t, &[]).unwrap();

    t.status = TournamentStatus::Draft;
    let second = generate_schedule(&mut t, &first.matches).unwrap();

    assert_eq!(second.matches.len(), first.matches.len());
    let mut ids: Vec<_> = second.matches.iter().map(|m| m.id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), second.matches.len());
}
