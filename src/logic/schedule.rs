//! Schedule generator: pool partitioning and match creation.

use crate::logic::standings::recompute_standings;
use crate::models::{
    Match, MatchStatus, PoolStandings, Tournament, TournamentError, TournamentStatus,
    TournamentType,
};

/// Output of schedule generation: the tournament's full replacement match set
/// (preserved completed matches first, then the new ones) and the initial
/// zero-valued standings rows for every pool in the new schedule.
#[derive(Clone, Debug)]
pub struct GeneratedSchedule {
    pub matches: Vec<Match>,
    pub standings: Vec<PoolStandings>,
}

/// Generate the match set for a Draft tournament and activate it.
///
/// Non-completed matches in `existing` (left over from a previous generation)
/// are discarded; completed matches are preserved untouched, so regenerating
/// can never erase a recorded result. Refuses a tournament that is already
/// Active or Completed.
///
/// Round robin: participants are dealt into `ceil(n / pool_size)` pools in
/// roster order (index `i` lands in pool `i % num_pools`), then each pool
/// plays every unordered pair once. Single elimination: sequential pairing
/// (0v1, 2v3, ...), all in round 1; an odd player out simply has no match.
///
/// Standings rows for each new pool are materialized immediately so the
/// standings table is populated the moment a schedule exists.
pub fn generate_schedule(
    tournament: &mut Tournament,
    existing: &[Match],
) -> Result<GeneratedSchedule, TournamentError> {
    if tournament.status != TournamentStatus::Draft {
        return Err(TournamentError::NotDraft);
    }

    let mut matches: Vec<Match> = existing
        .iter()
        .filter(|m| m.tournament_id == tournament.id && m.status == MatchStatus::Completed)
        .cloned()
        .collect();

    let new_matches = match tournament.kind {
        TournamentType::RoundRobin => round_robin_matches(tournament),
        TournamentType::SingleElimination => elimination_matches(tournament),
    };

    let mut standings = Vec::new();
    let mut seen_pools: Vec<&str> = Vec::new();
    for m in &new_matches {
        if let Some(pool_id) = m.pool_id.as_deref() {
            if !seen_pools.contains(&pool_id) {
                seen_pools.push(pool_id);
            }
        }
    }
    for pool_id in seen_pools {
        let pool_matches: Vec<Match> = new_matches
            .iter()
            .filter(|m| m.pool_id.as_deref() == Some(pool_id))
            .cloned()
            .collect();
        standings.extend(recompute_standings(&pool_matches));
    }

    matches.extend(new_matches);
    tournament.status = TournamentStatus::Active;

    Ok(GeneratedSchedule { matches, standings })
}

/// Deal participants into pools and emit one match per unordered pair.
fn round_robin_matches(tournament: &Tournament) -> Vec<Match> {
    let pools = partition_pools(&tournament.participants, tournament.pool_size);
    let mut matches = Vec::new();
    for (pool_index, pool_players) in pools.iter().enumerate() {
        let pool_id = pool_label(pool_index);
        for i in 0..pool_players.len() {
            for j in (i + 1)..pool_players.len() {
                matches.push(Match::new_pool(
                    tournament.id,
                    pool_id.clone(),
                    pool_players[i].clone(),
                    pool_players[j].clone(),
                ));
            }
        }
    }
    matches
}

/// Pair participants sequentially for round 1. An odd leftover gets no match.
fn elimination_matches(tournament: &Tournament) -> Vec<Match> {
    tournament
        .participants
        .chunks_exact(2)
        .map(|pair| Match::new_elimination(tournament.id, 1, pair[0].clone(), pair[1].clone()))
        .collect()
}

/// Round-robin dealing: player at roster index `i` goes to pool `i % num_pools`.
/// Pool sizes differ by at most one; this is not contiguous blocking.
pub fn partition_pools(participants: &[String], pool_size: u32) -> Vec<Vec<String>> {
    if participants.is_empty() {
        return Vec::new();
    }
    let num_pools = participants.len().div_ceil(pool_size.max(1) as usize);
    let mut pools: Vec<Vec<String>> = vec![Vec::new(); num_pools];
    for (i, login) in participants.iter().enumerate() {
        pools[i % num_pools].push(login.clone());
    }
    pools
}

/// "Pool A", "Pool B", ... in pool-creation order. Past 26 pools the labels
/// switch to numbers rather than walking off the alphabet.
pub fn pool_label(index: usize) -> String {
    if index < 26 {
        format!("Pool {}", char::from(b'A' + index as u8))
    } else {
        format!("Pool {}", index + 1)
    }
}
