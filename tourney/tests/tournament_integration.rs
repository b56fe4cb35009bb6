//! Integration tests for tournament functionality
//!
//! These tests drive the registry through the complete lifecycle, from
//! registration through the final and closing.

use tourney::tournament::{
    NewTournament, Participant, ParticipantId, Seeder, Slot, TournamentError, TournamentRegistry,
    TournamentStatus,
};

const CREATOR: ParticipantId = 100;

/// Registry with one tournament and the given players joined
async fn registry_with(
    name: &str,
    max: usize,
    players: &[(ParticipantId, &str)],
) -> TournamentRegistry {
    let registry = TournamentRegistry::with_seeder(Seeder::from_seed(2024));
    registry
        .create(NewTournament::new(name, max, CREATOR).with_description("integration"))
        .await
        .unwrap();
    for &(id, player) in players {
        registry
            .join(name, Participant::new(id, player))
            .await
            .unwrap();
    }
    registry
}

/// Participant ids in seeding order, available once started
async fn seeding(registry: &TournamentRegistry, name: &str) -> Vec<ParticipantId> {
    let tournament = registry.get(name).await.unwrap();
    tournament.participants().iter().map(|p| p.id).collect()
}

/// Slot `id` plays in for a match
async fn slot_of(
    registry: &TournamentRegistry,
    name: &str,
    round: u32,
    match_number: usize,
    id: ParticipantId,
) -> Slot {
    let tournament = registry.get(name).await.unwrap();
    let target = tournament.bracket().get(round, match_number).unwrap();
    if target.player1 == Some(id) {
        Slot::First
    } else {
        assert_eq!(target.player2, Some(id));
        Slot::Second
    }
}

#[tokio::test]
async fn test_four_player_tournament_to_champion() {
    let registry = registry_with("Cup", 4, &[(1, "A"), (2, "B"), (3, "C"), (4, "D")]).await;
    registry.start("Cup", CREATOR).await.unwrap();

    let s = seeding(&registry, "Cup").await;
    let tournament = registry.get("Cup").await.unwrap();
    let bracket = tournament.bracket();
    assert_eq!(bracket.round_count(), 2);
    assert_eq!(bracket.get(1, 1).unwrap().player1, Some(s[0]));
    assert_eq!(bracket.get(1, 1).unwrap().player2, Some(s[1]));
    assert_eq!(bracket.get(1, 2).unwrap().player1, Some(s[2]));
    assert_eq!(bracket.get(1, 2).unwrap().player2, Some(s[3]));
    assert_eq!(bracket.get(2, 1).unwrap().player1, None);
    assert_eq!(bracket.get(2, 1).unwrap().player2, None);

    // First seed wins match 1, reported by the player
    let finished = registry
        .report_result("Cup", s[0], 1, 1, Slot::First)
        .await
        .unwrap();
    assert_eq!(finished.winner, Some(s[0]));
    let tournament = registry.get("Cup").await.unwrap();
    assert_eq!(tournament.bracket().get(2, 1).unwrap().player1, Some(s[0]));
    assert_eq!(tournament.current_round(), 1);

    // Fourth seed wins match 2, reported by the creator
    registry
        .report_result("Cup", CREATOR, 1, 2, Slot::Second)
        .await
        .unwrap();
    let tournament = registry.get("Cup").await.unwrap();
    assert_eq!(tournament.bracket().get(2, 1).unwrap().player2, Some(s[3]));
    assert_eq!(tournament.current_round(), 2);

    registry.report_result("Cup", s[3], 2, 1, Slot::Second).await.unwrap();
    let tournament = registry.get("Cup").await.unwrap();
    assert_eq!(tournament.bracket().champion(), Some(s[3]));
    assert_eq!(tournament.bracket().open_matches(), 0);

    let stats = |id| tournament.participant(id).map(|p| (p.wins, p.losses)).unwrap();
    assert_eq!(stats(s[0]), (1, 1));
    assert_eq!(stats(s[1]), (0, 1));
    assert_eq!(stats(s[2]), (0, 1));
    assert_eq!(stats(s[3]), (2, 0));

    let outcome = registry.close("Cup", CREATOR).await.unwrap();
    assert_eq!(outcome.champion.map(|p| p.id), Some(s[3]));
    assert_eq!(
        registry.summary("Cup").await.unwrap().status,
        TournamentStatus::Finished
    );
}

#[tokio::test]
async fn test_three_players_bye_reaches_final_at_start() {
    let registry = registry_with("Trio", 3, &[(1, "A"), (2, "B"), (3, "C")]).await;
    registry.start("Trio", CREATOR).await.unwrap();

    let s = seeding(&registry, "Trio").await;
    let tournament = registry.get("Trio").await.unwrap();
    let bracket = tournament.bracket();

    assert_eq!(bracket.round_count(), 2);
    let bye = bracket.get(1, 2).unwrap();
    assert!(bye.is_bye());
    assert_eq!(bye.winner, Some(s[2]));
    assert_eq!(bracket.get(2, 1).unwrap().player2, Some(s[2]));
    assert_eq!(bracket.get(2, 1).unwrap().player1, None);

    // The bye is not a played match
    assert!(tournament.participants().iter().all(|p| p.wins == 0 && p.losses == 0));

    // The final cannot be decided before its first slot is filled
    let err = registry
        .report_result("Trio", s[2], 2, 1, Slot::Second)
        .await
        .unwrap_err();
    assert_eq!(err, TournamentError::EmptySlot { slot: Slot::First });

    registry.report_result("Trio", s[1], 1, 1, Slot::Second).await.unwrap();
    registry.report_result("Trio", s[2], 2, 1, Slot::Second).await.unwrap();

    let tournament = registry.get("Trio").await.unwrap();
    assert_eq!(tournament.champion().map(|p| p.id), Some(s[2]));
    let winner = tournament.participant(s[2]).unwrap();
    assert_eq!((winner.wins, winner.losses), (1, 0));
}

#[tokio::test]
async fn test_registration_limits() {
    let registry = registry_with("Cup", 4, &[(1, "A"), (2, "B"), (3, "C"), (4, "D")]).await;

    let err = registry.join("Cup", Participant::new(5, "E")).await.unwrap_err();
    assert_eq!(err, TournamentError::Full { max: 4 });

    let err = registry.join("Cup", Participant::new(1, "A")).await.unwrap_err();
    assert_eq!(err, TournamentError::AlreadyJoined(1));

    registry.leave("Cup", 4).await.unwrap();
    registry.join("Cup", Participant::new(5, "E")).await.unwrap();
    assert_eq!(registry.summary("Cup").await.unwrap().participants.len(), 4);

    registry.start("Cup", CREATOR).await.unwrap();
    let err = registry.leave("Cup", 5).await.unwrap_err();
    assert_eq!(
        err,
        TournamentError::NotRegistering {
            actual: TournamentStatus::Active
        }
    );
}

#[tokio::test]
async fn test_start_rules() {
    let registry = registry_with("Solo", 4, &[(1, "A")]).await;

    let err = registry.start("Solo", 1).await.unwrap_err();
    assert_eq!(err, TournamentError::Unauthorized(1));

    let err = registry.start("Solo", CREATOR).await.unwrap_err();
    assert_eq!(
        err,
        TournamentError::InsufficientParticipants {
            needed: 2,
            current: 1
        }
    );

    registry.join("Solo", Participant::new(2, "B")).await.unwrap();
    registry.start("Solo", CREATOR).await.unwrap();
    let err = registry.start("Solo", CREATOR).await.unwrap_err();
    assert!(matches!(err, TournamentError::NotRegistering { .. }));
}

#[tokio::test]
async fn test_double_report_leaves_stats_unchanged() {
    let registry = registry_with("Duel", 2, &[(1, "A"), (2, "B")]).await;
    registry.start("Duel", CREATOR).await.unwrap();

    let slot = slot_of(&registry, "Duel", 1, 1, 1).await;
    registry.report_result("Duel", 1, 1, 1, slot).await.unwrap();
    let before = registry.summary("Duel").await.unwrap().participants;

    let err = registry
        .report_result("Duel", 2, 1, 1, slot.other())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        TournamentError::AlreadyReported {
            round: 1,
            match_number: 1
        }
    );
    assert_eq!(registry.summary("Duel").await.unwrap().participants, before);
}

#[tokio::test]
async fn test_two_players_single_match() {
    let registry = registry_with("Duel", 2, &[(1, "A"), (2, "B")]).await;
    registry.start("Duel", CREATOR).await.unwrap();

    let tournament = registry.get("Duel").await.unwrap();
    assert_eq!(tournament.bracket().round_count(), 1);
    assert_eq!(tournament.bracket().round(1).unwrap().len(), 1);
    assert!(!tournament.bracket().get(1, 1).unwrap().is_bye());

    let slot = slot_of(&registry, "Duel", 1, 1, 2).await;
    registry.report_result("Duel", 2, 1, 1, slot).await.unwrap();

    let tournament = registry.get("Duel").await.unwrap();
    assert_eq!(tournament.champion().map(|p| p.id), Some(2));
    assert_eq!(tournament.current_round(), 1);
}

#[tokio::test]
async fn test_reports_by_outsiders_and_unknown_matches() {
    let registry = registry_with("Cup", 4, &[(1, "A"), (2, "B"), (3, "C"), (4, "D")]).await;
    registry.start("Cup", CREATOR).await.unwrap();
    let s = seeding(&registry, "Cup").await;

    let err = registry
        .report_result("Cup", s[2], 1, 1, Slot::First)
        .await
        .unwrap_err();
    assert_eq!(err, TournamentError::Unauthorized(s[2]));

    let err = registry
        .report_result("Cup", CREATOR, 3, 1, Slot::First)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        TournamentError::MatchNotFound {
            round: 3,
            match_number: 1
        }
    );

    let err = registry
        .report_result("Nope", CREATOR, 1, 1, Slot::First)
        .await
        .unwrap_err();
    assert_eq!(err, TournamentError::TournamentNotFound("Nope".to_string()));
}

#[tokio::test]
async fn test_seeded_registries_agree() {
    let players = [(1, "A"), (2, "B"), (3, "C"), (4, "D"), (5, "E"), (6, "F")];
    let first = registry_with("Cup", 8, &players).await;
    let second = registry_with("Cup", 8, &players).await;

    first.start("Cup", CREATOR).await.unwrap();
    second.start("Cup", CREATOR).await.unwrap();

    assert_eq!(seeding(&first, "Cup").await, seeding(&second, "Cup").await);
}

#[tokio::test]
async fn test_bracket_rendering_after_results() {
    let registry = registry_with("Cup", 4, &[(1, "Ann"), (2, "Ben"), (3, "Cid")]).await;
    registry.start("Cup", CREATOR).await.unwrap();
    let s = seeding(&registry, "Cup").await;

    let text = registry.render_bracket("Cup").await.unwrap().to_string();
    assert!(text.starts_with("Bracket: Cup"));
    assert!(text.contains("Round 1"));
    assert!(text.contains("BYE"));
    assert!(text.contains("???"));

    registry.report_result("Cup", s[0], 1, 1, Slot::First).await.unwrap();
    let tournament = registry.get("Cup").await.unwrap();
    let winner_name = &tournament.participant(s[0]).unwrap().name;

    let text = registry.render_bracket("Cup").await.unwrap().to_string();
    assert!(text.contains(&format!("{} 👑", winner_name)));
}
