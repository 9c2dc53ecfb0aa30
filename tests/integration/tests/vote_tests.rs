//! Vote and reconciliation flows driven through the service layer

use integration_tests::{seed_advanced_poll, seed_poll, unique_snowflake, TestHarness};
use remind_service::{PollService, VoteService};

#[tokio::test]
async fn test_reconciliation_is_idempotent() {
    let h = TestHarness::new();
    let poll = seed_advanced_poll(&h.ctx, "Pick features", &["a", "b", "c", "d"]).await;
    let user = unique_snowflake();
    let votes = VoteService::new(&h.ctx);

    let first = votes
        .reconcile_from_reactions(&poll.id, user, &[0, 2])
        .await
        .unwrap();
    assert_eq!(first, Some(vec![0, 2]));
    let rows_after_first = h.ctx.vote_repo().find_by_poll_and_user(&poll.id, user).await.unwrap();

    let second = votes
        .reconcile_from_reactions(&poll.id, user, &[0, 2])
        .await
        .unwrap();
    assert_eq!(second, Some(vec![0, 2]));
    let rows_after_second = h.ctx.vote_repo().find_by_poll_and_user(&poll.id, user).await.unwrap();

    let indices =
        |rows: &[remind_core::entities::Vote]| rows.iter().map(|v| v.option_index).collect::<Vec<_>>();
    assert_eq!(indices(&rows_after_first), indices(&rows_after_second));
    assert_eq!(indices(&rows_after_second), vec![0, 2]);
}

#[tokio::test]
async fn test_single_choice_poll_never_holds_two_rows() {
    let h = TestHarness::new();
    let poll = seed_poll(&h.ctx, "Pick one", &["a", "b", "c"], None).await;
    let user = unique_snowflake();
    let votes = VoteService::new(&h.ctx);

    votes.vote(&poll.id, user, &[2]).await.unwrap();
    votes.vote(&poll.id, user, &[3]).await.unwrap();
    // Reaction set with two options collapses to the lowest index
    votes
        .reconcile_from_reactions(&poll.id, user, &[0, 1])
        .await
        .unwrap();

    let rows = h.ctx.vote_repo().find_by_poll_and_user(&poll.id, user).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].option_index, 0);
}

#[tokio::test]
async fn test_vote_round_trips_into_results() {
    let h = TestHarness::new();
    let poll = seed_advanced_poll(&h.ctx, "Pick two", &["a", "b", "c", "d", "e"]).await;
    let user = unique_snowflake();

    // Option numbers are 1-based on the way in
    let applied = VoteService::new(&h.ctx)
        .vote(&poll.id, user, &[2, 4])
        .await
        .unwrap();
    assert_eq!(applied, vec![1, 3]);

    let results = PollService::new(&h.ctx).get_results(&poll.id).await.unwrap();
    assert_eq!(results.counts, vec![0, 1, 0, 1, 0]);
    assert_eq!(results.total_voters, 1);
}

#[tokio::test]
async fn test_command_vote_then_reaction_reconciliation() {
    let h = TestHarness::new();
    let polls = PollService::new(&h.ctx);
    let votes = VoteService::new(&h.ctx);

    let poll = polls
        .create_poll(
            "Which letter?",
            vec!["A".to_string(), "B".to_string(), "C".to_string()],
            unique_snowflake(),
            unique_snowflake(),
            true,
            None,
        )
        .await
        .unwrap();
    let user = unique_snowflake();

    votes.vote(&poll.id, user, &[1]).await.unwrap();
    let results = polls.get_results(&poll.id).await.unwrap();
    assert_eq!(results.counts, vec![1, 0, 0]);

    // The reaction set replaces the command vote wholesale
    let applied = votes
        .reconcile_from_reactions(&poll.id, user, &[0, 2])
        .await
        .unwrap();
    assert_eq!(applied, Some(vec![0, 2]));

    let results = polls.get_results(&poll.id).await.unwrap();
    assert_eq!(results.counts, vec![1, 0, 1]);
    assert_eq!(results.total_voters, 1);
}

#[tokio::test]
async fn test_reconciliation_ignores_unknown_poll() {
    let h = TestHarness::new();
    let outcome = VoteService::new(&h.ctx)
        .reconcile_from_reactions(
            &remind_core::value_objects::PollId::generate(),
            unique_snowflake(),
            &[0],
        )
        .await
        .unwrap();
    assert_eq!(outcome, None);
}
