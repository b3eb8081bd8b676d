use captain_sonar::{
    rejection, ActionError, Direction, GameApi, GridMap, RuleSet, SharedSession, DEFAULT_MAP,
};

fn shared(strict: bool) -> SharedSession {
    let grid = GridMap::parse(DEFAULT_MAP).unwrap();
    SharedSession::from_grid(grid, RuleSet::default().with_strict_turns(strict))
}

#[tokio::test(flavor = "multi_thread")]
async fn rule_rejections_survive_anyhow() -> anyhow::Result<()> {
    let api = shared(true);
    api.start_game(vec!["Red".to_string(), "Blue".to_string()])
        .await?;

    let err = api.surface("Blue").await.unwrap_err();
    assert_eq!(rejection(&err), Some(ActionError::NotYourTurn));

    let err = api.captain_move("Red", Direction::N).await.unwrap_err();
    assert_eq!(rejection(&err), Some(ActionError::OutOfBounds));

    let err = api
        .start_game(vec!["Solo".to_string()])
        .await
        .unwrap_err();
    assert_eq!(rejection(&err), Some(ActionError::InvalidTeamCount));
    assert!(rejection(&anyhow::anyhow!("io")).is_none());
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_actions_are_serialized() -> anyhow::Result<()> {
    let api = shared(false);
    api.start_game(vec!["Red".to_string(), "Blue".to_string()])
        .await?;

    let mut handles = Vec::new();
    for i in 0..16 {
        let api = api.clone();
        let team = if i % 2 == 0 { "Red" } else { "Blue" };
        handles.push(tokio::spawn(async move {
            let _ = api.surface(team).await;
            api.get_state().await
        }));
    }
    let mut seen = Vec::new();
    for h in handles {
        let state = h.await?;
        assert_eq!(state.teams.len(), 2);
        seen.push(state.turn);
    }

    let state = api.get_state().await;
    assert_eq!(state.turn, 16);
    assert!(seen.iter().all(|&t| (1..=16).contains(&t)));
    for t in &state.teams {
        assert!(t.surfaced);
        assert_eq!(t.trail, vec![t.position]);
    }
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn snapshots_match_the_session() -> anyhow::Result<()> {
    let api = shared(true);
    api.start_game(vec!["Red".to_string(), "Blue".to_string()])
        .await?;
    let moved = api.captain_move("Red", Direction::E).await?;
    let state = api.get_state().await;
    assert_eq!(state.team("Red").unwrap().position, moved.to);
    assert_eq!(state.current_turn.as_deref(), Some("Blue"));

    let grid = api.get_grid_string().await;
    let direct = api.read(|s| s.get_grid_string()).await;
    assert_eq!(grid, direct);
    assert_eq!(grid.lines().count(), state.height);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn waiting_captain_wakes_on_its_turn() -> anyhow::Result<()> {
    let api = shared(true);
    api.start_game(vec!["Red".to_string(), "Blue".to_string()])
        .await?;

    let waiter = {
        let api = api.clone();
        tokio::spawn(async move {
            api.wait_until(|s| s.current_team() == Some("Blue")).await
        })
    };
    tokio::task::yield_now().await;
    assert!(!waiter.is_finished());

    // a rejected write wakes the waiter without satisfying it
    api.surface("Blue").await.unwrap_err();
    api.captain_move("Red", Direction::S).await?;

    let state = tokio::time::timeout(std::time::Duration::from_secs(5), waiter).await??;
    assert_eq!(state.current_turn.as_deref(), Some("Blue"));
    assert_eq!(state.turn, 1);

    // already satisfied: returns without any further write
    let now = api.wait_until(|s| s.turn() == 1).await;
    assert_eq!(now, api.get_state().await);
    Ok(())
}
