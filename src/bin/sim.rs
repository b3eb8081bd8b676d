use std::path::PathBuf;

use captain_sonar::{
    rejection, AutoCaptain, Captain, GameApi, GridMap, Order, RuleSet, SharedSession, DEFAULT_MAP,
};
use clap::Parser;
use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;

/// Run one automated match and print a JSON summary.
#[derive(Parser)]
struct Args {
    seed1: u64,
    seed2: u64,
    #[arg(long)]
    map: Option<PathBuf>,
    #[arg(long, default_value_t = 1000)]
    max_turns: u64,
}

/// Drive one captain against the shared session until the match ends. Each
/// captain sleeps until it holds the turn.
async fn run_captain(
    api: SharedSession,
    mut captain: AutoCaptain,
    mut rng: SmallRng,
    max_turns: u64,
) -> anyhow::Result<u64> {
    let team = captain.team().to_string();
    let mut orders = 0;
    loop {
        let state = api
            .wait_until(|s| {
                s.is_finished() || s.turn() >= max_turns || s.current_team() == Some(team.as_str())
            })
            .await;
        if state.finished || state.turn >= max_turns {
            return Ok(orders);
        }
        let order = captain.choose(&mut rng, &state);
        match order.send(&api, &team).await {
            Ok(report) => captain.handle_report(&report),
            Err(err) => match rejection(&err) {
                Some(rule) => {
                    captain.handle_rejection(order, rule);
                    Order::Surface.send(&api, &team).await?;
                }
                None => return Err(err),
            },
        }
        orders += 1;
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    captain_sonar::init_logging();
    let args = Args::parse();

    let grid = match &args.map {
        Some(p) => GridMap::load_from_file(p)?,
        None => GridMap::parse(DEFAULT_MAP)?,
    };
    let rules = RuleSet::default().with_strict_turns(true);
    let api = SharedSession::from_grid(grid.clone(), rules);
    api.start_game(vec!["player1".to_string(), "player2".to_string()])
        .await?;

    let c1 = AutoCaptain::new("player1", grid.clone(), rules);
    let c2 = AutoCaptain::new("player2", grid, rules);
    let f1 = tokio::spawn(run_captain(
        api.clone(),
        c1,
        SmallRng::seed_from_u64(args.seed1),
        args.max_turns,
    ));
    let f2 = tokio::spawn(run_captain(
        api.clone(),
        c2,
        SmallRng::seed_from_u64(args.seed2),
        args.max_turns,
    ));
    let (o1, o2) = tokio::try_join!(f1, f2)?;
    let (o1, o2) = (o1?, o2?);

    let state = api.get_state().await;
    let damage = |team: &str| state.team(team).map(|t| t.damage).unwrap_or(0);
    let result = json!({
        "player1": {"orders": o1, "damage": damage("player1")},
        "player2": {"orders": o2, "damage": damage("player2")},
        "turns": state.turn,
        "finished": state.finished,
        "winner": state.winner,
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
