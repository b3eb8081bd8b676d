use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use captain_sonar::cli::{describe_report, parse_command, print_session, Command, HELP};
use captain_sonar::{
    init_logging, play_turn, AutoCaptain, Captain, GameSession, GameStatus, GridMap, RuleSet,
    DEFAULT_HEIGHT, DEFAULT_MAP, DEFAULT_WIDTH,
};
use clap::{Parser, Subcommand};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[derive(Parser)]
#[command(author, version, about = "Turn-based Captain Sonar submarine duel", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Watch two automated captains fight on the local machine.
    Local {
        #[arg(long, help = "Map file ('X' island, '.' water); built-in map if omitted")]
        map: Option<PathBuf>,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value_t = 500)]
        max_turns: u64,
    },
    /// Two humans share one terminal, taking turns at the prompt.
    Hotseat {
        #[arg(long)]
        map: Option<PathBuf>,
        #[arg(long, default_value = "Red")]
        red: String,
        #[arg(long, default_value = "Blue")]
        blue: String,
    },
    /// Print a randomly generated map.
    Generate {
        #[arg(long, default_value_t = DEFAULT_WIDTH)]
        width: usize,
        #[arg(long, default_value_t = DEFAULT_HEIGHT)]
        height: usize,
        #[arg(long, default_value_t = 10)]
        islands: usize,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Validate a map file and print it.
    Show {
        #[arg(long)]
        map: Option<PathBuf>,
    },
}

fn load_map(path: Option<&PathBuf>) -> anyhow::Result<GridMap> {
    let grid = match path {
        Some(p) => GridMap::load_from_file(p)?,
        None => GridMap::parse(DEFAULT_MAP)?,
    };
    Ok(grid)
}

fn seeded_rng(seed: Option<u64>) -> SmallRng {
    if let Some(s) = seed {
        SmallRng::seed_from_u64(s)
    } else {
        let mut seed_rng = rand::rng();
        SmallRng::from_rng(&mut seed_rng)
    }
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Local {
            map,
            seed,
            max_turns,
        } => {
            if let Some(s) = seed {
                println!("Using fixed seed: {} (game will be reproducible)", s);
            }
            let grid = load_map(map.as_ref())?;
            let rules = RuleSet::default().with_strict_turns(true);
            let mut session = GameSession::new(grid.clone(), rules);
            session.start_game(&["Red", "Blue"])?;
            let mut rng = seeded_rng(seed);
            let mut captains: [Box<dyn Captain>; 2] = [
                Box::new(AutoCaptain::new("Red", grid.clone(), rules)),
                Box::new(AutoCaptain::new("Blue", grid, rules)),
            ];

            let mut idx = 0;
            while !session.is_finished() && session.turn() < max_turns {
                let report = play_turn(captains[idx].as_mut(), &mut rng, &mut session)?;
                println!("[{:>3}] {}", session.turn(), describe_report(&report));
                idx = 1 - idx;
            }
            print_session(&session.get_grid_string(), &session.get_state());
            report_status(&session);
        }
        Commands::Hotseat { map, red, blue } => {
            let grid = load_map(map.as_ref())?;
            let rules = RuleSet::default().with_strict_turns(true);
            let mut session = GameSession::new(grid, rules);
            session.start_game(&[red.as_str(), blue.as_str()])?;
            run_hotseat(&mut session)?;
        }
        Commands::Generate {
            width,
            height,
            islands,
            seed,
        } => {
            let mut rng = seeded_rng(seed);
            let grid = GridMap::generate_random(&mut rng, width, height, islands)?;
            println!("{}x{}", grid.width(), grid.height());
            println!("{}", grid);
        }
        Commands::Show { map } => {
            let grid = load_map(map.as_ref())?;
            println!(
                "{}x{} map, {} island cells",
                grid.width(),
                grid.height(),
                grid.islands().len()
            );
            println!("{}", grid);
        }
    }
    Ok(())
}

fn run_hotseat(session: &mut GameSession) -> anyhow::Result<()> {
    println!("{}", HELP);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    while !session.is_finished() {
        let Some(team) = session.current_team().map(str::to_string) else {
            break;
        };
        print!("[{}] > ", team);
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        match parse_command(&line) {
            Ok(Command::Order(order)) => match order.apply(session, &team) {
                Ok(report) => println!("{}", describe_report(&report)),
                Err(err) => println!("Rejected: {}", err),
            },
            Ok(Command::State) => {
                println!("{}", serde_json::to_string_pretty(&session.get_state())?)
            }
            Ok(Command::Grid) => print_session(&session.get_grid_string(), &session.get_state()),
            Ok(Command::Help) => println!("{}", HELP),
            Ok(Command::Quit) => return Ok(()),
            Err(msg) => println!("{}", msg),
        }
    }
    print_session(&session.get_grid_string(), &session.get_state());
    report_status(session);
    Ok(())
}

fn report_status(session: &GameSession) {
    match session.status() {
        GameStatus::Won { winner } => println!("\n{} wins!", winner),
        GameStatus::Draw => println!("\nBoth submarines sank. Draw."),
        GameStatus::InProgress => println!("\nNo winner after {} actions.", session.turn()),
        GameStatus::NotStarted => {}
    }
}
