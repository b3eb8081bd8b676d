#![cfg(feature = "std")]

//! Text commands for hot-seat play and console display helpers.

use std::string::{String, ToString};

use crate::captain::{Order, Report};
use crate::engine::{Coord, Direction, SessionState};

/// A line typed at the hot-seat prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Order(Order),
    State,
    Grid,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  move <N|S|E|W>     move one cell
  surface            clear your trail
  mine <x> <y>       drop a mine next to your submarine
  trigger <x> <y>    detonate one of your armed mines
  torpedo <x> <y>    fire at a cell up to 4 steps away
  state              print the session snapshot as JSON
  grid               print the map
  help | quit";

fn parse_xy<'a, I>(mut args: I) -> Result<Coord, String>
where
    I: Iterator<Item = &'a str>,
{
    let mut next = |axis: &str| -> Result<i32, String> {
        let raw = args
            .next()
            .ok_or_else(|| format!("Missing {} coordinate", axis))?;
        raw.parse()
            .map_err(|_| format!("Invalid {} coordinate '{}'", axis, raw))
    };
    let x = next("x")?;
    let y = next("y")?;
    Ok(Coord::new(x, y))
}

/// Parse one prompt line.
pub fn parse_command(input: &str) -> Result<Command, String> {
    let mut words = input.split_whitespace();
    let Some(verb) = words.next() else {
        return Err("Empty input".to_string());
    };
    let cmd = match verb.to_ascii_lowercase().as_str() {
        "move" | "m" => {
            let dir = words.next().ok_or("Missing direction")?;
            Command::Order(Order::Move(dir.parse::<Direction>().map_err(|e| e.to_string())?))
        }
        "surface" => Command::Order(Order::Surface),
        "mine" => Command::Order(Order::DropMine(parse_xy(words.by_ref())?)),
        "trigger" => Command::Order(Order::TriggerMine(parse_xy(words.by_ref())?)),
        "torpedo" => Command::Order(Order::Torpedo(parse_xy(words.by_ref())?)),
        "state" => Command::State,
        "grid" => Command::Grid,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("Unknown command '{}'", other)),
    };
    if let Some(extra) = words.next() {
        return Err(format!("Unexpected argument '{}'", extra));
    }
    Ok(cmd)
}

/// One-line summary of a committed order.
pub fn describe_report(report: &Report) -> String {
    match report {
        Report::Moved(m) => format!("{} moved from {} to {}", m.team, m.from, m.to),
        Report::Surfaced(s) => format!("{} surfaced in sector {}", s.team, s.sector),
        Report::MineDropped(m) => format!("{} dropped a mine at {}", m.team, m.location),
        Report::MineTriggered(t) => format!(
            "{} detonated a mine at {}{}",
            t.team,
            t.location,
            describe_hits(&t.hits)
        ),
        Report::TorpedoLaunched(t) => format!(
            "{} fired a torpedo at {}{}",
            t.team,
            t.target,
            describe_hits(&t.hits)
        ),
    }
}

fn describe_hits(hits: &[crate::engine::Hit]) -> String {
    if hits.is_empty() {
        return ": no hits".to_string();
    }
    let parts: Vec<String> = hits
        .iter()
        .map(|h| format!("{} takes {}", h.team, h.damage))
        .collect();
    format!(": {}", parts.join(", "))
}

/// Print the map followed by a status line per team.
pub fn print_session(grid: &str, state: &SessionState) {
    println!("{}", grid);
    for t in &state.teams {
        println!(
            "  {:<8} at {}  health {}  mines {}{}",
            t.team,
            t.position,
            t.health,
            t.mines.len(),
            if t.surfaced { "  (surfaced)" } else { "" }
        );
    }
    println!("  turn {}", state.turn);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_orders() {
        assert_eq!(
            parse_command("move n"),
            Ok(Command::Order(Order::Move(Direction::N)))
        );
        assert_eq!(
            parse_command("  torpedo 3 -1 "),
            Ok(Command::Order(Order::Torpedo(Coord::new(3, -1))))
        );
        assert_eq!(parse_command("SURFACE"), Ok(Command::Order(Order::Surface)));
        assert_eq!(parse_command("quit"), Ok(Command::Quit));
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!(parse_command("").is_err());
        assert!(parse_command("move up").is_err());
        assert!(parse_command("mine 1").is_err());
        assert!(parse_command("mine a 2").is_err());
        assert!(parse_command("surface now").is_err());
        assert!(parse_command("dive").is_err());
    }
}
