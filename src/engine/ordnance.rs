//! Mines and torpedoes.
//!
//! Blasts hurt every submarine within `BLAST_RADIUS` (Chebyshev) of the
//! detonation, including the one that fired. Damage follows
//! [`RuleSet::blast_damage`]: full on the cell, splash one cell away.

use alloc::string::ToString;
use alloc::vec::Vec;

use crate::engine::common::{ActionError, Hit, MineOutcome, TorpedoOutcome, TriggerOutcome};
use crate::engine::config::RuleSet;
use crate::engine::grid::{Coord, GridMap};
use crate::engine::submarine::Submarine;

/// Check that a mine may be dropped at `target`.
pub fn check_mine_placement(
    sub: &Submarine,
    grid: &GridMap,
    target: Coord,
) -> Result<(), ActionError> {
    let legal = !grid.is_blocked(target)
        && sub.position().manhattan(target) == 1
        && !sub.has_visited(target)
        && sub.mine_at(target).is_none();
    if legal {
        Ok(())
    } else {
        Err(ActionError::InvalidMinePlacement)
    }
}

/// Drop an unarmed mine next to the submarine.
pub fn drop_mine(
    sub: &mut Submarine,
    grid: &GridMap,
    target: Coord,
) -> Result<MineOutcome, ActionError> {
    check_mine_placement(sub, grid, target)?;
    sub.add_mine(target);
    Ok(MineOutcome {
        team: sub.team().to_string(),
        location: target,
    })
}

/// Damage every submarine in range of a detonation at `target`.
pub fn blast(subs: &[Submarine], target: Coord, rules: &RuleSet) -> Vec<Hit> {
    subs.iter()
        .filter_map(|s| {
            let distance = s.position().chebyshev(target);
            let damage = rules.blast_damage(distance);
            (damage > 0).then(|| Hit {
                team: s.team().to_string(),
                distance,
                damage,
            })
        })
        .collect()
}

fn apply_hits(subs: &mut [Submarine], hits: &[Hit]) {
    for hit in hits {
        if let Some(sub) = subs.iter_mut().find(|s| s.team() == hit.team) {
            sub.add_damage(hit.damage);
        }
    }
}

/// Detonate the armed mine owned by `subs[owner]` at `target`.
pub fn trigger_mine(
    subs: &mut [Submarine],
    owner: usize,
    target: Coord,
    rules: &RuleSet,
) -> Result<TriggerOutcome, ActionError> {
    let sub = subs.get(owner).ok_or(ActionError::UnknownTeam)?;
    let mine = sub.mine_at(target).ok_or(ActionError::NoSuchMine)?;
    if !mine.armed() {
        return Err(ActionError::MineNotArmed);
    }
    let team = sub.team().to_string();

    let hits = blast(subs, target, rules);
    subs[owner].remove_mine(target);
    apply_hits(subs, &hits);
    Ok(TriggerOutcome {
        team,
        location: target,
        hits,
    })
}

/// Check that `attacker` can reach `target` with a torpedo.
pub fn check_torpedo_target(
    attacker: &Submarine,
    grid: &GridMap,
    target: Coord,
    rules: &RuleSet,
) -> Result<(), ActionError> {
    if !grid.in_bounds(target) || attacker.position().manhattan(target) > rules.torpedo_range {
        return Err(ActionError::OutOfRange);
    }
    Ok(())
}

/// Fire a torpedo from `subs[attacker]` at `target`. Islands do not block the
/// shot.
pub fn launch_torpedo(
    subs: &mut [Submarine],
    attacker: usize,
    grid: &GridMap,
    target: Coord,
    rules: &RuleSet,
) -> Result<TorpedoOutcome, ActionError> {
    let sub = subs.get(attacker).ok_or(ActionError::UnknownTeam)?;
    check_torpedo_target(sub, grid, target, rules)?;
    let team = sub.team().to_string();

    let hits = blast(subs, target, rules);
    apply_hits(subs, &hits);
    Ok(TorpedoOutcome { team, target, hits })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(a: (i32, i32), b: (i32, i32)) -> [Submarine; 2] {
        [
            Submarine::new("Red", a.into()),
            Submarine::new("Blue", b.into()),
        ]
    }

    #[test]
    fn blast_falloff_by_chebyshev_distance() {
        let subs = pair((2, 2), (3, 3));
        let hits = blast(&subs, Coord::new(2, 2), &RuleSet::default());
        assert_eq!(hits.len(), 2);
        assert_eq!((hits[0].distance, hits[0].damage), (0, 2));
        assert_eq!((hits[1].distance, hits[1].damage), (1, 1));
        assert!(blast(&subs, Coord::new(0, 0), &RuleSet::default()).is_empty());
    }

    #[test]
    fn mine_must_be_orthogonally_adjacent() {
        let grid = GridMap::open(5, 5).unwrap();
        let mut sub = Submarine::new("Red", Coord::new(2, 2));
        for bad in [(3, 3), (2, 2), (4, 2)] {
            assert_eq!(
                drop_mine(&mut sub, &grid, bad.into()),
                Err(ActionError::InvalidMinePlacement)
            );
        }
        drop_mine(&mut sub, &grid, Coord::new(2, 1)).unwrap();
        assert_eq!(
            drop_mine(&mut sub, &grid, Coord::new(2, 1)),
            Err(ActionError::InvalidMinePlacement)
        );
        assert_eq!(sub.mines().len(), 1);
    }

    #[test]
    fn torpedo_range_is_manhattan() {
        let grid = GridMap::open(10, 10).unwrap();
        let rules = RuleSet::default();
        let sub = Submarine::new("Red", Coord::new(0, 0));
        assert!(check_torpedo_target(&sub, &grid, Coord::new(2, 2), &rules).is_ok());
        assert_eq!(
            check_torpedo_target(&sub, &grid, Coord::new(3, 2), &rules),
            Err(ActionError::OutOfRange)
        );
        assert_eq!(
            check_torpedo_target(&sub, &grid, Coord::new(-1, 0), &rules),
            Err(ActionError::OutOfRange)
        );
    }
}
