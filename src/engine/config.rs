/// Width of the default map.
pub const DEFAULT_WIDTH: usize = 15;
/// Height of the default map.
pub const DEFAULT_HEIGHT: usize = 15;

/// Side length of a square sector announced on surfacing.
pub const SECTOR_SIZE: usize = 5;

/// Accumulated damage at which a submarine is destroyed.
pub const DEFEAT_DAMAGE: u32 = 4;

/// Maximum Manhattan distance between a submarine and its torpedo target.
pub const TORPEDO_RANGE: u32 = 4;

/// Damage dealt to a submarine sitting on the detonation cell.
pub const DIRECT_HIT_DAMAGE: u32 = 2;
/// Damage dealt to a submarine one cell away from the detonation.
pub const SPLASH_DAMAGE: u32 = 1;
/// Chebyshev radius of a mine or torpedo blast.
pub const BLAST_RADIUS: u32 = 1;

/// Map used when no map file is supplied.
pub const DEFAULT_MAP: &str = include_str!("../../maps/default.txt");

/// Tunable rules for a session. `Default` uses the constants above.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct RuleSet {
    pub defeat_damage: u32,
    pub torpedo_range: u32,
    pub direct_hit_damage: u32,
    pub splash_damage: u32,
    /// Reject actions from the team that did not hold the turn.
    pub strict_turns: bool,
}

impl RuleSet {
    /// Damage dealt at Chebyshev `distance` from a detonation.
    pub fn blast_damage(&self, distance: u32) -> u32 {
        match distance {
            0 => self.direct_hit_damage,
            d if d <= BLAST_RADIUS => self.splash_damage,
            _ => 0,
        }
    }

    pub fn with_strict_turns(mut self, strict: bool) -> Self {
        self.strict_turns = strict;
        self
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            defeat_damage: DEFEAT_DAMAGE,
            torpedo_range: TORPEDO_RANGE,
            direct_hit_damage: DIRECT_HIT_DAMAGE,
            splash_damage: SPLASH_DAMAGE,
            strict_turns: false,
        }
    }
}
