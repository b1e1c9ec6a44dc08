//! Discrete facing derived from a direction vector.

use std::fmt;
use std::str::FromStr;

/// Below this magnitude on both axes a direction counts as standing still.
pub const IDLE_EPSILON: f64 = 0.01;

/// Discrete facing derived from a continuous direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Facing {
    /// not moving
    #[default]
    Idle,
    /// towards negative y
    Up,
    /// towards positive y
    Down,
    /// towards negative x
    Left,
    /// towards positive x
    Right,
}

impl Facing {
    /// Every facing, in placeholder generation order.
    pub const ALL: [Facing; 5] = [
        Facing::Idle,
        Facing::Down,
        Facing::Up,
        Facing::Left,
        Facing::Right,
    ];

    /// Lowercase name as used in animation metadata.
    pub fn as_str(self) -> &'static str {
        match self {
            Facing::Idle => "idle",
            Facing::Up => "up",
            Facing::Down => "down",
            Facing::Left => "left",
            Facing::Right => "right",
        }
    }
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown facing name in animation metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFacing(pub String);

impl fmt::Display for UnknownFacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown facing '{}'", self.0)
    }
}

impl std::error::Error for UnknownFacing {}

impl FromStr for Facing {
    type Err = UnknownFacing;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "idle" => Ok(Facing::Idle),
            "up" => Ok(Facing::Up),
            "down" => Ok(Facing::Down),
            "left" => Ok(Facing::Left),
            "right" => Ok(Facing::Right),
            other => Err(UnknownFacing(other.to_owned())),
        }
    }
}

/// Maps a direction to a facing.
///
/// The dominant axis wins; on a tie the vertical axis wins.
pub fn resolve_facing(dx: f64, dy: f64) -> Facing {
    if dx.abs() < IDLE_EPSILON && dy.abs() < IDLE_EPSILON {
        return Facing::Idle;
    }
    if dx.abs() > dy.abs() {
        return if dx > 0.0 { Facing::Right } else { Facing::Left };
    }
    if dy > 0.0 {
        Facing::Down
    } else {
        Facing::Up
    }
}
