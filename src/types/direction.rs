use std::fmt;
use std::fmt::Display;

/// Sweep direction of the arm when scheduling begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "UP"),
            Direction::Down => write!(f, "DOWN"),
        }
    }
}

impl TryFrom<&str> for Direction {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> anyhow::Result<Self> {
        if value.eq_ignore_ascii_case("up") {
            Ok(Direction::Up)
        } else if value.eq_ignore_ascii_case("down") {
            Ok(Direction::Down)
        } else {
            anyhow::bail!("direction must be UP or DOWN, got '{value}'")
        }
    }
}
