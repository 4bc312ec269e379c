//! Core type definitions

use serde::{Deserialize, Serialize};

/// Block face / facing direction, in wire order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Down = 0,
    Up = 1,
    North = 2,
    South = 3,
    West = 4,
    East = 5,
}

impl Direction {
    pub fn from_id(id: i32) -> Option<Self> {
        match id {
            0 => Some(Self::Down),
            1 => Some(Self::Up),
            2 => Some(Self::North),
            3 => Some(Self::South),
            4 => Some(Self::West),
            5 => Some(Self::East),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Down => "down",
            Self::Up => "up",
            Self::North => "north",
            Self::South => "south",
            Self::West => "west",
            Self::East => "east",
        }
    }
}

/// Entity pose (sent from 1.14)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Pose {
    #[default]
    Standing,
    FallFlying,
    Sleeping,
    Swimming,
    SpinAttack,
    Sneaking,
    LongJumping,
    Dying,
}

impl Pose {
    pub fn from_id(id: i32) -> Option<Self> {
        match id {
            0 => Some(Self::Standing),
            1 => Some(Self::FallFlying),
            2 => Some(Self::Sleeping),
            3 => Some(Self::Swimming),
            4 => Some(Self::SpinAttack),
            5 => Some(Self::Sneaking),
            6 => Some(Self::LongJumping),
            7 => Some(Self::Dying),
            _ => None,
        }
    }
}

/// Pitch/yaw/roll in degrees, used by armor stand parts
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rotations {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

impl Rotations {
    pub const fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_from_id() {
        assert_eq!(Direction::from_id(2), Some(Direction::North));
        assert_eq!(Direction::from_id(6), None);
        assert_eq!(Direction::East.as_str(), "east");
    }

    #[test]
    fn test_pose_from_id() {
        assert_eq!(Pose::from_id(5), Some(Pose::Sneaking));
        assert_eq!(Pose::from_id(-1), None);
        assert_eq!(Pose::default(), Pose::Standing);
    }
}
