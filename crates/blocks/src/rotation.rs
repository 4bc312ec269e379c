//! Rotation axis of a block state
//!
//! Definition tables spell orientation three ways: `facing` (cardinal and
//! vertical names), `rotation` (16 compass steps, 0 = south, clockwise) and
//! `orientation` (jigsaw blocks, `front_top` pairs). All three collapse into
//! one [`BlockRotation`] so a state carries a single orientation.

use std::fmt;

/// Property names that are lifted into the rotation axis, in priority order
pub const ROTATION_PROPERTIES: [&str; 3] = ["facing", "rotation", "orientation"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum BlockRotation {
    #[default]
    None,
    South,
    SouthSouthWest,
    SouthWest,
    WestSouthWest,
    West,
    WestNorthWest,
    NorthWest,
    NorthNorthWest,
    North,
    NorthNorthEast,
    NorthEast,
    EastNorthEast,
    East,
    EastSouthEast,
    SouthEast,
    SouthSouthEast,
    Up,
    Down,
    AscendingEast,
    AscendingWest,
    AscendingNorth,
    AscendingSouth,
    DownEast,
    DownWest,
    DownNorth,
    DownSouth,
    UpEast,
    UpWest,
    UpNorth,
    UpSouth,
    EastUp,
    WestUp,
    NorthUp,
    SouthUp,
    NorthSouth,
    EastWest,
}

/// The 16 compass steps of the `rotation` property, starting south
const COMPASS: [BlockRotation; 16] = [
    BlockRotation::South,
    BlockRotation::SouthSouthWest,
    BlockRotation::SouthWest,
    BlockRotation::WestSouthWest,
    BlockRotation::West,
    BlockRotation::WestNorthWest,
    BlockRotation::NorthWest,
    BlockRotation::NorthNorthWest,
    BlockRotation::North,
    BlockRotation::NorthNorthEast,
    BlockRotation::NorthEast,
    BlockRotation::EastNorthEast,
    BlockRotation::East,
    BlockRotation::EastSouthEast,
    BlockRotation::SouthEast,
    BlockRotation::SouthSouthEast,
];

impl BlockRotation {
    /// Parse any value of `facing`, `rotation` or `orientation`
    pub fn from_name(value: &str) -> Option<Self> {
        if let Ok(step) = value.parse::<usize>() {
            return COMPASS.get(step).copied();
        }
        let rotation = match value {
            "south" => Self::South,
            "east" => Self::East,
            "north" => Self::North,
            "west" => Self::West,
            "up" => Self::Up,
            "down" => Self::Down,
            "ascending_east" => Self::AscendingEast,
            "ascending_west" => Self::AscendingWest,
            "ascending_north" => Self::AscendingNorth,
            "ascending_south" => Self::AscendingSouth,
            "down_east" => Self::DownEast,
            "down_west" => Self::DownWest,
            "down_north" => Self::DownNorth,
            "down_south" => Self::DownSouth,
            "up_east" => Self::UpEast,
            "up_west" => Self::UpWest,
            "up_north" => Self::UpNorth,
            "up_south" => Self::UpSouth,
            "east_up" => Self::EastUp,
            "west_up" => Self::WestUp,
            "north_up" => Self::NorthUp,
            "south_up" => Self::SouthUp,
            "north_south" => Self::NorthSouth,
            "east_west" => Self::EastWest,
            _ => return None,
        };
        Some(rotation)
    }

    /// Compass step (0-15) for horizontal rotations
    pub fn compass_step(self) -> Option<u8> {
        COMPASS
            .iter()
            .position(|candidate| *candidate == self)
            .map(|step| step as u8)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::South => "south",
            Self::SouthSouthWest => "south_south_west",
            Self::SouthWest => "south_west",
            Self::WestSouthWest => "west_south_west",
            Self::West => "west",
            Self::WestNorthWest => "west_north_west",
            Self::NorthWest => "north_west",
            Self::NorthNorthWest => "north_north_west",
            Self::North => "north",
            Self::NorthNorthEast => "north_north_east",
            Self::NorthEast => "north_east",
            Self::EastNorthEast => "east_north_east",
            Self::East => "east",
            Self::EastSouthEast => "east_south_east",
            Self::SouthEast => "south_east",
            Self::SouthSouthEast => "south_south_east",
            Self::Up => "up",
            Self::Down => "down",
            Self::AscendingEast => "ascending_east",
            Self::AscendingWest => "ascending_west",
            Self::AscendingNorth => "ascending_north",
            Self::AscendingSouth => "ascending_south",
            Self::DownEast => "down_east",
            Self::DownWest => "down_west",
            Self::DownNorth => "down_north",
            Self::DownSouth => "down_south",
            Self::UpEast => "up_east",
            Self::UpWest => "up_west",
            Self::UpNorth => "up_north",
            Self::UpSouth => "up_south",
            Self::EastUp => "east_up",
            Self::WestUp => "west_up",
            Self::NorthUp => "north_up",
            Self::SouthUp => "south_up",
            Self::NorthSouth => "north_south",
            Self::EastWest => "east_west",
        }
    }
}

impl fmt::Display for BlockRotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
