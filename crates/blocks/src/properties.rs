//! Block property vocabulary
//!
//! Every property a definition table may use is listed in [`PROPERTIES`]
//! together with the values it can take. Parsed properties borrow their
//! name and named values from this table, so a [`BlockProperty`] is a
//! small `Copy` value that compares and hashes structurally.

use std::fmt;

/// Values a property can take
#[derive(Debug, Clone, Copy)]
pub enum PropertyValues {
    Bool,
    /// Inclusive integer range
    Range(u8, u8),
    Named(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy)]
pub struct PropertySpec {
    pub name: &'static str,
    pub values: PropertyValues,
}

const fn bool_prop(name: &'static str) -> PropertySpec {
    PropertySpec {
        name,
        values: PropertyValues::Bool,
    }
}

const fn range_prop(name: &'static str, min: u8, max: u8) -> PropertySpec {
    PropertySpec {
        name,
        values: PropertyValues::Range(min, max),
    }
}

const fn named_prop(name: &'static str, values: &'static [&'static str]) -> PropertySpec {
    PropertySpec {
        name,
        values: PropertyValues::Named(values),
    }
}

/// Connection values of the four horizontal sides (fences, walls, wires)
const SIDE_VALUES: &[&str] = &["true", "false", "up", "side", "none", "low", "tall"];

pub const DYE_COLORS: &[&str] = &[
    "white",
    "orange",
    "magenta",
    "light_blue",
    "yellow",
    "lime",
    "pink",
    "gray",
    "silver",
    "cyan",
    "purple",
    "blue",
    "brown",
    "green",
    "red",
    "black",
];

pub static PROPERTIES: &[PropertySpec] = &[
    range_prop("level", 0, 15),
    range_prop("honey_level", 0, 5),
    range_prop("power", 0, 15),
    range_prop("layers", 1, 8),
    range_prop("distance", 0, 7),
    range_prop("age", 0, 25),
    range_prop("moisture", 0, 7),
    range_prop("pickles", 1, 4),
    range_prop("bites", 0, 6),
    range_prop("delay", 1, 4),
    range_prop("hatch", 0, 2),
    range_prop("eggs", 1, 4),
    range_prop("note", 0, 24),
    range_prop("charges", 0, 4),
    range_prop("stage", 0, 1),
    range_prop("candles", 1, 4),
    named_prop("east", SIDE_VALUES),
    named_prop("west", SIDE_VALUES),
    named_prop("south", SIDE_VALUES),
    named_prop("north", SIDE_VALUES),
    bool_prop("snowy"),
    bool_prop("up"),
    bool_prop("down"),
    bool_prop("in_wall"),
    bool_prop("extended"),
    bool_prop("powered"),
    bool_prop("open"),
    bool_prop("bottom"),
    bool_prop("occupied"),
    bool_prop("attached"),
    bool_prop("disarmed"),
    bool_prop("inverted"),
    bool_prop("triggered"),
    bool_prop("conditional"),
    bool_prop("drag"),
    bool_prop("unstable"),
    bool_prop("hanging"),
    bool_prop("has_book"),
    bool_prop("has_bottle_0"),
    bool_prop("has_bottle_1"),
    bool_prop("has_bottle_2"),
    bool_prop("persistent"),
    bool_prop("lit"),
    bool_prop("waterlogged"),
    bool_prop("locked"),
    bool_prop("eye"),
    bool_prop("enabled"),
    bool_prop("has_record"),
    bool_prop("short"),
    bool_prop("signal_fire"),
    bool_prop("berries"),
    bool_prop("falling"),
    named_prop(
        "instrument",
        &[
            "harp",
            "basedrum",
            "snare",
            "hat",
            "bass",
            "flute",
            "bell",
            "guitar",
            "chime",
            "xylophone",
            "iron_xylophone",
            "cow_bell",
            "didgeridoo",
            "bit",
            "banjo",
            "pling",
        ],
    ),
    named_prop("part", &["head", "foot"]),
    named_prop("hinge", &["left", "right"]),
    named_prop("axis", &["x", "y", "z"]),
    named_prop("face", &["floor", "wall", "ceiling"]),
    named_prop(
        "attachment",
        &["floor", "ceiling", "single_wall", "double_wall"],
    ),
    named_prop(
        "mode",
        &["save", "load", "corner", "data", "compare", "subtract"],
    ),
    named_prop("half", &["top", "bottom", "upper", "lower"]),
    named_prop("leaves", &["none", "small", "large"]),
    named_prop(
        "type",
        &["top", "bottom", "double", "normal", "sticky", "single", "left", "right"],
    ),
    named_prop(
        "shape",
        &[
            "straight",
            "inner_left",
            "inner_right",
            "outer_left",
            "outer_right",
            "north_south",
            "east_west",
            "south_east",
            "south_west",
            "north_west",
            "north_east",
            "ascending_east",
            "ascending_west",
            "ascending_north",
            "ascending_south",
        ],
    ),
    named_prop("sculk_sensor_phase", &["inactive", "active", "cooldown"]),
    named_prop("thickness", &["tip_merge", "tip", "frustum", "middle", "base"]),
    named_prop("tilt", &["none", "unstable", "partial", "full"]),
    named_prop("vertical_direction", &["up", "down"]),
    // pre-flattening vocabulary used by the built-in legacy table
    named_prop("color", DYE_COLORS),
    named_prop(
        "variant",
        &[
            "stone",
            "granite",
            "smooth_granite",
            "diorite",
            "smooth_diorite",
            "andesite",
            "smooth_andesite",
            "dirt",
            "coarse_dirt",
            "podzol",
            "oak",
            "spruce",
            "birch",
            "jungle",
            "acacia",
            "dark_oak",
            "sand",
            "red_sand",
        ],
    ),
];

/// Typed property value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PropertyValue {
    Bool(bool),
    Int(u8),
    Named(&'static str),
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Bool(v) => write!(f, "{}", v),
            PropertyValue::Int(v) => write!(f, "{}", v),
            PropertyValue::Named(v) => f.write_str(v),
        }
    }
}

/// One `name=value` pair of a block state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockProperty {
    pub name: &'static str,
    pub value: PropertyValue,
}

/// Why a property could not be parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyParseError {
    UnknownName,
    UnknownValue,
}

impl BlockProperty {
    /// Parse a property against the vocabulary
    pub fn parse(name: &str, value: &str) -> Result<Self, PropertyParseError> {
        let spec = find_spec(name).ok_or(PropertyParseError::UnknownName)?;
        let parsed = match spec.values {
            PropertyValues::Bool => match value {
                "true" => PropertyValue::Bool(true),
                "false" => PropertyValue::Bool(false),
                _ => return Err(PropertyParseError::UnknownValue),
            },
            PropertyValues::Range(min, max) => {
                let number: u8 = value.parse().map_err(|_| PropertyParseError::UnknownValue)?;
                if number < min || number > max {
                    return Err(PropertyParseError::UnknownValue);
                }
                PropertyValue::Int(number)
            }
            PropertyValues::Named(values) => {
                let interned = values
                    .iter()
                    .copied()
                    .find(|candidate| *candidate == value)
                    .ok_or(PropertyParseError::UnknownValue)?;
                PropertyValue::Named(interned)
            }
        };
        Ok(Self {
            name: spec.name,
            value: parsed,
        })
    }
}

impl fmt::Display for BlockProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

pub fn find_spec(name: &str) -> Option<&'static PropertySpec> {
    PROPERTIES.iter().find(|spec| spec.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_names_unique() {
        let mut names: Vec<_> = PROPERTIES.iter().map(|spec| spec.name).collect();
        names.sort_unstable();
        let before = names.len();
        names.dedup();
        assert_eq!(before, names.len());
    }

    #[test]
    fn test_parse_kinds() {
        assert_eq!(
            BlockProperty::parse("waterlogged", "true").unwrap().value,
            PropertyValue::Bool(true)
        );
        assert_eq!(
            BlockProperty::parse("age", "7").unwrap().value,
            PropertyValue::Int(7)
        );
        assert_eq!(
            BlockProperty::parse("half", "upper").unwrap().value,
            PropertyValue::Named("upper")
        );
        assert_eq!(
            BlockProperty::parse("north", "low").unwrap().to_string(),
            "north=low"
        );
    }

    #[test]
    fn test_rejects_unknown() {
        assert_eq!(
            BlockProperty::parse("sparkly", "true"),
            Err(PropertyParseError::UnknownName)
        );
        assert_eq!(
            BlockProperty::parse("layers", "0"),
            Err(PropertyParseError::UnknownValue)
        );
        assert_eq!(
            BlockProperty::parse("lit", "yes"),
            Err(PropertyParseError::UnknownValue)
        );
        assert_eq!(
            BlockProperty::parse("leaves", "huge"),
            Err(PropertyParseError::UnknownValue)
        );
    }

    #[test]
    fn test_leaves_values_map_by_name() {
        let small = BlockProperty::parse("leaves", "small").unwrap();
        let large = BlockProperty::parse("leaves", "large").unwrap();
        assert_eq!(small.value, PropertyValue::Named("small"));
        assert_eq!(large.value, PropertyValue::Named("large"));
        assert_ne!(small, large);
    }
}
