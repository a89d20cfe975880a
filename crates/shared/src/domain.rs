use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);
    };
}

id_newtype!(PageId);

pub const PLAYER_COUNT: usize = 4;
pub const CARD_COUNT: usize = 4;

pub const POSITION_MIN: f32 = 0.0;
pub const POSITION_MAX: f32 = 100.0;

/// Clamp a normalized coordinate into `[0, 100]`. NaN collapses to the minimum.
pub fn clamp_coordinate(value: f32) -> f32 {
    if value.is_nan() {
        return POSITION_MIN;
    }
    value.clamp(POSITION_MIN, POSITION_MAX)
}

/// Index of one of the four local players. Only valid indices can be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PlayerIndex(u8);

impl PlayerIndex {
    pub const ALL: [PlayerIndex; PLAYER_COUNT] = [
        PlayerIndex(0),
        PlayerIndex(1),
        PlayerIndex(2),
        PlayerIndex(3),
    ];

    pub fn new(index: usize) -> Option<Self> {
        (index < PLAYER_COUNT).then_some(Self(index as u8))
    }

    /// Player selected by the `1`..`4` keys.
    pub fn from_digit(digit: u8) -> Option<Self> {
        digit.checked_sub(1).and_then(|index| Self::new(index as usize))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn number(self) -> u8 {
        self.0 + 1
    }
}

impl TryFrom<u8> for PlayerIndex {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value as usize).ok_or_else(|| format!("player index {value} out of range"))
    }
}

impl From<PlayerIndex> for u8 {
    fn from(value: PlayerIndex) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub const ALL: [Axis; 2] = [Axis::X, Axis::Y];

    pub fn min_role(self) -> CardRole {
        match self {
            Axis::X => CardRole::XMin,
            Axis::Y => CardRole::YMin,
        }
    }

    pub fn max_role(self) -> CardRole {
        match self {
            Axis::X => CardRole::XMax,
            Axis::Y => CardRole::YMax,
        }
    }
}

/// Fixed slot a card occupies. Declaration order is the card index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardRole {
    YMax,
    XMax,
    YMin,
    XMin,
}

impl CardRole {
    pub const ALL: [CardRole; CARD_COUNT] =
        [CardRole::YMax, CardRole::XMax, CardRole::YMin, CardRole::XMin];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        match self {
            CardRole::YMax => 0,
            CardRole::XMax => 1,
            CardRole::YMin => 2,
            CardRole::XMin => 3,
        }
    }

    pub fn axis(self) -> Axis {
        match self {
            CardRole::XMin | CardRole::XMax => Axis::X,
            CardRole::YMin | CardRole::YMax => Axis::Y,
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            CardRole::YMax => "y-max",
            CardRole::XMax => "x-max",
            CardRole::YMin => "y-min",
            CardRole::XMin => "x-min",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|role| role.slug() == normalized)
    }
}

/// A candidate article from the content provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: PageId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

impl ContentItem {
    pub fn has_thumbnail(&self) -> bool {
        self.thumbnail_url
            .as_deref()
            .is_some_and(|url| !url.trim().is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerPosition {
    pub x: f32,
    pub y: f32,
}

impl PlayerPosition {
    /// Build a position with both axes clamped independently.
    pub fn clamped(x: f32, y: f32) -> Self {
        Self {
            x: clamp_coordinate(x),
            y: clamp_coordinate(y),
        }
    }

    pub fn along(self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }
}
