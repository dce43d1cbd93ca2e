use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// What a person is doing during a slice of the day.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ActivityState {
    Awake,
    Asleep,
    Commute,
    Work,
    #[default]
    Empty,
}

impl ActivityState {
    /// Every state, in legend order.
    pub const ALL: [ActivityState; 5] = [
        ActivityState::Awake,
        ActivityState::Asleep,
        ActivityState::Commute,
        ActivityState::Work,
        ActivityState::Empty,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityState::Awake => "awake",
            ActivityState::Asleep => "asleep",
            ActivityState::Commute => "commute",
            ActivityState::Work => "work",
            ActivityState::Empty => "empty",
        }
    }

    /// Color used when the palette has no entry for this state.
    pub fn default_color(&self) -> Color {
        Color::WHITE
    }
}

impl fmt::Display for ActivityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn to_rgba(&self) -> image::Rgba<u8> {
        image::Rgba([self.r, self.g, self.b, 0xff])
    }

    /// Mix towards black by `amount` (0.0 = unchanged, 1.0 = black).
    pub fn darken(&self, amount: f32) -> Color {
        let keep = 1.0 - amount.clamp(0.0, 1.0);
        let scale = |c: u8| (c as f32 * keep).round() as u8;
        Color::rgb(scale(self.r), scale(self.g), scale(self.b))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseColorError(pub String);

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a #RRGGBB or #RGB color", self.0)
    }
}

impl std::error::Error for ParseColorError {}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseColorError(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(err)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }

        match hex.len() {
            6 => {
                let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
                Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?))
            }
            3 => {
                // #abc is shorthand for #aabbcc
                let channel = |i: usize| {
                    u8::from_str_radix(&hex[i..i + 1], 16)
                        .map(|v| v * 17)
                        .map_err(|_| err())
                };
                Ok(Color::rgb(channel(0)?, channel(1)?, channel(2)?))
            }
            _ => Err(err()),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// State → color mapping. Lookups never fail: a missing state falls back to
/// [`ActivityState::default_color`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette(BTreeMap<ActivityState, Color>);

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(&self, state: ActivityState) -> Color {
        self.0
            .get(&state)
            .copied()
            .unwrap_or_else(|| state.default_color())
    }

    pub fn set(&mut self, state: ActivityState, color: Color) {
        self.0.insert(state, color);
    }

    pub fn contains(&self, state: ActivityState) -> bool {
        self.0.contains_key(&state)
    }

    /// Copy with an explicit entry for every state.
    pub fn filled(&self) -> Palette {
        Palette(
            ActivityState::ALL
                .iter()
                .map(|state| (*state, self.color(*state)))
                .collect(),
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = (ActivityState, Color)> + '_ {
        self.0.iter().map(|(s, c)| (*s, *c))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(ActivityState, Color)> for Palette {
    fn from_iter<I: IntoIterator<Item = (ActivityState, Color)>>(iter: I) -> Self {
        Palette(iter.into_iter().collect())
    }
}
