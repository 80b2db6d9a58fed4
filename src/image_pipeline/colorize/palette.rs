//! Per-player false-color palette.
//!
//! Every tracked player gets a fixed channel recipe so several people in the
//! same depth frame stay visually distinct from each other and from the
//! background. A recipe says, for each of red/green/blue, which fraction of
//! the depth intensity goes into that channel.

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::depth::types::{DepthSample, PLAYER_INDEX_MASK};

/// How one color channel is derived from the depth intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelLevel {
    Off,
    Full,
    Half,
    Quarter,
    /// `255 - intensity`
    Inverted,
}

impl ChannelLevel {
    pub const fn apply(self, intensity: u8) -> u8 {
        match self {
            ChannelLevel::Off => 0,
            ChannelLevel::Full => intensity,
            ChannelLevel::Half => intensity / 2,
            ChannelLevel::Quarter => intensity / 4,
            ChannelLevel::Inverted => 255 - intensity,
        }
    }
}

/// Channel recipe for one player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerColor {
    pub red: ChannelLevel,
    pub green: ChannelLevel,
    pub blue: ChannelLevel,
}

impl PlayerColor {
    const fn new(red: ChannelLevel, green: ChannelLevel, blue: ChannelLevel) -> Self {
        Self { red, green, blue }
    }

    /// Returns `[red, green, blue]` for the given intensity.
    pub const fn shade(self, intensity: u8) -> [u8; 3] {
        [
            self.red.apply(intensity),
            self.green.apply(intensity),
            self.blue.apply(intensity),
        ]
    }
}

use ChannelLevel::{Full, Half, Inverted, Off, Quarter};

/// Recipes indexed by [`PlayerIndex`].
pub const PALETTE: [PlayerColor; 8] = [
    PlayerColor::new(Half, Half, Half),             // background: dimmed gray
    PlayerColor::new(Full, Off, Off),               // red
    PlayerColor::new(Off, Full, Off),               // green
    PlayerColor::new(Quarter, Full, Full),          // cyan
    PlayerColor::new(Full, Full, Quarter),          // yellow
    PlayerColor::new(Full, Quarter, Full),          // magenta
    PlayerColor::new(Half, Half, Full),             // periwinkle
    PlayerColor::new(Inverted, Inverted, Inverted), // inverted gray
];

/// The 3-bit player tag carried by every depth sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PlayerIndex {
    Background = 0,
    Player1 = 1,
    Player2 = 2,
    Player3 = 3,
    Player4 = 4,
    Player5 = 5,
    Player6 = 6,
    Player7 = 7,
}

impl PlayerIndex {
    pub const ALL: [PlayerIndex; 8] = [
        PlayerIndex::Background,
        PlayerIndex::Player1,
        PlayerIndex::Player2,
        PlayerIndex::Player3,
        PlayerIndex::Player4,
        PlayerIndex::Player5,
        PlayerIndex::Player6,
        PlayerIndex::Player7,
    ];

    /// Converts an arbitrary value, failing for anything outside 0-7.
    pub fn from_bits(bits: u8) -> Result<Self> {
        Self::ALL
            .get(bits as usize)
            .copied()
            .ok_or(ConversionError::InvalidPlayerIndex(bits))
    }

    /// The player a sample belongs to. Infallible since the field is masked.
    pub const fn of(sample: DepthSample) -> Self {
        Self::ALL[(sample.player_bits() & PLAYER_INDEX_MASK) as usize]
    }

    pub const fn color(self) -> PlayerColor {
        PALETTE[self as usize]
    }
}
