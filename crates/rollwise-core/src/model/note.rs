use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Board tiles a roll can land on, used as canned log annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileEvent {
    Go,
    Chance,
    CommunityChest,
    Railroad,
    Tax,
    Utility,
    Jail,
    GoToJail,
    FreeParking,
    Property,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown tile '{0}'")]
pub struct UnknownTileEvent(pub String);

impl TileEvent {
    pub const ALL: [TileEvent; 10] = [
        TileEvent::Go,
        TileEvent::Chance,
        TileEvent::CommunityChest,
        TileEvent::Railroad,
        TileEvent::Tax,
        TileEvent::Utility,
        TileEvent::Jail,
        TileEvent::GoToJail,
        TileEvent::FreeParking,
        TileEvent::Property,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            TileEvent::Go => "Go",
            TileEvent::Chance => "Chance",
            TileEvent::CommunityChest => "Community Chest",
            TileEvent::Railroad => "Railroad",
            TileEvent::Tax => "Tax",
            TileEvent::Utility => "Utility",
            TileEvent::Jail => "Jail",
            TileEvent::GoToJail => "Go To Jail",
            TileEvent::FreeParking => "Free Parking",
            TileEvent::Property => "Property",
        }
    }
}

impl fmt::Display for TileEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TileEvent {
    type Err = UnknownTileEvent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        TileEvent::ALL
            .iter()
            .copied()
            .find(|tile| tile.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownTileEvent(s.to_string()))
    }
}
