//! This module contains the enum-valued parameters.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString};

/// The animation pattern of the garland lights.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    PartialEq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LightMode {
    /// Every bulb at full brightness.
    #[default]
    Static,

    /// Each bulb pulses quickly, offset by its index.
    Twinkle,

    /// A slow pulse that runs along the chain.
    Cascade,

    /// A pulse that travels up the tree.
    Wave,

    /// A small group of lit bulbs chasing along the chain.
    Chase,
}

impl LightMode {
    /// Parse a mode by name, falling back to [`LightMode::Static`] for anything unknown.
    pub fn parse_lossy(name: &str) -> Self {
        Self::from_str(name).unwrap_or_default()
    }
}

/// The palette used to colour the garland bulbs.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    PartialEq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ColourScheme {
    /// Eight bright colours.
    #[default]
    #[serde(rename = "multicolor", alias = "multicolour")]
    #[strum(to_string = "multicolor", serialize = "multicolour")]
    Multicolour,

    /// Shades of red.
    Red,

    /// Shades of blue.
    Blue,

    /// Oranges and golds.
    Warm,

    /// Cyans, blues and purple.
    Cool,
}

impl ColourScheme {
    /// Parse a scheme by name, falling back to [`ColourScheme::Multicolour`] for anything
    /// unknown.
    pub fn parse_lossy(name: &str) -> Self {
        Self::from_str(name).unwrap_or_default()
    }
}
