//! Randomized watermark placement.
//!
//! A placement is two independent uniform draws: an [`Anchor`] from the 8
//! compass gravities, and an [`OffsetPreset`] from 6 fixed fractional-offset
//! formulas applied to the main output's target dimensions. The combination
//! is not guaranteed to be visually balanced for every size — that scatter
//! is the point.

use crate::types::Size;
use rand::Rng;
use rand::seq::SliceRandom;
use std::fmt;

/// Compass-direction gravity the watermark is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    NorthWest,
    North,
    NorthEast,
    West,
    East,
    SouthWest,
    South,
    SouthEast,
}

impl Anchor {
    pub const ALL: [Anchor; 8] = [
        Anchor::NorthWest,
        Anchor::North,
        Anchor::NorthEast,
        Anchor::West,
        Anchor::East,
        Anchor::SouthWest,
        Anchor::South,
        Anchor::SouthEast,
    ];

    /// ImageMagick `-gravity` token.
    pub fn gravity(self) -> &'static str {
        match self {
            Anchor::NorthWest => "NorthWest",
            Anchor::North => "North",
            Anchor::NorthEast => "NorthEast",
            Anchor::West => "West",
            Anchor::East => "East",
            Anchor::SouthWest => "SouthWest",
            Anchor::South => "South",
            Anchor::SouthEast => "SouthEast",
        }
    }
}

/// One of the 6 fixed fractional-offset formulas.
///
/// Each preset is a `(width / kx, height / ky)` divisor pair; the result is
/// truncated to whole pixels and rendered as `+dx+dy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OffsetPreset {
    Wide,
    Shallow,
    NearEdge,
    Narrow,
    Deep,
    Slight,
}

impl OffsetPreset {
    pub const ALL: [OffsetPreset; 6] = [
        OffsetPreset::Wide,
        OffsetPreset::Shallow,
        OffsetPreset::NearEdge,
        OffsetPreset::Narrow,
        OffsetPreset::Deep,
        OffsetPreset::Slight,
    ];

    fn divisors(self) -> (f64, f64) {
        match self {
            OffsetPreset::Wide => (7.0, 8.0),
            OffsetPreset::Shallow => (7.5, 11.0),
            OffsetPreset::NearEdge => (20.0, 10.0),
            OffsetPreset::Narrow => (14.0, 13.0),
            OffsetPreset::Deep => (8.0, 6.0),
            OffsetPreset::Slight => (16.0, 10.0),
        }
    }

    /// Pixel offset from the anchor for a given output size.
    pub fn offset(self, size: Size) -> (u32, u32) {
        let (kx, ky) = self.divisors();
        (
            (f64::from(size.width) / kx) as u32,
            (f64::from(size.height) / ky) as u32,
        )
    }
}

/// A chosen anchor + offset pair for one image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub anchor: Anchor,
    pub preset: OffsetPreset,
    pub size: Size,
}

impl Placement {
    /// Draw a placement: anchor and offset preset are picked independently
    /// and uniformly. Fresh randomness per image — placements are not
    /// reproducible across runs.
    pub fn choose(rng: &mut impl Rng, size: Size) -> Self {
        let anchor = *Anchor::ALL.choose(rng).unwrap();
        let preset = *OffsetPreset::ALL.choose(rng).unwrap();
        Self {
            anchor,
            preset,
            size,
        }
    }

    /// ImageMagick `-geometry` argument, `+dx+dy`.
    pub fn geometry(&self) -> String {
        let (dx, dy) = self.preset.offset(self.size);
        format!("+{dx}+{dy}")
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.anchor.gravity(), self.geometry())
    }
}
