//! 聚落：城市与村庄的选址、命名和道路

pub mod names;
pub mod placer;
pub mod survey;

use egui::{Color32, Pos2};
use serde::{Deserialize, Serialize};

pub use placer::{place_settlements, PlacementParams};
pub use survey::{Survey, TerrainProbe};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    City,
    Village,
}

impl Tier {
    /// Side length of the glyph drawn into the render cache.
    pub fn glyph_size(self) -> i64 {
        match self {
            Tier::City => 12,
            Tier::Village => 10,
        }
    }

    /// Glyph ring and label colour.
    pub fn border_color(self) -> Color32 {
        match self {
            Tier::City => Color32::from_rgb(0x8B, 0x00, 0x00),
            Tier::Village => Color32::from_rgb(0x00, 0x00, 0x8B),
        }
    }

    pub fn fill_color(self) -> Color32 {
        match self {
            Tier::City => Color32::from_rgb(0xCD, 0x5C, 0x5C),
            Tier::Village => Color32::from_rgb(0x41, 0x69, 0xE1),
        }
    }

    pub fn path_color(self) -> Color32 {
        match self {
            Tier::City => Color32::from_rgb(0x5D, 0x40, 0x37),
            Tier::Village => Color32::from_rgb(0x8D, 0x6E, 0x63),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tier::City => "city",
            Tier::Village => "village",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settlement {
    pub position: Pos2,
    pub tier: Tier,
    pub name: String,
}

impl Settlement {
    pub fn new(position: Pos2, tier: Tier) -> Self {
        Self {
            position,
            tier,
            name: String::new(),
        }
    }
}

/// All settlements of one map, rebuilt in full with every new field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settlements {
    pub cities: Vec<Settlement>,
    pub villages: Vec<Settlement>,
}

impl Settlements {
    /// Cities first, then villages.
    pub fn iter(&self) -> impl Iterator<Item = &Settlement> {
        self.cities.iter().chain(&self.villages)
    }

    pub fn len(&self) -> usize {
        self.cities.len() + self.villages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty() && self.villages.is_empty()
    }

    /// Path through all settlements of `tier` in list order.
    pub fn path(&self, tier: Tier) -> Vec<Pos2> {
        let list = match tier {
            Tier::City => &self.cities,
            Tier::Village => &self.villages,
        };
        list.iter().map(|s| s.position).collect()
    }
}
