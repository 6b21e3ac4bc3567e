//! 聚落名称：前缀 + 后缀，同一等级内尽量不重名

use rand::seq::IndexedRandom;
use rand::Rng;

use super::Tier;

pub const CITY_PREFIXES: [&str; 15] = [
    "Elder", "Storm", "Iron", "High", "Dawn", "Dusk", "Moon", "Sun", "Star", "Dragon", "Crystal",
    "Silver", "Golden", "Shadow", "Frost",
];

pub const CITY_SUFFIXES: [&str; 15] = [
    "haven", "spire", "keep", "guard", "hold", "gate", "fall", "rise", "peak", "crown", "realm",
    "forge", "heart", "watch", "ward",
];

pub const VILLAGE_PREFIXES: [&str; 15] = [
    "Green", "Red", "Blue", "Oak", "Pine", "Maple", "River", "Lake", "Hill", "Stone", "Wood",
    "Meadow", "Spring", "Summer", "Winter",
];

pub const VILLAGE_SUFFIXES: [&str; 15] = [
    "brook", "wood", "vale", "dale", "field", "stead", "ton", "ford", "cross", "bridge", "mill",
    "shore", "haven", "rest", "home",
];

/// Draws before a colliding name is accepted anyway.
pub const MAX_NAME_ATTEMPTS: usize = 50;

fn tables(tier: Tier) -> (&'static [&'static str], &'static [&'static str]) {
    match tier {
        Tier::City => (&CITY_PREFIXES, &CITY_SUFFIXES),
        Tier::Village => (&VILLAGE_PREFIXES, &VILLAGE_SUFFIXES),
    }
}

/// Draw a name for `tier`, redrawing while it collides with `used`.
///
/// Best-effort: after [`MAX_NAME_ATTEMPTS`] draws the last one is kept even
/// if it is a duplicate.
pub fn generate_name<R: Rng + ?Sized>(tier: Tier, used: &[String], rng: &mut R) -> String {
    let (prefixes, suffixes) = tables(tier);
    let mut name = String::new();
    for _ in 0..MAX_NAME_ATTEMPTS {
        let prefix = prefixes.choose(rng).copied().unwrap_or_default();
        let suffix = suffixes.choose(rng).copied().unwrap_or_default();
        name = format!("{prefix}{suffix}");
        if !used.contains(&name) {
            break;
        }
    }
    name
}
