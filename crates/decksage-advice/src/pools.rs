//! Named card tables the planner draws from.
//!
//! Kept as constants so the lists can be audited and extended in one place.

/// Cards the planner never proposes removing: the high-value spells and the
/// defensive building staple that anchor most decks.
pub const UNTOUCHABLE: &[&str] = &[
    "Fireball",
    "Poison",
    "Rocket",
    "Lightning",
    "Inferno Tower",
    "Zap",
    "The Log",
];

/// Minimal-cost cycle fillers, kept out of removal candidates while any
/// alternative exists.
pub const CYCLE_FILLERS: &[&str] = &["Skeletons", "Ice Spirit", "Fire Spirit", "Electro Spirit"];

/// Win conditions suited to cheap, fast decks.
pub const FAST_WINCONS: &[&str] = &["Hog Rider", "Miner", "Goblin Barrel", "Mortar"];

/// Win conditions suited to heavier decks.
pub const HEAVY_WINCONS: &[&str] = &[
    "Royal Giant",
    "Balloon",
    "Graveyard",
    "Goblin Drill",
    "Battle Ram",
];

pub const SUPPORT_POOL: &[&str] = &[
    "Musketeer",
    "Firecracker",
    "Valkyrie",
    "Electro Wizard",
    "Baby Dragon",
];

pub const SMALL_SPELLS: &[&str] = &[
    "Zap",
    "The Log",
    "Giant Snowball",
    "Arrows",
    "Barbarian Barrel",
    "Royal Delivery",
];

pub const BIG_SPELLS: &[&str] = &["Fireball", "Poison", "Rocket", "Lightning", "Earthquake"];

pub const ANTI_AIR_POOL: &[&str] = &[
    "Musketeer",
    "Firecracker",
    "Dart Goblin",
    "Electro Wizard",
    "Mega Minion",
    "Flying Machine",
];

/// Buildings tried in order when the deck lacks one.
pub const BUILDINGS: &[&str] = &["Bomb Tower", "Tesla", "Cannon"];

/// The swap-in for a missing tank killer; closes the building gap too.
pub const TANK_KILLER_BUILDING: &str = "Inferno Tower";

pub fn is_untouchable(name: &str) -> bool {
    UNTOUCHABLE.contains(&name)
}

pub fn is_cycle_filler(name: &str) -> bool {
    CYCLE_FILLERS.contains(&name)
}
