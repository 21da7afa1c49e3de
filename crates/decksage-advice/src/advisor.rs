use decksage_core::metrics::MetricSet;
use decksage_core::model::card::Tag;
use decksage_core::model::deck::Deck;
use tracing::{Level, event};

/// Hard cap on the number of tips returned.
pub const MAX_TIPS: usize = 4;

/// Average elixir at or below which a Hog Rider deck counts as a cycle deck.
const CYCLE_AVG_MAX: f32 = 3.1;
/// Average elixir above which the deck is flagged as expensive.
const HIGH_AVG: f32 = 4.5;
/// Wincon metric below which the deck is considered to lack a win condition.
const LOW_WINCON: f32 = 0.5;

const FAST_WINCON: &str = "Hog Rider";

const TIP_ANTI_AIR: &str = "Missing anti-air: consider Musketeer, Mega Minion or Firecracker.";
const TIP_SPLASH: &str = "Add splash damage (Baby Dragon, Valkyrie or Wizard).";
const TIP_BUILDING: &str = "Add a defensive building (Cannon, Tesla or Inferno Tower).";
const TIP_TANK_KILLER: &str =
    "Take a tank killer (Inferno Tower, Inferno Dragon or Mini P.E.K.K.A).";
const TIP_SPELL_MIX: &str = "Use a mix of spells: cover at least two size categories.";
const TIP_WINCON: &str = "Add a clear win condition (Hog Rider, Giant, Balloon or similar).";
const TIP_HIGH_COST: &str =
    "Average elixir is high: swap one or two expensive cards for cycle cards.";

const HOG_CYCLE_TIPS: &[&str] = &[
    "Cycle Hog Rider with Skeletons and Ice Spirit; keep forcing pressure.",
    "Use The Log or Zap against swarms; chip away consistently.",
    "Place the Cannon centrally for pulls; counterpush with Hog Rider.",
    "Fish for Fireball value: hit troops and the tower at once.",
];

const GENERIC_TIPS: &[&str] = &[
    "Play around your win condition; save elixir for defense.",
    "Look for spell value: hit several targets at once.",
    "Place buildings 4-2 from the river for better pulls.",
    "Rotate cheap cards to keep tempo and pressure.",
];

/// Build at most [`MAX_TIPS`] improvement tips for a scored deck.
///
/// Deterministic for identical inputs and free of duplicate strings. Gap
/// tips come first in a fixed order, archetype tips follow, and the generic
/// pool backfills until the cap is reached.
pub fn advise(deck: &Deck, metrics: &MetricSet, avg_elixir: f32) -> Vec<String> {
    let mut tips: Vec<&str> = Vec::new();

    if !deck.has_tag(Tag::AntiAir) {
        tips.push(TIP_ANTI_AIR);
    }
    if !deck.has_tag(Tag::Splash) {
        tips.push(TIP_SPLASH);
    }
    if !deck.has_tag(Tag::Building) {
        tips.push(TIP_BUILDING);
    }
    if !deck.has_tag(Tag::TankKiller) {
        tips.push(TIP_TANK_KILLER);
    }

    let spell_categories = [Tag::SmallSpell, Tag::MediumSpell, Tag::BigSpell]
        .iter()
        .filter(|&&tag| deck.has_tag(tag))
        .count();
    if spell_categories < 2 {
        tips.push(TIP_SPELL_MIX);
    }

    if metrics.wincon < LOW_WINCON {
        tips.push(TIP_WINCON);
    }
    if avg_elixir > HIGH_AVG {
        tips.push(TIP_HIGH_COST);
    }

    if deck.contains(FAST_WINCON) && avg_elixir <= CYCLE_AVG_MAX {
        tips.extend(HOG_CYCLE_TIPS.iter().copied());
    }

    for generic in GENERIC_TIPS.iter().copied() {
        if tips.len() >= MAX_TIPS {
            break;
        }
        if !tips.contains(&generic) {
            tips.push(generic);
        }
    }

    tips.truncate(MAX_TIPS);

    event!(
        target: "decksage_advice::advise",
        Level::INFO,
        deck_size = deck.len(),
        tip_count = tips.len(),
        avg_elixir,
    );

    tips.into_iter().map(str::to_string).collect()
}
