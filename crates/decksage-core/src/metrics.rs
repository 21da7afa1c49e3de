use crate::model::card::{Role, Tag};
use crate::model::catalog::Catalog;
use crate::model::deck::{DECK_SIZE, Deck};
use serde::Serialize;

/// Weights governing the relative value of each metric in the overall score.
#[derive(Debug, Clone, Copy)]
pub struct ScoreWeights {
    pub balance: f32,
    pub coverage: f32,
    pub spells: f32,
    pub wincon: f32,
    pub synergy: f32,
    /// Average cost above which the overall score starts to lose points.
    pub cost_penalty_threshold: f32,
    /// Points lost per elixir above the threshold.
    pub cost_penalty_rate: f32,
    /// Upper bound on the cost penalty.
    pub cost_penalty_cap: f32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            balance: 0.25,
            coverage: 0.20,
            spells: 0.15,
            wincon: 0.20,
            synergy: 0.20,
            cost_penalty_threshold: 4.5,
            cost_penalty_rate: 0.1,
            cost_penalty_cap: 0.2,
        }
    }
}

/// The six deck scores, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricSet {
    pub balance: f32,
    pub coverage: f32,
    pub spells: f32,
    pub wincon: f32,
    pub synergy: f32,
    pub overall: f32,
}

/// Result of scoring one name list: the resolved deck, its average cost and
/// all metrics. Plain request/response value, no shared state.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub deck: Deck,
    pub avg_elixir: f32,
    pub metrics: MetricSet,
}

fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

/// Arithmetic mean of card costs, rounded to two decimals. 0.0 when empty.
pub fn average_elixir(deck: &Deck) -> f32 {
    if deck.is_empty() {
        return 0.0;
    }
    let total: f32 = deck.cards().iter().map(|card| card.elixir).sum();
    round2(total / deck.len() as f32)
}

/// Offense/defense balance. Buildings count toward defense on top of their
/// roles, so a defensive building is counted twice on purpose.
///
/// The denominator is the fixed deck size; under-filled decks are scored
/// against the full eight slots rather than their own length.
pub fn role_balance_score(deck: &Deck) -> f32 {
    if deck.is_empty() {
        return 0.0;
    }
    let offense = deck.count_role(Role::Offense) as f32;
    let defense = (deck.count_role(Role::Defense) + deck.count_tag(Tag::Building)) as f32;
    let score = 1.0 - (offense - defense).abs() / DECK_SIZE as f32;
    score.clamp(0.0, 1.0)
}

/// Fraction of the four defensive coverage checks satisfied.
pub fn coverage_score(deck: &Deck) -> f32 {
    let bits = [Tag::AntiAir, Tag::Splash, Tag::Building, Tag::TankKiller]
        .iter()
        .filter(|&&tag| deck.has_tag(tag))
        .count();
    bits as f32 / 4.0
}

/// Fraction of the three spell size categories present.
pub fn spell_coverage_score(deck: &Deck) -> f32 {
    let bits = [Tag::SmallSpell, Tag::MediumSpell, Tag::BigSpell]
        .iter()
        .filter(|&&tag| deck.has_tag(tag))
        .count();
    bits as f32 / 3.0
}

/// 0.0 without a win condition, 0.5 with one, 1.0 with two or more.
pub fn win_condition_score(deck: &Deck) -> f32 {
    (deck.count_tag(Tag::Wincon) as f32 / 2.0).min(1.0)
}

/// Additive bonus for known-good pairings plus a cheap-deck bonus.
pub fn synergy_score(deck: &Deck, avg_elixir: f32) -> f32 {
    if deck.is_empty() {
        return 0.0;
    }
    let mut score: f32 = 0.0;
    if deck.has_tag(Tag::Wincon) && deck.has_tag(Tag::Building) {
        score += 0.2;
    }
    if deck.has_tag(Tag::Wincon) && deck.has_tag(Tag::SmallSpell) {
        score += 0.2;
    }
    if deck.has_tag(Tag::Splash) && deck.has_tag(Tag::Swarm) {
        score += 0.1;
    }
    if deck.has_tag(Tag::TankKiller) && deck.has_tag(Tag::Splash) {
        score += 0.1;
    }
    if avg_elixir <= 3.1 {
        score += 0.2;
    } else if avg_elixir <= 4.0 {
        score += 0.1;
    }
    score.clamp(0.0, 1.0)
}

/// Weighted sum of the five base metrics minus the expensive-deck penalty.
pub fn overall_score(metrics: &MetricSet, avg_elixir: f32, weights: &ScoreWeights) -> f32 {
    let base = weights.balance * metrics.balance
        + weights.coverage * metrics.coverage
        + weights.spells * metrics.spells
        + weights.wincon * metrics.wincon
        + weights.synergy * metrics.synergy;
    let penalty = ((avg_elixir - weights.cost_penalty_threshold) * weights.cost_penalty_rate)
        .clamp(0.0, weights.cost_penalty_cap);
    (base - penalty).clamp(0.0, 1.0)
}

/// Normalize the requested names and compute every metric.
///
/// The single public scoring entry point. Tolerates any input count,
/// including zero; the caller owns the exactly-eight-unique rule.
pub fn evaluate<S: AsRef<str>>(catalog: &Catalog, names: &[S]) -> Evaluation {
    let deck = Deck::normalize(catalog, names);
    let avg_elixir = average_elixir(&deck);
    let weights = ScoreWeights::default();
    let mut metrics = MetricSet {
        balance: role_balance_score(&deck),
        coverage: coverage_score(&deck),
        spells: spell_coverage_score(&deck),
        wincon: win_condition_score(&deck),
        synergy: synergy_score(&deck, avg_elixir),
        overall: 0.0,
    };
    metrics.overall = overall_score(&metrics, avg_elixir, &weights);
    Evaluation {
        deck,
        avg_elixir,
        metrics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deck(names: &[&str]) -> Deck {
        Deck::normalize(Catalog::builtin(), names)
    }

    #[test]
    fn empty_deck_scores_zero_everywhere() {
        let result = evaluate::<&str>(Catalog::builtin(), &[]);
        assert_eq!(result.avg_elixir, 0.0);
        assert_eq!(result.metrics.balance, 0.0);
        assert_eq!(result.metrics.coverage, 0.0);
        assert_eq!(result.metrics.spells, 0.0);
        assert_eq!(result.metrics.wincon, 0.0);
        assert_eq!(result.metrics.synergy, 0.0);
        assert_eq!(result.metrics.overall, 0.0);
    }

    #[test]
    fn average_elixir_rounds_to_two_decimals() {
        let deck = deck(&["Hog Rider", "Skeletons", "Ice Spirit"]);
        // (4 + 1 + 1) / 3 = 2.0
        assert!((average_elixir(&deck) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn average_elixir_is_order_invariant() {
        let forward = deck(&["Hog Rider", "Fireball", "Zap", "Cannon"]);
        let backward = deck(&["Cannon", "Zap", "Fireball", "Hog Rider"]);
        assert_eq!(average_elixir(&forward), average_elixir(&backward));
    }

    #[test]
    fn balance_counts_buildings_as_defense() {
        // Mortar: offense role + building tag. offense 1, defense 0 + 1.
        let deck = deck(&["Mortar"]);
        assert!((role_balance_score(&deck) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn coverage_moves_in_quarter_steps() {
        assert_eq!(coverage_score(&deck(&["Knight"])), 0.0);
        assert_eq!(coverage_score(&deck(&["Cannon"])), 0.25);
        assert_eq!(coverage_score(&deck(&["Cannon", "Musketeer"])), 0.75);
    }

    #[test]
    fn win_condition_score_caps_at_one() {
        assert_eq!(win_condition_score(&deck(&["Knight"])), 0.0);
        assert_eq!(win_condition_score(&deck(&["Hog Rider"])), 0.5);
        assert_eq!(win_condition_score(&deck(&["Hog Rider", "Miner"])), 1.0);
        assert_eq!(
            win_condition_score(&deck(&["Hog Rider", "Miner", "Balloon"])),
            1.0
        );
    }

    #[test]
    fn synergy_rewards_wincon_pairings() {
        let bare = deck(&["Knight"]);
        // avg 3.0 -> cheap-deck bonus only.
        assert!((synergy_score(&bare, 3.0) - 0.2).abs() < 1e-6);

        let paired = deck(&["Hog Rider", "Cannon", "Zap"]);
        // wincon+building, wincon+small spell, avg 3.0 bonus.
        assert!((synergy_score(&paired, 3.0) - 0.6).abs() < 1e-6);
    }

    #[test]
    fn synergy_cost_bonus_tiers() {
        let d = deck(&["Knight"]);
        assert!((synergy_score(&d, 3.1) - 0.2).abs() < 1e-6);
        assert!((synergy_score(&d, 3.5) - 0.1).abs() < 1e-6);
        assert!(synergy_score(&d, 4.5).abs() < 1e-6);
    }

    #[test]
    fn overall_penalty_kicks_in_above_threshold() {
        let metrics = MetricSet {
            balance: 1.0,
            coverage: 1.0,
            spells: 1.0,
            wincon: 1.0,
            synergy: 1.0,
            overall: 0.0,
        };
        let weights = ScoreWeights::default();
        assert!((overall_score(&metrics, 4.5, &weights) - 1.0).abs() < 1e-6);
        // avg 5.0 -> penalty min(0.2, 0.5 * 0.1) = 0.05.
        assert!((overall_score(&metrics, 5.0, &weights) - 0.95).abs() < 1e-6);
        // Far past the threshold the penalty caps at 0.2.
        assert!((overall_score(&metrics, 9.0, &weights) - 0.8).abs() < 1e-6);
    }

    #[test]
    fn overall_clamps_to_unit_interval() {
        let metrics = MetricSet {
            balance: 0.0,
            coverage: 0.0,
            spells: 0.0,
            wincon: 0.0,
            synergy: 0.0,
            overall: 0.0,
        };
        let weights = ScoreWeights::default();
        assert_eq!(overall_score(&metrics, 9.0, &weights), 0.0);
    }

    #[test]
    fn evaluate_is_idempotent() {
        let names = ["Hog Rider", "Fireball", "Zap", "Cannon"];
        let first = evaluate(Catalog::builtin(), &names);
        let second = evaluate(Catalog::builtin(), &names);
        assert_eq!(first.avg_elixir, second.avg_elixir);
        assert_eq!(first.metrics, second.metrics);
        assert_eq!(first.deck.names(), second.deck.names());
    }

    #[test]
    fn all_metrics_stay_in_unit_interval_for_sampled_decks() {
        let catalog = Catalog::builtin();
        for seed in 0..64 {
            let deck = Deck::sample_with_seed(catalog, seed);
            let names = deck.names();
            let result = evaluate(catalog, &names);
            let m = result.metrics;
            for (label, value) in [
                ("balance", m.balance),
                ("coverage", m.coverage),
                ("spells", m.spells),
                ("wincon", m.wincon),
                ("synergy", m.synergy),
                ("overall", m.overall),
            ] {
                assert!(
                    (0.0..=1.0).contains(&value),
                    "seed {seed}: {label} = {value} out of range"
                );
            }
        }
    }
}
