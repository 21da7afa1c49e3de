use crate::pools;
use decksage_core::metrics::average_elixir;
use decksage_core::model::card::{CardRecord, Role, Tag};
use decksage_core::model::catalog::Catalog;
use decksage_core::model::deck::Deck;
use std::collections::HashSet;
use tracing::{Level, event};

/// Decks need at least this many support-role cards.
const MIN_SUPPORT_CARDS: usize = 2;
/// Average elixir at or below which the fast wincon pool is used.
const FAST_WINCON_AVG_MAX: f32 = 3.3;
/// Average elixir above which the wincon swap removes a heavy card.
const HEAVY_REMOVAL_AVG: f32 = 4.0;

const REASON_TANK_KILLER: &str = "counter tanks (tank killer plus building)";
const REASON_WINCON: &str = "clear win condition";
const REASON_SUPPORT: &str = "support, anti-air and splash presence";
const REASON_BUILDING: &str = "defensive building";
const REASON_SMALL_SPELL: &str = "always need one small spell";
const REASON_BIG_SPELL: &str = "at least one medium or big spell";
const REASON_ANTI_AIR: &str = "anti-air is missing";

/// One concrete swap: remove `out_card`, add `in_card`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionProposal {
    pub out_card: String,
    pub in_card: String,
    pub reason: String,
}

/// Missing composition requirements, computed once per planning run.
#[derive(Debug, Clone, Copy, Default)]
pub struct Gaps {
    pub building: bool,
    pub tank_killer: bool,
    pub wincon: bool,
    pub support: bool,
    pub small_spell: bool,
    pub big_spell: bool,
    pub anti_air: bool,
}

impl Gaps {
    pub fn detect(deck: &Deck) -> Self {
        Self {
            building: !deck.has_tag(Tag::Building),
            tank_killer: !deck.has_tag(Tag::TankKiller),
            wincon: !deck.has_tag(Tag::Wincon),
            support: deck.count_role(Role::Support) < MIN_SUPPORT_CARDS,
            small_spell: !deck.has_tag(Tag::SmallSpell),
            big_spell: !(deck.has_tag(Tag::MediumSpell) || deck.has_tag(Tag::BigSpell)),
            anti_air: !deck.has_tag(Tag::AntiAir),
        }
    }
}

/// Per-run planning state: accepted proposals plus the names already spent
/// on either side of a swap.
struct PlanRun<'a> {
    catalog: &'a Catalog,
    deck: &'a Deck,
    proposals: Vec<SubstitutionProposal>,
    used_out: HashSet<&'a str>,
    used_in: HashSet<&'a str>,
}

impl<'a> PlanRun<'a> {
    fn new(catalog: &'a Catalog, deck: &'a Deck) -> Self {
        Self {
            catalog,
            deck,
            proposals: Vec::new(),
            used_out: HashSet::new(),
            used_in: HashSet::new(),
        }
    }

    /// Choose a card to remove.
    ///
    /// Wincons, untouchables and already-used cards are avoided first; if
    /// that leaves nothing the restrictions relax in stages down to the raw
    /// deck. Cheap cycle fillers are kept out of consideration while any
    /// alternative remains. Heavy preference removes the most expensive
    /// non-building card first; light preference removes the cheapest card,
    /// cycle-tagged first on cost ties.
    fn pick_out(&self, prefer_heavy: bool) -> Option<&'a CardRecord> {
        let deck_cards = self.deck.cards();
        let mut candidates: Vec<&'a CardRecord> = deck_cards
            .iter()
            .filter(|card| {
                !card.has_tag(Tag::Wincon)
                    && !self.used_out.contains(card.name.as_str())
                    && !pools::is_untouchable(&card.name)
            })
            .collect();
        if candidates.is_empty() {
            candidates = deck_cards
                .iter()
                .filter(|card| !self.used_out.contains(card.name.as_str()))
                .collect();
        }
        if candidates.is_empty() {
            candidates = deck_cards.iter().collect();
        }

        let non_fillers: Vec<&'a CardRecord> = candidates
            .iter()
            .copied()
            .filter(|card| !pools::is_cycle_filler(&card.name))
            .collect();
        if !non_fillers.is_empty() {
            candidates = non_fillers;
        }

        if prefer_heavy {
            candidates.sort_by(|a, b| {
                b.elixir
                    .total_cmp(&a.elixir)
                    .then_with(|| a.has_tag(Tag::Building).cmp(&b.has_tag(Tag::Building)))
            });
        } else {
            candidates.sort_by(|a, b| {
                a.elixir
                    .total_cmp(&b.elixir)
                    .then_with(|| b.has_tag(Tag::Cycle).cmp(&a.has_tag(Tag::Cycle)))
            });
        }

        candidates
            .iter()
            .copied()
            .find(|card| !self.used_out.contains(card.name.as_str()))
            .or_else(|| candidates.first().copied())
    }

    fn would_lose_last_building(&self, out: &CardRecord, in_name: &str) -> bool {
        if !out.has_tag(Tag::Building) {
            return false;
        }
        let incoming_is_building = self
            .catalog
            .get(in_name)
            .is_some_and(|card| card.has_tag(Tag::Building));
        if incoming_is_building {
            return false;
        }
        self.deck.count_tag(Tag::Building) == 1
    }

    /// Record a proposal if it passes every safety check; invalid swaps are
    /// dropped silently.
    fn safe_append(&mut self, out: Option<&'a CardRecord>, in_name: &'a str, reason: &str) -> bool {
        let Some(out) = out else {
            return false;
        };
        let code = if out.name.is_empty() || in_name.is_empty() || out.name == in_name {
            Some("degenerate_pair")
        } else if !self.deck.contains(&out.name) {
            Some("out_not_in_deck")
        } else if out.has_tag(Tag::Wincon) {
            Some("out_is_wincon")
        } else if pools::is_untouchable(&out.name) {
            Some("out_untouchable")
        } else if self.would_lose_last_building(out, in_name) {
            Some("last_building")
        } else if self.used_out.contains(out.name.as_str()) {
            Some("out_already_used")
        } else if self.used_in.contains(in_name) {
            Some("in_already_used")
        } else {
            None
        };

        if let Some(code) = code {
            event!(
                target: "decksage_advice::plan",
                Level::DEBUG,
                out_card = %out.name,
                in_card = %in_name,
                code,
                "proposal rejected"
            );
            return false;
        }

        event!(
            target: "decksage_advice::plan",
            Level::INFO,
            out_card = %out.name,
            in_card = %in_name,
            reason,
            "proposal accepted"
        );
        self.used_out.insert(out.name.as_str());
        self.used_in.insert(in_name);
        self.proposals.push(SubstitutionProposal {
            out_card: out.name.clone(),
            in_card: in_name.to_string(),
            reason: reason.to_string(),
        });
        true
    }
}

/// Normalize the requested names and plan swaps for the resulting deck.
pub fn plan_substitutions<S: AsRef<str>>(
    catalog: &Catalog,
    names: &[S],
) -> Vec<SubstitutionProposal> {
    let deck = Deck::normalize(catalog, names);
    plan_for_deck(catalog, &deck)
}

/// Propose at most one swap per detected gap, in fixed priority order:
/// tank killer, wincon, support, building, small spell, big spell, anti-air.
///
/// The order is deliberate; gap interactions are order-sensitive (the tank
/// killer swap brings a building with it, which the building gap then sees
/// as already used).
pub fn plan_for_deck(catalog: &Catalog, deck: &Deck) -> Vec<SubstitutionProposal> {
    let gaps = Gaps::detect(deck);
    let avg = average_elixir(deck);
    let mut run = PlanRun::new(catalog, deck);

    if gaps.tank_killer {
        let out = run.pick_out(true);
        run.safe_append(out, pools::TANK_KILLER_BUILDING, REASON_TANK_KILLER);
    }

    if gaps.wincon {
        let pool = if avg <= FAST_WINCON_AVG_MAX {
            pools::FAST_WINCONS
        } else {
            pools::HEAVY_WINCONS
        };
        if let Some(wincon) = pool.iter().copied().find(|name| !deck.contains(name)) {
            if !run.used_in.contains(wincon) {
                let out = run.pick_out(avg > HEAVY_REMOVAL_AVG);
                run.safe_append(out, wincon, REASON_WINCON);
            }
        }
    }

    if gaps.support {
        if let Some(support) = pools::SUPPORT_POOL
            .iter()
            .copied()
            .find(|name| !deck.contains(name))
        {
            if !run.used_in.contains(support) {
                let out = run.pick_out(false);
                run.safe_append(out, support, REASON_SUPPORT);
            }
        }
    }

    if gaps.building {
        for building in pools::BUILDINGS.iter().copied() {
            if deck.contains(building) || run.used_in.contains(building) {
                continue;
            }
            let out = run.pick_out(true);
            if run.safe_append(out, building, REASON_BUILDING) {
                break;
            }
        }
    }

    if gaps.small_spell {
        if let Some(spell) = pools::SMALL_SPELLS
            .iter()
            .copied()
            .find(|name| !deck.contains(name))
        {
            if !run.used_in.contains(spell) {
                let out = run.pick_out(false);
                run.safe_append(out, spell, REASON_SMALL_SPELL);
            }
        }
    }

    if gaps.big_spell {
        if let Some(spell) = pools::BIG_SPELLS
            .iter()
            .copied()
            .find(|name| !deck.contains(name))
        {
            if !run.used_in.contains(spell) {
                let out = run.pick_out(true);
                run.safe_append(out, spell, REASON_BIG_SPELL);
            }
        }
    }

    if gaps.anti_air {
        if let Some(card) = pools::ANTI_AIR_POOL
            .iter()
            .copied()
            .find(|name| !deck.contains(name))
        {
            if !run.used_in.contains(card) {
                let out = run.pick_out(false);
                run.safe_append(out, card, REASON_ANTI_AIR);
            }
        }
    }

    event!(
        target: "decksage_advice::plan",
        Level::INFO,
        deck_size = deck.len(),
        proposal_count = run.proposals.len(),
        avg_elixir = avg,
        "planning complete"
    );

    run.proposals
}
