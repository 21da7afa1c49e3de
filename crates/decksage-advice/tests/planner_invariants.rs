use decksage_advice::{plan_substitutions, pools};
use decksage_core::model::card::Tag;
use decksage_core::model::catalog::Catalog;
use decksage_core::model::deck::Deck;
use std::collections::HashSet;

#[test]
fn proposals_never_reuse_an_out_or_in_card() {
    let catalog = Catalog::builtin();
    for seed in 0..128 {
        let deck = Deck::sample_with_seed(catalog, seed);
        let names: Vec<String> = deck.names().iter().map(|n| n.to_string()).collect();
        let proposals = plan_substitutions(catalog, &names);

        let mut outs = HashSet::new();
        let mut ins = HashSet::new();
        for proposal in &proposals {
            assert!(
                outs.insert(proposal.out_card.clone()),
                "seed {seed}: out card {} reused",
                proposal.out_card
            );
            assert!(
                ins.insert(proposal.in_card.clone()),
                "seed {seed}: in card {} reused",
                proposal.in_card
            );
        }
    }
}

#[test]
fn proposals_respect_deck_membership_and_protection() {
    let catalog = Catalog::builtin();
    for seed in 0..128 {
        let deck = Deck::sample_with_seed(catalog, seed);
        let names: Vec<String> = deck.names().iter().map(|n| n.to_string()).collect();
        for proposal in plan_substitutions(catalog, &names) {
            assert_ne!(proposal.out_card, proposal.in_card, "seed {seed}");
            assert!(
                deck.contains(&proposal.out_card),
                "seed {seed}: out card {} not in deck",
                proposal.out_card
            );
            assert!(
                !deck.contains(&proposal.in_card),
                "seed {seed}: in card {} already in deck",
                proposal.in_card
            );
            assert!(
                !pools::is_untouchable(&proposal.out_card),
                "seed {seed}: untouchable {} removed",
                proposal.out_card
            );
            let out_record = catalog.get(&proposal.out_card).unwrap();
            assert!(
                !out_record.has_tag(Tag::Wincon),
                "seed {seed}: wincon {} removed",
                proposal.out_card
            );
        }
    }
}

#[test]
fn sole_building_is_only_swapped_for_another_building() {
    let catalog = Catalog::builtin();
    for seed in 0..128 {
        let deck = Deck::sample_with_seed(catalog, seed);
        if deck.count_tag(Tag::Building) != 1 {
            continue;
        }
        let names: Vec<String> = deck.names().iter().map(|n| n.to_string()).collect();
        for proposal in plan_substitutions(catalog, &names) {
            let out_record = catalog.get(&proposal.out_card).unwrap();
            if out_record.has_tag(Tag::Building) {
                let in_record = catalog.get(&proposal.in_card).unwrap();
                assert!(
                    in_record.has_tag(Tag::Building),
                    "seed {seed}: lost the only building {}",
                    proposal.out_card
                );
            }
        }
    }
}

#[test]
fn wincon_gap_is_always_attempted() {
    let catalog = Catalog::builtin();
    // No wincon, plenty of removable cards, everything else covered enough
    // that the wincon swap cannot be crowded out.
    let proposals = plan_substitutions(
        catalog,
        &[
            "Knight",
            "Musketeer",
            "Cannon",
            "Zap",
            "Fireball",
            "Valkyrie",
            "Skeleton Army",
            "Ice Spirit",
        ],
    );
    let wincon_pool: Vec<&str> = pools::FAST_WINCONS
        .iter()
        .chain(pools::HEAVY_WINCONS)
        .copied()
        .collect();
    assert!(
        proposals
            .iter()
            .any(|p| wincon_pool.contains(&p.in_card.as_str())),
        "no wincon proposal in {proposals:?}"
    );
}

#[test]
fn planning_is_idempotent() {
    let catalog = Catalog::builtin();
    let names = ["Knight", "Musketeer", "Cannon", "Zap"];
    let first = plan_substitutions(catalog, &names);
    let second = plan_substitutions(catalog, &names);
    assert_eq!(first, second);
}
