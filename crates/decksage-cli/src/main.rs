#![deny(warnings)]

use std::collections::HashSet;
use std::path::PathBuf;

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;

use decksage_advice::{advise, plan_substitutions};
use decksage_core::metrics::evaluate;
use decksage_core::model::catalog::Catalog;
use decksage_core::model::deck::{DECK_SIZE, Deck};

use decksage_cli::config::CliConfig;
use decksage_cli::generate::CommandGenerator;
use decksage_cli::logging::init_logging;
use decksage_cli::render::{generated_lines, proposal_bullets, save_advice, tip_bullets};
use decksage_cli::report::render_report;

/// Deck analyzer: scores an eight-card deck and suggests improvements.
#[derive(Debug, Parser)]
#[command(
    name = "decksage",
    author,
    version,
    about = "Deck scoring and improvement advice"
)]
struct Cli {
    /// Card names; commas inside an argument also separate names.
    #[arg(value_name = "CARD")]
    cards: Vec<String>,

    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Analyze a randomly sampled deck instead of the provided names.
    #[arg(long)]
    random: bool,

    /// RNG seed for --random.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Include substitution proposals in the output.
    #[arg(long)]
    suggest: bool,

    /// Route proposals through the configured external generator.
    #[arg(long)]
    generate: bool,

    /// Persist the advice document.
    #[arg(long)]
    save: bool,

    /// Directory for persisted advice (implies --save).
    #[arg(long, value_name = "DIR")]
    save_dir: Option<PathBuf>,

    /// Emit the full analysis as JSON.
    #[arg(long)]
    json: bool,

    /// List every card in the catalog and exit.
    #[arg(long)]
    list_cards: bool,
}

fn split_card_args(args: &[String]) -> Vec<String> {
    args.iter()
        .flat_map(|arg| arg.split(','))
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

fn warn_on_invalid_selection(names: &[String]) {
    let unique: HashSet<&str> = names.iter().map(String::as_str).collect();
    if unique.len() != names.len() {
        eprintln!("warning: duplicate card names in the selection");
    }
    if names.len() != DECK_SIZE {
        eprintln!(
            "warning: {} cards selected; a full deck has {DECK_SIZE}",
            names.len()
        );
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = match cli.config.as_ref() {
        Some(path) => CliConfig::from_path(path)?,
        None => CliConfig::default(),
    };
    let _logging_guard = init_logging(&config.logging)?;
    let catalog = Catalog::builtin();

    if cli.list_cards {
        for name in catalog.names() {
            println!("{name}");
        }
        return Ok(());
    }

    let names: Vec<String> = if cli.random {
        let deck = match cli.seed {
            Some(seed) => Deck::sample_with_seed(catalog, seed),
            None => Deck::sample(catalog, &mut StdRng::from_entropy()),
        };
        deck.names().iter().map(|name| name.to_string()).collect()
    } else {
        split_card_args(&cli.cards)
    };

    if names.is_empty() {
        anyhow::bail!("no cards given; pass card names or --random (see --list-cards)");
    }

    warn_on_invalid_selection(&names);

    let evaluation = evaluate(catalog, &names);
    let tips = advise(&evaluation.deck, &evaluation.metrics, evaluation.avg_elixir);
    let proposals = if cli.suggest || cli.generate {
        plan_substitutions(catalog, &names)
    } else {
        Vec::new()
    };

    if cli.json {
        let payload = serde_json::json!({
            "evaluation": &evaluation,
            "tips": &tips,
            "proposals": proposals
                .iter()
                .map(|proposal| serde_json::json!({
                    "out": proposal.out_card,
                    "in": proposal.in_card,
                    "reason": proposal.reason,
                }))
                .collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    print!("{}", render_report(&evaluation));

    let mut final_lines = tip_bullets(&tips);
    println!("\nTips:");
    for line in &final_lines {
        println!("{line}");
    }

    if !proposals.is_empty() {
        let mut swap_lines = proposal_bullets(&proposals);
        let mut source = "heuristics";

        if cli.generate {
            match CommandGenerator::from_config(&config.generation) {
                Some(generator) => match generated_lines(&generator, &names, &proposals) {
                    Ok(lines) => {
                        swap_lines = lines;
                        source = "generator";
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "generation unavailable, using heuristics");
                        eprintln!("generation unavailable ({err}); falling back to heuristics");
                    }
                },
                None => {
                    eprintln!("no generation command configured; using heuristic proposals");
                }
            }
        }

        println!("\nSuggested swaps ({source}):");
        for line in &swap_lines {
            println!("{line}");
        }
        final_lines.extend(swap_lines);
    } else if cli.suggest || cli.generate {
        println!("\nNo swaps needed: core requirements are covered.");
    }

    if cli.save || cli.save_dir.is_some() {
        let dir = cli
            .save_dir
            .clone()
            .or_else(|| config.outputs.advice_dir.clone())
            .unwrap_or_else(|| PathBuf::from("docs"));
        let path = save_advice(&dir, &names, &final_lines)?;
        println!("\nAdvice saved to {}", path.display());
    }

    Ok(())
}
