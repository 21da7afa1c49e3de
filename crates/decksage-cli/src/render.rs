use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use chrono::Local;
use regex::Regex;

use crate::generate::{GenerateError, TextGenerator};
use decksage_advice::{MAX_TIPS, SubstitutionProposal};

/// Canonical one-line form of a swap proposal.
pub fn proposal_line(proposal: &SubstitutionProposal) -> String {
    format!(
        "REPLACE: {} -> {} — reason: {}",
        proposal.out_card, proposal.in_card, proposal.reason
    )
}

pub fn proposal_bullets(proposals: &[SubstitutionProposal]) -> Vec<String> {
    proposals
        .iter()
        .map(|proposal| format!("- {}", proposal_line(proposal)))
        .collect()
}

pub fn tip_bullets(tips: &[String]) -> Vec<String> {
    tips.iter().map(|tip| format!("- {tip}")).collect()
}

fn replacement_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"REPLACE:\s*([A-Za-z0-9 .'&]+?)\s*->\s*([A-Za-z0-9 .'&]+?)\s*(?:—|--|-)\s*reason:\s*([^\n\r]+)",
        )
        .expect("replacement pattern compiles")
    })
}

/// Pull `REPLACE: <out> -> <in> — reason: <text>` lines out of free text.
///
/// Anything that does not match the shape is ignored; garbage input yields
/// an empty list rather than an error.
pub fn parse_replacements(text: &str) -> Vec<SubstitutionProposal> {
    replacement_pattern()
        .captures_iter(text)
        .map(|caps| SubstitutionProposal {
            out_card: caps[1].trim().to_string(),
            in_card: caps[2].trim().to_string(),
            reason: caps[3].trim().to_string(),
        })
        .collect()
}

/// Prompt for the external generator: the deck plus an enumerated list of
/// deterministic options, with the required answer format spelled out.
pub fn build_prompt(deck_names: &[String], proposals: &[SubstitutionProposal]) -> String {
    let mut prompt = String::from(
        "You are a deck coach.\n\
         Pick ALL options that improve the deck (multiple lines allowed).\n\
         Answer ONLY with lines in this format:\n\
         REPLACE: <CardOut> -> <CardIn> — reason: <short reason>\n",
    );
    prompt.push_str(&format!("Deck: {}\n\nOptions:\n", deck_names.join(", ")));
    for (index, proposal) in proposals.iter().enumerate() {
        let label = (b'A' + (index as u8 % 26)) as char;
        prompt.push_str(&format!("{label}) {}\n", proposal_line(proposal)));
    }
    prompt.push_str("\nAnswer:\n");
    prompt
}

/// Run the proposals through the generator and return display lines.
///
/// Lines the generator failed to produce are backfilled from the
/// deterministic proposals, capped like the tip list.
pub fn generated_lines(
    generator: &dyn TextGenerator,
    deck_names: &[String],
    proposals: &[SubstitutionProposal],
) -> Result<Vec<String>, GenerateError> {
    let prompt = build_prompt(deck_names, proposals);
    let raw = generator.generate(&prompt)?;
    let parsed = parse_replacements(&raw);

    let mut lines: Vec<String> = parsed
        .iter()
        .map(|proposal| format!("- {}", proposal_line(proposal)))
        .collect();

    let target = MAX_TIPS.min(proposals.len());
    if lines.len() < target {
        for proposal in proposals {
            if lines.len() >= target {
                break;
            }
            // Dedupe on the swap pair; the generator words reasons its own way.
            let pair = format!("{} -> {}", proposal.out_card, proposal.in_card);
            if !lines.iter().any(|existing| existing.contains(&pair)) {
                lines.push(format!("- {}", proposal_line(proposal)));
            }
        }
    }
    Ok(lines)
}

/// Write a timestamped advice document and return its path.
pub fn save_advice(dir: &Path, deck_names: &[String], lines: &[String]) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let timestamp = Local::now().format("%Y%m%d-%H%M%S");
    let path = dir.join(format!("advice_{timestamp}.md"));

    let mut doc = String::from("# Deck advice\n\n");
    doc.push_str(&format!("Deck: {}\n\n", deck_names.join(", ")));
    doc.push_str("## Tips\n");
    for line in lines {
        doc.push_str(line);
        doc.push('\n');
    }

    fs::write(&path, doc)?;
    Ok(path)
}
