use decksage_core::metrics::Evaluation;

fn percent(value: f32) -> i32 {
    (value * 100.0).round() as i32
}

/// Plain-text analysis report: deck list, average cost, metric lines.
pub fn render_report(evaluation: &Evaluation) -> String {
    let metrics = &evaluation.metrics;
    let mut out = String::new();
    out.push_str(&format!("Deck: {}\n", evaluation.deck.names().join(", ")));
    out.push_str(&format!("Average elixir: {:.2}\n", evaluation.avg_elixir));
    out.push_str(&format!("Overall:       {:>3} / 100\n", percent(metrics.overall)));
    out.push_str(&format!("Balance:       {:>3} / 100\n", percent(metrics.balance)));
    out.push_str(&format!("Coverage:      {:>3} / 100\n", percent(metrics.coverage)));
    out.push_str(&format!("Spells:        {:>3} / 100\n", percent(metrics.spells)));
    out.push_str(&format!("Win condition: {:>3} / 100\n", percent(metrics.wincon)));
    out.push_str(&format!("Synergy:       {:>3} / 100\n", percent(metrics.synergy)));
    out
}
