use std::fmt::Write;

use super::label::{Sentiment, SentimentTally};
use super::pipeline::SentimentSummary;

/// Interpretation lines chosen from the tally.
#[must_use]
pub fn interpretation(tally: &SentimentTally, neutral_threshold_pct: f64) -> Vec<&'static str> {
    let mut lines = Vec::with_capacity(2);
    lines.push(if tally.positive > tally.negative {
        "• Predominância de letras com sentimento POSITIVO"
    } else if tally.negative > tally.positive {
        "• Predominância de letras com sentimento NEGATIVO"
    } else {
        "• Equilíbrio entre sentimentos positivos e negativos"
    });
    if tally.percentage(Sentiment::Neutral) > neutral_threshold_pct {
        lines.push("• Alta porcentagem de letras neutras/ambíguas");
    }
    lines
}

#[must_use]
pub fn render_sentiment_report(summary: &SentimentSummary, timestamp: &str, neutral_threshold_pct: f64) -> String {
    let tally = &summary.tally;
    let mut out = String::new();
    let _ = writeln!(out, "Análise de Sentimentos das Letras do Spotify");
    let _ = writeln!(out, "{}\n", "=".repeat(50));
    let _ = writeln!(out, "Data da análise: {timestamp}");
    let _ = writeln!(out, "Modelo utilizado: {}", summary.model);
    let _ = writeln!(out, "Músicas processadas: {}", summary.processed);
    let _ = writeln!(out, "Músicas ignoradas: {}\n", summary.skipped);
    let _ = writeln!(out, "Distribuição de Sentimentos:");
    let _ = writeln!(out, "{}", "-".repeat(30));
    for s in Sentiment::ALL {
        let _ = writeln!(out, "{}: {} músicas ({:.1}%)", s.label(), tally.count(s), tally.percentage(s));
    }
    let _ = writeln!(out, "\nTotal: {} músicas", tally.total());
    let _ = writeln!(out, "\nInterpretação dos Resultados:");
    let _ = writeln!(out, "{}", "-".repeat(30));
    for line in interpretation(tally, neutral_threshold_pct) {
        let _ = writeln!(out, "{line}");
    }
    out
}

/// Console summary table printed at the end of a run.
#[must_use]
pub fn render_console_summary(summary: &SentimentSummary) -> String {
    let tally = &summary.tally;
    let mut out = String::new();
    let _ = writeln!(out, "\n{}", "=".repeat(60));
    let _ = writeln!(out, "RESULTADOS DA ANÁLISE DE SENTIMENTOS");
    let _ = writeln!(out, "{}", "=".repeat(60));
    let _ = writeln!(out, "Músicas processadas: {}", summary.processed);
    let _ = writeln!(out, "Músicas ignoradas: {}", summary.skipped);
    let _ = writeln!(out, "Modelo utilizado: {}\n", summary.model);
    let _ = writeln!(out, "Distribuição de Sentimentos:");
    let _ = writeln!(out, "{}", "-".repeat(30));
    for s in Sentiment::ALL {
        let _ = writeln!(out, "{:>10}: {:>4} músicas ({:>5.1}%)", s.label(), tally.count(s), tally.percentage(s));
    }
    let _ = writeln!(out, "{}", "-".repeat(30));
    let _ = writeln!(out, "{:>10}: {:>4} músicas", "Total", tally.total());
    out
}
