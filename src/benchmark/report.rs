use std::fmt::Write;

use super::options::BenchmarkResults;

const CONCLUSIONS: [&str; 4] = [
    "• O paralelismo é mais efetivo para tarefas computacionalmente intensivas",
    "• Overhead de comunicação MPI limita speedup com muitos processos",
    "• I/O de arquivo pode ser gargalo em datasets grandes",
    "• Balanceamento de carga afeta diretamente a eficiência",
];

/// Render the performance report. One table per program, rows sorted by process count.
#[must_use]
pub fn render_performance_report(results: &BenchmarkResults, timestamp: &str, system: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "ANÁLISE DE DESEMPENHO - PROCESSAMENTO PARALELO");
    let _ = writeln!(out, "{}\n", "=".repeat(50));
    let _ = writeln!(out, "Data da análise: {timestamp}");
    let _ = writeln!(out, "Sistema: {system}\n");

    for prog in &results.programs {
        let _ = writeln!(out, "PROGRAMA: {}", prog.program.to_uppercase());
        let _ = writeln!(out, "{}", "-".repeat(30));
        let _ = writeln!(out, "{:<10} {:<12}", "Processos", "Tempo (s)");
        let _ = writeln!(out, "{}", "-".repeat(25));
        for (procs, secs) in &prog.timings {
            let _ = writeln!(out, "{procs:<10} {secs:<12.2}");
        }
        let _ = writeln!(out, "\n{}\n", "=".repeat(50));
    }

    let _ = writeln!(out, "CONCLUSÕES GERAIS:");
    let _ = writeln!(out, "{}", "-".repeat(20));
    for line in CONCLUSIONS {
        let _ = writeln!(out, "{line}");
    }
    out
}
