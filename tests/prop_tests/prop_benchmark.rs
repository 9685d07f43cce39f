use proptest::prelude::*;
use songbench::benchmark::{BenchmarkResults, RunResult, render_performance_report};
use std::time::Duration;

fn runs() -> impl Strategy<Value = Vec<RunResult>> {
    proptest::collection::vec(
        (0usize..3, prop_oneof![Just(1usize), Just(2), Just(4), Just(8)], proptest::option::of(1u64..100_000)),
        0..24,
    )
    .prop_map(|v| {
        let mut seen = std::collections::HashSet::new();
        v.into_iter()
            .filter(|(g, p, _)| seen.insert((*g, *p)))
            .map(|(g, p, ms)| RunResult {
                program: format!("prog_{g}"),
                processes: p,
                elapsed: ms.map(Duration::from_millis),
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn report_has_one_row_per_success(runs in runs()) {
        let results = BenchmarkResults::from_runs(&runs);
        let successes = runs.iter().filter(|r| r.elapsed.is_some()).count();
        prop_assert_eq!(results.row_count(), successes);

        let text = render_performance_report(&results, "01/01/2025 00:00:00", "test");
        let rows = text
            .lines()
            .filter(|l| l.split_whitespace().count() == 2 && l.starts_with(|c: char| c.is_ascii_digit()))
            .count();
        prop_assert_eq!(rows, successes);
        for p in &results.programs {
            prop_assert!(!p.timings.is_empty());
        }
    }
}
