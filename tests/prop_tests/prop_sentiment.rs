use proptest::prelude::*;
use songbench::sentiment::{Sentiment, SentimentTally, clean_lyrics, extract_lyrics_from_line, normalize_reply};

proptest! {
    #[test]
    fn clean_is_idempotent(s in ".{0,200}") {
        let once = clean_lyrics(&s);
        prop_assert_eq!(clean_lyrics(&once), once);
    }

    #[test]
    fn clean_is_idempotent_on_markup(s in r#"(<[a-z/]{0,4}>|\\[nr"']|\\|[ \t\n]|[a-z]{1,5}){0,40}"#) {
        let once = clean_lyrics(&s);
        prop_assert_eq!(clean_lyrics(&once), once.clone());
        prop_assert!(!once.starts_with(' ') && !once.ends_with(' '));
        prop_assert!(!once.contains("  "));
    }

    #[test]
    fn any_reply_maps_to_one_label(reply in ".{0,60}") {
        let label = normalize_reply(&reply);
        prop_assert!(Sentiment::ALL.contains(&label));
    }

    #[test]
    fn positive_wins_over_everything(prefix in "[a-z ]{0,10}", suffix in "[a-z ]{0,10}") {
        let reply = format!("{prefix}Positive{suffix}");
        prop_assert_eq!(normalize_reply(&reply), Sentiment::Positive);
    }

    #[test]
    fn tally_total_matches_records(labels in proptest::collection::vec(0u8..3, 0..200)) {
        let mut t = SentimentTally::default();
        for l in &labels {
            t.record(Sentiment::ALL[*l as usize]);
        }
        prop_assert_eq!(t.total(), labels.len() as u64);
        if !labels.is_empty() {
            let pct: f64 = Sentiment::ALL.iter().map(|s| t.percentage(*s)).sum();
            prop_assert!((pct - 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn fourth_field_is_extracted(a in "[a-z]{1,8}", b in "[a-z]{1,8}", c in "[a-z]{1,8}", text in "[a-zA-Z ]{1,40}") {
        let line = format!("{a},{b},{c},\"{text}\",tail");
        prop_assert_eq!(extract_lyrics_from_line(&line, 3), Some(text));
    }
}
