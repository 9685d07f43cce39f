use once_cell::sync::OnceCell;
use regex::{Captures, Regex};
use std::borrow::Cow;

fn tag_re() -> &'static Regex {
    static RE: OnceCell<Regex> = OnceCell::new();
    RE.get_or_init(|| Regex::new(r"<[^>]+>").expect("tag regex"))
}

fn escape_re() -> &'static Regex {
    static RE: OnceCell<Regex> = OnceCell::new();
    // Literal backslash sequences left behind by the scraper: \n \r \" \'
    RE.get_or_init(|| Regex::new(r#"\\([nr"'])"#).expect("escape regex"))
}

fn space_re() -> &'static Regex {
    static RE: OnceCell<Regex> = OnceCell::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("whitespace regex"))
}

fn unescape_once(text: &str) -> Cow<'_, str> {
    escape_re().replace_all(text, |caps: &Captures<'_>| match &caps[1] {
        "n" => "\n",
        "r" => "\r",
        "\"" => "\"",
        _ => "'",
    })
}

/// Normalize raw lyric text: drop markup tags, turn literal escape sequences into
/// the characters they stand for, collapse whitespace runs to one space, trim.
///
/// Unescaping repeats until nothing changes, so `clean(clean(x)) == clean(x)`.
#[must_use]
pub fn clean_lyrics(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let mut current = tag_re().replace_all(text, "").into_owned();
    loop {
        match unescape_once(&current) {
            Cow::Borrowed(_) => break,
            Cow::Owned(next) => current = next,
        }
    }
    space_re().replace_all(&current, " ").trim().to_string()
}
