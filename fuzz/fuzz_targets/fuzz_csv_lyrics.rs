#![no_main]
use libfuzzer_sys::fuzz_target;
use songbench::sentiment::{LyricRows, extract_lyrics_from_line};

fuzz_target!(|data: &[u8]| {
    if data.len() > 16384 { return; }
    let mut rows = LyricRows::new(data, 3);
    while let Ok(Some(_)) = rows.next_row() {}
    let _ = extract_lyrics_from_line(&String::from_utf8_lossy(data), 3);
});
