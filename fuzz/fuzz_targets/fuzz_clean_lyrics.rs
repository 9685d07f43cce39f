#![no_main]
use libfuzzer_sys::fuzz_target;
use songbench::sentiment::clean_lyrics;

fuzz_target!(|data: &[u8]| {
    if data.len() > 16384 { return; }
    let s = String::from_utf8_lossy(data);
    let once = clean_lyrics(&s);
    assert_eq!(clean_lyrics(&once), once);
});
