#![no_main]

use libfuzzer_sys::fuzz_target;
use medrxiv_ideation::structure::{bulletize, structure};

fuzz_target!(|data: &[u8]| {
    // Any UTF-8 abstract must structure without panicking
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = structure(text).to_string();
        let _ = bulletize(text);
    }
});
