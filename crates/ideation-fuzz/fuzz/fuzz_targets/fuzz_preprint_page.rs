#![no_main]

use libfuzzer_sys::fuzz_target;
use medrxiv_ideation::models::{DetailsPage, FetchCursor};

fuzz_target!(|data: &[u8]| {
    // Decoding may fail, but a decoded page must advance the cursor without panicking
    if let Ok(page) = serde_json::from_slice::<DetailsPage>(data) {
        let _ = FetchCursor::start().advance(&page);
    }
});
