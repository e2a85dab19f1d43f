#![no_main]

use libfuzzer_sys::fuzz_target;
use medrxiv_ideation::client::stream::JsonObjectStream;
use medrxiv_ideation::models::StreamEvent;

fuzz_target!(|data: &[u8]| {
    // Feed the bytes in uneven chunks, as the network would
    let mut stream = JsonObjectStream::new();
    for chunk in data.chunks(7) {
        for value in stream.push(chunk) {
            if let Ok(event) = serde_json::from_value::<StreamEvent>(value) {
                let _ = event.hypothesis_id();
            }
        }
    }
});
