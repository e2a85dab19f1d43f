//! Fuzzing library for medrxiv-ideation.
//!
//! Targets cover the text and wire parsers that see untrusted input:
//! the abstract structurer, the create-hypothesis event stream splitter
//! and the preprint details page decoder.
//!
//! # Usage
//!
//! ```bash
//! cd crates/ideation-fuzz
//! cargo +nightly fuzz run fuzz_structure_abstract -- -max_total_time=60
//! ```

pub use medrxiv_ideation::{client::stream, models, structure};
