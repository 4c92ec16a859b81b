//! Speech engine adapters.

mod placeholder;

pub use placeholder::{PlaceholderRecognizer, PlaceholderSynthesizer};
