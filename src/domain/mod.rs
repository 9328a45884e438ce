//! Domain types: plain, write-once structs describing bars, the three
//! pattern stages, and their downstream artifacts. Nothing here holds a
//! reference into a bar slice — every cross-reference is a `usize` index.

pub mod bar;
pub mod direction;
pub mod feature;
pub mod impulse;
pub mod label;
pub mod pattern;
pub mod pullback;
pub mod structure;
pub mod summary;
pub mod trade;

pub use bar::{validate_bars, Bar, InputError};
pub use direction::Direction;
pub use feature::FeatureVector;
pub use impulse::Impulse;
pub use label::Label;
pub use pattern::{Pattern, ScanCandidate};
pub use pullback::Pullback;
pub use structure::{Confirmation, Structure};
pub use summary::PatternDetectionSummary;
pub use trade::TradeRecord;
