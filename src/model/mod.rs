//! Data model shared by the extractor and the classifier.
//!
//! Fragments flow in from the extraction backend; an [`Outline`] flows out
//! to whatever persists it.

mod fragment;
mod outline;

pub use fragment::Fragment;
pub use outline::{Heading, HeadingLevel, Outline};
