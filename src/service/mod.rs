pub mod extractor;
pub mod ics;
