//! TCX (Training Center XML) document building.
//!
//! Turns a session summary and its reconciled track into the markup Garmin
//! Connect imports: one activity holding one lap holding one track.

pub mod document;
pub mod xml;

pub use document::{build_document, lap_element, trackpoint, NAMESPACES, TCX_NAMESPACE};
pub use xml::Element;
