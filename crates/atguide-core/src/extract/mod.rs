//! Deterministic intent/entity extraction.
//!
//! Pure, regex-driven recognizers for the two fast-path intents: who the
//! tools are for, and which device platforms are available. Anything
//! these cannot resolve is either re-asked (who) or escalated to the
//! reasoning adapter (devices) by the dialogue layer.

pub mod device;
pub mod who;

pub use device::{DeviceCategory, DeviceExtraction, clarification_question, extract_devices};
pub use who::{WhoExtraction, extract_who};
