//! Delivery module - aggregate result of a fan-out.

mod outcome;

pub use outcome::{DeliveryFailure, DeliveryOutcome};
