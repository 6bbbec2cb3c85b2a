//! Safety badges and adverse-event cards for clinical trial arms.
//!
//! [`safety`] holds the typed records and the pure derivations (risk
//! classification, adverse-event percentages); [`ui`] renders them as HTML;
//! [`data`] is the parsing boundary for exported records; [`api`] and
//! [`cli`] are the outer surfaces.

pub mod api;
pub mod cli;
pub mod config;
pub mod data;
pub mod logging;
pub mod safety;
pub mod ui;
