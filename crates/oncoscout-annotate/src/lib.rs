//! oncoscout-annotate — Druggability and tractability enrichment.
//!
//! Stage 2 of the Oncoscout pipeline: takes the ranked candidate list from
//! the screen and attaches gene-family classification, known-drug lookups,
//! ChEMBL target hits, and OpenTargets tractability evidence. Every
//! external lookup is advisory; absence of data is a valid, non-fatal
//! outcome.

pub mod annotate;
pub mod chembl;
pub mod families;
pub mod known_drugs;
pub mod opentargets;
pub mod report;
pub mod retry;
pub mod tractability;
