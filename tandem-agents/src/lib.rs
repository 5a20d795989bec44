//! TANDEM Agents - Two-Stage Analysis Pipeline
//!
//! The Data Specialist analyzes raw input, the Report Generator turns the
//! analysis into a clarification exchange and a final report, and the
//! Pipeline coordinator sequences the two with a short-circuit on a failed
//! analysis. Both agents record their cross-agent messages in the shared
//! ledger.

pub mod pipeline;
pub mod reporter;
pub mod specialist;

pub use pipeline::{Pipeline, PipelineOutcome};
pub use reporter::ReportGenerator;
pub use specialist::DataSpecialist;
