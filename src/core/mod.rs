//! Core business logic abstractions

pub mod cache;
pub mod config;
pub mod cost;
pub mod log;
pub mod suggest;

// Re-export main types for cleaner imports
pub use cost::{
    AlternativeMaterial, CostBreakdown, CostInputs, FenceVariant, OwnershipBand, SavingsResult,
};
pub use suggest::{SuggestionGuard, SuggestionProvider};
