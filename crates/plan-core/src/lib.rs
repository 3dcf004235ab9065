//! # plan-core
//!
//! Core types, errors, and configuration for vgpuplan - a GPU virtualization
//! profile validator and capacity planner.
//!
//! This crate provides the foundational data structures shared across all
//! other vgpuplan components. It includes:
//!
//! - Core types for GPU models, deployment modes, and performance tiers
//! - Virtualization profile and physical GPU specification records
//! - Ordered GPU inventory with duplicate merging
//! - The deployment recommendation produced by the planner
//! - Configuration schema and parsing utilities
//! - Error handling types and utilities

pub mod config;
pub mod error;
pub mod inventory;
pub mod profile;
pub mod recommendation;
pub mod types;

// Re-export commonly used types at the crate root
pub use config::{AdvisorConfig, CatalogConfig, LoggingConfig, ParserConfig, PlannerConfig};
pub use error::{Error, Result};
pub use inventory::{GpuInventory, GpuInventoryEntry};
pub use profile::{GpuSpec, VirtualizationProfile};
pub use recommendation::{DeploymentRecommendation, GpuAllocation, StorageType, VmConfiguration};
pub use types::{DeploymentMode, GpuModel, PerformanceTier, ProfileMode};
