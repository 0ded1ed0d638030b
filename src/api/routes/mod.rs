//! API Routes
//!
//! Route handlers organized by functionality.

pub mod estimate;
pub mod health;
pub mod insights;
pub mod logs;
pub mod rollups;
