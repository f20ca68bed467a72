//! Shared primitive types used across the entire engine.

/// A store name, unique within a reporting period.
pub type StoreName = String;

/// A cluster identifier, exactly as recorded on each store row.
pub type ClusterId = String;

/// A region identifier (e.g. "South 1").
pub type RegionId = String;
