//! Shared primitive types used across the report engine.

/// A stable, unique identifier for one sales transaction.
pub type TransactionId = String;

/// A product name exactly as it appears in the source table.
pub type ProductName = String;
