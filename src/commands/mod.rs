// Command handlers module
pub mod check;
pub mod completions;
pub mod range;
pub mod version;

// Re-exports for cleaner imports
pub use range::execute as range;
pub use version::execute as version;
