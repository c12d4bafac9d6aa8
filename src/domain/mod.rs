// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs, enums and traits describing the library
// usage problem: one day's observation, the feature vector the
// models consume, the training report and the prediction outcome.
//
// Rules for this layer:
//   - NO ndarray / linfa types here
//   - NO file I/O or SQL
//   - Only plain Rust structs, enums, and traits
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// One day of campus/library data and the model feature vector
pub mod observation;

// The persisted summary of a training run and prediction outcomes
pub mod report;

// Typed failures of the training pipeline
pub mod errors;

// Core abstractions (traits) that other layers implement
pub mod traits;
