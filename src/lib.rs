// THEORY:
// This file is the main entry point for the `pixel_forge` library crate.
// It follows the standard Rust convention of using `lib.rs` to define the public
// API that will be exposed to external consumers (like the bundled CLI binary).
//
// The primary goal is to export the `ModelPipeline` and its associated data
// structures (`PipelineConfig`, `ModelDocument`, `OverrideDocument`) as the
// clean, high-level interface for the whole converter. The internal modules
// (`core_modules`) are encapsulated behind it, providing a clean separation
// of concerns between the algorithmic stages and their orchestration.

pub mod core_modules;
pub mod driver;
pub mod error;
pub mod pipeline;
