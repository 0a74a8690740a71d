//! Namespace building, validation and Swift emission for resgen

pub mod aggregate;
pub mod error;
pub mod generate;
pub mod generators;
pub mod import_tracker;
pub mod objc;
pub mod properties;
pub mod references;
pub mod swift;
pub mod validation;

use resgen_core::Struct;

pub use error::CodegenError;
pub use generate::{emit, generate, Artifacts, GenerateOptions, Language};
pub use generators::{build_all, Generator, LeafOutput};
pub use references::ReferenceSet;
pub use validation::{validate, Validation};

/// Name of the generated root struct
pub const ROOT_NAME: &str = "R";

/// Common trait for all code generators
pub trait Codegen {
    fn generate(&mut self, tree: &Struct) -> Result<String, CodegenError>;
}
