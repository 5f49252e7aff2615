//! OpenAPI to TypeScript endpoint type generator.
//!
//! For each configured input the build:
//! 1. Loads the document from a URL or a file ([`loader`])
//! 2. Translates the paths into one `Endpoints` mapping ([`endpoint`]) and
//!    every component schema into a declaration ([`schema`])
//! 3. Emits the declarations as text ([`emitter`], [`ts`])
//! 4. Writes the output file ([`writer`])
//!
//! [`plugin::OpenApiFetchPlugin`] drives these steps from a [`config::PluginConfig`].

pub mod config;
pub mod document;
pub mod emitter;
pub mod endpoint;
mod error;
pub mod loader;
pub mod overrides;
pub mod plugin;
pub mod schema;
pub mod ts;
pub mod writer;

pub use config::{InputSpec, PluginConfig};
pub use document::OpenApiDocument;
pub use emitter::{GenerateOptions, generate};
pub use error::BuildError;
pub use loader::DocumentLoader;
pub use overrides::TypeOverrides;
pub use plugin::{BuildHooks, BuildReport, OpenApiFetchPlugin};
pub use writer::FileWriter;
