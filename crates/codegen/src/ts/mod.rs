//! TypeScript type IR and its text emission.
//!
//! Translation builds [`TsType`]/[`TsTypeDef`] values; the [`Emit`] trait
//! turns them into tab-indented declaration text.

mod emit;
mod types;
mod utils;

pub use emit::Emit;
pub use types::{TsPrimitive, TsProp, TsType, TsTypeDef, TypeDefKind};
pub use utils::{needs_quoting, quote_if_needed};
