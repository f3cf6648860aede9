//! Browser-side glue: script loading, SDK interop, and the two mountable
//! components.

mod element;
mod iframe;
mod script;
mod sdk;

pub use element::{StreamElement, EMBED_SCRIPT_URL};
pub use iframe::StreamPlayer;
pub use script::ensure_script;
pub use sdk::{JsPlayer, SDK_SCRIPT_URL};
