//! Card definitions, instances and the definition store.
//!
//! - `CardDefinition`: static card data with base and enhanced content
//! - `CardInstance`: one copy of a card inside a lesson
//! - `DefinitionStore`: read-only lookup the engine is given
//! - `Registry`: in-memory `DefinitionStore`

mod definition;
mod instance;
mod registry;

pub use definition::{CardCategory, CardContent, CardDefinition};
pub use instance::{CardInstance, EnhancementSource};
pub use registry::{DefinitionStore, Registry};
