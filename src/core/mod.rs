//! Core resolution types: merging, the configurator façade, the resolution
//! context, and the default slot.

mod configurator;
mod context;
mod default_state;
mod host;
mod merge;

pub use configurator::Configurator;
pub use context::ConfigContext;
pub use merge::MergedView;
