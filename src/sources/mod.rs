//! Configuration sources: loaded files, the cached repository, and the
//! baseline system store.

mod repository;
mod source;
mod system;

pub use repository::ConfigRepository;
pub use source::{ConfigSource, ConnectionStringSetting};
pub use system::SystemStore;
