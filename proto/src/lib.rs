pub mod change;
pub mod collection;
pub mod document;
pub mod id;
pub mod identity;
pub mod update;

pub use change::*;
pub use collection::*;
pub use document::*;
pub use id::*;
pub use identity::*;
pub use update::*;
