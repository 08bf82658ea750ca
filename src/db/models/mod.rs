pub mod api;
pub mod workspace;

pub use api::*;
pub use workspace::*;
