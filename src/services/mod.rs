pub mod workspaces_service;

pub use workspaces_service::{WorkspacePage, WorkspacesService};
