pub mod workspaces;

pub use workspaces::WorkspacesRepo;
