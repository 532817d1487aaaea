pub mod error;
pub mod explorer;
pub mod model;
pub mod naming;
pub mod nav;
pub mod notes;
pub mod remote;
pub mod store;
pub mod tree;
pub mod tui_shell;
pub mod upload;
