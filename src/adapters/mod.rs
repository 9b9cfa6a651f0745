// Adapters layer: HTTP clients for the roster sheet and the account directory.

pub mod directory;
pub mod sheet;
