pub mod keeper;
pub mod persistence;

pub use keeper::Keeper;
pub use persistence::{load_snapshot, save_snapshot, DEFAULT_SAVE_FILE, FORMAT_VERSION};
