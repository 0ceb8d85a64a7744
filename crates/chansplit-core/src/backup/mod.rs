//! Loading and modeling the exported backup document

mod loader;
mod types;

pub use loader::{find_backup_file, load_backup};
pub use types::{
    is_public, Backup, Category, Channel, ChannelTree, PermissionOverwrite, EVERYONE_ROLE,
};
