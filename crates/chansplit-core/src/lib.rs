pub mod backup;
pub mod config;
pub mod error;
pub mod splitter;

pub use backup::{
    find_backup_file, is_public, load_backup, Backup, Category, Channel, ChannelTree,
    PermissionOverwrite, EVERYONE_ROLE,
};
pub use config::{Config, SplitConfig, DEFAULT_DATA_DIR};
pub use error::{ChansplitError, Result};
pub use splitter::{SectionReport, SplitOptions, SplitReport, Splitter};
