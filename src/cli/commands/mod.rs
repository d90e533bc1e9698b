mod init;
mod save;
mod saved;
mod search;
mod show;
mod trending;

pub use init::cmd_init;
pub use save::cmd_save;
pub use saved::cmd_saved;
pub use search::{cmd_discover, cmd_search};
pub use show::cmd_show;
pub use trending::cmd_trending;
