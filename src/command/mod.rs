mod context;
mod duplicate;
mod list;
mod login;
mod logout;
mod status;
mod themes;

pub use context::{build_service, try_build_service};
pub use duplicate::run_duplicate;
pub use list::run_list;
pub use login::run_login;
pub use logout::run_logout;
pub use status::run_status;
pub use themes::run_themes;
