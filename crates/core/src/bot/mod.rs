mod types;

pub use types::{TeamInstallInfo, UserInfo};
