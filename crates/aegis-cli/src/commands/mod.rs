pub mod dispatch;
pub mod guidance;
pub mod import;
pub mod init;
pub mod migrate;
pub mod org;
pub mod serve;
pub mod shared;
