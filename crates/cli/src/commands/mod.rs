pub mod build;
pub mod deploy;
pub mod init;
pub mod preview;
pub mod validate;
