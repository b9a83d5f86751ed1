pub mod init;
pub mod init_db;
pub mod respond;
pub mod resubmit;
pub mod show;
pub mod suggest;
pub mod validate;
