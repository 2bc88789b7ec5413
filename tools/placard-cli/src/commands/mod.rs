pub mod check;
pub mod fetch;
pub mod generate;
pub mod init;
pub mod layout;
