pub mod check;
pub mod init;
pub mod quiz;
pub mod serve;
