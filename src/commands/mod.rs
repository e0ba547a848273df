//! CLI commands for docrank

pub mod dispatch;
pub mod format;
pub mod history;
pub mod init;
pub mod metric;
pub mod rank;
pub mod recommend;
pub mod set;
pub mod similar;
pub mod stats;
pub mod track;
