//! Command-level integration tests for the docrank binary

mod init;
mod metric;
mod rank;
mod recommend;
mod support;
mod track;
