//! Output formatting helpers shared by commands

pub mod status;

pub use crate::output_by_format_result;
pub use status::print_json_status;
