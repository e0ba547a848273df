pub use docrank_core::format::OutputFormat;
use clap::builder::{PossibleValuesParser, TypedValueParser};

// `OutputFormat` lives in docrank-core, so clap's `ValueEnum` cannot be
// implemented here (orphan rule); parse the same possible values instead.
pub fn output_format_parser() -> impl TypedValueParser<Value = OutputFormat> {
    PossibleValuesParser::new(["human", "json"])
        .map(|s| s.parse::<OutputFormat>().expect("possible value"))
}
