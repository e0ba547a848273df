//! Format output dispatch helpers

/// Dispatch output by format.
///
/// The json arm returns a Result; the human arm is a block that returns ().
///
/// ```rust,ignore
/// output_by_format_result!(cli.format,
///     json => { print_json_status("ok", None, &[]) },
///     human => { println!("ok"); }
/// )?;
/// ```
#[macro_export]
macro_rules! output_by_format_result {
    ($format:expr, json => $json:expr, human => $human:block) => {
        match $format {
            $crate::cli::OutputFormat::Json => $json,
            $crate::cli::OutputFormat::Human => {
                $human;
                Ok(())
            }
        }
    };
}
