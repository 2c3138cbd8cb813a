//! Command-line argument parsing for the `lzopack` / `lzo` / `lzode` / `unlzo`
//! family.
//!
//! Flags are declared with clap's derive API on [`Cli`].  [`parse_args_from`]
//! layers them on top of the alias defaults in [`CliInit`] and checks the
//! filename arity for the selected mode, producing a [`ParsedArgs`].

use anyhow::{bail, Result};
use clap::Parser;

use crate::cli::init::CliInit;
use crate::cli::op_mode::OpMode;
use crate::config::DISPLAY_LEVEL_MAX;
use crate::io::prefs::Prefs;

/// Whole-file LZO1X compressor.
#[derive(Parser, Debug)]
#[command(name = "lzopack", version, about, long_about = None)]
pub struct Cli {
    /// Force compression
    #[arg(short = 'z', long, conflicts_with_all = ["decompress", "list"])]
    pub compress: bool,

    /// Decompression
    #[arg(short = 'd', long, visible_alias = "uncompress", conflicts_with = "list")]
    pub decompress: bool,

    /// List information about .lzo files
    #[arg(short = 'l', long)]
    pub list: bool,

    /// Treat every FILE as an input; outputs are named automatically
    #[arg(short = 'm', long)]
    pub multiple: bool,

    /// Overwrite existing output files
    #[arg(short = 'f', long)]
    pub force: bool,

    /// Write outputs through a temporary file renamed into place
    #[arg(long)]
    pub atomic: bool,

    /// Keep the source modification time on the output
    #[arg(short = 'k', long = "keep-mtime")]
    pub keep_mtime: bool,

    /// More verbose output (repeatable)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Less output (repeatable)
    #[arg(short = 'q', long, action = clap::ArgAction::Count)]
    pub quiet: u8,

    /// INPUT [OUTPUT], or several inputs with -m / -l
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<String>,
}

/// Every option and filename resolved from the command line.
#[derive(Debug)]
pub struct ParsedArgs {
    pub prefs: Prefs,
    /// `Auto` only when neither a flag nor the alias chose a mode.
    pub op_mode: OpMode,
    pub display_level: u32,
    pub multiple_inputs: bool,
    /// Single-file mode: the input.
    pub input_filename: Option<String>,
    /// Single-file mode: the explicit output, if given.
    pub output_filename: Option<String>,
    /// Multi-file and list modes: every input.
    pub in_file_names: Vec<String>,
}

/// Parse `std::env::args()`.
pub fn parse_args(init: CliInit) -> Result<ParsedArgs> {
    parse_args_from(std::env::args_os(), init)
}

/// Parse an explicit argument list; the first item is the program name.
pub fn parse_args_from<I, T>(args: I, init: CliInit) -> Result<ParsedArgs>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = Cli::try_parse_from(args)?;
    resolve(cli, init)
}

fn resolve(cli: Cli, init: CliInit) -> Result<ParsedArgs> {
    let mut prefs = init.prefs;
    if cli.force {
        prefs.set_overwrite(true);
    }
    prefs.set_atomic(cli.atomic);
    prefs.set_preserve_mtime(cli.keep_mtime);

    let op_mode = if cli.list {
        OpMode::List
    } else if cli.decompress {
        OpMode::Decompress
    } else if cli.compress {
        OpMode::Compress
    } else {
        init.op_mode
    };

    let display_level = (init.display_level + u32::from(cli.verbose))
        .saturating_sub(u32::from(cli.quiet))
        .min(DISPLAY_LEVEL_MAX);

    let mut files = cli.files;
    if cli.multiple || op_mode == OpMode::List {
        return Ok(ParsedArgs {
            prefs,
            op_mode,
            display_level,
            multiple_inputs: cli.multiple,
            input_filename: None,
            output_filename: None,
            in_file_names: files,
        });
    }

    if files.len() > 2 {
        bail!(
            "bad usage: too many file names ({}); use -m for multiple inputs",
            files.len()
        );
    }
    let output_filename = if files.len() == 2 { files.pop() } else { None };
    let input_filename = files.pop();

    Ok(ParsedArgs {
        prefs,
        op_mode,
        display_level,
        multiple_inputs: false,
        input_filename,
        output_filename,
        in_file_names: Vec::new(),
    })
}
