//! Binary entry point for the `lzopack` command-line tool.
//!
//! # Control flow
//!
//! 1. [`detect_alias`] inspects `argv[0]` to infer an initial mode
//!    (`lzode` and `unlzo` imply decompress, `lzo` implies compress).
//! 2. [`parse_args`] layers the command-line flags on top.
//! 3. [`run`] resolves filenames, dispatches to the I/O layer and returns the
//!    exit code: 0 on success, 1 on any failure.

use anyhow::{bail, Result};

use lzopack::cli::args::{parse_args, ParsedArgs};
use lzopack::cli::constants::{set_display_level, COMPRESSOR_NAME, LZO_EXTENSION};
use lzopack::cli::init::detect_alias;
use lzopack::cli::op_mode::{determine_op_mode, OpMode};
use lzopack::io::{
    compress_multiple_files, decompress_multiple_files, display_container_info,
    set_notification_level, Engine,
};
use lzopack::util::strip_suffix;
use lzopack::{display, displaylevel};

/// Output name for a single-file run.
fn resolve_output(op_mode: OpMode, input: &str, output: Option<String>) -> Result<String> {
    if let Some(output) = output {
        return Ok(output);
    }
    match op_mode {
        OpMode::Decompress => match strip_suffix(input, LZO_EXTENSION) {
            Some(stem) => Ok(stem.to_owned()),
            None => bail!(
                "cannot determine an output filename: {} does not end in {}",
                input,
                LZO_EXTENSION
            ),
        },
        _ => Ok(format!("{}{}", input, LZO_EXTENSION)),
    }
}

/// Execute the operation selected by argument parsing.
fn run(args: ParsedArgs) -> Result<i32> {
    set_display_level(args.display_level);
    set_notification_level(args.display_level as i32);

    displaylevel!(
        3,
        "*** {} v{} {}-bit ***\n",
        COMPRESSOR_NAME,
        lzopack::version_string(),
        std::mem::size_of::<*const ()>() * 8
    );

    let ParsedArgs {
        prefs,
        mut op_mode,
        multiple_inputs,
        input_filename,
        output_filename,
        in_file_names,
        ..
    } = args;

    if op_mode == OpMode::List {
        let failures = display_container_info(&in_file_names);
        return Ok(i32::from(failures != 0));
    }

    if multiple_inputs {
        if op_mode == OpMode::Auto {
            op_mode = in_file_names
                .first()
                .map_or(OpMode::Compress, |f| determine_op_mode(f));
        }
        let summary = if op_mode == OpMode::Decompress {
            decompress_multiple_files(&in_file_names, LZO_EXTENSION, &prefs)
        } else {
            compress_multiple_files(&in_file_names, LZO_EXTENSION, &prefs)
        };
        return Ok(i32::from(!summary.is_success()));
    }

    let Some(input) = input_filename else {
        bail!("bad usage: no input file");
    };
    if op_mode == OpMode::Auto {
        op_mode = determine_op_mode(&input);
    }
    let output = resolve_output(op_mode, &input, output_filename)?;
    displaylevel!(4, "{} -> {}\n", input, output);

    // Success lines come from the I/O layer at level 2.
    let engine = Engine::new(prefs);
    let outcome = if op_mode == OpMode::Decompress {
        engine
            .decompress_file(&input, &output)
            .map(|_| ())
            .map_err(|e| format!("decompression failed: {}", e))
    } else {
        engine
            .compress_file(&input, &output)
            .map(|_| ())
            .map_err(|e| format!("compression failed: {}", e))
    };
    match outcome {
        Ok(()) => Ok(0),
        Err(msg) => {
            displaylevel!(1, "{}: {}: {}\n", COMPRESSOR_NAME, input, msg);
            Ok(1)
        }
    }
}

fn main() {
    let argv0 = std::env::args().next().unwrap_or_default();
    let init = detect_alias(&argv0);

    let code = match parse_args(init).and_then(run) {
        Ok(code) => code,
        Err(e) => match e.downcast_ref::<clap::Error>() {
            Some(clap_err) => {
                let _ = clap_err.print();
                i32::from(clap_err.use_stderr())
            }
            None => {
                display!("{}: {:#}\n", COMPRESSOR_NAME, e);
                1
            }
        },
    };
    std::process::exit(code);
}
