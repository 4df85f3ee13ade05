use std::process::ExitCode;

use chunkpress_cli::{init_logging, parse_or_exit, report, run_decompress, DecompressArgs};

fn main() -> ExitCode {
    let args: DecompressArgs = match parse_or_exit() {
        Ok(args) => args,
        Err(code) => return code,
    };
    init_logging(args.quiet);

    match run_decompress(&args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => report(&e),
    }
}
