use std::process::ExitCode;

use chunkpress_cli::{init_logging, parse_or_exit, report, run_compress, CompressArgs};

fn main() -> ExitCode {
    let args: CompressArgs = match parse_or_exit() {
        Ok(args) => args,
        Err(code) => return code,
    };
    init_logging(args.quiet);

    match run_compress(&args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => report(&e),
    }
}
