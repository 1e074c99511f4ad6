//! gifcrop - Command-line tool for cropping animated GIFs

use std::process::ExitCode;

use gifcrop::cli;

fn main() -> ExitCode {
    cli::run()
}
