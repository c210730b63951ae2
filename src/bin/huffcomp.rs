use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use log::info;

use huffcomp::{Error, Session};

#[derive(Parser, Debug)]
#[command(
    about = "Compress a file with a Huffman code, decompress it back and check the round trip",
    long_about = None
)]
struct Args {
    /// The file to compress. Outputs are written next to it, with the last four characters of its
    /// name replaced by `_compressed` and `_decompressed`.
    input: PathBuf,

    /// Log more. Can be repeated.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log errors only.
    #[arg(short, long)]
    quiet: bool,

    /// Delete the output files if the run fails.
    #[arg(long)]
    remove_partial: bool,
}

fn run(args: &Args) -> Result<()> {
    let session = Session::new(&args.input)?;

    match session.run() {
        Ok(report) => {
            info!("{}", report);
            Ok(())
        }
        Err(e) => {
            if args.remove_partial {
                session.remove_outputs();
            }
            Err(e.into())
        }
    }
}

pub fn main() -> Result<ExitCode> {
    let args = Args::parse();

    stderrlog::new()
        .verbosity(2 + args.verbose as usize)
        .quiet(args.quiet)
        .timestamp(stderrlog::Timestamp::Second)
        .init()?;

    let Err(e) = run(&args) else {
        return Ok(ExitCode::SUCCESS);
    };

    match e.downcast_ref::<Error>() {
        Some(error) => {
            let kind = error.kind();
            eprintln!("{}", kind);
            eprintln!("{}", error);
            if let Some(hint) = kind.hint() {
                eprintln!("{}", hint);
            }
        }
        None => eprintln!("{:#}", e),
    }

    Ok(ExitCode::FAILURE)
}
