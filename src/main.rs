//! main.rs
//! Entry point for lsx

use lsx::config::Config;
use lsx::core::Renderer;
use lsx::utils::cli::Cli;
use lsx::utils::logging;

use clap::Parser;

use std::io::{self, BufWriter};
use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = logging::init() {
        eprintln!("lsx: logger setup failed: {}", e);
    }

    let cli = Cli::parse();
    let config = Config::from_cli(&cli);
    log::debug!("resolved config: {:?}", config);

    let mut out = BufWriter::new(io::stdout().lock());
    let mut err = io::stderr().lock();

    match Renderer::new(&config).run(cli.directories(), &mut out, &mut err) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("lsx: write error: {}", e);
            ExitCode::FAILURE
        }
    }
}
