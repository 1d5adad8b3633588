use clap::Parser;
use page_loader_core::logging;

mod cli;

use crate::cli::Cli;

fn main() {
    let cli = Cli::parse();

    // Initialize logging as early as possible.
    if let Err(e) = logging::init_logging(cli.log_level, cli.log_file.as_deref()) {
        logging::init_logging_stderr(cli.log_level);
        tracing::warn!("file logging unavailable ({:#}), logging to stderr", e);
    }

    match cli.run() {
        Ok(html_path) => println!("{}", html_path.display()),
        Err(err) => {
            tracing::error!("{:#}", err);
            eprintln!("page-loader error: {}. See log for details", err);
            std::process::exit(1);
        }
    }
}
