use std::path::PathBuf;
use std::process;

use clap::Parser;
use deftoml_cli::DeftomlCli;
use deftoml_cli::failure_message;
use deftoml_cli::read_input;
use deftoml_cli::resolve_config;
use deftoml_core::DeftomlResult;
use deftoml_core::render;
use tracing_subscriber::EnvFilter;

fn main() {
	let args = DeftomlCli::parse();
	init_tracing(args.verbose);

	match run(&args) {
		Ok(output) => println!("\n{output}"),
		Err(error) => {
			println!("{}", failure_message(&error));
			let category = error.category();

			// Render through miette for the error code and help text.
			if args.verbose {
				eprintln!("{:?}", miette::Report::new(error));
			}

			if args.exit_code {
				process::exit(category.exit_code());
			}
		}
	}
}

/// Logs go to stderr so stdout only carries the converted document.
/// `RUST_LOG` takes precedence over `--verbose`.
fn init_tracing(verbose: bool) {
	let filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

	let _ = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.without_time()
		.try_init();
}

fn run(args: &DeftomlCli) -> DeftomlResult<String> {
	let root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
	let config = resolve_config(args, &root)?;
	let input = read_input(&args.input_file)?;

	let output = deftoml_core::Parser::with_config(config.parser).parse_with_diagnostics(&input)?;
	for diagnostic in &output.diagnostics {
		tracing::warn!(line = diagnostic.line(), "{diagnostic}");
	}

	render(&output.document, config.output.format)
}
