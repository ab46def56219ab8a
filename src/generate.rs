//! # API definitions to record code generator
//!
//! '''bash
//! cargo run --bin modelgen -- --help
//! '''

use providerhub_bindgen::config::CodeGeneratorConfig;
use providerhub_bindgen::definition::{
    definition_comments, export_definitions_to_registry, generate_records,
    read_definitions_from_file,
};
use providerhub_bindgen::error::BindgenError;
use std::path::PathBuf;
use structopt::StructOpt;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "API definitions to record transformer",
    about = "Generate typed record code from the definitions of an API description"
)]
struct Options {
    /// Path to the JSON-encoded API description.
    #[structopt(parse(from_os_str))]
    input: PathBuf,

    /// Module name used to look up doc comments.
    #[structopt(long, default_value = "models")]
    module_name: String,

    /// Path the generated code uses to reach the record layer.
    #[structopt(long, default_value = "providerhub_bindgen")]
    crate_path: String,

    /// Increase log verbosity (-v, -vv).
    #[structopt(short, long, parse(from_occurrences))]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(options: &Options) -> Result<(), BindgenError> {
    let export = read_definitions_from_file(&options.input)?;
    let registry = export_definitions_to_registry(&export)?;
    info!(
        input = %options.input.display(),
        records = registry.len(),
        "generating records"
    );
    let config = CodeGeneratorConfig::new(options.module_name.clone())
        .with_crate_path(options.crate_path.clone())
        .with_comments(definition_comments(&export, &options.module_name));

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    generate_records(&config, &mut out, &registry)
}

fn main() {
    let options = Options::from_args();
    init_logging(options.verbose);

    if let Err(e) = run(&options) {
        error!(error = %e, "error generating records");
        std::process::exit(1);
    }
}
