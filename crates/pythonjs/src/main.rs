use anyhow::Context;
use clap::Parser;
use pythonjs::{Input, PythonjsConfig, collect_functions, parse_inputs, write_modules};
use pythonjs_codegen::JavaScriptWriter;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Translate Python source into JavaScript.
#[derive(Parser, Debug)]
#[command(name = "pythonjs", version, about)]
struct Cli {
    /// Input files; Python sources are joined into one program. Reads stdin when empty.
    files: Vec<PathBuf>,

    /// Reader for stdin and unknown extensions (python, json)
    #[arg(short, long)]
    lang: Option<String>,

    /// Extra config file, applied over the global and project config
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Spaces per indentation level
    #[arg(long)]
    indent: Option<usize>,

    /// Print the top-level functions as a JSON object instead of the program
    #[arg(long)]
    functions: bool,

    /// More logging on stderr (repeatable); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Reset SIGPIPE to default behavior so piping to `head` etc. doesn't panic.
#[cfg(unix)]
fn reset_sigpipe() {
    // SAFETY: restores the default disposition of SIGPIPE; no memory is touched.
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}

#[cfg(not(unix))]
fn reset_sigpipe() {}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> anyhow::Result<PythonjsConfig> {
    let root = std::env::current_dir().context("resolving working directory")?;
    let mut config = PythonjsConfig::load(&root);

    if let Some(path) = &cli.config {
        config = config.merge(PythonjsConfig::from_file(path)?);
    }

    let mut flags = PythonjsConfig::default();
    flags.input.language = cli.lang.clone();
    flags.translate.indent_width = cli.indent;
    Ok(config.merge(flags))
}

fn run(cli: &Cli) -> anyhow::Result<String> {
    let config = load_config(cli)?;
    tracing::debug!(?config, "resolved config");

    let inputs = if cli.files.is_empty() {
        vec![Input::from_stdin(config.language())?]
    } else {
        cli.files
            .iter()
            .map(|path| Input::from_path(path, config.language()))
            .collect::<anyhow::Result<Vec<_>>>()?
    };

    let modules = parse_inputs(&inputs)?;
    let options = config.translate_options();

    if cli.functions {
        let functions = collect_functions(&modules, options)?;
        Ok(serde_json::to_string_pretty(&functions)?)
    } else {
        write_modules(&modules, &JavaScriptWriter::new(options))
    }
}

fn main() {
    reset_sigpipe();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("error: {e:#}");
            std::process::exit(1);
        }
    }
}
