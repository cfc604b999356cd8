use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, ValueEnum};
use fxmlc::{CompileOpts, Effect};

#[derive(Parser, Debug)]
#[command(name = "fxmlc", version, about = "Compile an FXML effect into a KFX binary")]
struct Cli {
    /// Input FXML effect (or KFX file with `--inspect`).
    input: PathBuf,

    /// Output KFX path. Defaults to the input path with a `.kfx` extension.
    output: Option<PathBuf>,

    /// Extra include search directory, tried after the including file's directory.
    #[arg(short = 'I', long = "include-dir")]
    include_dirs: Vec<PathBuf>,

    /// Fail on unresolved state-block references and unknown sampler fields.
    #[arg(long, default_value_t = false)]
    strict: bool,

    /// Print the compiled effect to stdout.
    #[arg(long, value_enum)]
    dump: Option<DumpFormat>,

    /// Compile and validate without writing the output file.
    #[arg(long, default_value_t = false)]
    no_write: bool,

    /// Decode an existing KFX file and print it instead of compiling.
    #[arg(long, default_value_t = false)]
    inspect: bool,

    /// Log verbosity: `-v` info, `-vv` debug. `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DumpFormat {
    Text,
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    if cli.inspect {
        cmd_inspect(&cli)
    } else {
        cmd_compile(&cli)
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_compile(cli: &Cli) -> anyhow::Result<()> {
    let opts = CompileOpts {
        include_dirs: cli.include_dirs.clone(),
        strict: cli.strict,
        ..CompileOpts::default()
    };
    let effect = fxmlc::compile_file(&cli.input, &opts)
        .with_context(|| format!("compile '{}'", cli.input.display()))?;

    if let Some(format) = cli.dump {
        print_effect(&effect, format)?;
    }
    if cli.no_write {
        return Ok(());
    }

    let out = cli
        .output
        .clone()
        .unwrap_or_else(|| fxmlc::default_output_path(&cli.input));
    let bytes = fxmlc::write_kfx_file(&out, &effect)
        .with_context(|| format!("write kfx '{}'", out.display()))?;

    eprintln!("wrote {} ({bytes} bytes)", out.display());
    Ok(())
}

fn cmd_inspect(cli: &Cli) -> anyhow::Result<()> {
    let bytes = std::fs::read(&cli.input)
        .with_context(|| format!("read kfx '{}'", cli.input.display()))?;
    let effect = fxmlc::read_effect(&bytes)
        .with_context(|| format!("decode kfx '{}'", cli.input.display()))?;
    print_effect(&effect, cli.dump.unwrap_or(DumpFormat::Text))
}

fn print_effect(effect: &Effect, format: DumpFormat) -> anyhow::Result<()> {
    match format {
        DumpFormat::Text => print!("{effect}"),
        DumpFormat::Json => {
            let json = serde_json::to_string_pretty(effect).context("serialize effect JSON")?;
            println!("{json}");
        }
    }
    Ok(())
}
