use anyhow::{anyhow, Context};
use config::{Config, File, FileFormat};
use hexgrid::{timed, HexGrid, OptionMap};
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;
use std::{
    collections::HashMap,
    fs::OpenOptions,
    io::{self, Write},
    path::{Path, PathBuf},
    process,
};
use structopt::StructOpt;
use strum::{Display, EnumString};

/// CLI for laying out hex grids. Reads grid options, resolves them, and
/// writes out a plan that a renderer can draw.
#[derive(Debug, StructOpt)]
#[structopt(name = "hexgrid")]
struct Opt {
    /// Path to a spec file that defines the grid. Supported formats: TOML,
    /// JSON, and plain `key = value` lines for any other extension
    #[structopt(short, long)]
    config: Option<PathBuf>,

    /// Set a single option, e.g. `--set hex-side=0.5in`. Takes precedence
    /// over the spec file. Can be given multiple times.
    #[structopt(short = "s", long = "set", parse(try_from_str = parse_option))]
    options: Vec<(String, String)>,

    /// File to write the output to. Defaults to the spec file's `outfile`
    /// option, then to stdout.
    #[structopt(short, long)]
    outfile: Option<PathBuf>,

    /// The output format. Supported formats:
    ///
    /// json - The complete grid plan: geometry, path program and labels
    ///
    /// toml - Just the resolved geometry
    ///
    /// cfg - The full config that the grid was resolved from, in TOML format
    #[structopt(short, long, default_value = "json")]
    format: OutputFormat,

    /// The logging level to use. See
    /// https://docs.rs/log/0.4.11/log/enum.LevelFilter.html for options
    #[structopt(long, default_value = "warn")]
    log_level: LevelFilter,
}

/// Different output formats.
#[derive(Copy, Clone, Debug, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
enum OutputFormat {
    // If you change this, make sure to update the help text for `--format`!
    /// The entire plan, serialized as JSON
    Json,
    /// The resolved geometry, serialized as TOML
    Toml,
    /// The config that the grid was built from, serialized as TOML
    Cfg,
}

/// Parse a `key=value` pair from the command line
fn parse_option(pair: &str) -> anyhow::Result<(String, String)> {
    let (key, value) = pair
        .split_once('=')
        .ok_or_else(|| anyhow!("expected key=value, got `{}`", pair))?;
    Ok((key.trim().to_owned(), value.trim().to_owned()))
}

/// Load the options from a spec file. Values of any type are read back as
/// strings, so that the core library can parse them with units attached.
fn load_options(config_path: &Path) -> anyhow::Result<OptionMap> {
    let format = match config_path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => FileFormat::Toml,
        Some("json") => FileFormat::Json,
        _ => FileFormat::Ini,
    };
    let config_path = config_path.to_str().ok_or_else(|| {
        anyhow!("invalid character in path {:?}", config_path)
    })?;

    let mut settings = Config::new();
    settings
        .merge(File::new(config_path, format))
        .context("error reading spec file")?;
    let options: HashMap<String, String> =
        settings.try_into().context("error reading spec file")?;

    // Sort so that warnings come out in a stable order
    let mut options: OptionMap = options.into_iter().collect();
    options.sort_keys();
    Ok(options)
}

/// Serialize the grid in the given format
fn generate_bytes(
    output_format: OutputFormat,
    grid: &HexGrid,
) -> anyhow::Result<Vec<u8>> {
    let text = match output_format {
        OutputFormat::Json => grid.to_json()?,
        OutputFormat::Toml => {
            // Go through a toml::Value so that tables get written last
            let value = toml::Value::try_from(grid.geometry())?;
            toml::to_string_pretty(&value)?
        }
        OutputFormat::Cfg => {
            let value = toml::Value::try_from(grid.config())?;
            toml::to_string_pretty(&value)?
        }
    };
    Ok(text.into_bytes())
}

fn write_output(
    output_format: OutputFormat,
    grid: &HexGrid,
    outfile: Option<&Path>,
) -> anyhow::Result<()> {
    let bytes = generate_bytes(output_format, grid).with_context(|| {
        format!("error serializing {} output", output_format)
    })?;

    match outfile {
        Some(path) => timed!(
            format!("Writing {} output to {:?}", output_format, path),
            log::Level::Info,
            {
                let mut file = OpenOptions::new()
                    .write(true)
                    .create(true)
                    .truncate(true)
                    .open(path)
                    .with_context(|| {
                        format!("error opening output file {:?}", path)
                    })?;
                file.write_all(&bytes).with_context(|| {
                    format!("error writing to file {:?}", path)
                })?;
            }
        ),
        None => io::stdout()
            .write_all(&bytes)
            .context("error writing to stdout")?,
    }
    Ok(())
}

/// Run the CLI with some options
fn run(opt: Opt) -> anyhow::Result<()> {
    SimpleLogger::new().with_level(opt.log_level).init()?;

    let mut options = match &opt.config {
        Some(config_path) => load_options(config_path)?,
        None => OptionMap::new(),
    };
    options.extend(opt.options);
    info!("Loaded {} options", options.len());

    let grid = HexGrid::from_options(&options).context("invalid grid")?;

    let outfile = opt
        .outfile
        .or_else(|| options.get("outfile").map(PathBuf::from));
    write_output(opt.format, &grid, outfile.as_deref())
}

fn main() {
    let exit_code = match run(Opt::from_args()) {
        Ok(_) => 0,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            1
        }
    };
    process::exit(exit_code);
}
