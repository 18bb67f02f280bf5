//! cssflip - Flip stylesheets between writing directions

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use cssflip::{Options, WritingDirection, decode_stylesheet, transform};

#[derive(Parser)]
#[command(name = "cssflip")]
#[command(version, about = "Flip stylesheets between writing directions", long_about = None)]
#[command(after_help = "EXAMPLES:
    cssflip app.css -o app.rtl.css               Mirror for right-to-left
    cssflip --target-dir tb-rl app.css           Rotate into vertical text
    cat app.css | cssflip --dir-in-url           Also swap ltr/rtl in urls")]
struct Cli {
    /// Input stylesheet (stdin when omitted or "-")
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Output file (stdout when omitted)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Writing direction the input is written for [default: lr-tb]
    #[arg(long, value_name = "DIR")]
    source_dir: Option<WritingDirection>,

    /// Writing direction to produce [default: rl-tb]
    #[arg(long, value_name = "DIR")]
    target_dir: Option<WritingDirection>,

    /// Swap ltr/rtl words inside url()
    #[arg(long)]
    dir_in_url: bool,

    /// Swap side names inside url()
    #[arg(long)]
    edge_in_url: bool,

    /// Read options from a JSON file; flags given on the command line win
    #[arg(long, value_name = "FILE")]
    options: Option<PathBuf>,

    /// Log what is being rewritten
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> cssflip::Result<()> {
    let options = resolve_options(cli)?;
    log::debug!(
        "flipping {} -> {}",
        options.source_dir,
        options.target_dir
    );

    let bytes = match cli.input.as_deref() {
        Some(path) if path.as_os_str() != "-" => fs::read(path)?,
        _ => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf)?;
            buf
        }
    };
    let css = decode_stylesheet(&bytes);
    let flipped = transform(&css, &options);

    match &cli.output {
        Some(path) => fs::write(path, flipped)?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(flipped.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn resolve_options(cli: &Cli) -> cssflip::Result<Options> {
    let mut options = match &cli.options {
        Some(path) => Options::from_json(&fs::read_to_string(path)?)?,
        None => Options::default(),
    };
    if let Some(dir) = cli.source_dir {
        options = options.with_source_dir(dir);
    }
    if let Some(dir) = cli.target_dir {
        options = options.with_target_dir(dir);
    }
    if cli.dir_in_url {
        options = options.with_dir_in_url(true);
    }
    if cli.edge_in_url {
        options = options.with_edge_in_url(true);
    }
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from(["cssflip", "--target-dir", "tb-lr", "--edge-in-url"]);
        let options = resolve_options(&cli).unwrap();
        assert_eq!(options.source_dir, WritingDirection::LR_TB);
        assert_eq!(options.target_dir, WritingDirection::TB_LR);
        assert!(options.transform_edge_in_url);
        assert!(!options.transform_dir_in_url);
    }

    #[test]
    fn test_invalid_direction_is_rejected() {
        assert!(Cli::try_parse_from(["cssflip", "--source-dir", "sideways"]).is_err());
    }
}
