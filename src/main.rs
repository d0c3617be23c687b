use anyhow::{Context, Result};
use asdcsv::convert;
use clap::Parser;
use std::{env, path::PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_INPUT: &str = "asd.md";
const DEFAULT_OUTPUT: &str = "asd.csv";

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Convert the tab/space aligned income tax table into a ;-separated CSV"
)]
struct Args {
    /// Source table [default: asd.md next to the executable]
    input: Option<PathBuf>,
    /// Destination CSV, replaced only when every row converts [default: asd.csv next to the executable]
    output: Option<PathBuf>,
}

/// Directory holding the running executable.
fn program_dir() -> Result<PathBuf> {
    let exe = env::current_exe().context("locating current executable")?;
    let dir = exe
        .parent()
        .with_context(|| format!("executable {} has no parent directory", exe.display()))?;
    Ok(dir.to_path_buf())
}

/// An explicit path is used as given; a missing one becomes `name` next to the executable.
fn resolve_path(arg: Option<PathBuf>, name: &str) -> Result<PathBuf> {
    match arg {
        Some(path) => Ok(path),
        None => Ok(program_dir()?.join(name)),
    }
}

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let args = Args::parse();
    let input = resolve_path(args.input, DEFAULT_INPUT)?;
    let output = resolve_path(args.output, DEFAULT_OUTPUT)?;
    info!(input = %input.display(), output = %output.display(), "converting");

    convert(&input, &output)
        .with_context(|| format!("converting {} -> {}", input.display(), output.display()))?;

    info!("done");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_live_next_to_executable() -> Result<()> {
        let exe = env::current_exe()?;
        let dir = exe.parent().context("test binary has no parent")?;
        assert_eq!(program_dir()?, dir);

        let args = Args::try_parse_from(["asdcsv"])?;
        assert_eq!(resolve_path(args.input, DEFAULT_INPUT)?, dir.join("asd.md"));
        assert_eq!(resolve_path(args.output, DEFAULT_OUTPUT)?, dir.join("asd.csv"));
        Ok(())
    }

    #[test]
    fn test_explicit_paths_are_kept() -> Result<()> {
        let args = Args::try_parse_from(["asdcsv", "tables/in.md"])?;
        assert_eq!(
            resolve_path(args.input, DEFAULT_INPUT)?,
            PathBuf::from("tables/in.md")
        );
        assert_eq!(
            resolve_path(args.output, DEFAULT_OUTPUT)?,
            program_dir()?.join("asd.csv")
        );

        let args = Args::try_parse_from(["asdcsv", "a.md", "b.csv"])?;
        assert_eq!(resolve_path(args.input, DEFAULT_INPUT)?, PathBuf::from("a.md"));
        assert_eq!(resolve_path(args.output, DEFAULT_OUTPUT)?, PathBuf::from("b.csv"));
        Ok(())
    }

    #[test]
    fn test_rejects_extra_arguments() {
        assert!(Args::try_parse_from(["asdcsv", "a.md", "b.csv", "c"]).is_err());
    }
}
