use clap::{Parser, Subcommand};
use log::LevelFilter;
use serde::Deserialize;
use stcss_engine::{Shorthand, StCss, StCssConfig, StCssError, StyleDescriptor};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "stcss")]
#[command(about = "stcss — atomic CSS from style objects")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Breakpoint width, in ascending order (repeatable, e.g. -b 40em -b 52em)
    #[arg(short, long = "breakpoint", global = true)]
    breakpoints: Vec<String>,

    /// Expand marginX/marginY/paddingX/paddingY/size shorthands
    #[arg(long, global = true)]
    shorthand: bool,

    /// Log every registered rule
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve the styles in a JSON file and print class names and CSS
    Build {
        /// Input .json file
        path: String,

        /// Write the stylesheet here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check a JSON style file for errors without printing output
    Check {
        /// Input .json file
        path: String,
    },
}

/// Contents of a style file: one style object, or a list of `st` calls.
/// Each call is a style object or an array of style objects to compose.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StyleFile {
    Single(StyleDescriptor),
    Calls(Vec<Call>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Call {
    Composed(Vec<StyleDescriptor>),
    Single(StyleDescriptor),
}

impl StyleFile {
    fn into_calls(self) -> Vec<Vec<StyleDescriptor>> {
        match self {
            StyleFile::Single(style) => vec![vec![style]],
            StyleFile::Calls(calls) => calls
                .into_iter()
                .map(|call| match call {
                    Call::Composed(styles) => styles,
                    Call::Single(style) => vec![style],
                })
                .collect(),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        })
        .parse_default_env()
        .init();

    let mut config = StCssConfig::new(cli.breakpoints);
    if cli.shorthand {
        config = config.with_transformer(Shorthand);
    }
    let mut stcss = StCss::new(config);

    match cli.command {
        Command::Build { path, output } => cmd_build(&mut stcss, &path, output.as_deref()),
        Command::Check { path } => cmd_check(&mut stcss, &path),
    }
}

fn read_styles(path: &str) -> Vec<Vec<StyleDescriptor>> {
    let p = Path::new(path);
    if !p.exists() {
        eprintln!("Error: file not found: {path}");
        std::process::exit(1);
    }
    let source = match std::fs::read_to_string(p) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error reading {path}: {e}");
            std::process::exit(1);
        }
    };
    match serde_json::from_str::<StyleFile>(&source) {
        Ok(file) => file.into_calls(),
        Err(e) => {
            eprintln!("Error parsing {path}: {e}");
            std::process::exit(1);
        }
    }
}

/// Resolve every call in order, returning one class string per call.
fn run_calls(stcss: &mut StCss, calls: &[Vec<StyleDescriptor>]) -> Result<Vec<String>, StCssError> {
    calls.iter().map(|styles| stcss.st(styles)).collect()
}

fn cmd_build(stcss: &mut StCss, path: &str, output: Option<&Path>) {
    let calls = read_styles(path);

    let classes = match run_calls(stcss, &calls) {
        Ok(classes) => classes,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    for (i, class) in classes.iter().enumerate() {
        println!("{i}\t{class}");
    }

    let css = stcss.to_string();
    match output {
        Some(out) => {
            if let Err(e) = std::fs::write(out, &css) {
                eprintln!("Error writing {}: {e}", out.display());
                std::process::exit(1);
            }
            eprintln!("Built: {} ({} classes)", out.display(), stcss.len());
        }
        None => {
            println!();
            println!("{css}");
        }
    }
}

fn cmd_check(stcss: &mut StCss, path: &str) {
    let calls = read_styles(path);

    if let Err(e) = run_calls(stcss, &calls) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    eprintln!("OK: {path} ({} classes)", stcss.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn calls(json: &str) -> Vec<Vec<StyleDescriptor>> {
        serde_json::from_str::<StyleFile>(json).unwrap().into_calls()
    }

    #[test]
    fn test_single_object_is_one_call() {
        let calls = calls(r#"{"color": "red"}"#);
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].len(), 1);
    }

    #[test]
    fn test_list_of_calls() {
        let calls = calls(r#"[{"color": "red"}, [{"color": "red"}, {"color": "blue"}]]"#);
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].len(), 1);
        assert_eq!(calls[1].len(), 2);
    }

    #[test]
    fn test_run_calls() {
        let mut stcss = StCss::new(StCssConfig::new(["40em"]));
        let classes = run_calls(
            &mut stcss,
            &calls(r#"[{"padding": [0, "8px"]}, [{"padding": 0}, {"margin": "auto"}]]"#),
        )
        .unwrap();
        assert_eq!(classes, vec!["st-0 st-1", "st-0 st-2"]);
        assert_eq!(
            stcss.to_string(),
            ".st-0{padding:0}.st-2{margin:auto}@media screen and (min-width: 40em) { .st-1{padding:8px} }"
        );
    }

    #[test]
    fn test_run_calls_with_shorthand() {
        let mut stcss = StCss::new(StCssConfig::new(Vec::<String>::new()).with_transformer(Shorthand));
        let classes = run_calls(&mut stcss, &calls(r#"{"size": "1rem"}"#)).unwrap();
        assert_eq!(classes, vec!["st-0 st-1"]);
        assert_eq!(stcss.to_string(), ".st-0{width:1rem}.st-1{height:1rem}");
    }

    #[test]
    fn test_run_calls_reports_error() {
        let mut stcss = StCss::new(StCssConfig::new(Vec::<String>::new()));
        let err = run_calls(&mut stcss, &calls(r#"{"color": ["red", "blue"]}"#)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "`color` has 2 breakpoint values but at most 1 are allowed"
        );
    }
}
