use clap::Parser;
use env_logger::Env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use stylemerge_lib::merge_stylesheets::{self, MergeOptions, MergeReport};
use stylemerge_lib::parser::style_block::extract_style_block;
use thiserror::Error;

const SEPARATOR: &str =
    "============================================================";

#[derive(Parser)]
#[command(name = "stylemerge")]
#[command(about = "Merge an HTML page's inline <style> block into its external stylesheet")]
struct Args {
    /// HTML file holding the inline <style> block.
    #[arg(default_value = "index.html")]
    html: PathBuf,

    /// External stylesheet; its rules win over inline ones.
    #[arg(default_value = "rep.css")]
    css: PathBuf,

    /// Write the result to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit bare CSS without the surrounding <style> tag.
    #[arg(long)]
    raw: bool,

    /// Skip invalid rules instead of discarding a whole source.
    #[arg(long)]
    recover: bool,

    /// Print only the result.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Log every merge decision.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("could not read {}: {source}", .path.display())]
    MissingInput {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {}: {source}", .path.display())]
    WriteOutput {
        path: PathBuf,
        source: std::io::Error,
    },
}

fn main() {
    // parse the args given in terminal
    let args: Args = Args::parse();

    let default_level = if args.quiet {
        "error"
    } else if args.verbose {
        "debug"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    let html_content = read_input(&args.html)?;
    let css_content = read_input(&args.css)?;

    if !args.quiet {
        println!("HTML: {}", args.html.display());
        println!("CSS: {}\n", args.css.display());
        println!("Parsing CSS...");
    }

    let inline_css = extract_style_block(&html_content);
    let options = MergeOptions {
        verbose: !args.quiet,
        error_recovery: args.recover,
        external_name: args.css.display().to_string(),
        inline_name: format!("<style> in {}", args.html.display()),
    };
    let report = merge_stylesheets::generate(&css_content, &inline_css, &options);

    if !args.quiet {
        print_summary(&report);
    }

    let rendered = if args.raw {
        report.css.clone()
    } else {
        report.to_style_tag()
    };

    match &args.output {
        Some(path) => {
            fs::write(path, format!("{}\n", rendered)).map_err(|source| CliError::WriteOutput {
                path: path.clone(),
                source,
            })?;
            if !args.quiet {
                println!("Wrote merged styles to {}", path.display());
            }
        }
        None if args.quiet => println!("{}", rendered),
        None => {
            println!("{}", SEPARATOR);
            println!("MERGED <style> BLOCK");
            println!("{}", SEPARATOR);
            println!("{}", rendered);
            println!("{}", SEPARATOR);
        }
    }

    Ok(())
}

fn read_input(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::MissingInput {
        path: path.to_path_buf(),
        source,
    })
}

fn print_summary(report: &MergeReport) {
    let summary = &report.summary;
    println!("   From CSS file: {} rules", summary.external_rules);
    println!("   From <style>: {} rules", summary.inline_rules);
    println!(
        "   Total: {} rules (+{} new)\n",
        summary.merged_rules, summary.added_from_inline
    );
    for failure in report.failures() {
        println!("   Skipped: {}", failure);
    }
}
