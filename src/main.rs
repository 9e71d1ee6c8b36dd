//! Command-line front end for the library: reads Markdown from a file (or
//! stdin) and writes the rendered HTML to stdout.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser as ClapParser;

use peggy_md::{parse, ExtensionSet};

/// Render Markdown to HTML using the peg-markdown grammar.
#[derive(ClapParser, Debug)]
#[command(name = "peggy-md", version, about, long_about = None)]
struct Cli {
    /// Markdown file to render; omit (or pass `-`) to read stdin.
    input: Option<PathBuf>,

    /// Recognize smart typography (quotes, dashes, ellipses).
    #[arg(long)]
    smart: bool,

    /// Recognize footnotes (`[^label]`, `^[...]`, `[^label]: ...`).
    #[arg(long)]
    notes: bool,

    /// Recognize definition lists.
    #[arg(long)]
    dlists: bool,

    /// Drop raw inline HTML and HTML blocks from the output.
    #[arg(long)]
    filter_html: bool,

    /// Drop the contents of `<style>` blocks from the output.
    #[arg(long)]
    filter_styles: bool,
}

fn extensions_from(cli: &Cli) -> ExtensionSet {
    ExtensionSet::builder()
        .smart(cli.smart)
        .notes(cli.notes)
        .dlists(cli.dlists)
        .filter_html(cli.filter_html)
        .filter_styles(cli.filter_styles)
        .build()
}

/// Prepends any arguments saved in the user's config file to argv, so flags
/// given on the command line still take precedence (clap keeps the last
/// occurrence of a boolean flag).
fn args_with_config() -> Vec<String> {
    let mut args: Vec<String> = std::env::args().collect();

    let dirs = xdg::BaseDirectories::with_prefix("peggy-md");
    let Some(config_path) = dirs.find_config_file("config") else {
        return args;
    };
    let Ok(contents) = fs::read_to_string(&config_path) else {
        return args;
    };
    let Ok(extra) = shell_words::split(contents.trim()) else {
        eprintln!("peggy-md: ignoring malformed config at {}", config_path.display());
        return args;
    };

    let mut combined = Vec::with_capacity(args.len() + extra.len());
    combined.push(args.remove(0));
    combined.extend(extra);
    combined.extend(args);
    combined
}

fn read_input(path: Option<&PathBuf>) -> io::Result<Vec<u8>> {
    match path {
        None => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf)?;
            Ok(buf)
        }
        Some(p) if p.as_os_str() == "-" => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf)?;
            Ok(buf)
        }
        Some(p) => fs::read(p),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse_from(args_with_config());

    let source = match read_input(cli.input.as_ref()) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("peggy-md: {e}");
            return ExitCode::FAILURE;
        }
    };

    let doc = parse(&source, extensions_from(&cli));

    let stdout = io::stdout();
    let result = fmt2io::write(stdout.lock(), |w| doc.write_html(w));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("peggy-md: {e}");
            ExitCode::FAILURE
        }
    }
}
