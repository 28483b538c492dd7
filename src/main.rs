//! tidylinks - Shorten URL-only link labels

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use tidylinks::dom::{self, ArenaDom};
use tidylinks::{Rewriter, Settings, prettify};

#[derive(Parser)]
#[command(name = "tidylinks")]
#[command(version, about = "Shorten links whose label is their own URL", long_about = None)]
#[command(after_help = "EXAMPLES:
    tidylinks page.html -o out.html       Rewrite links in a document
    tidylinks --fragment < note.html      Rewrite an HTML fragment from stdin
    tidylinks -u https://www.example.com/ Print a prettified URL")]
struct Cli {
    /// HTML file to rewrite (`-` for stdin), or URLs with --url
    #[arg(value_name = "INPUT")]
    inputs: Vec<String>,

    /// Write output here instead of stdout
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Settings JSON file
    #[arg(short, long, value_name = "SETTINGS")]
    config: Option<PathBuf>,

    /// Keep `www.` prefixes
    #[arg(long)]
    keep_www: bool,

    /// Keep numbered `www1.`-style prefixes
    #[arg(long)]
    keep_www_plus: bool,

    /// Keep `m.` and `mobile.` prefixes
    #[arg(long)]
    keep_mobile: bool,

    /// Keep `amp.` and `wap.` prefixes
    #[arg(long)]
    keep_amp: bool,

    /// Also rewrite metadata-panel links
    #[arg(long)]
    metadata: bool,

    /// Treat INPUT as URLs and print them prettified
    #[arg(short, long)]
    url: bool,

    /// Print only the contents of <body>
    #[arg(long, conflicts_with = "url")]
    fragment: bool,

    /// Suppress the summary
    #[arg(short, long)]
    quiet: bool,

    /// Log each rewritten link
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let result = settings(&cli).and_then(|settings| {
        if cli.url {
            prettify_urls(&cli, &settings)
        } else {
            rewrite(&cli, settings)
        }
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Settings from `--config`, overridden by command-line flags.
fn settings(cli: &Cli) -> Result<Settings, String> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load(path).map_err(|e| format!("{}: {e}", path.display()))?,
        None => Settings::default(),
    };

    if cli.keep_www {
        settings.strip_www_subdomain = false;
    }
    if cli.keep_www_plus {
        settings.strip_www_plus_subdomain = false;
    }
    if cli.keep_mobile {
        settings.strip_mobile_subdomain = false;
    }
    if cli.keep_amp {
        settings.strip_amp_subdomain = false;
    }
    if cli.metadata {
        settings.format_metadata = true;
    }

    Ok(settings)
}

fn prettify_urls(cli: &Cli, settings: &Settings) -> Result<(), String> {
    if cli.inputs.is_empty() {
        return Err("--url needs at least one URL".to_string());
    }

    let options = settings.formatter_options();
    let mut out = String::new();
    for url in &cli.inputs {
        out.push_str(&prettify(url, &options));
        out.push('\n');
    }
    write_output(cli, out.as_bytes())
}

fn rewrite(cli: &Cli, settings: Settings) -> Result<(), String> {
    let input = match cli.inputs.as_slice() {
        [] => "-",
        [one] => one.as_str(),
        _ => return Err("expected a single INPUT".to_string()),
    };

    let mut dom = read_document(input)?;
    let rewriter = Rewriter::new(settings).map_err(|e| e.to_string())?;
    let report = rewriter.rewrite_document(&mut dom);

    let html = match dom::body(&dom) {
        Some(body) if cli.fragment => dom::serialize_children(&dom, body),
        _ => dom::serialize_document(&dom),
    };
    write_output(cli, html.as_bytes())?;

    if !cli.quiet {
        eprintln!(
            "Rewrote {} of {} links ({} URL-only)",
            report.rewritten, report.candidates, report.url_only
        );
    }

    Ok(())
}

fn read_document(input: &str) -> Result<ArenaDom, String> {
    let bytes = if input == "-" {
        let mut buf = Vec::new();
        io::stdin()
            .read_to_end(&mut buf)
            .map_err(|e| format!("stdin: {e}"))?;
        buf
    } else {
        fs::read(input).map_err(|e| format!("{input}: {e}"))?
    };
    Ok(dom::parse_html_bytes(&bytes))
}

fn write_output(cli: &Cli, data: &[u8]) -> Result<(), String> {
    match &cli.output {
        Some(path) => fs::write(path, data).map_err(|e| format!("{}: {e}", path.display())),
        None => io::stdout().write_all(data).map_err(|e| e.to_string()),
    }
}
