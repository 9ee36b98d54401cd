use std::env;

use tracing_subscriber::EnvFilter;
use wikifetch::{get, OutputFormat};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut overwrite = false;
    let mut format = OutputFormat::default();
    let mut proxy: Option<String> = None;
    let mut title: Option<String> = None;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--overwrite" {
            overwrite = true;
        } else if arg == "--format" {
            let value = args.next().unwrap_or_else(|| {
                eprintln!("Error: --format requires a value (html|markdown)");
                std::process::exit(1);
            });
            format = parse_format(&value);
        } else if let Some(value) = arg.strip_prefix("--format=") {
            format = parse_format(value);
        } else if arg == "--proxy" {
            let value = args.next().unwrap_or_else(|| {
                eprintln!("Error: --proxy requires a URL");
                std::process::exit(1);
            });
            proxy = Some(value);
        } else if let Some(value) = arg.strip_prefix("--proxy=") {
            proxy = Some(value.to_string());
        } else if title.is_none() {
            title = Some(arg);
        } else {
            eprintln!("Error: unexpected argument: {}", arg);
            std::process::exit(1);
        }
    }

    let title = title.unwrap_or_else(|| {
        eprintln!("Usage: wikifetch [--overwrite] [--format html|markdown] [--proxy URL] <title>");
        std::process::exit(1);
    });

    match get(&title, overwrite, format, proxy.as_deref()) {
        Ok(artifact) => {
            println!("[{}] {}", artifact.format, artifact.path.display());
            println!("{}", artifact.content);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn parse_format(value: &str) -> OutputFormat {
    value.parse().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    })
}
