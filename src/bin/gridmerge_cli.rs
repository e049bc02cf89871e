//! CLI tool for gridmerge - merges ranges on a square grid and outputs the HTML table
//!
//! Usage:
//!   gridmerge_cli <size> [RANGE ...]                 # HTML to stdout
//!   gridmerge_cli <size> A1:B2 C3:C4 -o table.html   # HTML to file
//!   gridmerge_cli <size> A1:B2 --animate --delay 5   # typewriter reveal on stdout
//!   gridmerge_cli <size> A1:B2 --json                # committed regions as JSON
//!
//! Log output goes to stderr and is controlled by `RUST_LOG` (default `warn`).

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    cli::run();
}

// The browser build has no command line; this keeps `wasm-pack test` building.
#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::env;
    use std::io::{self, Write};
    use std::path::Path;
    use std::process;
    use std::thread;

    use gridmerge::cell_ref::{format_range, parse_cell_range};
    use gridmerge::codegen::reveal_blocking;
    use gridmerge::export::DirectorySink;
    use gridmerge::{EditorConfig, MergeEditor};
    use tracing_subscriber::EnvFilter;

    const USAGE: &str = "Usage: gridmerge_cli <size> [RANGE ...] \
        [-o output.html | --animate] [--delay MS] [--json]";

    #[derive(Debug, Default, PartialEq, Eq)]
    pub(crate) struct Args {
        pub(crate) size: i64,
        pub(crate) ranges: Vec<String>,
        pub(crate) output: Option<String>,
        pub(crate) animate: bool,
        pub(crate) delay_ms: Option<u64>,
        pub(crate) json: bool,
        pub(crate) help: bool,
    }

    fn usage_error(message: &str) -> ! {
        eprintln!("{message}");
        eprintln!("{USAGE}");
        process::exit(1);
    }

    pub(crate) fn parse_args<I>(args: I) -> Result<Args, String>
    where
        I: IntoIterator<Item = String>,
    {
        let mut iter = args.into_iter();
        let size_arg = iter.next().ok_or("missing grid size")?;
        if size_arg == "-h" || size_arg == "--help" {
            return Ok(Args {
                help: true,
                ..Args::default()
            });
        }
        let size = size_arg
            .parse::<i64>()
            .map_err(|_| format!("invalid grid size: {size_arg}"))?;

        let mut args = Args {
            size,
            ..Args::default()
        };
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "-o" => {
                    let path = iter.next().ok_or("-o needs a file name")?;
                    args.output = Some(path);
                }
                "--animate" => args.animate = true,
                "--json" => args.json = true,
                "--delay" => {
                    let ms = iter
                        .next()
                        .and_then(|v| v.parse::<u64>().ok())
                        .ok_or("--delay needs a number of milliseconds")?;
                    args.delay_ms = Some(ms);
                }
                "-h" | "--help" => args.help = true,
                _ => args.ranges.push(arg),
            }
        }

        if args.animate && args.output.is_some() {
            return Err("--animate writes to stdout and cannot be combined with -o".into());
        }
        if args.size < 1 {
            return Err(format!("grid size must be at least 1, got {}", args.size));
        }
        Ok(args)
    }

    pub(crate) fn run() {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .with_writer(io::stderr)
            .init();

        let args = parse_args(env::args().skip(1)).unwrap_or_else(|e| usage_error(&e));
        if args.help {
            println!("{USAGE}");
            return;
        }

        let mut config = EditorConfig::default();
        if let Some(ms) = args.delay_ms {
            config.base_delay_ms = ms;
        }
        let output_dir = match args.output.as_deref() {
            Some(path) => {
                let path = Path::new(path);
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    config.file_name = name.to_string();
                }
                let parent = path.parent().filter(|p| !p.as_os_str().is_empty());
                Some(parent.unwrap_or_else(|| Path::new(".")).to_path_buf())
            }
            None => None,
        };

        let mut editor = MergeEditor::new(config);
        if !editor.set_size(args.size) {
            usage_error(&format!("grid size out of range: {}", args.size));
        }

        for range in &args.ranges {
            let rect = match parse_cell_range(range) {
                Ok(rect) => rect,
                Err(e) => {
                    eprintln!("Error: {e}");
                    process::exit(1);
                }
            };
            if let Err(e) = editor.merge_range(rect) {
                eprintln!("Error merging {}: {e}", format_range(&rect));
                process::exit(1);
            }
        }

        if args.json {
            let json = match serde_json::to_string_pretty(editor.regions()) {
                Ok(j) => j,
                Err(e) => {
                    eprintln!("Error serializing JSON: {e}");
                    process::exit(1);
                }
            };
            println!("{json}");
            return;
        }

        editor.generate_code();

        match output_dir {
            Some(dir) => {
                editor.finish_reveal();
                let mut sink = DirectorySink::new(dir);
                if let Err(e) = editor.export_as_file(&mut sink) {
                    eprintln!("Error writing output: {e}");
                    process::exit(1);
                }
                if let Some(path) = sink.last_written() {
                    eprintln!("Written: {}", path.display());
                }
            }
            None if args.animate => {
                let code = editor.generated_code().unwrap_or_default().to_string();
                let base_delay = editor.config().base_delay();
                let mut stdout = io::stdout();
                reveal_blocking(&code, base_delay, thread::sleep, |ch| {
                    let mut buf = [0u8; 4];
                    let _ = stdout.write_all(ch.encode_utf8(&mut buf).as_bytes());
                    let _ = stdout.flush();
                });
            }
            None => {
                editor.finish_reveal();
                io::stdout()
                    .write_all(editor.displayed_code().as_bytes())
                    .unwrap();
            }
        }
    }

}
