use std::path::PathBuf;
use std::process;

use voxelsand_tools::commands::{self, ToolError};
use voxelsand_tools::report;

const USAGE: &str = "\
Usage: voxel-tool <COMMAND> [OPTIONS]

Commands:
  generate [--seed <n>] [--config <path.ron>] [--output <file.json>] [--json]
      Generate terrain and print a summary; optionally export it
  inspect <file.json> [--config <path.ron>] [--json]
      Import a voxel list and print a per-material summary
  normalize <in.json> <out.json>
      Import a voxel list and re-export it in canonical order";

#[derive(Debug, Default)]
struct Options {
    positional: Vec<String>,
    seed: Option<u64>,
    config: Option<PathBuf>,
    output: Option<PathBuf>,
    json: bool,
}

fn usage_error(message: &str) -> ! {
    eprintln!("{message}\n\n{USAGE}");
    process::exit(2);
}

fn parse_options(args: &[String]) -> Options {
    let mut options = Options::default();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                let value = args.get(i).unwrap_or_else(|| usage_error("--seed needs a value"));
                options.seed = Some(
                    value
                        .parse()
                        .unwrap_or_else(|_| usage_error(&format!("invalid --seed value: {value}"))),
                );
            }
            "--config" => {
                i += 1;
                let value = args.get(i).unwrap_or_else(|| usage_error("--config needs a path"));
                options.config = Some(PathBuf::from(value));
            }
            "--output" => {
                i += 1;
                let value = args.get(i).unwrap_or_else(|| usage_error("--output needs a path"));
                options.output = Some(PathBuf::from(value));
            }
            "--json" => options.json = true,
            "--help" | "-h" => {
                println!("{USAGE}");
                process::exit(0);
            }
            other if other.starts_with("--") => usage_error(&format!("Unknown argument: {other}")),
            other => options.positional.push(other.to_string()),
        }
        i += 1;
    }
    options
}

fn run(command: &str, options: Options) -> Result<(), ToolError> {
    let mut config = commands::load_config(options.config.as_deref())?;

    match command {
        "generate" => {
            if let Some(seed) = options.seed {
                config.seed = seed;
            }
            let (summary, json) = commands::generate(&config)?;
            if options.json {
                println!("{}", to_json(&summary));
            } else {
                println!("{}", report::format_terrain(&summary));
            }
            if let Some(path) = &options.output {
                commands::write_file(path, &json)?;
                log::info!("Saved terrain to {}", path.display());
            }
        }
        "inspect" => {
            let [input] = options.positional.as_slice() else {
                usage_error("inspect takes exactly one input file");
            };
            let bytes = commands::read_file(input.as_ref())?;
            let summary = commands::inspect(&bytes, &config)?;
            if options.json {
                println!("{}", to_json(&summary));
            } else {
                println!("{}", report::format_grid(&summary));
            }
        }
        "normalize" => {
            let [input, output] = options.positional.as_slice() else {
                usage_error("normalize takes an input and an output file");
            };
            let bytes = commands::read_file(input.as_ref())?;
            let json = commands::normalize(&bytes, &config)?;
            commands::write_file(output.as_ref(), &json)?;
            log::info!("Normalized {input} into {output}");
        }
        other => usage_error(&format!("Unknown command: {other}")),
    }
    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some((command, rest)) = args.split_first() else {
        usage_error("Missing command");
    };
    if command == "--help" || command == "-h" {
        println!("{USAGE}");
        return;
    }

    if let Err(e) = run(command, parse_options(rest)) {
        log::error!("{e}");
        process::exit(1);
    }
}
