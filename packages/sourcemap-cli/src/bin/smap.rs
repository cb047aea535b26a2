/**
 * Source Map Lookup CLI - smap
 *
 * Inspect source maps and translate positions between generated and
 * original files
 */
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::path::{Path, PathBuf};
use std::process;

use source_map_lookup::logging::{ConsoleLogger, LogLevel};
use source_map_lookup_cli::commands;
use source_map_lookup_cli::config::SmapConfig;

fn map_arg() -> Arg {
    Arg::new("map")
        .value_name("MAP")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Path to a .map file")
}

fn line_arg() -> Arg {
    Arg::new("line")
        .short('l')
        .long("line")
        .required(true)
        .value_parser(value_parser!(u32))
        .help("Line number (0-based)")
}

fn cli() -> Command {
    Command::new("smap")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Source map v3 lookups")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf))
                .help("Path to smap.json")
                .global(true),
        )
        .arg(
            Arg::new("base-url")
                .long("base-url")
                .value_name("URL")
                .help("Base that relative sources resolve against")
                .global(true),
        )
        .arg(
            Arg::new("base-url-is-file")
                .long("base-url-is-file")
                .action(ArgAction::SetTrue)
                .help("The base URL names a file; use its directory")
                .global(true),
        )
        .arg(
            Arg::new("no-trim-file-scheme")
                .long("no-trim-file-scheme")
                .action(ArgAction::SetTrue)
                .help("Keep file:// sources as URLs instead of local paths")
                .global(true),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .value_parser(|s: &str| s.parse::<LogLevel>())
                .help("debug, info, warn or error")
                .global(true),
        )
        .subcommand(
            Command::new("info")
                .about("Print the file, sources and mapping counts of a map")
                .arg(map_arg()),
        )
        .subcommand(
            Command::new("original")
                .about("Original position in effect at a generated position")
                .arg(map_arg())
                .arg(line_arg())
                .arg(
                    Arg::new("column")
                        .short('c')
                        .long("column")
                        .required(true)
                        .value_parser(value_parser!(u32))
                        .help("Column number (0-based)"),
                ),
        )
        .subcommand(
            Command::new("generated")
                .about("First generated position of an original source line")
                .arg(map_arg())
                .arg(
                    Arg::new("source")
                        .short('s')
                        .long("source")
                        .value_name("URL")
                        .required(true)
                        .help("Source as declared in the map, or a local path"),
                )
                .arg(line_arg()),
        )
        .subcommand(
            Command::new("check")
                .about("Decode every map matching the patterns")
                .arg(
                    Arg::new("patterns")
                        .value_name("GLOB")
                        .required(true)
                        .num_args(1..)
                        .help("Glob patterns such as dist/**/*.map"),
                ),
        )
}

fn flag_overrides(matches: &ArgMatches) -> SmapConfig {
    SmapConfig {
        base_url: matches.get_one::<String>("base-url").cloned(),
        base_url_is_file: matches.get_flag("base-url-is-file").then_some(true),
        trim_file_scheme: matches.get_flag("no-trim-file-scheme").then_some(false),
        log_level: matches.get_one::<LogLevel>("log-level").copied(),
    }
}

fn map_path(matches: &ArgMatches) -> &Path {
    matches
        .get_one::<PathBuf>("map")
        .map(PathBuf::as_path)
        .unwrap_or_else(|| Path::new(""))
}

fn position(matches: &ArgMatches, name: &str) -> u32 {
    matches.get_one::<u32>(name).copied().unwrap_or(0)
}

fn run(matches: &ArgMatches) -> anyhow::Result<i32> {
    let config_path = matches.get_one::<PathBuf>("config").map(PathBuf::as_path);
    let config = SmapConfig::discover(config_path)?.merge(flag_overrides(matches));
    let options = config.decode_options();
    let logger = ConsoleLogger::new(options.log_level);

    match matches.subcommand() {
        Some(("info", sub)) => {
            println!("{}", commands::info(map_path(sub), &options, &logger)?);
            Ok(0)
        }
        Some(("original", sub)) => {
            let (line, column) = (position(sub, "line"), position(sub, "column"));
            match commands::original(map_path(sub), line, column, &options, &logger)? {
                Some(found) => {
                    println!("{}", found);
                    Ok(0)
                }
                None => {
                    eprintln!("no mapping at {}:{}", line, column);
                    Ok(1)
                }
            }
        }
        Some(("generated", sub)) => {
            let source = sub.get_one::<String>("source").map_or("", String::as_str);
            let line = position(sub, "line");
            match commands::generated(map_path(sub), source, line, &options, &logger)? {
                Some(found) => {
                    println!("{}", found);
                    Ok(0)
                }
                None => {
                    eprintln!("no mapping for {} line {}", source, line);
                    Ok(1)
                }
            }
        }
        Some(("check", sub)) => {
            let patterns: Vec<String> = sub
                .get_many::<String>("patterns")
                .map(|values| values.cloned().collect())
                .unwrap_or_default();
            let paths = commands::expand_patterns(&patterns)?;
            if paths.is_empty() {
                eprintln!("no files match {}", patterns.join(" "));
                return Ok(1);
            }
            let report = commands::check(&paths, &options, &logger);
            println!("{}", report);
            Ok(if report.failed_count() > 0 { 1 } else { 0 })
        }
        _ => Ok(2),
    }
}

fn main() {
    let matches = cli().get_matches();
    match run(&matches) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}
