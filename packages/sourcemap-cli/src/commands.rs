// Commands
//
// The work behind each `smap` subcommand. Every command returns its report
// as text; the binary decides where it goes and which exit code to use.

use anyhow::Context;
use rayon::prelude::*;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::DecodeOptions;
use source_map_lookup::file_system::{AbsoluteFsPath, LocalFileSystem};
use source_map_lookup::logging::Logger;
use source_map_lookup::resolver::SourceResolver;
use source_map_lookup::{CanonicalUrl, MappingEntry, SourceMap, SourceMapDecoder};

/// Absolute form of `path`, joined onto the working directory if relative.
fn absolute(path: &Path) -> anyhow::Result<AbsoluteFsPath> {
    if path.is_absolute() {
        return Ok(AbsoluteFsPath::from_path(path));
    }
    let cwd = std::env::current_dir().context("cannot determine working directory")?;
    Ok(AbsoluteFsPath::from_path(cwd.join(path)))
}

/// Read and decode the map at `path`.
///
/// Without a configured base URL, relative sources resolve against the
/// directory of the map file itself.
pub fn load_map(
    path: &Path,
    options: &DecodeOptions,
    logger: &dyn Logger,
) -> anyhow::Result<Option<SourceMap>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))?;

    let fs = LocalFileSystem::new();
    let decoder = SourceMapDecoder::new(&fs)
        .with_logger(logger)
        .with_trim_file_scheme(options.trim_file_scheme);
    let decoder = match &options.base_url {
        Some(base) => decoder.with_base_url(base.clone(), options.base_url_is_file),
        None => decoder.with_base_url(CanonicalUrl::from_file(&absolute(path)?), true),
    };

    let map = decoder
        .decode(&text)
        .with_context(|| format!("cannot decode {}", path.display()))?;
    Ok(map)
}

/// `source:line:column [name]` for a mapped entry.
pub fn describe_entry(map: &SourceMap, entry: &MappingEntry) -> String {
    let Some(source) = entry.source() else {
        return format!(
            "{}:{} is not mapped",
            entry.generated_line(),
            entry.generated_column()
        );
    };
    let url = map
        .source_resolver()
        .source_url(entry)
        .map(CanonicalUrl::to_string)
        .unwrap_or_default();

    match map.name_of(entry) {
        Some(name) => format!("{}:{}:{} {}", url, source.line, source.column, name),
        None => format!("{}:{}:{}", url, source.line, source.column),
    }
}

pub fn info(path: &Path, options: &DecodeOptions, logger: &dyn Logger) -> anyhow::Result<String> {
    let Some(map) = load_map(path, options, logger)? else {
        return Ok(format!("{}: no mappings", path.display()));
    };

    let resolver = map.source_resolver();
    let mut report = vec![
        format!("file: {}", map.out_file().unwrap_or("-")),
        format!("sources: {}", map.sources_count()),
        format!("mappings: {}", map.generated_mappings().len()),
        format!("names: {}", map.names().len()),
    ];
    for (index, url) in resolver.canonicalized_sources().iter().enumerate() {
        let count = map.mappings_for_source(index).map_or(0, |list| list.len());
        report.push(format!("  [{}] {} ({} mappings)", index, url, count));
    }
    Ok(report.join("\n"))
}

/// Original position in effect at a generated position.
pub fn original(
    path: &Path,
    line: u32,
    column: u32,
    options: &DecodeOptions,
    logger: &dyn Logger,
) -> anyhow::Result<Option<String>> {
    let Some(map) = load_map(path, options, logger)? else {
        return Ok(None);
    };
    Ok(map
        .entry_at(line, column)
        .map(|entry| describe_entry(&map, entry)))
}

/// First generated position of an original source line, as `line:column`.
///
/// `source` is matched both as declared in the map (resolved like the map's
/// own sources) and as a local file.
pub fn generated(
    path: &Path,
    source: &str,
    line: u32,
    options: &DecodeOptions,
    logger: &dyn Logger,
) -> anyhow::Result<Option<String>> {
    let Some(map) = load_map(path, options, logger)? else {
        return Ok(None);
    };

    let (base, base_is_file) = match &options.base_url {
        Some(base) => (base.clone(), options.base_url_is_file),
        None => (CanonicalUrl::from_file(&absolute(path)?), true),
    };
    let urls = [
        SourceResolver::canonicalize_url(source, Some(&base), base_is_file, options.trim_file_scheme),
        CanonicalUrl::parse(source),
    ];

    let source_file = Path::new(source)
        .is_absolute()
        .then(|| AbsoluteFsPath::from_path(source));
    let fs = LocalFileSystem::new();

    Ok(map
        .find_first_entry_in_source_line(&urls, line, source_file.as_ref(), &fs)
        .map(|entry| format!("{}:{}", entry.generated_line(), entry.generated_column())))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    Decoded { mappings: usize, sources: usize },
    Empty,
    Failed(String),
}

#[derive(Debug, Default)]
pub struct CheckReport {
    pub results: Vec<(PathBuf, CheckOutcome)>,
}

impl CheckReport {
    pub fn failed_count(&self) -> usize {
        self.results
            .iter()
            .filter(|(_, outcome)| matches!(outcome, CheckOutcome::Failed(_)))
            .count()
    }
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (path, outcome) in &self.results {
            match outcome {
                CheckOutcome::Decoded { mappings, sources } => writeln!(
                    f,
                    "ok     {} ({} mappings, {} sources)",
                    path.display(),
                    mappings,
                    sources
                )?,
                CheckOutcome::Empty => writeln!(f, "empty  {}", path.display())?,
                CheckOutcome::Failed(reason) => {
                    writeln!(f, "failed {}: {}", path.display(), reason)?
                }
            }
        }
        write!(
            f,
            "{} checked, {} failed",
            self.results.len(),
            self.failed_count()
        )
    }
}

/// Files matched by any of `patterns`, sorted and without duplicates.
pub fn expand_patterns(patterns: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for pattern in patterns {
        let entries =
            glob::glob(pattern).with_context(|| format!("invalid pattern {}", pattern))?;
        for entry in entries {
            let path = entry.with_context(|| format!("cannot read match of {}", pattern))?;
            if path.is_file() {
                paths.push(path);
            }
        }
    }
    paths.sort();
    paths.dedup();
    Ok(paths)
}

/// Decode every file in parallel. Results keep the order of `paths`.
pub fn check(
    paths: &[PathBuf],
    options: &DecodeOptions,
    logger: &(dyn Logger + Sync),
) -> CheckReport {
    let results = paths
        .par_iter()
        .map(|path| {
            let outcome = match load_map(path, options, logger) {
                Ok(Some(map)) => CheckOutcome::Decoded {
                    mappings: map.generated_mappings().len(),
                    sources: map.sources_count(),
                },
                Ok(None) => CheckOutcome::Empty,
                Err(err) => {
                    logger.debug(&format!("{:?}", err));
                    CheckOutcome::Failed(format!("{:#}", err))
                }
            };
            (path.clone(), outcome)
        })
        .collect();
    CheckReport { results }
}
