// Source Map Decoder
//
// Turns the text of a version 3 source map into a queryable SourceMap.

use super::errors::DecodeError;
use super::mappings::decode_mappings;
use super::raw_source_map::RawSourceMap;
use crate::file_system::{normalize_separators, LocalFileSystem, ReadonlyFileSystem};
use crate::logging::{Logger, NullLogger};
use crate::mapping::MappingList;
use crate::resolver::{CanonicalUrl, ResolverContext, SourceResolver};
use crate::source_map::SourceMap;

static LOCAL_FILE_SYSTEM: LocalFileSystem = LocalFileSystem;
static NULL_LOGGER: NullLogger = NullLogger;

/// Decode options plus the services decoding consults.
pub struct SourceMapDecoder<'a> {
    fs: &'a dyn ReadonlyFileSystem,
    logger: &'a dyn Logger,
    base_url: Option<CanonicalUrl>,
    base_url_is_file: bool,
    trim_file_scheme: bool,
}

impl<'a> SourceMapDecoder<'a> {
    pub fn new(fs: &'a dyn ReadonlyFileSystem) -> Self {
        SourceMapDecoder {
            fs,
            logger: &NULL_LOGGER,
            base_url: None,
            base_url_is_file: false,
            trim_file_scheme: true,
        }
    }

    pub fn with_logger(mut self, logger: &'a dyn Logger) -> Self {
        self.logger = logger;
        self
    }

    /// Resolve relative sources against `base_url`. With `is_file`, the base
    /// names the map (or generated file) itself and its directory is used.
    pub fn with_base_url(mut self, base_url: CanonicalUrl, is_file: bool) -> Self {
        self.base_url = Some(base_url);
        self.base_url_is_file = is_file;
        self
    }

    pub fn with_trim_file_scheme(mut self, trim_file_scheme: bool) -> Self {
        self.trim_file_scheme = trim_file_scheme;
        self
    }

    /// Decode `text`.
    ///
    /// `Ok(None)` means a well-formed map without anything to look up: no
    /// sources, or no mappings.
    pub fn decode(&self, text: &str) -> Result<Option<SourceMap>, DecodeError> {
        let raw = RawSourceMap::parse(text)?;

        if let Some(version) = raw.version {
            if version != 3 {
                return Err(DecodeError::UnsupportedVersion(version));
            }
        }
        if raw.sections.is_some() {
            return Err(DecodeError::UnsupportedFeature("sections"));
        }

        let sources = raw
            .sources
            .ok_or_else(|| DecodeError::malformed("missing \"sources\""))?;
        if sources.is_empty() {
            self.logger.debug("source map declares no sources");
            return Ok(None);
        }

        let mappings_text = match raw.mappings.as_deref() {
            Some(text) if !text.is_empty() => text,
            _ => {
                self.logger.debug("source map has no mappings");
                return Ok(None);
            }
        };

        let source_root = raw
            .source_root
            .as_deref()
            .map(normalize_source_path)
            .map(|root| root.trim_end_matches('/').to_string())
            .filter(|root| !root.is_empty());

        let raw_sources: Vec<String> = sources
            .iter()
            .map(|source| {
                let path = normalize_source_path(source.as_deref().unwrap_or_default());
                match &source_root {
                    Some(root) => format!("{}/{}", root, path),
                    None => path,
                }
            })
            .collect();

        let names = raw.names.unwrap_or_default();
        let decoded = decode_mappings(mappings_text, raw_sources.len(), names.len())?;
        if decoded.entries.is_empty() {
            self.logger.debug("source map mappings contain no segments");
            return Ok(None);
        }
        if decoded.reordered {
            self.logger
                .warn("source map segments were out of generated order and have been sorted");
        }

        let source_index_to_mappings: Vec<Option<MappingList>> = decoded
            .by_source
            .into_iter()
            .map(|entries| (!entries.is_empty()).then(|| MappingList::by_source(entries)))
            .collect();

        let context = ResolverContext {
            base_url: self.base_url.as_ref(),
            base_url_is_file: self.base_url_is_file,
            trim_file_scheme: self.trim_file_scheme,
            fs: self.fs,
            logger: self.logger,
        };
        let source_resolver = SourceResolver::new(raw_sources, raw.sources_content, &context);

        self.logger.debug(&format!(
            "decoded {} mappings over {} sources",
            decoded.entries.len(),
            source_resolver.len()
        ));

        Ok(Some(SourceMap::new(
            raw.file,
            MappingList::by_generated(decoded.entries),
            source_index_to_mappings,
            names,
            source_resolver,
        )))
    }
}

impl Default for SourceMapDecoder<'static> {
    fn default() -> Self {
        SourceMapDecoder::new(&LOCAL_FILE_SYSTEM)
    }
}

fn normalize_source_path(path: &str) -> String {
    normalize_separators(path.trim())
}

/// Decode with the local file system and no base URL.
pub fn decode(text: &str) -> Result<Option<SourceMap>, DecodeError> {
    SourceMapDecoder::default().decode(text)
}
