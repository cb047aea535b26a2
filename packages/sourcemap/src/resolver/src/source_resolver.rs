// Source Resolver
//
// Canonical form of every declared source and the reverse lookups used to
// find a source's mappings again from a URL or a local file.

use indexmap::IndexMap;

use super::canonical_url::{has_explicit_scheme, CanonicalUrl};
use crate::file_system::{clean_path, is_absolute_path, AbsoluteFsPath, ReadonlyFileSystem};
use crate::logging::Logger;
use crate::mapping::{MappingEntry, MappingList};
use crate::source_map::SourceMap;

/// Everything canonicalization depends on besides the raw strings.
#[derive(Clone, Copy)]
pub struct ResolverContext<'a> {
    /// URL the map was loaded from, or the directory relative sources live in.
    pub base_url: Option<&'a CanonicalUrl>,
    /// `base_url` names a file; relative sources resolve against its directory.
    pub base_url_is_file: bool,
    /// Turn `file://` sources into plain local paths.
    pub trim_file_scheme: bool,
    pub fs: &'a dyn ReadonlyFileSystem,
    pub logger: &'a dyn Logger,
}

/// Per-map path canonicalization table.
#[derive(Debug, Clone)]
pub struct SourceResolver {
    raw_sources: Vec<String>,
    sources_content: Option<Vec<Option<String>>>,
    canonicalized_sources: Vec<CanonicalUrl>,
    canonical_to_index: IndexMap<CanonicalUrl, usize>,
    absolute_local_path_to_index: Option<IndexMap<String, usize>>,
}

impl SourceResolver {
    pub fn new(
        raw_sources: Vec<String>,
        sources_content: Option<Vec<Option<String>>>,
        context: &ResolverContext<'_>,
    ) -> Self {
        let mut resolver = SourceResolver {
            canonicalized_sources: Vec::with_capacity(raw_sources.len()),
            canonical_to_index: IndexMap::with_capacity(raw_sources.len()),
            absolute_local_path_to_index: None,
            raw_sources: Vec::new(),
            sources_content,
        };

        for (index, raw) in raw_sources.iter().enumerate() {
            let url = resolver.resolve_source(raw, index, context);
            // Keyed without parameters; duplicates resolve last-write-wins.
            if let Some(previous) = resolver
                .canonical_to_index
                .insert(url.trim_parameters(), index)
            {
                context.logger.warn(&format!(
                    "source {} is declared at index {} and {}; using {}",
                    url, previous, index, index
                ));
            }
            resolver.canonicalized_sources.push(url);
        }

        resolver.raw_sources = raw_sources;
        resolver
    }

    /// Resolve `url` against the path of a base location.
    pub fn canonicalize_path(url: &str, base_path: &str, base_url_is_file: bool) -> String {
        let path = if is_absolute_path(url) {
            url.to_string()
        } else if base_url_is_file {
            match base_path.rfind('/') {
                Some(last_slash) => format!("{}{}", &base_path[..=last_slash], url),
                None => format!("/{}", url),
            }
        } else {
            format!("{}/{}", base_path, url)
        };
        clean_path(&path)
    }

    /// Canonical form of a raw source string, without consulting the file
    /// system.
    pub fn canonicalize_url(
        raw: &str,
        base_url: Option<&CanonicalUrl>,
        base_url_is_file: bool,
        trim_file_scheme: bool,
    ) -> CanonicalUrl {
        if trim_file_scheme {
            if let Some(url) = CanonicalUrl::from_file_url(raw) {
                return url;
            }
        }

        let base = match base_url {
            Some(base) if !has_explicit_scheme(raw) => base,
            _ => return CanonicalUrl::parse(raw),
        };

        let path = Self::canonicalize_path(raw, base.path(), base_url_is_file);
        base.with_path(&path)
    }

    fn resolve_source(&mut self, raw: &str, index: usize, context: &ResolverContext<'_>) -> CanonicalUrl {
        let url = Self::canonicalize_url(
            raw,
            context.base_url,
            context.base_url_is_file,
            context.trim_file_scheme,
        );

        // Bundlers such as browserify embed absolute build-machine paths; a
        // path that exists locally is a local file whatever the base was.
        let resolved_against_base = context.base_url.is_some() && !has_explicit_scheme(raw);
        if (url.is_local_file() || resolved_against_base) && is_absolute_path(url.path()) {
            let path = url.path().to_string();
            if self.register_local_file(&path, index, context) {
                return CanonicalUrl::LocalFile(path);
            }
        }
        url
    }

    fn register_local_file(&mut self, path: &str, index: usize, context: &ResolverContext<'_>) -> bool {
        let file = AbsoluteFsPath::new(path);
        if !context.fs.exists(&file) {
            return false;
        }

        let table = self
            .absolute_local_path_to_index
            .get_or_insert_with(IndexMap::new);
        table.insert(path.to_string(), index);

        match context.fs.realpath(&file) {
            Ok(real) if real.as_str() != path => {
                table.insert(real.into_string(), index);
            }
            Ok(_) => {}
            Err(err) => context.logger.debug(&format!(
                "cannot resolve canonical path of {}: {}",
                path, err
            )),
        }
        true
    }

    pub fn len(&self) -> usize {
        self.raw_sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw_sources.is_empty()
    }

    pub fn raw_sources(&self) -> &[String] {
        &self.raw_sources
    }

    pub fn canonicalized_sources(&self) -> &[CanonicalUrl] {
        &self.canonicalized_sources
    }

    pub fn source_index(&self, url: &CanonicalUrl) -> Option<usize> {
        self.canonical_to_index.get(&url.trim_parameters()).copied()
    }

    /// Index registered for an absolute local path (literal or OS-canonical).
    pub fn local_path_index(&self, path: &str) -> Option<usize> {
        self.absolute_local_path_to_index
            .as_ref()
            .and_then(|table| table.get(path).copied())
    }

    pub fn source_url(&self, entry: &MappingEntry) -> Option<&CanonicalUrl> {
        self.canonicalized_sources
            .get(entry.source_index()? as usize)
    }

    pub fn raw_source(&self, entry: &MappingEntry) -> Option<&str> {
        self.raw_sources
            .get(entry.source_index()? as usize)
            .map(String::as_str)
    }

    pub fn source_content(&self, index: usize) -> Option<&str> {
        self.sources_content.as_ref()?.get(index)?.as_deref()
    }

    pub fn source_content_for(&self, entry: &MappingEntry) -> Option<&str> {
        self.source_content(entry.source_index()? as usize)
    }

    /// Local path of the entry's source, if it resolved to a local file.
    pub fn local_file_path(&self, entry: &MappingEntry) -> Option<&str> {
        match self.source_url(entry)? {
            CanonicalUrl::LocalFile(path) => Some(path),
            CanonicalUrl::Remote(_) => None,
        }
    }

    /// Reverse mapping list for a source named by any of `source_urls`, or
    /// failing that, by the local `source_file`.
    pub fn find_mappings<'m>(
        &self,
        source_urls: &[CanonicalUrl],
        source_map: &'m SourceMap,
        source_file: Option<&AbsoluteFsPath>,
        fs: &dyn ReadonlyFileSystem,
    ) -> Option<&'m MappingList> {
        for url in source_urls {
            if let Some(index) = self.source_index(url) {
                return source_map.mappings_for_source(index);
            }
        }

        source_file.and_then(|file| self.find_by_file(source_map, file, fs))
    }

    fn find_by_file<'m>(
        &self,
        source_map: &'m SourceMap,
        file: &AbsoluteFsPath,
        fs: &dyn ReadonlyFileSystem,
    ) -> Option<&'m MappingList> {
        let real = fs.realpath(file).ok().filter(|real| real != file);

        if self.absolute_local_path_to_index.is_some() {
            let by_path = self
                .local_path_index(file.as_str())
                .and_then(|index| source_map.mappings_for_source(index));
            let by_real = || {
                real.as_ref()
                    .and_then(|real| self.local_path_index(real.as_str()))
                    .and_then(|index| source_map.mappings_for_source(index))
            };
            if let Some(mappings) = by_path.or_else(by_real) {
                return Some(mappings);
            }
        }

        let file_url = CanonicalUrl::from_file(file);
        if let Some(&index) = self.canonical_to_index.get(&file_url) {
            return source_map.mappings_for_source(index);
        }

        // Symlinks and case folding defeat the keyed lookups above.
        let case_sensitive = fs.is_case_sensitive();
        let real_url = real.as_ref().map(CanonicalUrl::from_file);
        self.canonicalized_sources
            .iter()
            .position(|url| {
                url.equals_ignore_parameters(&file_url, case_sensitive)
                    || real_url
                        .as_ref()
                        .is_some_and(|real| url.equals_ignore_parameters(real, case_sensitive))
            })
            .and_then(|index| source_map.mappings_for_source(index))
    }
}
