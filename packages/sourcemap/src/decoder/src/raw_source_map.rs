// Raw Source Map
//
// The JSON envelope of a version 3 source map, before `mappings` is decoded.

use serde::de::IgnoredAny;
use serde::Deserialize;

/// Guard some servers prepend to JSON responses against XSSI.
const XSSI_GUARD_PREFIX: &str = ")]}";

/// Raw source map (version 3). Unknown keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSourceMap {
    pub version: Option<u64>,
    pub file: Option<String>,
    pub source_root: Option<String>,
    pub sources: Option<Vec<Option<String>>>,
    pub sources_content: Option<Vec<Option<String>>>,
    pub names: Option<Vec<String>>,
    pub mappings: Option<String>,
    /// Only checked for presence; index maps are not supported.
    pub sections: Option<IgnoredAny>,
}

impl RawSourceMap {
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(strip_xssi_guard(text))
    }
}

/// Drop a leading `)]}'` line.
pub fn strip_xssi_guard(text: &str) -> &str {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    if !text.starts_with(XSSI_GUARD_PREFIX) {
        return text;
    }
    match text.find('\n') {
        Some(newline) => &text[newline + 1..],
        None => "",
    }
}
