//! Source map generation.
//!
//! Builds a standard v3 map from the position map by handing per-character
//! mappings to SWC's source map builder, the same machinery the TypeScript
//! emitter uses for its own maps.

use base64::Engine;
use serde::{Deserialize, Serialize};
use swc_common::{
    source_map::SourceMapGenConfig, sync::Lrc, BytePos, FileName, LineCol, SourceMap,
};

use crate::error::TransformError;
use crate::position::PositionMap;

/// A v3 source map as emitted alongside transformed code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSourceMap {
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    pub sources: Vec<String>,
    #[serde(default)]
    pub sources_content: Vec<Option<String>>,
    #[serde(default)]
    pub names: Vec<String>,
    pub mappings: String,
}

impl RawSourceMap {
    pub fn to_json(&self) -> Result<String, TransformError> {
        Ok(serde_json::to_string(self)?)
    }

    /// `data:` URL carrying the map as base64 JSON.
    pub fn to_data_url(&self) -> Result<String, TransformError> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(self.to_json()?);
        Ok(format!("data:application/json;charset=utf-8;base64,{encoded}"))
    }

    /// Trailer comment that lets tools without side-channel maps find this one.
    pub fn inline_comment(&self) -> Result<String, TransformError> {
        Ok(format!("\n//# sourceMappingURL={}", self.to_data_url()?))
    }
}

/// Names the single source and always embeds its content.
struct EmbedSource<'a> {
    name: &'a str,
}

impl SourceMapGenConfig for EmbedSource<'_> {
    fn file_name_to_source(&self, _f: &FileName) -> String {
        self.name.to_string()
    }

    fn inline_sources_content(&self, _f: &FileName) -> bool {
        true
    }
}

pub(crate) fn build_source_map(
    filename: &str,
    source: &str,
    code: &str,
    positions: &PositionMap,
) -> Result<RawSourceMap, TransformError> {
    let cm: Lrc<SourceMap> = Default::default();
    let file = cm.new_source_file(
        Lrc::new(FileName::Custom(filename.to_string())),
        source.to_string(),
    );

    let mut mappings: Vec<(BytePos, LineCol)> = Vec::with_capacity(code.len());
    let mut segments = positions
        .segments()
        .iter()
        .filter(|s| !s.output.is_empty())
        .peekable();
    let (mut line, mut col) = (0u32, 0u32);

    for (offset, ch) in code.char_indices() {
        while segments.next_if(|s| s.output.end <= offset).is_some() {}

        if let Some(seg) = segments.peek() {
            // Replaced text maps once, at its first character.
            let original = if seg.verbatim {
                Some(seg.original.start + (offset - seg.output.start))
            } else if offset == seg.output.start {
                Some(seg.original.start)
            } else {
                None
            };
            if let Some(original) = original {
                mappings.push((file.start_pos + BytePos(original as u32), LineCol { line, col }));
            }
        }

        if ch == '\n' {
            line += 1;
            col = 0;
        } else {
            col += ch.len_utf16() as u32;
        }
    }

    let map = cm.build_source_map(&mappings, None, EmbedSource { name: filename });
    let mut json = Vec::new();
    map.to_writer(&mut json)
        .map_err(|e| TransformError::SourceMap(e.to_string()))?;
    Ok(serde_json::from_slice(&json)?)
}
