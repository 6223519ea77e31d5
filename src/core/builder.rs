use crate::core::css::{extract_style_block, parse_rules};
use crate::domain::model::{ComponentRecord, SourceFile};
use crate::utils::error::{EtlError, Result};
use std::collections::BTreeSet;

/// Builds the record for one component file.
///
/// `contents` is the outcome of reading the file; a read error or invalid
/// UTF-8 becomes the record's `error` instead of failing the run. Property
/// names of every retained declaration are added to `all_properties`.
pub fn build_component(
    source: &SourceFile,
    contents: Result<Vec<u8>>,
    all_properties: &mut BTreeSet<String>,
) -> ComponentRecord {
    match decode(source, contents) {
        Ok(text) => {
            let record = extract_component(source, &text);
            all_properties.extend(record.property_names().into_iter().map(str::to_string));
            record
        }
        Err(e) => {
            tracing::error!("❌ Error processing {}: {}", source.relative_path, e);
            ComponentRecord::failed(source, e.to_string())
        }
    }
}

/// Parses already-decoded component text. Never fails.
pub fn extract_component(source: &SourceFile, text: &str) -> ComponentRecord {
    let Some(style) = extract_style_block(text) else {
        tracing::debug!("{}: no style section", source.relative_path);
        return ComponentRecord::without_styles(source);
    };

    let rules = parse_rules(style);
    tracing::debug!(
        "{}: {} rules parsed from style section",
        source.relative_path,
        rules.len()
    );
    ComponentRecord::with_styles(source, style, rules)
}

fn decode(source: &SourceFile, contents: Result<Vec<u8>>) -> Result<String> {
    let bytes = contents?;
    String::from_utf8(bytes).map_err(|e| EtlError::DecodeError {
        path: source.relative_path.clone(),
        source: e,
    })
}
