use serde::Deserialize;
use tracing::*;

use crate::prelude::*;

// Only the handful of fields we need to identify an object; everything is optional so that a
// partial or non-resource document decodes cleanly and can be skipped.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ManifestHeader {
    api_version: Option<String>,
    kind: Option<String>,
    metadata: Option<ManifestMetadata>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ManifestMetadata {
    name: Option<String>,
    namespace: Option<String>,
}

const DOCUMENT_SEPARATOR: &str = "---";

// Splits a YAML stream on document separators.  Each document is parsed on its own, so one
// malformed document can't take the rest of the file down with it.  Anything after the `---` on
// the separator line (`--- {kind: ...}`) belongs to the next document.
struct Documents<'a> {
    rest: Option<&'a str>,
}

fn is_separator(line: &str) -> bool {
    line.strip_prefix(DOCUMENT_SEPARATOR)
        .is_some_and(|after| after.chars().next().is_none_or(char::is_whitespace))
}

impl<'a> Iterator for Documents<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let text = self.rest?;
        let mut offset = 0;
        for line in text.split_inclusive('\n') {
            if is_separator(line) {
                self.rest = Some(&text[offset + DOCUMENT_SEPARATOR.len()..]);
                return Some(&text[..offset]);
            }
            offset += line.len();
        }
        self.rest = None;
        Some(text)
    }
}

fn documents(text: &str) -> impl Iterator<Item = &str> {
    Documents { rest: Some(text) }.filter(|doc| !doc.trim().is_empty())
}

fn parse_document(doc: &str, default_namespace: &str) -> Option<ResourceIdentifier> {
    let header = match serde_yaml::from_str::<Option<ManifestHeader>>(doc) {
        Ok(Some(header)) => header,
        Ok(None) => return None,
        Err(err) => {
            debug!("skipping manifest document that could not be parsed: {err}");
            return None;
        },
    };

    let api_version = header.api_version.filter(|v| !v.is_empty())?;
    let kind = header.kind.filter(|k| !k.is_empty())?;
    let metadata = header.metadata?;
    let name = metadata.name.filter(|n| !n.is_empty())?;

    let gvk = match GVK::from_api_version(&api_version, &kind) {
        Ok(gvk) => gvk,
        Err(err) => {
            debug!("skipping {kind}/{name}: {err}");
            return None;
        },
    };

    Some(ResourceIdentifier::with_default_namespace(gvk, &name, metadata.namespace.as_deref(), default_namespace))
}

// Lazily yields the identifiers of every resource defined in the given manifests.  Documents
// that are malformed or don't describe a resource are skipped.
pub fn parse_manifests<'a, S: AsRef<str>>(
    manifests: &'a [S],
    default_namespace: &'a str,
) -> impl Iterator<Item = ResourceIdentifier> + 'a {
    manifests
        .iter()
        .flat_map(|text| documents(text.as_ref()))
        .filter_map(move |doc| parse_document(doc, default_namespace))
}
