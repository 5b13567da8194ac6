//! OPF (Open Packaging Format) parser
//!
//! Only what is needed to enumerate the book's documents in reading order:
//! the rootfile location, the title, the manifest and the spine.

use std::collections::HashMap;

use super::{EpubError, ManifestItem};

/// Parsed OPF structure
#[derive(Debug, Clone)]
pub struct ParsedOpf {
    pub title: Option<String>,
    /// Manifest items in declaration order
    pub manifest: Vec<ManifestItem>,
    /// Manifest ids in reading order
    pub spine: Vec<String>,
}

impl ParsedOpf {
    /// Content documents: spine order first, then any remaining XHTML in
    /// manifest order
    pub fn documents(&self) -> Vec<&ManifestItem> {
        let by_id: HashMap<&str, &ManifestItem> =
            self.manifest.iter().map(|m| (m.id.as_str(), m)).collect();

        let mut docs: Vec<&ManifestItem> = Vec::new();
        for idref in &self.spine {
            if let Some(item) = by_id.get(idref.as_str()) {
                if item.is_document() && !docs.iter().any(|d| d.id == item.id) {
                    docs.push(item);
                }
            }
        }
        for item in &self.manifest {
            if item.is_document() && !docs.iter().any(|d| d.id == item.id) {
                docs.push(item);
            }
        }
        docs
    }
}

/// Find the OPF path declared in `META-INF/container.xml`
pub fn find_opf_path(container_xml: &str) -> Result<String, EpubError> {
    let doc = roxmltree::Document::parse(container_xml)
        .map_err(|e| EpubError::XmlError(e.to_string()))?;

    doc.descendants()
        .find(|n| n.tag_name().name() == "rootfile")
        .and_then(|n| n.attribute("full-path"))
        .map(str::to_string)
        .ok_or_else(|| EpubError::InvalidEpub("Could not find OPF path in container.xml".to_string()))
}

/// Parse an OPF file
pub fn parse_opf(content: &str, opf_dir: &str) -> Result<ParsedOpf, EpubError> {
    let doc = roxmltree::Document::parse(content)
        .map_err(|e| EpubError::XmlError(e.to_string()))?;

    let title = doc
        .descendants()
        .find(|n| n.tag_name().name() == "title")
        .and_then(|n| n.text())
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());

    let mut manifest = Vec::new();
    for node in doc.descendants().filter(|n| n.tag_name().name() == "item") {
        if let (Some(id), Some(href), Some(media_type)) = (
            node.attribute("id"),
            node.attribute("href"),
            node.attribute("media-type"),
        ) {
            manifest.push(ManifestItem {
                id: id.to_string(),
                path: resolve_href(opf_dir, href),
                media_type: media_type.to_string(),
                properties: node.attribute("properties").map(str::to_string),
            });
        }
    }

    let spine = doc
        .descendants()
        .filter(|n| n.tag_name().name() == "itemref")
        .filter_map(|n| n.attribute("idref"))
        .map(str::to_string)
        .collect();

    Ok(ParsedOpf {
        title,
        manifest,
        spine,
    })
}

/// Resolve a manifest href against the OPF directory into an archive path
pub fn resolve_href(opf_dir: &str, href: &str) -> String {
    let href = href.split('#').next().unwrap_or(href);
    let decoded = urlencoding::decode(href)
        .map(|d| d.into_owned())
        .unwrap_or_else(|_| href.to_string());

    let mut segments: Vec<&str> = opf_dir.split('/').filter(|s| !s.is_empty()).collect();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }
    segments.join("/")
}
