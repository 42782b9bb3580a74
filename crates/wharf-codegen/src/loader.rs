//! Loads, validates, patches, and sorts the two CDP schema documents into a
//! single [`Schema`] ready for reference resolution and code generation.

use crate::error::SchemaError;
use crate::patches;
use crate::schema::{CdpDomain, SchemaDocument};

const REQUIRED_MAJOR: &str = "1";
const REQUIRED_MINOR: &str = "3";

/// The merged, patched, and sorted schema: both input documents' domains,
/// alphabetically ordered, with upstream bugs corrected.
#[derive(Debug, Clone)]
pub struct Schema {
    pub domains: Vec<CdpDomain>,
}

/// Load and validate the browser and JS protocol documents.
///
/// # Errors
///
/// Returns [`SchemaError::InvalidJson`] if either document fails to parse,
/// [`SchemaError::UnsupportedVersion`] if either document's version is not
/// 1.3, or [`SchemaError::DuplicateDomain`] if the same domain name appears
/// in both documents.
pub fn load(browser_protocol_json: &str, js_protocol_json: &str) -> Result<Schema, SchemaError> {
    let browser = parse_document(browser_protocol_json)?;
    let js = parse_document(js_protocol_json)?;

    assert_version(&browser)?;
    assert_version(&js)?;

    let mut domains = Vec::with_capacity(browser.domains.len() + js.domains.len());
    domains.extend(browser.domains);
    domains.extend(js.domains);

    let mut seen = std::collections::HashSet::new();
    for domain in &domains {
        if !seen.insert(domain.domain.clone()) {
            return Err(SchemaError::DuplicateDomain(domain.domain.clone()));
        }
    }

    let mut doc = SchemaDocument {
        version: browser.version,
        domains,
    };
    patches::apply_patches(&mut doc);

    doc.domains.sort_by(|a, b| a.domain.cmp(&b.domain));

    Ok(Schema { domains: doc.domains })
}

fn parse_document(json: &str) -> Result<SchemaDocument, SchemaError> {
    serde_json::from_str(json).map_err(|e| SchemaError::InvalidJson(e.to_string()))
}

fn assert_version(doc: &SchemaDocument) -> Result<(), SchemaError> {
    if doc.version.major != REQUIRED_MAJOR || doc.version.minor != REQUIRED_MINOR {
        return Err(SchemaError::UnsupportedVersion {
            major: doc.version.major.clone(),
            minor: doc.version.minor.clone(),
        });
    }
    Ok(())
}
