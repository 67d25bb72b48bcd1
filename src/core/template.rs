// AssetLookup - core/template.rs
//
// Issued / Returned ticket text for a matched record.
// Core layer: pure string building.

use crate::core::model::{AssetRecord, TemplateKind};
use crate::util::constants::LAPTOP_ASSET_TYPE;
use serde::Serialize;
use std::fmt::Write;

/// Both templates for one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedTemplates {
    pub issued: String,
    pub returned: String,
}

impl RenderedTemplates {
    pub fn get(&self, kind: TemplateKind) -> &str {
        match kind {
            TemplateKind::Issued => &self.issued,
            TemplateKind::Returned => &self.returned,
        }
    }
}

/// Render both templates from the record's stored (original-case) values.
pub fn render(record: &AssetRecord) -> RenderedTemplates {
    RenderedTemplates {
        issued: render_one(record, TemplateKind::Issued),
        returned: render_one(record, TemplateKind::Returned),
    }
}

/// Whether the Returned template carries the "JC Removed: Y" line.
pub fn needs_jc_removed(record: &AssetRecord) -> bool {
    record.asset_type.to_lowercase() == LAPTOP_ASSET_TYPE
}

fn render_one(record: &AssetRecord, kind: TemplateKind) -> String {
    let mut out = String::with_capacity(128);

    // Writing into a String cannot fail.
    let _ = writeln!(out, "Facilities: {} {}", record.asset_type, kind.label());
    let _ = writeln!(out, "Model: {}", record.model_name);
    let _ = writeln!(out, "Serial Number: {}", record.serial_number);
    let _ = writeln!(out, "Asset Tag: {}", record.asset_tag);
    out.push('\n');

    if kind == TemplateKind::Returned && needs_jc_removed(record) {
        out.push_str("JC Removed: Y\n");
    }
    out.push_str("CMDB Updated: Y");

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(asset_type: &str) -> AssetRecord {
        AssetRecord {
            asset_tag: "ab-01".to_string(),
            serial_number: "Sn-99".to_string(),
            model_name: "ThinkPad T14".to_string(),
            asset_type: asset_type.to_string(),
        }
    }

    #[test]
    fn test_issued_template_exact() {
        let out = render(&record("Laptop"));
        assert_eq!(
            out.issued,
            "Facilities: Laptop Issued\n\
             Model: ThinkPad T14\n\
             Serial Number: Sn-99\n\
             Asset Tag: ab-01\n\
             \n\
             CMDB Updated: Y"
        );
    }

    #[test]
    fn test_returned_laptop_has_jc_removed() {
        let out = render(&record("Laptop"));
        assert_eq!(
            out.returned,
            "Facilities: Laptop Returned\n\
             Model: ThinkPad T14\n\
             Serial Number: Sn-99\n\
             Asset Tag: ab-01\n\
             \n\
             JC Removed: Y\n\
             CMDB Updated: Y"
        );
    }

    #[test]
    fn test_returned_non_laptop_omits_line() {
        let out = render(&record("Monitor"));
        assert!(!out.returned.contains("JC Removed"));
        assert!(out.returned.ends_with("Asset Tag: ab-01\n\nCMDB Updated: Y"));
    }

    #[test]
    fn test_laptop_match_ignores_case() {
        assert!(needs_jc_removed(&record("LAPTOP")));
        assert!(needs_jc_removed(&record("laptop")));
        assert!(!needs_jc_removed(&record("Laptop Dock")));
        assert!(!needs_jc_removed(&record("Monitor")));
    }

    #[test]
    fn test_issued_never_has_jc_removed() {
        assert!(!render(&record("Laptop")).issued.contains("JC Removed"));
    }

    #[test]
    fn test_get_by_kind() {
        let out = render(&record("Monitor"));
        assert_eq!(out.get(TemplateKind::Issued), out.issued);
        assert_eq!(out.get(TemplateKind::Returned), out.returned);
    }
}
