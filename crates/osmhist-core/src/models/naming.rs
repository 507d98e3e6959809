//! Rules that turn a raster template into a bounding box display name.

use crate::error::{OsmhistError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A marker substring and the display name it selects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingRule {
    pub marker: String,
    pub name: String,
}

impl NamingRule {
    pub fn new(marker: impl Into<String>, name: impl Into<String>) -> Self {
        Self { marker: marker.into(), name: name.into() }
    }
}

/// Ordered naming rules, first match wins
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NamingRules {
    pub rules: Vec<NamingRule>,
    /// Name used when no marker matches; without it an unmatched template is an error
    pub fallback: Option<String>,
}

impl NamingRules {
    pub fn new(rules: Vec<NamingRule>, fallback: Option<String>) -> Self {
        Self { rules, fallback }
    }

    /// Resolve the display name for a raster filename template
    ///
    /// Markers are matched case-insensitively anywhere in
    /// [`template_key`] of the template.
    pub fn name_for(&self, template: &str) -> Result<&str> {
        let key = template_key(template).to_lowercase();

        self.rules
            .iter()
            .find(|rule| key.contains(&rule.marker.to_lowercase()))
            .map(|rule| rule.name.as_str())
            .or(self.fallback.as_deref())
            .ok_or_else(|| OsmhistError::NoNamingRule { template: template.to_string() })
    }
}

/// Last path component of a template, accepting either separator
pub fn base_file_name(template: &str) -> &str {
    template.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(template)
}

/// `bbox_<stem>`: the base file name without its extension, prefixed
pub fn template_key(template: &str) -> String {
    let base = base_file_name(template);
    let stem = Path::new(base).file_stem().and_then(|s| s.to_str()).unwrap_or(base);
    format!("bbox_{}", stem)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn two_family_rules() -> NamingRules {
        NamingRules::new(
            vec![NamingRule::new("_esa", "UK, ESA")],
            Some("Catalonia".to_string()),
        )
    }

    #[test]
    fn test_marker_selects_first_name() {
        let rules = two_family_rules();
        assert_eq!(rules.name_for("lulc_esa_{year}.tif").unwrap(), "UK, ESA");
        assert_eq!(rules.name_for("LULC_ESA_{year}.TIF").unwrap(), "UK, ESA");
    }

    #[test]
    fn test_unmatched_template_uses_fallback() {
        let rules = two_family_rules();
        assert_eq!(rules.name_for("lulc_cat_{year}.tif").unwrap(), "Catalonia");
    }

    #[test]
    fn test_marker_in_directory_is_ignored() {
        let rules = two_family_rules();
        assert_eq!(rules.name_for("data_esa/lulc_cat_{year}.tif").unwrap(), "Catalonia");
        assert_eq!(rules.name_for(r"data_esa\lulc_cat_{year}.tif").unwrap(), "Catalonia");
    }

    #[test]
    fn test_first_matching_rule_wins() {
        let rules = NamingRules::new(
            vec![NamingRule::new("esa", "First"), NamingRule::new("_esa", "Second")],
            None,
        );
        assert_eq!(rules.name_for("x_esa.tif").unwrap(), "First");
    }

    #[test]
    fn test_no_match_without_fallback_is_error() {
        let rules = NamingRules::new(vec![NamingRule::new("_esa", "UK")], None);
        let err = rules.name_for("lulc_cat.tif").unwrap_err();
        assert!(matches!(err, OsmhistError::NoNamingRule { .. }));
    }

    #[test]
    fn test_stem_starting_with_marker_gets_prefix() {
        let rules = two_family_rules();
        assert_eq!(rules.name_for("ESA_lulc_{year}.tif").unwrap(), "UK, ESA");
        assert_eq!(rules.name_for("data/esa_{year}.tif").unwrap(), "UK, ESA");
    }

    #[test]
    fn test_extension_is_not_matched() {
        let rules = NamingRules::new(vec![NamingRule::new(".tif", "Tiff")], None);
        assert!(rules.name_for("lulc_{year}.tif").is_err());
        assert_eq!(rules.name_for("lulc.tif.bak").unwrap(), "Tiff");
    }

    #[test]
    fn test_template_key() {
        assert_eq!(template_key("data/lulc_esa_{year}.tif"), "bbox_lulc_esa_{year}");
        assert_eq!(template_key(r"a\b\c.d.tif"), "bbox_c.d");
        assert_eq!(template_key("noext"), "bbox_noext");
    }

    #[test]
    fn test_base_file_name() {
        assert_eq!(base_file_name("a/b/c.tif"), "c.tif");
        assert_eq!(base_file_name(r"a\b\c.tif"), "c.tif");
        assert_eq!(base_file_name("c.tif"), "c.tif");
    }

    proptest! {
        #[test]
        fn prop_marker_anywhere_selects_first_name(
            prefix in "[A-Za-z0-9_{}-]{0,12}",
            suffix in "[A-Za-z0-9_{}-]{0,12}",
            upper in any::<bool>(),
        ) {
            let rules = two_family_rules();
            let marker = if upper { "_ESA" } else { "_esa" };
            let template = format!("{prefix}{marker}{suffix}.tif");
            prop_assert_eq!(rules.name_for(&template).unwrap(), "UK, ESA");
        }

        #[test]
        fn prop_no_marker_selects_second_name(
            stem in "[A-DF-Za-df-z0-9{}-][A-Za-z0-9{}-]{0,20}",
        ) {
            // No underscore in the stem and no leading "e", so the key never holds "_esa"
            let rules = two_family_rules();
            let template = format!("{stem}.tif");
            prop_assert_eq!(rules.name_for(&template).unwrap(), "Catalonia");
        }
    }
}
