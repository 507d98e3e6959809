//! Template × year combinations of input rasters.

use crate::error::{OsmhistError, Result};
use std::fmt;

/// Placeholder substituted with the year in raster filename templates
pub const YEAR_PLACEHOLDER: &str = "{year}";

/// One (template, year) pair to resolve
///
/// Either side may be missing when the configuration contained a null
/// entry; such combinations fail individually during resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterCombination {
    pub template: Option<String>,
    pub year: Option<i32>,
}

impl RasterCombination {
    pub fn new(template: impl Into<String>, year: i32) -> Self {
        Self { template: Some(template.into()), year: Some(year) }
    }

    /// Cartesian product of templates and years, template-major
    pub fn product(templates: &[Option<String>], years: &[Option<i32>]) -> Vec<Self> {
        templates
            .iter()
            .flat_map(|template| {
                years.iter().map(move |year| Self { template: template.clone(), year: *year })
            })
            .collect()
    }

    /// Template with the year substituted
    pub fn resolved_filename(&self) -> Result<String> {
        let template = self.template.as_deref().ok_or_else(|| {
            OsmhistError::IncompleteCombination { reason: "raster template is null".to_string() }
        })?;
        let year = self.year.ok_or_else(|| OsmhistError::IncompleteCombination {
            reason: format!("year is null for template {}", template),
        })?;
        Ok(template.replace(YEAR_PLACEHOLDER, &year.to_string()))
    }
}

impl fmt::Display for RasterCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.resolved_filename() {
            Ok(filename) => write!(f, "{}", filename),
            Err(_) => write!(
                f,
                "{} ({})",
                self.template.as_deref().unwrap_or("<null template>"),
                self.year.map(|y| y.to_string()).unwrap_or_else(|| "<null year>".to_string())
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_is_template_major() {
        let templates = vec![Some("a_{year}.tif".to_string()), Some("b_{year}.tif".to_string())];
        let years = vec![Some(2012), Some(2022)];
        let names: Vec<String> = RasterCombination::product(&templates, &years)
            .iter()
            .map(|c| c.resolved_filename().unwrap())
            .collect();
        assert_eq!(names, vec!["a_2012.tif", "a_2022.tif", "b_2012.tif", "b_2022.tif"]);
    }

    #[test]
    fn test_product_with_empty_side_is_empty() {
        assert!(RasterCombination::product(&[], &[Some(2012)]).is_empty());
        assert!(RasterCombination::product(&[Some("a.tif".to_string())], &[]).is_empty());
    }

    #[test]
    fn test_template_without_placeholder_is_kept() {
        let combo = RasterCombination::new("static.tif", 2020);
        assert_eq!(combo.resolved_filename().unwrap(), "static.tif");
    }

    #[test]
    fn test_null_year_fails() {
        let combo = RasterCombination { template: Some("a_{year}.tif".to_string()), year: None };
        assert!(matches!(
            combo.resolved_filename(),
            Err(OsmhistError::IncompleteCombination { .. })
        ));
        assert_eq!(combo.to_string(), "a_{year}.tif (<null year>)");
    }

    #[test]
    fn test_null_template_fails() {
        let combo = RasterCombination { template: None, year: Some(2012) };
        assert!(combo.resolved_filename().is_err());
    }
}
