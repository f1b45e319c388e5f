use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::debug;

use super::{ExtractStats, Extraction, Extractor};
use crate::constants::{FEATURE_COLLECTION, ISO_A3_PROPERTY};
use crate::error::{PreprocessError, Result};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: String,
    /// Kept as raw JSON so geometry and properties pass through untouched
    pub features: Vec<Value>,
}

/// Keeps the features whose `properties.iso_a3` is in a fixed id set.
#[derive(Debug, Clone)]
pub struct GeoJsonExtractor {
    ids: HashSet<String>,
}

impl GeoJsonExtractor {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Build from a comma-separated argument such as `"SYR,LBN,JOR"`.
    pub fn from_arg(ids: &str) -> Self {
        Self::new(ids.split(',').map(str::trim).filter(|id| !id.is_empty()))
    }

    pub fn subset(&self, document: Value) -> Result<FeatureCollection> {
        let Value::Object(mut root) = document else {
            return Err(PreprocessError::InvalidInput(
                "GeoJSON root must be an object".to_string(),
            ));
        };
        let features = match root.remove("features") {
            Some(Value::Array(features)) => features,
            _ => {
                return Err(PreprocessError::InvalidInput(
                    "GeoJSON input has no 'features' array".to_string(),
                ))
            }
        };

        let features = features
            .into_iter()
            .filter(|feature| match feature_id(feature) {
                Some(id) => self.ids.contains(&id),
                None => {
                    debug!("Skipping feature without {}", ISO_A3_PROPERTY);
                    false
                }
            })
            .collect();

        Ok(FeatureCollection {
            kind: FEATURE_COLLECTION.to_string(),
            features,
        })
    }
}

impl Extractor for GeoJsonExtractor {
    type Output = FeatureCollection;

    fn name(&self) -> &'static str {
        "geojson"
    }

    fn extract(&self, input: &Path) -> Result<Extraction<FeatureCollection>> {
        if !input.exists() {
            return Err(PreprocessError::InputNotFound(input.to_path_buf()));
        }
        let content = fs::read_to_string(input)?;
        let document: Value = serde_json::from_str(&content)?;
        let rows_read = document
            .get("features")
            .and_then(Value::as_array)
            .map_or(0, Vec::len);

        let output = self.subset(document)?;
        let stats = ExtractStats::new(rows_read, output.features.len());
        Ok(Extraction::Ready { output, stats })
    }

    fn record_count(&self, output: &FeatureCollection) -> usize {
        output.features.len()
    }

    fn summary(&self, output: &FeatureCollection) -> Vec<String> {
        vec![format!("Extracted {} features", output.features.len())]
    }
}

/// `properties.iso_a3` rendered the way a loosely typed consumer would print it.
fn feature_id(feature: &Value) -> Option<String> {
    match feature.get("properties")?.get(ISO_A3_PROPERTY)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("True".to_string()),
        Value::Bool(false) => Some("False".to_string()),
        Value::Null => Some("None".to_string()),
        _ => None,
    }
}
