//! Comparison report JSON.

use serde::Serialize;

pub const MAJOR_THRESHOLD: f64 = 50.0;
pub const MODERATE_THRESHOLD: f64 = 30.0;
pub const MINOR_THRESHOLD: f64 = 20.0;

/// Every recommendation whose threshold `score` exceeds, most severe first.
pub fn recommendations(score: f64) -> Vec<String> {
    [
        (MAJOR_THRESHOLD, "Major differences detected. Review building geometry and positions."),
        (MODERATE_THRESHOLD, "Moderate differences. Check building details and textures."),
        (MINOR_THRESHOLD, "Minor differences. Fine-tune colors and lighting."),
    ]
    .into_iter()
    .filter(|(threshold, _)| score > *threshold)
    .map(|(_, text)| text.to_string())
    .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComparisonKind {
    Aerial,
    StreetView,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    #[serde(rename = "type")]
    pub kind: ComparisonKind,
    pub name: String,
    pub real_photo: String,
    pub virtual_photo: String,
    pub side_by_side: String,
    pub diff_map: String,
    pub difference_score: f64,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_comparisons: usize,
    pub average_score: f64,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub timestamp: String,
    pub comparisons: Vec<Comparison>,
    pub summary: Summary,
}

impl Report {
    /// Summary recommendations come from the average score.
    pub fn new(timestamp: String, comparisons: Vec<Comparison>) -> Self {
        let average_score = if comparisons.is_empty() {
            0.0
        } else {
            comparisons.iter().map(|c| c.difference_score).sum::<f64>() / comparisons.len() as f64
        };
        Self {
            timestamp,
            summary: Summary {
                total_comparisons: comparisons.len(),
                average_score,
                recommendations: recommendations(average_score),
            },
            comparisons,
        }
    }

    pub fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec_pretty(self)
    }
}
