//! Canonical result types returned to every caller.
//!
//! These are the always-valid shapes produced by the normalizer and the mock
//! generator. Field names serialize in camelCase to match the JSON contract
//! consumed by the web client.

use serde::{Deserialize, Serialize};

/// A single dish identified on the menu with its estimated nutrition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    pub description: String,
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fats: u32,
    pub fiber: u32,
    /// Health score in `0..=100`.
    pub score: u32,
}

/// The single "best choice" dish, with the reasoning behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub name: String,
    pub reason: String,
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fats: u32,
    pub fiber: u32,
    /// Health score in `0..=100`.
    pub score: u32,
    pub vitamins: Vec<String>,
    pub benefits: Vec<String>,
}

/// Full analysis of one menu photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuAnalysis {
    pub menu_items: Vec<MenuItem>,
    pub recommendation: Recommendation,
}

/// Body of a successful `POST /api/menu/analyze`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    /// Public path of the stored upload.
    pub image: String,
    #[serde(flatten)]
    pub analysis: MenuAnalysis,
}

/// Where a returned analysis came from. Never exposed to HTTP callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisSource {
    Model,
    Mock,
}

impl AnalysisSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisSource::Model => "ai",
            AnalysisSource::Mock => "mock",
        }
    }
}
