//! Coercion of untrusted model output into the canonical result shape.
//!
//! Nothing in here fails. Every field is coerced to its target type, missing
//! or non-coercible values take the documented default, and out-of-range
//! values that *are* present get clamped rather than defaulted.

use super::extract::RawAnalysis;
use super::models::{MenuAnalysis, MenuItem, Recommendation};
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Map, Value};

const ITEM_DEFAULT_NAME: &str = "Unknown Item";
const ITEM_DEFAULT_SCORE: u32 = 70;

const RECOMMENDATION_DEFAULT_NAME: &str = "Recommended Item";
const RECOMMENDATION_DEFAULT_REASON: &str = "Best nutritional balance";
const RECOMMENDATION_DEFAULTS: Nutrition = Nutrition {
    calories: 400,
    protein: 25,
    carbs: 35,
    fats: 15,
    fiber: 8,
    score: 85,
};

const MAX_SCORE: i64 = 100;

lazy_static! {
    static ref LEADING_INT: Regex = Regex::new(r"^\s*([+-]?\d+)").expect("static regex");
}

#[derive(Debug, Clone, Copy)]
struct Nutrition {
    calories: u32,
    protein: u32,
    carbs: u32,
    fats: u32,
    fiber: u32,
    score: u32,
}

impl Nutrition {
    fn read(source: &Map<String, Value>, defaults: Nutrition) -> Self {
        Self {
            calories: quantity(source.get("calories"), defaults.calories),
            protein: quantity(source.get("protein"), defaults.protein),
            carbs: quantity(source.get("carbs"), defaults.carbs),
            fats: quantity(source.get("fats"), defaults.fats),
            fiber: quantity(source.get("fiber"), defaults.fiber),
            score: score(source.get("score"), defaults.score),
        }
    }
}

/// Normalize a decoded payload into a complete [`MenuAnalysis`].
pub fn normalize_analysis(raw: &RawAnalysis) -> MenuAnalysis {
    let menu_items = match raw.get("menuItems") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_object)
            .map(normalize_item)
            .collect(),
        _ => Vec::new(),
    };

    let empty = Map::new();
    let recommendation = raw
        .get("recommendation")
        .and_then(Value::as_object)
        .unwrap_or(&empty);

    MenuAnalysis {
        menu_items,
        recommendation: normalize_recommendation(recommendation),
    }
}

fn normalize_item(source: &Map<String, Value>) -> MenuItem {
    let defaults = Nutrition {
        calories: 0,
        protein: 0,
        carbs: 0,
        fats: 0,
        fiber: 0,
        score: ITEM_DEFAULT_SCORE,
    };
    let n = Nutrition::read(source, defaults);

    MenuItem {
        name: name(source.get("name"), ITEM_DEFAULT_NAME),
        description: text(source.get("description")).unwrap_or_default(),
        calories: n.calories,
        protein: n.protein,
        carbs: n.carbs,
        fats: n.fats,
        fiber: n.fiber,
        score: n.score,
    }
}

fn normalize_recommendation(source: &Map<String, Value>) -> Recommendation {
    let n = Nutrition::read(source, RECOMMENDATION_DEFAULTS);

    Recommendation {
        name: name(source.get("name"), RECOMMENDATION_DEFAULT_NAME),
        reason: text(source.get("reason"))
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| RECOMMENDATION_DEFAULT_REASON.to_string()),
        calories: n.calories,
        protein: n.protein,
        carbs: n.carbs,
        fats: n.fats,
        fiber: n.fiber,
        score: n.score,
        vitamins: string_list(source.get("vitamins")),
        benefits: string_list(source.get("benefits")),
    }
}

/// Integer view of a JSON value, `parseInt`-style.
///
/// Numbers truncate toward zero; strings contribute their leading integer
/// (`"12g"` is 12). Everything else is non-coercible.
fn coerce_int(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => LEADING_INT
            .captures(s)
            .and_then(|caps| caps[1].parse::<i64>().ok()),
        _ => None,
    }
}

fn quantity(value: Option<&Value>, default: u32) -> u32 {
    match coerce_int(value) {
        Some(n) => n.clamp(0, i64::from(u32::MAX)) as u32,
        None => default,
    }
}

fn score(value: Option<&Value>, default: u32) -> u32 {
    match coerce_int(value) {
        Some(n) => n.max(0).min(MAX_SCORE) as u32,
        None => default,
    }
}

fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn name(value: Option<&Value>, default: &str) -> String {
    text(value)
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(entries)) => entries
            .iter()
            .filter_map(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}
