// Fixed sample analysis
//
// Served by `GET /api/menu/sample` and substituted whenever no model produced
// a usable answer. Both paths must stay byte-identical.

use super::models::{MenuAnalysis, MenuItem, Recommendation};

#[allow(clippy::too_many_arguments)]
fn item(
    name: &str,
    description: &str,
    calories: u32,
    protein: u32,
    carbs: u32,
    fats: u32,
    fiber: u32,
    score: u32,
) -> MenuItem {
    MenuItem {
        name: name.to_string(),
        description: description.to_string(),
        calories,
        protein,
        carbs,
        fats,
        fiber,
        score,
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Returns the fixed four-dish sample analysis.
pub fn sample_analysis() -> MenuAnalysis {
    MenuAnalysis {
        menu_items: vec![
            item("Grilled Salmon", "With steamed vegetables", 420, 38, 12, 22, 4, 92),
            item("Caesar Salad", "Romaine, parmesan, croutons", 350, 12, 18, 26, 3, 75),
            item("Pasta Carbonara", "Creamy bacon pasta", 680, 22, 65, 38, 2, 55),
            item("Veggie Buddha Bowl", "Quinoa, chickpeas, vegetables", 380, 14, 52, 12, 11, 88),
        ],
        recommendation: Recommendation {
            name: "Grilled Salmon".to_string(),
            reason: "Highest protein content with excellent omega-3 fatty acids and lowest carb count. Great for balanced nutrition.".to_string(),
            calories: 420,
            protein: 38,
            carbs: 12,
            fats: 22,
            fiber: 4,
            score: 92,
            vitamins: strings(&["Vitamin D", "Vitamin B12", "Omega-3"]),
            benefits: strings(&["High protein", "Heart healthy fats", "Low carb", "Rich in vitamins"]),
        },
    }
}
