// Instruction text sent alongside every menu photo

/// Prompt asking the model for the JSON shape the extractor expects.
pub const MENU_ANALYSIS_PROMPT: &str = r#"You are a nutrition expert analyzing a restaurant or food menu image.
Identify all food items visible in this menu and analyze their nutritional value.
For each item, estimate calories, protein, carbs, fats, fiber and a health score (0-100).
Then recommend the SINGLE BEST item for optimal nutrition.

Return a JSON object with this exact structure:
{
  "menuItems": [
    { "name": "Item Name", "description": "brief description", "calories": 450, "protein": 25, "carbs": 40, "fats": 15, "fiber": 5, "score": 85 }
  ],
  "recommendation": {
    "name": "Best Item Name",
    "reason": "Why this is the healthiest choice",
    "calories": 450,
    "protein": 25,
    "carbs": 40,
    "fats": 15,
    "fiber": 5,
    "score": 92,
    "vitamins": ["Vitamin A", "Vitamin C", "Iron"],
    "benefits": ["High protein", "Low sodium", "Rich in fiber"]
  }
}"#;
