//! Refrigerator rearrangement prompts.

use serde_json::json;

use crate::inventory::InventoryItem;

pub const REARRANGE_PROMPT_NAME: &str = "rearrange_refrigerator";

pub const REARRANGE_SYSTEM_PROMPT: &str = "You are an expert in food storage and refrigerator organization. Provide detailed and practical advice for optimizing refrigerator contents.";

pub fn render_rearrange_prompt(items: &[InventoryItem]) -> String {
    let contents = json!(items
        .iter()
        .map(|item| json!({
            "name": item.name,
            "amount": item.amount,
            "unit": item.unit,
            "category": item.category,
        }))
        .collect::<Vec<_>>());

    format!(
        r#"Optimize and reorganize the refrigerator contents. Answer with JSON following this structure:

{{
  "categories": [
    {{
      "category": "category name",
      "ingredients": [
        {{"name": "ingredient name", "amount": quantity (number), "unit": "unit"}}
      ]
    }}
  ]
}}

Current refrigerator contents:
{contents}

Notes:
1. Optimize the categories; create new categories or merge existing ones where it helps.
2. Keep every ingredient; do not invent ingredients that are not in the refrigerator.
3. Respond with valid JSON only, no other text or code blocks."#,
        contents = contents
    )
}
