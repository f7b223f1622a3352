//! Category layout suggestion for the refrigerator.

use super::Generation;
use crate::ai::prompts::rearrange::{
    render_rearrange_prompt, REARRANGE_PROMPT_NAME, REARRANGE_SYSTEM_PROMPT,
};
use crate::inventory::InventoryItem;
use crate::types::RefrigeratorLayout;

#[derive(Debug)]
pub struct RearrangeGeneration<'a> {
    pub items: &'a [InventoryItem],
}

impl Generation for RearrangeGeneration<'_> {
    type Output = RefrigeratorLayout;

    fn prompt_name(&self) -> &'static str {
        REARRANGE_PROMPT_NAME
    }

    fn system_prompt(&self) -> &'static str {
        REARRANGE_SYSTEM_PROMPT
    }

    fn build_prompt(&self) -> String {
        render_rearrange_prompt(self.items)
    }
}
