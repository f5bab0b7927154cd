//! Item stacks and profile properties.

use super::nbt::Compound;

/// Contents of a non-empty inventory slot
#[derive(Debug, Clone, PartialEq)]
pub struct ItemStack {
    pub item_id: i32,
    pub count: i8,
    pub tag: Option<Compound>,
}

impl ItemStack {
    pub fn new(item_id: i32, count: i8) -> Self {
        Self {
            item_id,
            count,
            tag: None,
        }
    }

    pub fn with_tag(mut self, tag: Compound) -> Self {
        self.tag = Some(tag);
        self
    }
}

/// Signed profile property such as a skin texture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub name: String,
    pub value: String,
    pub signature: Option<String>,
}
