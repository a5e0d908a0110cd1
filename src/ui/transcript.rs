use crate::render::Markup;

/// Rendered message blocks in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    blocks: Vec<Markup>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, block: Markup) {
        self.blocks.push(block);
    }

    pub fn clear(&mut self) {
        self.blocks.clear();
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn blocks(&self) -> &[Markup] {
        &self.blocks
    }

    pub fn last(&self) -> Option<&Markup> {
        self.blocks.last()
    }

    pub fn to_html(&self) -> String {
        self.blocks
            .iter()
            .map(Markup::as_str)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
