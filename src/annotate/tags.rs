/// Markup to splice in immediately before the unit at `index`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Tag {
    pub index: usize,
    pub tag: String,
}

/// Insertion-ordered tag records, at most one per index.
///
/// Markup landing on an index that already has a record is merged into it:
/// openings are appended, closings and highlight delimiters are prepended.
#[derive(Debug, Default)]
pub(crate) struct TagList {
    tags: Vec<Tag>,
}

impl TagList {
    fn find_mut(&mut self, index: usize) -> Option<&mut Tag> {
        self.tags.iter_mut().find(|t| t.index == index)
    }

    pub fn append(&mut self, index: usize, markup: &str) {
        match self.find_mut(index) {
            Some(existing) => existing.tag.push_str(markup),
            None => self.tags.push(Tag {
                index,
                tag: markup.to_string(),
            }),
        }
    }

    pub fn prepend(&mut self, index: usize, markup: &str) {
        match self.find_mut(index) {
            Some(existing) => existing.tag.insert_str(0, markup),
            None => self.tags.push(Tag {
                index,
                tag: markup.to_string(),
            }),
        }
    }

    /// Removes and returns the record at `index`.
    pub fn take(&mut self, index: usize) -> Option<Tag> {
        let pos = self.tags.iter().position(|t| t.index == index)?;
        Some(self.tags.remove(pos))
    }

    /// The earliest-inserted record still pending.
    pub fn first(&self) -> Option<&Tag> {
        self.tags.first()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }
}
