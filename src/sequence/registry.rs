use std::collections::HashMap;

use crate::foundation::error::{StoryError, StoryResult};
use crate::foundation::ids::SectionId;

/// One registered slide group.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct SectionEntry {
    pub id: SectionId,
    pub steps: usize,
    /// Progress dots actually shown; `None` means one per step.
    pub visible_indicators: Option<usize>,
}

impl SectionEntry {
    pub fn indicator_count(&self) -> usize {
        self.visible_indicators.unwrap_or(self.steps).min(self.steps)
    }
}

/// Static section name to step count mapping, in declaration order.
#[derive(Clone, Debug, Default)]
pub struct StepRegistry {
    sections: Vec<SectionEntry>,
    index: HashMap<SectionId, usize>,
}

impl StepRegistry {
    pub fn builder() -> StepRegistryBuilder {
        StepRegistryBuilder::default()
    }

    pub fn step_count(&self, section: &str) -> StoryResult<usize> {
        self.entry(section).map(|e| e.steps)
    }

    pub fn entry(&self, section: &str) -> StoryResult<&SectionEntry> {
        self.index
            .get(section)
            .map(|&i| &self.sections[i])
            .ok_or_else(|| StoryError::unknown_section(section))
    }

    pub fn contains(&self, section: &str) -> bool {
        self.index.contains_key(section)
    }

    pub fn sections(&self) -> impl Iterator<Item = &SectionEntry> {
        self.sections.iter()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct StepRegistryBuilder {
    sections: Vec<SectionEntry>,
}

impl StepRegistryBuilder {
    pub fn section(mut self, id: impl Into<SectionId>, steps: usize) -> Self {
        self.sections.push(SectionEntry {
            id: id.into(),
            steps,
            visible_indicators: None,
        });
        self
    }

    pub fn entry(mut self, entry: SectionEntry) -> Self {
        self.sections.push(entry);
        self
    }

    pub fn build(self) -> StoryResult<StepRegistry> {
        let mut index = HashMap::with_capacity(self.sections.len());
        for (i, s) in self.sections.iter().enumerate() {
            if s.steps == 0 {
                return Err(StoryError::validation(format!(
                    "section '{}' must have at least one step",
                    s.id
                )));
            }
            if index.insert(s.id.clone(), i).is_some() {
                return Err(StoryError::validation(format!(
                    "duplicate section id '{}'",
                    s.id
                )));
            }
        }
        Ok(StepRegistry {
            sections: self.sections,
            index,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/registry.rs"]
mod tests;
