use std::collections::BTreeMap;

use crate::foundation::core::StepIndex;
use crate::foundation::ids::SectionId;

/// Host markup id of a step container: `"{section}-{n}"`, `n` one-based.
pub fn container_id(section: &str, step: StepIndex) -> String {
    format!("{section}-{}", step.number())
}

/// Everything a view needs to present one section's current step.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct StepSync {
    pub section: SectionId,
    pub step: StepIndex,
    pub count: usize,
    pub visible_indicators: usize,
}

/// Host page contract driven by the sequencer.
pub trait StepView {
    /// Show exactly the container for `sync.step`, mark its indicator active and
    /// update the prev/next buttons. Must leave no transient double visibility.
    fn sync_step(&mut self, sync: &StepSync);

    /// Hide every step container of `section`.
    fn hide_section(&mut self, section: &SectionId, count: usize);

    /// Show a landmark section in place of the currently displayed one.
    fn show_section(&mut self, section: &SectionId);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    Active,
    Inactive,
    Hidden,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct NavState {
    pub prev_disabled: bool,
    pub next_disabled: bool,
}

/// In-memory [`StepView`] recording the display state of every addressed node.
#[derive(Clone, Debug, Default, serde::Serialize)]
pub struct StepDom {
    containers: BTreeMap<String, bool>,
    indicators: BTreeMap<SectionId, Vec<Indicator>>,
    nav: BTreeMap<SectionId, NavState>,
    shown_section: Option<SectionId>,
}

impl StepDom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self, container: &str) -> bool {
        self.containers.get(container).copied().unwrap_or(false)
    }

    /// Visible container ids of `section`, in step order.
    pub fn visible_containers(&self, section: &str) -> Vec<String> {
        let prefix = format!("{section}-");
        let mut out: Vec<(usize, String)> = self
            .containers
            .iter()
            .filter(|(id, shown)| **shown && id.starts_with(&prefix))
            .filter_map(|(id, _)| {
                let n = id[prefix.len()..].parse::<usize>().ok()?;
                Some((n, id.clone()))
            })
            .collect();
        out.sort();
        out.into_iter().map(|(_, id)| id).collect()
    }

    pub fn indicators(&self, section: &str) -> &[Indicator] {
        self.indicators
            .get(section)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn nav(&self, section: &str) -> Option<NavState> {
        self.nav.get(section).copied()
    }

    pub fn shown_section(&self) -> Option<&SectionId> {
        self.shown_section.as_ref()
    }
}

impl StepView for StepDom {
    fn sync_step(&mut self, sync: &StepSync) {
        for n in 0..sync.count {
            let id = container_id(sync.section.as_str(), StepIndex(n));
            self.containers.insert(id, n == sync.step.0);
        }

        let dots = (0..sync.count)
            .map(|n| {
                if n >= sync.visible_indicators {
                    Indicator::Hidden
                } else if n == sync.step.0 {
                    Indicator::Active
                } else {
                    Indicator::Inactive
                }
            })
            .collect();
        self.indicators.insert(sync.section.clone(), dots);

        self.nav.insert(
            sync.section.clone(),
            NavState {
                prev_disabled: sync.step.0 == 0,
                next_disabled: sync.step.0 + 1 >= sync.count,
            },
        );
    }

    fn hide_section(&mut self, section: &SectionId, count: usize) {
        for n in 0..count {
            self.containers
                .insert(container_id(section.as_str(), StepIndex(n)), false);
        }
    }

    fn show_section(&mut self, section: &SectionId) {
        self.shown_section = Some(section.clone());
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/view.rs"]
mod tests;
