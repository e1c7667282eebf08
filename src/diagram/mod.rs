//! Diagram renderers: one scene writer per container, plus the datasets they draw.

use std::fmt;

use crate::animation::reveal::RevealPlan;
use crate::foundation::core::StepIndex;
use crate::foundation::error::{StoryError, StoryResult};
use crate::foundation::ids::DiagramId;
use crate::scene::model::{Scene, Tooltip};

pub mod data;
pub mod doc_vector;
pub mod force_graph;
pub mod layered;
pub mod scatter;
pub mod tag_tree;

/// Which renderer draws a container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagramKind {
    VectorScatter,
    RagPipeline,
    KnowledgeGraph,
    EntityExtraction,
    TagTree,
    QaWalk,
    LayeredOverview,
}

impl DiagramKind {
    /// Construct the renderer for this kind.
    pub fn build(self, id: impl Into<DiagramId>) -> Box<dyn Diagram> {
        let id = id.into();
        match self {
            Self::VectorScatter => Box::new(scatter::VectorScatter::new(id)),
            Self::RagPipeline => Box::new(doc_vector::RagPipeline::new(id)),
            Self::KnowledgeGraph => Box::new(force_graph::KnowledgeGraph::new(id)),
            Self::EntityExtraction => Box::new(force_graph::EntityExtraction::new(id)),
            Self::TagTree => Box::new(tag_tree::TagHierarchy::new(id)),
            Self::QaWalk => Box::new(tag_tree::QaWalk::new(id)),
            Self::LayeredOverview => Box::new(layered::LayeredOverview::new(id)),
        }
    }
}

/// Buttons a host should draw next to a diagram.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Control {
    /// Toggles between pause and resume.
    PauseResume,
    Play,
    Pause,
    Restart,
    StartSearch,
    Reset,
    Back,
}

/// Layer interactions supported by layered diagrams.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum LayerAction {
    /// `None` clears the focus.
    Focus { layer: Option<String> },
    Zoom { layer: String },
    Back,
}

/// Renderer contract.
///
/// `render` owns the scene contents; reveal plans only address elements by id, so a plan
/// run against a scene that lacks some targets simply skips them.
pub trait Diagram: fmt::Debug {
    fn id(&self) -> &DiagramId;

    fn kind(&self) -> DiagramKind;

    /// Canvas size in px.
    fn size(&self) -> (f64, f64);

    /// Clear the scene and draw the dataset in its initial state.
    fn render(&mut self, scene: &mut Scene);

    /// Timed mutations for `step`, or `None` when the diagram has nothing to animate there.
    fn reveal_plan(&self, _step: StepIndex) -> Option<RevealPlan> {
        None
    }

    fn teardown(&mut self, scene: &mut Scene) {
        scene.clear();
    }

    /// Hover text for `element`.
    fn tooltip(&self, scene: &Scene, element: &str) -> Option<Tooltip> {
        scene.get(element).and_then(|el| el.tooltip.clone())
    }

    /// Apply hover emphasis. Unknown elements are ignored.
    fn hover(&mut self, _scene: &mut Scene, _element: &str) {}

    fn unhover(&mut self, _scene: &mut Scene, _element: &str) {}

    fn controls(&self) -> &'static [Control] {
        &[]
    }

    fn interact(&mut self, _scene: &mut Scene, action: &LayerAction) -> StoryResult<()> {
        Err(StoryError::validation(format!(
            "diagram '{}' does not support {action:?}",
            self.id()
        )))
    }
}

/// Linear map from a domain to a pixel range, like a d3 linear scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn apply(&self, v: f64) -> f64 {
        let span = self.domain.1 - self.domain.0;
        if span == 0.0 {
            return self.range.0;
        }
        let t = (v - self.domain.0) / span;
        self.range.0 + t * (self.range.1 - self.range.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/diagram/mod.rs"]
mod tests;
