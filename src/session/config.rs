use std::collections::HashSet;
use std::path::Path;

use crate::diagram::DiagramKind;
use crate::foundation::error::{StoryError, StoryResult};
use crate::foundation::ids::{DiagramId, SectionId};
use crate::scroll::trigger::{Landmark, ScrollTrigger, TriggerOpts};
use crate::sequence::registry::{SectionEntry, StepRegistry};

/// Whole-page configuration: slide sections, scroll landmarks, diagrams and the bindings
/// between them.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StoryConfig {
    pub sections: Vec<SectionConfig>,
    #[serde(default)]
    pub landmarks: Vec<Landmark>,
    #[serde(default)]
    pub trigger: TriggerOpts,
    #[serde(default)]
    pub diagrams: Vec<DiagramConfig>,
    #[serde(default)]
    pub bindings: Vec<Binding>,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SectionConfig {
    pub id: SectionId,
    pub steps: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible_indicators: Option<usize>,
    /// Switch to this landmark instead of stepping past the last slide.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_on_last_next: Option<SectionId>,
    /// Whether the section has slide containers for the view to toggle.
    #[serde(default = "default_slides")]
    pub slides: bool,
}

fn default_slides() -> bool {
    true
}

impl SectionConfig {
    pub fn new(id: impl Into<SectionId>, steps: usize) -> Self {
        Self {
            id: id.into(),
            steps,
            visible_indicators: None,
            redirect_on_last_next: None,
            slides: true,
        }
    }

    fn entry(&self) -> SectionEntry {
        SectionEntry {
            id: self.id.clone(),
            steps: self.steps,
            visible_indicators: self.visible_indicators,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DiagramConfig {
    pub id: DiagramId,
    pub kind: DiagramKind,
}

/// What causes a bound diagram to do work.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Trigger {
    /// Once, when the session starts.
    Startup,
    LandmarkEntered { landmark: SectionId },
    StepShown { section: SectionId, step: usize },
    /// Every step change of `section` runs the diagram's plan for the new step.
    SectionStep { section: SectionId },
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Binding {
    pub on: Trigger,
    pub diagram: DiagramId,
    /// Run the diagram's reveal plan right after rendering.
    #[serde(default)]
    pub play: bool,
}

impl Binding {
    pub fn new(on: Trigger, diagram: impl Into<DiagramId>) -> Self {
        Self {
            on,
            diagram: diagram.into(),
            play: false,
        }
    }

    pub fn play(mut self) -> Self {
        self.play = true;
        self
    }
}

const SLIDES: [(&str, usize); 10] = [
    ("embeddings", 3),
    ("smarter-chunking", 4),
    ("advanced-retrieval", 3),
    ("contextual-refinements", 4),
    ("external-tools", 5),
    ("knowledge-graphs-intro", 4),
    ("graphrag-approaches", 4),
    ("graphrag-advantages", 4),
    ("medgraphrag-intro", 3),
    ("graph-construction", 3),
];

/// Landmarks in document order.
const ARTICLE_LANDMARKS: [&str; 16] = [
    "introduction",
    "embeddings",
    "rag-pipeline",
    "smarter-chunking",
    "advanced-retrieval",
    "contextual-refinements",
    "external-tools",
    "knowledge-graphs-intro",
    "graphrag-approaches",
    "graphrag-advantages",
    "medgraphrag-intro",
    "graph-construction",
    "overall-graph-structure",
    "graph-tagging",
    "question-answering",
    "conclusion",
];

const LANDMARK_HEIGHT: f64 = 900.0;

impl StoryConfig {
    /// The RAG / medical knowledge-graph article.
    pub fn article() -> Self {
        let mut sections: Vec<SectionConfig> = SLIDES
            .iter()
            .map(|&(id, steps)| SectionConfig::new(id, steps))
            .collect();
        if let Some(gc) = sections.iter_mut().find(|s| s.id.as_str() == "graph-construction") {
            gc.visible_indicators = Some(3);
            gc.redirect_on_last_next = Some(SectionId::from("overall-graph-structure"));
        }
        sections.push(SectionConfig {
            slides: false,
            ..SectionConfig::new("rag-pipeline", crate::diagram::doc_vector::STEP_COUNT)
        });

        let landmarks = ARTICLE_LANDMARKS
            .iter()
            .enumerate()
            .map(|(i, id)| Landmark::new(*id, i as f64 * LANDMARK_HEIGHT, LANDMARK_HEIGHT))
            .collect();

        let diagrams = [
            ("embeddings-viz", DiagramKind::VectorScatter),
            ("rag-viz", DiagramKind::RagPipeline),
            ("knowledge-graph-viz", DiagramKind::KnowledgeGraph),
            ("entity-graph", DiagramKind::EntityExtraction),
            ("tag-graph", DiagramKind::TagTree),
            ("qa-graph", DiagramKind::QaWalk),
            ("overall-graph", DiagramKind::LayeredOverview),
        ]
        .into_iter()
        .map(|(id, kind)| DiagramConfig {
            id: DiagramId::from(id),
            kind,
        })
        .collect();

        let landmark = |id: &str| Trigger::LandmarkEntered {
            landmark: SectionId::from(id),
        };
        let bindings = vec![
            Binding::new(Trigger::Startup, "embeddings-viz"),
            Binding::new(Trigger::Startup, "rag-viz").play(),
            Binding::new(Trigger::Startup, "knowledge-graph-viz"),
            Binding::new(
                Trigger::SectionStep {
                    section: SectionId::from("rag-pipeline"),
                },
                "rag-viz",
            ),
            Binding::new(
                Trigger::StepShown {
                    section: SectionId::from("graph-construction"),
                    step: 2,
                },
                "entity-graph",
            )
            .play(),
            Binding::new(landmark("overall-graph-structure"), "overall-graph"),
            Binding::new(landmark("graph-tagging"), "tag-graph"),
            Binding::new(landmark("question-answering"), "qa-graph"),
        ];

        Self {
            sections,
            landmarks,
            trigger: TriggerOpts::default(),
            diagrams,
            bindings,
        }
    }

    pub fn from_reader<R: std::io::Read>(r: R) -> StoryResult<Self> {
        let config: Self = serde_json::from_reader(r)
            .map_err(|e| StoryError::serde(format!("story config JSON parse failed: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> StoryResult<Self> {
        let path = path.as_ref();
        let f = std::fs::File::open(path).map_err(|e| {
            StoryError::Other(anyhow::anyhow!(
                "failed to open story config '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_reader(std::io::BufReader::new(f))
    }

    pub fn registry(&self) -> StoryResult<StepRegistry> {
        self.sections
            .iter()
            .fold(StepRegistry::builder(), |b, s| b.entry(s.entry()))
            .build()
    }

    pub fn section(&self, id: &str) -> Option<&SectionConfig> {
        self.sections.iter().find(|s| s.id.as_str() == id)
    }

    pub fn diagram(&self, id: &str) -> Option<&DiagramConfig> {
        self.diagrams.iter().find(|d| d.id.as_str() == id)
    }

    /// Section whose step changes drive `diagram`, if any.
    pub fn driving_section(&self, diagram: &str) -> Option<&SectionId> {
        self.bindings.iter().find_map(|b| match &b.on {
            Trigger::SectionStep { section } if b.diagram.as_str() == diagram => Some(section),
            _ => None,
        })
    }

    /// Check every cross-reference. Section bounds are checked by the registry build.
    pub fn validate(&self) -> StoryResult<()> {
        self.registry()?;
        ScrollTrigger::new(self.trigger, self.landmarks.clone())?;

        let mut landmarks = HashSet::new();
        for l in &self.landmarks {
            if !landmarks.insert(l.id.as_str()) {
                return Err(StoryError::validation(format!("duplicate landmark id '{}'", l.id)));
            }
        }
        let is_landmark = |id: &str| landmarks.contains(id);

        for s in &self.sections {
            if let Some(target) = &s.redirect_on_last_next {
                if !is_landmark(target.as_str()) && self.section(target.as_str()).is_none() {
                    return Err(StoryError::validation(format!(
                        "section '{}' redirects to unknown target '{target}'",
                        s.id
                    )));
                }
            }
        }

        let mut diagrams = HashSet::new();
        for d in &self.diagrams {
            if !diagrams.insert(d.id.as_str()) {
                return Err(StoryError::validation(format!("duplicate diagram id '{}'", d.id)));
            }
        }

        let mut driven = HashSet::new();
        for b in &self.bindings {
            if !diagrams.contains(b.diagram.as_str()) {
                return Err(StoryError::unknown_diagram(b.diagram.as_str()));
            }
            match &b.on {
                Trigger::Startup => {}
                Trigger::LandmarkEntered { landmark } => {
                    if !is_landmark(landmark.as_str()) {
                        return Err(StoryError::validation(format!(
                            "binding for '{}' names unknown landmark '{landmark}'",
                            b.diagram
                        )));
                    }
                }
                Trigger::StepShown { section, step } => {
                    let s = self
                        .section(section.as_str())
                        .ok_or_else(|| StoryError::unknown_section(section.clone()))?;
                    if *step >= s.steps {
                        return Err(StoryError::OutOfRange {
                            section: section.clone(),
                            index: *step,
                            count: s.steps,
                        });
                    }
                }
                Trigger::SectionStep { section } => {
                    if self.section(section.as_str()).is_none() {
                        return Err(StoryError::unknown_section(section.clone()));
                    }
                    if !driven.insert(b.diagram.as_str()) {
                        return Err(StoryError::validation(format!(
                            "diagram '{}' is driven by more than one section",
                            b.diagram
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self::article()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/config.rs"]
mod tests;
