use std::path::Path;

use crate::animation::animator::{AnimatorEvent, RunId};
use crate::diagram::LayerAction;
use crate::foundation::core::{Millis, StepIndex};
use crate::foundation::error::{StoryError, StoryResult};
use crate::foundation::ids::{DiagramId, ElementId, SectionId};
use crate::scene::model::Tooltip;
use crate::scroll::trigger::{Landmark, TriggerEvent};
use crate::sequence::sequencer::StepChanged;

/// Host input fed to [`StorySession::handle`](crate::StorySession::handle).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "input", rename_all = "snake_case")]
pub enum Input {
    Scroll {
        y: f64,
    },
    Resize {
        viewport_height: f64,
        landmarks: Vec<Landmark>,
    },
    /// Animation frame: evaluates the pending scroll position.
    Frame,
    Next {
        section: SectionId,
    },
    Prev {
        section: SectionId,
    },
    Jump {
        section: SectionId,
        index: usize,
    },
    Pause {
        diagram: DiagramId,
    },
    Resume {
        diagram: DiagramId,
    },
    Restart {
        diagram: DiagramId,
    },
    Play {
        diagram: DiagramId,
    },
    Reset {
        diagram: DiagramId,
    },
    Hover {
        diagram: DiagramId,
        element: ElementId,
    },
    Unhover {
        diagram: DiagramId,
        element: ElementId,
    },
    FocusLayer {
        diagram: DiagramId,
        #[serde(default)]
        layer: Option<String>,
    },
    ZoomLayer {
        diagram: DiagramId,
        layer: String,
    },
    Back {
        diagram: DiagramId,
    },
    /// Only advances the clock.
    Tick,
}

impl Input {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Scroll { .. } => "scroll",
            Self::Resize { .. } => "resize",
            Self::Frame => "frame",
            Self::Next { .. } => "next",
            Self::Prev { .. } => "prev",
            Self::Jump { .. } => "jump",
            Self::Pause { .. } => "pause",
            Self::Resume { .. } => "resume",
            Self::Restart { .. } => "restart",
            Self::Play { .. } => "play",
            Self::Reset { .. } => "reset",
            Self::Hover { .. } => "hover",
            Self::Unhover { .. } => "unhover",
            Self::FocusLayer { .. } => "focus_layer",
            Self::ZoomLayer { .. } => "zoom_layer",
            Self::Back { .. } => "back",
            Self::Tick => "tick",
        }
    }
}

/// Everything observable that a call to `handle` caused, in order.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum StoryEvent {
    Step(StepChanged),
    /// Navigation hit a boundary.
    Held {
        section: SectionId,
        step: StepIndex,
    },
    Redirected {
        section: SectionId,
        at: StepIndex,
        target: SectionId,
    },
    Landmark(TriggerEvent),
    Rendered {
        diagram: DiagramId,
    },
    RunStarted {
        diagram: DiagramId,
        run: RunId,
        step: StepIndex,
    },
    Animation(AnimatorEvent),
    Paused {
        diagram: DiagramId,
    },
    Resumed {
        diagram: DiagramId,
    },
    LayerChanged {
        diagram: DiagramId,
        action: LayerAction,
    },
    Tooltip {
        diagram: DiagramId,
        element: ElementId,
        tooltip: Tooltip,
    },
    TooltipHidden {
        diagram: DiagramId,
        element: ElementId,
    },
    Warning {
        message: String,
    },
}

/// One scripted input and the virtual time it arrives at.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScriptStep {
    pub at: Millis,
    #[serde(flatten)]
    pub input: Input,
}

/// Timed input sequence, replayed by the CLI.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Script {
    pub steps: Vec<ScriptStep>,
}

impl Script {
    pub fn from_reader<R: std::io::Read>(r: R) -> StoryResult<Self> {
        let script: Self = serde_json::from_reader(r)
            .map_err(|e| StoryError::serde(format!("script JSON parse failed: {e}")))?;
        script.validate()?;
        Ok(script)
    }

    pub fn from_path(path: impl AsRef<Path>) -> StoryResult<Self> {
        let path = path.as_ref();
        let f = std::fs::File::open(path).map_err(|e| {
            StoryError::Other(anyhow::anyhow!(
                "failed to open script '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_reader(std::io::BufReader::new(f))
    }

    /// Times must not go backwards.
    pub fn validate(&self) -> StoryResult<()> {
        for (i, pair) in self.steps.windows(2).enumerate() {
            if pair[1].at < pair[0].at {
                return Err(StoryError::validation(format!(
                    "script step {} at {}ms is earlier than the step before it ({}ms)",
                    i + 1,
                    pair[1].at.0,
                    pair[0].at.0
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/input.rs"]
mod tests;
