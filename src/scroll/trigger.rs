use crate::foundation::error::{StoryError, StoryResult};
use crate::foundation::ids::SectionId;

/// Scroll anchor in document coordinates (px).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Landmark {
    pub id: SectionId,
    pub top: f64,
    pub height: f64,
}

impl Landmark {
    pub fn new(id: impl Into<SectionId>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }

    pub fn contains(&self, line: f64) -> bool {
        self.top <= line && line < self.top + self.height
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollDirection {
    Up,
    Down,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TriggerEvent {
    SectionEntered {
        id: SectionId,
        index: usize,
        direction: ScrollDirection,
    },
    SectionExited {
        id: SectionId,
        index: usize,
        direction: ScrollDirection,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TriggerOpts {
    /// Trigger line as a fraction of the viewport height.
    pub offset: f64,
    pub viewport_height: f64,
}

impl Default for TriggerOpts {
    fn default() -> Self {
        Self {
            offset: 0.5,
            viewport_height: 800.0,
        }
    }
}

/// Tracks which landmark currently crosses the trigger line.
///
/// `on_scroll` only records the position; evaluation happens once per `on_frame`, so a
/// burst of scroll events collapses into at most one exit/enter pair.
#[derive(Clone, Debug)]
pub struct ScrollTrigger {
    opts: TriggerOpts,
    landmarks: Vec<Landmark>,
    scroll_y: f64,
    last_eval_y: f64,
    dirty: bool,
    active: Option<usize>,
}

impl ScrollTrigger {
    pub fn new(opts: TriggerOpts, landmarks: Vec<Landmark>) -> StoryResult<Self> {
        validate(&opts, &landmarks)?;
        Ok(Self {
            opts,
            landmarks,
            scroll_y: 0.0,
            last_eval_y: 0.0,
            dirty: true,
            active: None,
        })
    }

    pub fn landmarks(&self) -> &[Landmark] {
        &self.landmarks
    }

    /// The viewport step: landmark judged active at the last evaluation.
    pub fn active(&self) -> Option<&SectionId> {
        self.active.map(|i| &self.landmarks[i].id)
    }

    pub fn trigger_line(&self) -> f64 {
        self.scroll_y + self.opts.offset * self.opts.viewport_height
    }

    pub fn on_scroll(&mut self, y: f64) {
        self.scroll_y = y;
        self.dirty = true;
    }

    pub fn needs_frame(&self) -> bool {
        self.dirty
    }

    pub fn on_frame(&mut self) -> Vec<TriggerEvent> {
        if !self.dirty {
            return Vec::new();
        }
        self.dirty = false;
        self.evaluate()
    }

    /// Replace viewport height and landmark bounds, then re-evaluate immediately.
    pub fn on_resize(
        &mut self,
        viewport_height: f64,
        landmarks: Vec<Landmark>,
    ) -> StoryResult<Vec<TriggerEvent>> {
        let opts = TriggerOpts {
            viewport_height,
            ..self.opts
        };
        validate(&opts, &landmarks)?;
        let previous = self.active().cloned();
        self.opts = opts;
        self.landmarks = landmarks;
        // Keep the active landmark by id across re-layouts so unchanged sections stay quiet.
        self.active = previous.and_then(|id| self.landmarks.iter().position(|l| l.id == id));
        self.dirty = false;
        Ok(self.evaluate())
    }

    fn evaluate(&mut self) -> Vec<TriggerEvent> {
        let line = self.trigger_line();
        let direction = if self.scroll_y > self.last_eval_y {
            ScrollDirection::Down
        } else {
            ScrollDirection::Up
        };
        self.last_eval_y = self.scroll_y;

        let now = self.landmarks.iter().position(|l| l.contains(line));
        if now == self.active {
            return Vec::new();
        }

        let mut out = Vec::with_capacity(2);
        if let Some(i) = self.active {
            out.push(TriggerEvent::SectionExited {
                id: self.landmarks[i].id.clone(),
                index: i,
                direction,
            });
        }
        if let Some(i) = now {
            out.push(TriggerEvent::SectionEntered {
                id: self.landmarks[i].id.clone(),
                index: i,
                direction,
            });
        }
        tracing::debug!(line, from = ?self.active, to = ?now, "active landmark changed");
        self.active = now;
        out
    }
}

fn validate(opts: &TriggerOpts, landmarks: &[Landmark]) -> StoryResult<()> {
    if !(0.0..=1.0).contains(&opts.offset) {
        return Err(StoryError::validation(format!(
            "trigger offset must be within [0, 1], got {}",
            opts.offset
        )));
    }
    if !(opts.viewport_height.is_finite() && opts.viewport_height > 0.0) {
        return Err(StoryError::validation("viewport height must be > 0"));
    }
    for l in landmarks {
        if !(l.height.is_finite() && l.height >= 0.0 && l.top.is_finite()) {
            return Err(StoryError::validation(format!(
                "landmark '{}' has invalid bounds",
                l.id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/trigger.rs"]
mod tests;
