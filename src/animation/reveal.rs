use crate::animation::ease::Ease;
use crate::foundation::core::{Lerp, Millis, Vec2};
use crate::foundation::error::{StoryError, StoryResult};
use crate::foundation::ids::ElementId;
use crate::scene::model::VisualState;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RevealKind {
    /// Opacity to 1.
    FadeIn,
    /// Opacity to an explicit value.
    FadeTo { opacity: f64 },
    /// Translate to an absolute offset.
    MoveTo { to: Vec2 },
    /// Uniform scale to a factor.
    Scale { to: f64 },
    /// Size/stroke emphasis.
    Highlight { radius: f64, stroke_width: f64 },
}

impl RevealKind {
    /// End state of the mutation when applied on top of `from`.
    pub fn target_state(self, from: VisualState) -> VisualState {
        let mut to = from;
        match self {
            Self::FadeIn => to.opacity = 1.0,
            Self::FadeTo { opacity } => to.opacity = opacity.clamp(0.0, 1.0),
            Self::MoveTo { to: offset } => to.transform.translate = offset,
            Self::Scale { to: factor } => to.transform.scale = factor,
            Self::Highlight {
                radius,
                stroke_width,
            } => {
                to.radius = radius;
                to.stroke_width = stroke_width;
            }
        }
        to
    }
}

/// Interpolate only the properties `kind` touches, so concurrent tweens on other
/// properties of the same element do not fight.
pub(crate) fn blend(
    kind: RevealKind,
    current: VisualState,
    from: VisualState,
    to: VisualState,
    t: f64,
) -> VisualState {
    let mut out = current;
    match kind {
        RevealKind::FadeIn | RevealKind::FadeTo { .. } => {
            out.opacity = <f64 as Lerp>::lerp(&from.opacity, &to.opacity, t);
        }
        RevealKind::MoveTo { .. } => {
            out.transform.translate =
                <Vec2 as Lerp>::lerp(&from.transform.translate, &to.transform.translate, t);
        }
        RevealKind::Scale { .. } => {
            out.transform.scale =
                <f64 as Lerp>::lerp(&from.transform.scale, &to.transform.scale, t);
        }
        RevealKind::Highlight { .. } => {
            out.radius = <f64 as Lerp>::lerp(&from.radius, &to.radius, t);
            out.stroke_width = <f64 as Lerp>::lerp(&from.stroke_width, &to.stroke_width, t);
        }
    }
    out
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RevealAction {
    pub target: ElementId,
    #[serde(flatten)]
    pub kind: RevealKind,
    pub delay: Millis,
    pub duration: Millis,
    #[serde(default)]
    pub ease: Ease,
}

impl RevealAction {
    pub fn new(target: impl Into<ElementId>, kind: RevealKind) -> Self {
        Self {
            target: target.into(),
            kind,
            delay: Millis::ZERO,
            duration: Millis(500),
            ease: Ease::default(),
        }
    }

    pub fn fade_in(target: impl Into<ElementId>) -> Self {
        Self::new(target, RevealKind::FadeIn)
    }

    pub fn fade_to(target: impl Into<ElementId>, opacity: f64) -> Self {
        Self::new(target, RevealKind::FadeTo { opacity })
    }

    pub fn move_to(target: impl Into<ElementId>, x: f64, y: f64) -> Self {
        Self::new(
            target,
            RevealKind::MoveTo {
                to: Vec2::new(x, y),
            },
        )
    }

    pub fn scale(target: impl Into<ElementId>, to: f64) -> Self {
        Self::new(target, RevealKind::Scale { to })
    }

    pub fn highlight(target: impl Into<ElementId>, radius: f64, stroke_width: f64) -> Self {
        Self::new(
            target,
            RevealKind::Highlight {
                radius,
                stroke_width,
            },
        )
    }

    pub fn delay(mut self, ms: u64) -> Self {
        self.delay = Millis(ms);
        self
    }

    pub fn duration(mut self, ms: u64) -> Self {
        self.duration = Millis(ms);
        self
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn end(&self) -> Millis {
        self.delay.after(self.duration)
    }
}

/// Ordered timed mutations for one step or animation phase.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RevealPlan {
    pub actions: Vec<RevealAction>,
    /// Delay from run start after which the next step is requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hold: Option<Millis>,
}

impl RevealPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, action: RevealAction) -> Self {
        self.push(action);
        self
    }

    pub fn hold(mut self, ms: u64) -> Self {
        self.hold = Some(Millis(ms));
        self
    }

    /// Insert keeping actions sorted by delay; equal delays keep insertion order.
    pub fn push(&mut self, action: RevealAction) {
        let at = self.actions.partition_point(|a| a.delay <= action.delay);
        self.actions.insert(at, action);
    }

    pub fn extend(&mut self, actions: impl IntoIterator<Item = RevealAction>) {
        for a in actions {
            self.push(a);
        }
    }

    /// Shift every action (and the hold) later by `by`.
    pub fn offset(mut self, by: Millis) -> Self {
        for a in &mut self.actions {
            a.delay = a.delay.after(by);
        }
        self.hold = self.hold.map(|h| h.after(by));
        self
    }

    /// Time at which the last action finishes.
    pub fn span(&self) -> Millis {
        self.actions
            .iter()
            .map(RevealAction::end)
            .max()
            .unwrap_or(Millis::ZERO)
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn validate(&self) -> StoryResult<()> {
        if !self.actions.windows(2).all(|w| w[0].delay <= w[1].delay) {
            return Err(StoryError::animation(
                "reveal plan actions must be sorted by delay",
            ));
        }
        for a in &self.actions {
            let RevealKind::Scale { to } = a.kind else {
                continue;
            };
            if !(to.is_finite() && to >= 0.0) {
                return Err(StoryError::animation(format!(
                    "scale for '{}' must be finite and >= 0",
                    a.target
                )));
            }
        }
        Ok(())
    }
}

/// Build one reveal per item, each `step_ms` after the previous one.
pub fn stagger<T>(
    items: impl IntoIterator<Item = T>,
    start_ms: u64,
    step_ms: u64,
    make: impl Fn(T) -> RevealAction,
) -> Vec<RevealAction> {
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            let base = make(item);
            let delay = start_ms + step_ms * i as u64 + base.delay.0;
            base.delay(delay)
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/animation/reveal.rs"]
mod tests;
