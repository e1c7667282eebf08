use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::foundation::core::{Direction, StepIndex};
use crate::foundation::error::{StoryError, StoryResult};
use crate::foundation::ids::SectionId;
use crate::sequence::registry::StepRegistry;
use crate::sequence::view::{StepSync, StepView};

/// Emitted on every successful step change.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct StepChanged {
    pub section: SectionId,
    pub old: StepIndex,
    pub new: StepIndex,
}

/// Outcome of a navigation request.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Advance {
    Stepped(StepChanged),
    /// Already at the boundary, or a jump to the current step.
    Held { step: StepIndex },
    /// A hook switched content to another section instead of stepping.
    Redirected {
        section: SectionId,
        at: StepIndex,
        target: SectionId,
    },
}

impl Advance {
    /// Step index of the originating section after the request.
    pub fn step(&self) -> StepIndex {
        match self {
            Self::Stepped(c) => c.new,
            Self::Held { step } => *step,
            Self::Redirected { at, .. } => *at,
        }
    }
}

/// What a hook sees when an `advance` call reaches it.
#[derive(Clone, Copy, Debug)]
pub struct AdvanceCtx<'a> {
    pub section: &'a SectionId,
    pub current: StepIndex,
    pub count: usize,
    pub direction: Direction,
}

impl AdvanceCtx<'_> {
    pub fn is_last(&self) -> bool {
        self.current.0 + 1 >= self.count
    }

    pub fn is_first(&self) -> bool {
        self.current.0 == 0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HookDecision {
    Continue,
    SwitchTo(SectionId),
}

/// Per-section strategy consulted before a regular `advance`.
pub trait AdvanceHook: fmt::Debug {
    fn on_advance(&self, ctx: &AdvanceCtx<'_>) -> HookDecision;
}

/// Turns "next" on the final step into a switch to `target`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RedirectAtEnd {
    pub target: SectionId,
}

impl AdvanceHook for RedirectAtEnd {
    fn on_advance(&self, ctx: &AdvanceCtx<'_>) -> HookDecision {
        if ctx.direction == Direction::Next && ctx.is_last() {
            HookDecision::SwitchTo(self.target.clone())
        } else {
            HookDecision::Continue
        }
    }
}

/// Per-section current step, clamped to the registered bounds.
#[derive(Debug)]
pub struct Sequencer {
    registry: StepRegistry,
    state: BTreeMap<SectionId, StepIndex>,
    hooks: HashMap<SectionId, Box<dyn AdvanceHook>>,
}

impl Sequencer {
    pub fn new(registry: StepRegistry) -> Self {
        let state = registry
            .sections()
            .map(|s| (s.id.clone(), StepIndex(0)))
            .collect();
        Self {
            registry,
            state,
            hooks: HashMap::new(),
        }
    }

    pub fn registry(&self) -> &StepRegistry {
        &self.registry
    }

    pub fn state(&self) -> &BTreeMap<SectionId, StepIndex> {
        &self.state
    }

    /// Install the hook for `section`, replacing any earlier one.
    pub fn set_hook(
        &mut self,
        section: impl Into<SectionId>,
        hook: Box<dyn AdvanceHook>,
    ) -> StoryResult<()> {
        let section = section.into();
        self.registry.entry(section.as_str())?;
        self.hooks.insert(section, hook);
        Ok(())
    }

    pub fn current_step(&self, section: &str) -> StoryResult<StepIndex> {
        self.state
            .get(section)
            .copied()
            .ok_or_else(|| StoryError::unknown_section(section))
    }

    pub fn advance(&mut self, section: &str, direction: Direction) -> StoryResult<Advance> {
        let entry = self.registry.entry(section)?;
        let current = self.current_step(section)?;

        if let Some(hook) = self.hooks.get(section) {
            let ctx = AdvanceCtx {
                section: &entry.id,
                current,
                count: entry.steps,
                direction,
            };
            if let HookDecision::SwitchTo(target) = hook.on_advance(&ctx) {
                tracing::debug!(section, %target, "advance redirected");
                return Ok(Advance::Redirected {
                    section: entry.id.clone(),
                    at: current,
                    target,
                });
            }
        }

        let last = entry.steps - 1;
        let next = current
            .0
            .saturating_add_signed(direction.delta())
            .min(last);
        Ok(self.set(section, current, StepIndex(next)))
    }

    pub fn jump_to(&mut self, section: &str, index: usize) -> StoryResult<Advance> {
        let entry = self.registry.entry(section)?;
        if index >= entry.steps {
            return Err(StoryError::OutOfRange {
                section: entry.id.clone(),
                index,
                count: entry.steps,
            });
        }
        let current = self.current_step(section)?;
        Ok(self.set(section, current, StepIndex(index)))
    }

    fn set(&mut self, section: &str, old: StepIndex, new: StepIndex) -> Advance {
        if old == new {
            return Advance::Held { step: old };
        }
        let Some(slot) = self.state.get_mut(section) else {
            return Advance::Held { step: old };
        };
        *slot = new;
        Advance::Stepped(StepChanged {
            section: SectionId::from(section),
            old,
            new,
        })
    }

    /// Return every section to its first step. One change per section, in declaration order.
    pub fn reset(&mut self) -> Vec<StepChanged> {
        let mut out = Vec::with_capacity(self.registry.len());
        for entry in self.registry.sections() {
            let slot = self
                .state
                .entry(entry.id.clone())
                .or_insert(StepIndex(0));
            out.push(StepChanged {
                section: entry.id.clone(),
                old: *slot,
                new: StepIndex(0),
            });
            *slot = StepIndex(0);
        }
        out
    }

    /// Push the current step of `section` to `view`.
    pub fn sync(&self, view: &mut dyn StepView, section: &str) -> StoryResult<()> {
        let entry = self.registry.entry(section)?;
        view.sync_step(&StepSync {
            section: entry.id.clone(),
            step: self.current_step(section)?,
            count: entry.steps,
            visible_indicators: entry.indicator_count(),
        });
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/sequencer.rs"]
mod tests;
