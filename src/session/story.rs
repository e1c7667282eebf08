use std::collections::BTreeMap;

use crate::animation::animator::{Animator, AnimatorEvent};
use crate::diagram::{Diagram, LayerAction};
use crate::foundation::core::{Direction, Millis, StepIndex};
use crate::foundation::error::{StoryError, StoryResult};
use crate::foundation::ids::{DiagramId, SectionId};
use crate::scene::model::Scene;
use crate::scroll::trigger::{ScrollTrigger, TriggerEvent};
use crate::sequence::sequencer::{Advance, RedirectAtEnd, Sequencer, StepChanged};
use crate::sequence::view::{StepDom, StepView};
use crate::session::config::{Binding, StoryConfig, Trigger};
use crate::session::input::{Input, StoryEvent};

/// Serializable view of a whole session.
#[derive(Debug, serde::Serialize)]
pub struct SessionSnapshot<'a, V> {
    pub now: Millis,
    pub steps: &'a BTreeMap<SectionId, StepIndex>,
    pub active_landmark: Option<&'a SectionId>,
    pub view: &'a V,
    pub scenes: &'a BTreeMap<DiagramId, Scene>,
}

/// One page session: owns every piece of mutable state and routes host input to it.
///
/// Time only moves when the host passes a later `now` to [`StorySession::handle`].
#[derive(Debug)]
pub struct StorySession<V: StepView = StepDom> {
    config: StoryConfig,
    sequencer: Sequencer,
    trigger: ScrollTrigger,
    animator: Animator,
    diagrams: BTreeMap<DiagramId, Box<dyn Diagram>>,
    scenes: BTreeMap<DiagramId, Scene>,
    view: V,
    now: Millis,
    started: bool,
}

fn mount<'a>(
    diagrams: &'a mut BTreeMap<DiagramId, Box<dyn Diagram>>,
    scenes: &'a mut BTreeMap<DiagramId, Scene>,
    id: &str,
) -> StoryResult<(&'a mut Box<dyn Diagram>, &'a mut Scene)> {
    let diagram = diagrams
        .get_mut(id)
        .ok_or_else(|| StoryError::unknown_diagram(id))?;
    let scene = scenes
        .get_mut(id)
        .ok_or_else(|| StoryError::unknown_diagram(id))?;
    Ok((diagram, scene))
}

fn warn(err: StoryError, out: &mut Vec<StoryEvent>) {
    tracing::warn!(error = %err, "story input failed");
    out.push(StoryEvent::Warning {
        message: err.to_string(),
    });
}

impl<V: StepView> StorySession<V> {
    pub fn new(config: StoryConfig, mut view: V) -> StoryResult<Self> {
        config.validate()?;

        let mut sequencer = Sequencer::new(config.registry()?);
        for s in &config.sections {
            if let Some(target) = &s.redirect_on_last_next {
                sequencer.set_hook(
                    s.id.clone(),
                    Box::new(RedirectAtEnd {
                        target: target.clone(),
                    }),
                )?;
            }
        }
        let trigger = ScrollTrigger::new(config.trigger, config.landmarks.clone())?;

        let mut diagrams = BTreeMap::new();
        let mut scenes = BTreeMap::new();
        for d in &config.diagrams {
            let diagram = d.kind.build(d.id.clone());
            let (width, height) = diagram.size();
            scenes.insert(d.id.clone(), Scene::new(d.id.clone(), width, height));
            diagrams.insert(d.id.clone(), diagram);
        }

        sequencer.reset();
        for s in config.sections.iter().filter(|s| s.slides) {
            sequencer.sync(&mut view, s.id.as_str())?;
        }

        tracing::debug!(
            sections = config.sections.len(),
            landmarks = config.landmarks.len(),
            diagrams = config.diagrams.len(),
            "story session created"
        );
        Ok(Self {
            config,
            sequencer,
            trigger,
            animator: Animator::new(),
            diagrams,
            scenes,
            view,
            now: Millis::ZERO,
            started: false,
        })
    }

    pub fn config(&self) -> &StoryConfig {
        &self.config
    }

    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    pub fn trigger(&self) -> &ScrollTrigger {
        &self.trigger
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    pub fn current_step(&self, section: &str) -> StoryResult<StepIndex> {
        self.sequencer.current_step(section)
    }

    pub fn scene(&self, diagram: &str) -> Option<&Scene> {
        self.scenes.get(diagram)
    }

    pub fn diagram(&self, diagram: &str) -> Option<&dyn Diagram> {
        self.diagrams.get(diagram).map(|d| d.as_ref())
    }

    /// Run the startup bindings. Later calls do nothing; `handle` calls this on first use.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn start(&mut self, now: Millis) -> Vec<StoryEvent> {
        let mut out = Vec::new();
        if self.started {
            return out;
        }
        self.started = true;
        self.now = self.now.max(now);
        let startup: Vec<Binding> = self
            .config
            .bindings
            .iter()
            .filter(|b| b.on == Trigger::Startup)
            .cloned()
            .collect();
        for binding in &startup {
            if let Err(err) = self.fire(binding, self.now, &mut out) {
                warn(err, &mut out);
            }
        }
        out
    }

    /// Advance the clock to `now`, then apply `input`.
    ///
    /// Errors never escape: they are logged and reported as [`StoryEvent::Warning`].
    #[tracing::instrument(level = "debug", skip(self, input), fields(input = input.name()))]
    pub fn handle(&mut self, input: Input, now: Millis) -> Vec<StoryEvent> {
        let mut out = self.start(now);
        let now = self.advance_clock(now, &mut out);
        if let Err(err) = self.dispatch(input, now, &mut out) {
            warn(err, &mut out);
        }
        out
    }

    pub fn snapshot(&self) -> SessionSnapshot<'_, V> {
        SessionSnapshot {
            now: self.now,
            steps: self.sequencer.state(),
            active_landmark: self.trigger.active(),
            view: &self.view,
            scenes: &self.scenes,
        }
    }

    /// Fire due timers one due time at a time, so runs started by an auto-advance are
    /// scheduled from the hold's due time rather than from `now`.
    fn advance_clock(&mut self, now: Millis, out: &mut Vec<StoryEvent>) -> Millis {
        if now < self.now {
            tracing::debug!(now = now.0, clock = self.now.0, "input from the past, keeping clock");
        }
        let now = now.max(self.now);
        while let Some(due) = self.animator.next_due().filter(|due| *due <= now) {
            let events = self.animator.tick(due, &mut self.scenes);
            for ev in events {
                self.on_animator_event(ev, due, out);
            }
        }
        let events = self.animator.tick(now, &mut self.scenes);
        for ev in events {
            self.on_animator_event(ev, now, out);
        }
        self.now = now;
        now
    }

    fn on_animator_event(&mut self, ev: AnimatorEvent, at: Millis, out: &mut Vec<StoryEvent>) {
        let advance = match &ev {
            AnimatorEvent::AdvanceRequested { diagram } => Some(diagram.clone()),
            _ => None,
        };
        out.push(StoryEvent::Animation(ev));
        let Some(diagram) = advance else {
            return;
        };
        let Some(section) = self.config.driving_section(diagram.as_str()).cloned() else {
            tracing::debug!(%diagram, "advance requested but no section drives the diagram");
            return;
        };
        if let Err(err) = self.navigate(&section, Direction::Next, at, out) {
            warn(err, out);
        }
    }

    fn dispatch(&mut self, input: Input, now: Millis, out: &mut Vec<StoryEvent>) -> StoryResult<()> {
        match input {
            Input::Scroll { y } => self.trigger.on_scroll(y),
            Input::Frame => {
                let events = self.trigger.on_frame();
                self.on_trigger_events(events, now, out);
            }
            Input::Resize {
                viewport_height,
                landmarks,
            } => {
                let events = self.trigger.on_resize(viewport_height, landmarks)?;
                self.on_trigger_events(events, now, out);
            }
            Input::Next { section } => self.navigate(&section, Direction::Next, now, out)?,
            Input::Prev { section } => self.navigate(&section, Direction::Prev, now, out)?,
            Input::Jump { section, index } => {
                let outcome = self.sequencer.jump_to(section.as_str(), index)?;
                self.apply_advance(&section, outcome, now, out)?;
            }
            Input::Pause { diagram } => {
                let was_paused = self.animator.is_paused(diagram.as_str());
                self.animator.pause(diagram.as_str(), now)?;
                if !was_paused {
                    out.push(StoryEvent::Paused { diagram });
                }
            }
            Input::Resume { diagram } => {
                if self.animator.is_paused(diagram.as_str()) {
                    self.animator.resume(diagram.as_str(), now)?;
                    out.push(StoryEvent::Resumed { diagram });
                }
            }
            Input::Restart { diagram } => self.restart(&diagram, now, out)?,
            Input::Play { diagram } => self.play_control(&diagram, now, out)?,
            Input::Reset { diagram } => self.reset(&diagram, out)?,
            Input::Hover { diagram, element } => {
                let (d, scene) = mount(&mut self.diagrams, &mut self.scenes, diagram.as_str())?;
                d.hover(scene, element.as_str());
                if let Some(tooltip) = d.tooltip(scene, element.as_str()) {
                    out.push(StoryEvent::Tooltip {
                        diagram,
                        element,
                        tooltip,
                    });
                }
            }
            Input::Unhover { diagram, element } => {
                let (d, scene) = mount(&mut self.diagrams, &mut self.scenes, diagram.as_str())?;
                d.unhover(scene, element.as_str());
                out.push(StoryEvent::TooltipHidden { diagram, element });
            }
            Input::FocusLayer { diagram, layer } => {
                self.interact(diagram, LayerAction::Focus { layer }, out)?
            }
            Input::ZoomLayer { diagram, layer } => {
                self.interact(diagram, LayerAction::Zoom { layer }, out)?
            }
            Input::Back { diagram } => self.interact(diagram, LayerAction::Back, out)?,
            Input::Tick => {}
        }
        Ok(())
    }

    fn navigate(
        &mut self,
        section: &SectionId,
        direction: Direction,
        now: Millis,
        out: &mut Vec<StoryEvent>,
    ) -> StoryResult<()> {
        let outcome = self.sequencer.advance(section.as_str(), direction)?;
        self.apply_advance(section, outcome, now, out)
    }

    fn apply_advance(
        &mut self,
        section: &SectionId,
        outcome: Advance,
        now: Millis,
        out: &mut Vec<StoryEvent>,
    ) -> StoryResult<()> {
        match outcome {
            Advance::Stepped(change) => self.step_changed(change, now, true, out),
            Advance::Held { step } => {
                out.push(StoryEvent::Held {
                    section: section.clone(),
                    step,
                });
                Ok(())
            }
            Advance::Redirected {
                section,
                at,
                target,
            } => self.redirect(section, at, target, now, out),
        }
    }

    /// Sync the view and, when `dispatch` is set, fire the bindings watching the section.
    fn step_changed(
        &mut self,
        change: StepChanged,
        now: Millis,
        dispatch: bool,
        out: &mut Vec<StoryEvent>,
    ) -> StoryResult<()> {
        if self
            .config
            .section(change.section.as_str())
            .is_some_and(|s| s.slides)
        {
            self.sequencer.sync(&mut self.view, change.section.as_str())?;
        }
        out.push(StoryEvent::Step(change.clone()));
        if !dispatch {
            return Ok(());
        }

        let bindings: Vec<Binding> = self
            .config
            .bindings
            .iter()
            .filter(|b| match &b.on {
                Trigger::StepShown { section, step } => {
                    *section == change.section && *step == change.new.0
                }
                Trigger::SectionStep { section } => *section == change.section,
                _ => false,
            })
            .cloned()
            .collect();
        for binding in &bindings {
            let result = match binding.on {
                Trigger::SectionStep { .. } => {
                    self.play_step(&binding.diagram, change.new, now, out)
                }
                _ => self.fire(binding, now, out),
            };
            if let Err(err) = result {
                warn(err, out);
            }
        }
        Ok(())
    }

    fn redirect(
        &mut self,
        section: SectionId,
        at: StepIndex,
        target: SectionId,
        now: Millis,
        out: &mut Vec<StoryEvent>,
    ) -> StoryResult<()> {
        let count = self.sequencer.registry().step_count(section.as_str())?;
        self.view.hide_section(&section, count);
        self.view.show_section(&target);
        tracing::debug!(%section, %target, "section redirected");
        out.push(StoryEvent::Redirected {
            section,
            at,
            target: target.clone(),
        });
        self.landmark_entered(&target, now, out);
        Ok(())
    }

    fn on_trigger_events(&mut self, events: Vec<TriggerEvent>, now: Millis, out: &mut Vec<StoryEvent>) {
        for ev in events {
            let entered = match &ev {
                TriggerEvent::SectionEntered { id, .. } => Some(id.clone()),
                TriggerEvent::SectionExited { .. } => None,
            };
            out.push(StoryEvent::Landmark(ev));
            if let Some(id) = entered {
                self.landmark_entered(&id, now, out);
            }
        }
    }

    fn landmark_entered(&mut self, landmark: &SectionId, now: Millis, out: &mut Vec<StoryEvent>) {
        let bindings: Vec<Binding> = self
            .config
            .bindings
            .iter()
            .filter(|b| matches!(&b.on, Trigger::LandmarkEntered { landmark: l } if l == landmark))
            .cloned()
            .collect();
        for binding in &bindings {
            if let Err(err) = self.fire(binding, now, out) {
                warn(err, out);
            }
        }
    }

    /// Render the bound diagram, then play it when the binding asks for it.
    fn fire(&mut self, binding: &Binding, now: Millis, out: &mut Vec<StoryEvent>) -> StoryResult<()> {
        self.render(&binding.diagram, out)?;
        if binding.play {
            self.play(&binding.diagram, now, out)?;
        }
        Ok(())
    }

    /// Redraw from scratch. Any run on the diagram is dropped first.
    fn render(&mut self, diagram: &DiagramId, out: &mut Vec<StoryEvent>) -> StoryResult<()> {
        let (d, scene) = mount(&mut self.diagrams, &mut self.scenes, diagram.as_str())?;
        self.animator.cancel(diagram.as_str());
        d.render(scene);
        out.push(StoryEvent::Rendered {
            diagram: diagram.clone(),
        });
        Ok(())
    }

    /// Tear the diagram down and draw it again from its initial state.
    fn reset(&mut self, diagram: &DiagramId, out: &mut Vec<StoryEvent>) -> StoryResult<()> {
        let (d, scene) = mount(&mut self.diagrams, &mut self.scenes, diagram.as_str())?;
        self.animator.cancel(diagram.as_str());
        d.teardown(scene);
        d.render(scene);
        out.push(StoryEvent::Rendered {
            diagram: diagram.clone(),
        });
        Ok(())
    }

    /// Play the plan for the driving section's current step, or step 0.
    fn play(&mut self, diagram: &DiagramId, now: Millis, out: &mut Vec<StoryEvent>) -> StoryResult<()> {
        let step = match self.config.driving_section(diagram.as_str()) {
            Some(section) => self.sequencer.current_step(section.as_str())?,
            None => StepIndex(0),
        };
        self.play_step(diagram, step, now, out)
    }

    fn play_step(
        &mut self,
        diagram: &DiagramId,
        step: StepIndex,
        now: Millis,
        out: &mut Vec<StoryEvent>,
    ) -> StoryResult<()> {
        let (d, scene) = mount(&mut self.diagrams, &mut self.scenes, diagram.as_str())?;
        let Some(plan) = d.reveal_plan(step) else {
            if self.animator.cancel(diagram.as_str()) {
                tracing::debug!(%diagram, step = step.0, "no plan for step, previous run dropped");
            }
            return Ok(());
        };
        let run = self.animator.run(diagram.clone(), plan, scene, now)?;
        out.push(StoryEvent::RunStarted {
            diagram: diagram.clone(),
            run,
            step,
        });
        Ok(())
    }

    fn play_control(&mut self, diagram: &DiagramId, now: Millis, out: &mut Vec<StoryEvent>) -> StoryResult<()> {
        if self.animator.is_paused(diagram.as_str()) {
            self.animator.resume(diagram.as_str(), now)?;
            out.push(StoryEvent::Resumed {
                diagram: diagram.clone(),
            });
            return Ok(());
        }
        if self
            .animator
            .run_for(diagram.as_str())
            .is_some_and(|run| !run.is_finished())
        {
            tracing::debug!(%diagram, "already playing");
            return Ok(());
        }
        // A finished section-driven run only holds its last step, so replay from the top.
        if self.config.driving_section(diagram.as_str()).is_some() {
            return self.restart(diagram, now, out);
        }
        self.render(diagram, out)?;
        self.play(diagram, now, out)
    }

    /// Replay from the first step. A section-driven diagram also rewinds its section.
    fn restart(&mut self, diagram: &DiagramId, now: Millis, out: &mut Vec<StoryEvent>) -> StoryResult<()> {
        if let Some(section) = self.config.driving_section(diagram.as_str()).cloned() {
            self.render(diagram, out)?;
            if let Advance::Stepped(change) = self.sequencer.jump_to(section.as_str(), 0)? {
                self.step_changed(change, now, false, out)?;
            }
            return self.play_step(diagram, StepIndex(0), now, out);
        }
        if self.animator.run_for(diagram.as_str()).is_some() {
            let scene = self
                .scenes
                .get_mut(diagram.as_str())
                .ok_or_else(|| StoryError::unknown_diagram(diagram.as_str()))?;
            let run = self.animator.restart(diagram.as_str(), scene, now)?;
            out.push(StoryEvent::RunStarted {
                diagram: diagram.clone(),
                run,
                step: StepIndex(0),
            });
            return Ok(());
        }
        self.render(diagram, out)?;
        self.play_step(diagram, StepIndex(0), now, out)
    }

    fn interact(
        &mut self,
        diagram: DiagramId,
        action: LayerAction,
        out: &mut Vec<StoryEvent>,
    ) -> StoryResult<()> {
        let (d, scene) = mount(&mut self.diagrams, &mut self.scenes, diagram.as_str())?;
        d.interact(scene, &action)?;
        out.push(StoryEvent::LayerChanged { diagram, action });
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/story.rs"]
mod tests;
