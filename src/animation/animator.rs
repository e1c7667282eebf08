use std::collections::{BTreeMap, BTreeSet};

use crate::animation::ease::Ease;
use crate::animation::reveal::{RevealKind, RevealPlan, blend};
use crate::animation::timer::{TimerId, TimerQueue};
use crate::foundation::core::Millis;
use crate::foundation::error::{StoryError, StoryResult};
use crate::foundation::ids::{DiagramId, ElementId};
use crate::scene::model::{Scene, VisualState};

/// Identifies one execution of a plan. Never reused within an [`Animator`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct RunId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TaskKind {
    Action(usize),
    Advance,
}

#[derive(Clone, Debug)]
struct AnimTask {
    diagram: DiagramId,
    run: RunId,
    kind: TaskKind,
}

#[derive(Clone, Debug)]
struct Tween {
    diagram: DiagramId,
    run: RunId,
    action: usize,
    target: ElementId,
    kind: RevealKind,
    ease: Ease,
    from: VisualState,
    to: VisualState,
    start: Millis,
    duration: Millis,
}

impl Tween {
    fn progress(&self, now: Millis) -> f64 {
        if self.duration == Millis::ZERO {
            return 1.0;
        }
        (now.since(self.start).as_f64() / self.duration.as_f64()).min(1.0)
    }
}

/// One in-progress execution of a [`RevealPlan`] on a diagram.
#[derive(Clone, Debug)]
pub struct AnimationRun {
    pub id: RunId,
    pub diagram: DiagramId,
    pub plan: RevealPlan,
    pub started_at: Millis,
    pending: Vec<TimerId>,
    suspended: Vec<(TaskKind, Millis)>,
    completed: BTreeSet<usize>,
    next_action: usize,
    paused_at: Option<Millis>,
    snapshot: Vec<(ElementId, VisualState)>,
    reported: bool,
}

impl AnimationRun {
    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    /// Index of the next action that has not fired yet.
    pub fn next_action(&self) -> usize {
        self.next_action
    }

    pub fn completed(&self) -> &BTreeSet<usize> {
        &self.completed
    }

    pub fn pending_timers(&self) -> usize {
        self.pending.len()
    }

    pub fn is_finished(&self) -> bool {
        self.next_action >= self.plan.actions.len()
            && self.completed.len() >= self.plan.actions.len()
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AnimatorEvent {
    ActionFired {
        diagram: DiagramId,
        run: RunId,
        index: usize,
        target: ElementId,
        at: Millis,
    },
    ActionSkipped {
        diagram: DiagramId,
        run: RunId,
        index: usize,
        target: ElementId,
    },
    RunCompleted {
        diagram: DiagramId,
        run: RunId,
    },
    AdvanceRequested {
        diagram: DiagramId,
    },
}

/// Runs reveal plans against diagram scenes on a virtual clock.
#[derive(Debug, Default)]
pub struct Animator {
    runs: BTreeMap<DiagramId, AnimationRun>,
    timers: TimerQueue<AnimTask>,
    tweens: Vec<Tween>,
    next_run: u64,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn run_for(&self, diagram: &str) -> Option<&AnimationRun> {
        self.runs.get(diagram)
    }

    pub fn is_paused(&self, diagram: &str) -> bool {
        self.runs.get(diagram).is_some_and(AnimationRun::is_paused)
    }

    /// Earliest pending timer, for hosts that sleep between ticks.
    pub fn next_due(&self) -> Option<Millis> {
        self.timers.next_due()
    }

    pub fn active_tweens(&self) -> usize {
        self.tweens.len()
    }

    /// Start `plan` on `diagram`, replacing any prior run for it.
    pub fn run(
        &mut self,
        diagram: impl Into<DiagramId>,
        plan: RevealPlan,
        scene: &Scene,
        now: Millis,
    ) -> StoryResult<RunId> {
        plan.validate()?;
        let diagram = diagram.into();
        self.cancel(diagram.as_str());

        let id = RunId(self.next_run);
        self.next_run += 1;

        let mut snapshot: Vec<(ElementId, VisualState)> = Vec::new();
        for a in &plan.actions {
            if snapshot.iter().any(|(t, _)| *t == a.target) {
                continue;
            }
            if let Some(st) = scene.state(a.target.as_str()) {
                snapshot.push((a.target.clone(), st));
            }
        }

        let mut pending = Vec::with_capacity(plan.actions.len() + 1);
        for (i, a) in plan.actions.iter().enumerate() {
            pending.push(self.timers.schedule(
                now.after(a.delay),
                AnimTask {
                    diagram: diagram.clone(),
                    run: id,
                    kind: TaskKind::Action(i),
                },
            ));
        }
        if let Some(hold) = plan.hold {
            pending.push(self.timers.schedule(
                now.after(hold),
                AnimTask {
                    diagram: diagram.clone(),
                    run: id,
                    kind: TaskKind::Advance,
                },
            ));
        }

        tracing::debug!(%diagram, run = id.0, actions = plan.actions.len(), "animation run started");
        self.runs.insert(
            diagram.clone(),
            AnimationRun {
                id,
                diagram,
                plan,
                started_at: now,
                pending,
                suspended: Vec::new(),
                completed: BTreeSet::new(),
                next_action: 0,
                paused_at: None,
                snapshot,
                reported: false,
            },
        );
        Ok(id)
    }

    /// Fire every timer due at or before `now`, then sample all active tweens at `now`.
    pub fn tick(
        &mut self,
        now: Millis,
        scenes: &mut BTreeMap<DiagramId, Scene>,
    ) -> Vec<AnimatorEvent> {
        let mut events = Vec::new();

        while let Some((timer, due, task)) = self.timers.pop_due(now) {
            let Some(run) = self.runs.get_mut(task.diagram.as_str()) else {
                continue;
            };
            if run.id != task.run {
                tracing::debug!(diagram = %task.diagram, "dropping stale timer");
                continue;
            }
            run.pending.retain(|t| *t != timer);

            // Earlier tweens must settle before a later action reads its start state.
            self.sample(due, scenes, &mut events);

            match task.kind {
                TaskKind::Advance => {
                    tracing::debug!(diagram = %task.diagram, at = due.0, "auto-advance due");
                    events.push(AnimatorEvent::AdvanceRequested {
                        diagram: task.diagram,
                    });
                }
                TaskKind::Action(index) => self.fire(task.diagram, task.run, index, due, scenes, &mut events),
            }
        }

        self.sample(now, scenes, &mut events);
        self.report_completed(&mut events);
        events
    }

    fn fire(
        &mut self,
        diagram: DiagramId,
        run_id: RunId,
        index: usize,
        due: Millis,
        scenes: &mut BTreeMap<DiagramId, Scene>,
        events: &mut Vec<AnimatorEvent>,
    ) {
        let Some(run) = self.runs.get_mut(diagram.as_str()) else {
            return;
        };
        let Some(action) = run.plan.actions.get(index).cloned() else {
            return;
        };
        run.next_action = run.next_action.max(index + 1);

        let current = scenes
            .get(diagram.as_str())
            .and_then(|s| s.state(action.target.as_str()));
        let Some(from) = current else {
            tracing::debug!(%diagram, target = %action.target, "reveal target missing, skipped");
            run.completed.insert(index);
            events.push(AnimatorEvent::ActionSkipped {
                diagram,
                run: run_id,
                index,
                target: action.target,
            });
            return;
        };

        events.push(AnimatorEvent::ActionFired {
            diagram: diagram.clone(),
            run: run_id,
            index,
            target: action.target.clone(),
            at: due,
        });
        self.tweens.push(Tween {
            diagram,
            run: run_id,
            action: index,
            target: action.target,
            kind: action.kind,
            ease: action.ease,
            from,
            to: action.kind.target_state(from),
            start: due,
            duration: action.duration,
        });
    }

    fn sample(
        &mut self,
        now: Millis,
        scenes: &mut BTreeMap<DiagramId, Scene>,
        events: &mut Vec<AnimatorEvent>,
    ) {
        let Self { runs, tweens, .. } = self;
        tweens.retain(|tw| {
            let Some(run) = runs.get_mut(tw.diagram.as_str()) else {
                return false;
            };
            if run.id != tw.run {
                return false;
            }
            if run.is_paused() || now < tw.start {
                return true;
            }
            let t = tw.progress(now);
            let applied = scenes.get_mut(tw.diagram.as_str()).is_some_and(|scene| {
                let Some(current) = scene.state(tw.target.as_str()) else {
                    return false;
                };
                let next = blend(tw.kind, current, tw.from, tw.to, tw.ease.apply(t));
                scene.set_state(tw.target.as_str(), next)
            });
            if !applied {
                tracing::debug!(diagram = %tw.diagram, target = %tw.target, "tween target vanished");
                run.completed.insert(tw.action);
                events.push(AnimatorEvent::ActionSkipped {
                    diagram: tw.diagram.clone(),
                    run: tw.run,
                    index: tw.action,
                    target: tw.target.clone(),
                });
                return false;
            }
            if t >= 1.0 {
                run.completed.insert(tw.action);
                return false;
            }
            true
        });
    }

    fn report_completed(&mut self, events: &mut Vec<AnimatorEvent>) {
        for run in self.runs.values_mut() {
            if run.reported || run.is_paused() || !run.is_finished() {
                continue;
            }
            run.reported = true;
            events.push(AnimatorEvent::RunCompleted {
                diagram: run.diagram.clone(),
                run: run.id,
            });
        }
    }

    /// Suspend the diagram's run. Fired actions stay fired; in-flight tweens freeze.
    pub fn pause(&mut self, diagram: &str, now: Millis) -> StoryResult<()> {
        let Some(run) = self.runs.get_mut(diagram) else {
            return Err(StoryError::animation(format!("no animation run for '{diagram}'")));
        };
        if run.is_paused() {
            return Ok(());
        }
        for timer in run.pending.drain(..) {
            let Some(due) = self.timers.due_at(timer) else {
                continue;
            };
            if let Some(task) = self.timers.cancel(timer) {
                run.suspended.push((task.kind, due));
            }
        }
        run.paused_at = Some(now);
        tracing::debug!(diagram, at = now.0, suspended = run.suspended.len(), "animation paused");
        Ok(())
    }

    /// Continue a paused run, keeping every remaining offset relative to the pause point.
    pub fn resume(&mut self, diagram: &str, now: Millis) -> StoryResult<()> {
        let Some(run) = self.runs.get_mut(diagram) else {
            return Err(StoryError::animation(format!("no animation run for '{diagram}'")));
        };
        let Some(paused_at) = run.paused_at.take() else {
            return Ok(());
        };
        let shift = now.since(paused_at);
        for (kind, due) in run.suspended.drain(..) {
            let timer = self.timers.schedule(
                due.after(shift),
                AnimTask {
                    diagram: run.diagram.clone(),
                    run: run.id,
                    kind,
                },
            );
            run.pending.push(timer);
        }
        for tw in self.tweens.iter_mut().filter(|tw| tw.run == run.id) {
            tw.start = tw.start.after(shift);
        }
        tracing::debug!(diagram, at = now.0, shift = shift.0, "animation resumed");
        Ok(())
    }

    /// Put every target back to its pre-run state and run the same plan again.
    pub fn restart(&mut self, diagram: &str, scene: &mut Scene, now: Millis) -> StoryResult<RunId> {
        let Some(run) = self.runs.get(diagram) else {
            return Err(StoryError::animation(format!("no animation run for '{diagram}'")));
        };
        let plan = run.plan.clone();
        for (target, state) in &run.snapshot {
            scene.set_state(target.as_str(), *state);
        }
        self.run(diagram, plan, scene, now)
    }

    /// Drop the diagram's run, its timers and its tweens. Returns whether a run existed.
    pub fn cancel(&mut self, diagram: &str) -> bool {
        let Some(run) = self.runs.remove(diagram) else {
            return false;
        };
        for timer in run.pending {
            self.timers.cancel(timer);
        }
        self.tweens.retain(|tw| tw.run != run.id);
        tracing::debug!(diagram, run = run.id.0, "animation run cancelled");
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/animator.rs"]
mod tests;
