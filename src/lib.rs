//! Headless engine behind a scroll-driven explainer on retrieval-augmented generation and
//! medical knowledge graphs.
//!
//! A [`StorySession`] owns the slide sequencer, the scroll-trigger adapter, the reveal
//! animator and one retained [`Scene`] per diagram. Hosts feed it [`Input`]s stamped with
//! virtual time and get back [`StoryEvent`]s; page markup is driven through [`StepView`].

#![forbid(unsafe_code)]

pub mod animation;
pub mod diagram;
pub mod foundation;
pub mod scene;
pub mod scroll;
pub mod sequence;
pub mod session;

pub use animation::animator::{AnimationRun, Animator, AnimatorEvent, RunId};
pub use animation::ease::Ease;
pub use animation::reveal::{RevealAction, RevealKind, RevealPlan, stagger};
pub use diagram::{Control, Diagram, DiagramKind, LayerAction};
pub use foundation::core::{Direction, Millis, StepIndex, Transform2D};
pub use foundation::error::{StoryError, StoryResult};
pub use foundation::ids::{DiagramId, ElementId, SectionId};
pub use scene::model::{Element, Scene, Shape, Tooltip, VisualState};
pub use scroll::trigger::{Landmark, ScrollDirection, ScrollTrigger, TriggerEvent, TriggerOpts};
pub use sequence::registry::{SectionEntry, StepRegistry};
pub use sequence::sequencer::{Advance, AdvanceHook, HookDecision, RedirectAtEnd, Sequencer, StepChanged};
pub use sequence::view::{StepDom, StepSync, StepView, container_id};
pub use session::config::{Binding, DiagramConfig, SectionConfig, StoryConfig, Trigger};
pub use session::input::{Input, Script, ScriptStep, StoryEvent};
pub use session::story::{SessionSnapshot, StorySession};
