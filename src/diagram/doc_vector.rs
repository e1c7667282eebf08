use crate::animation::ease::Ease;
use crate::animation::reveal::{RevealAction, RevealPlan};
use crate::diagram::data::{
    PIPELINE_CHUNKS, PIPELINE_DOC_WIDTH, PIPELINE_DOC_X, PIPELINE_QUERY, PIPELINE_RETRIEVED,
    PIPELINE_TITLE, PipelineChunk, pipeline_color, wrap_text,
};
use crate::diagram::{Control, Diagram, DiagramKind, LinearScale};
use crate::foundation::core::{Millis, Point, Rect, StepIndex, Transform2D, Vec2};
use crate::foundation::ids::DiagramId;
use crate::scene::model::{Element, Scene, Tooltip};

const WIDTH: f64 = 1000.0;
const HEIGHT: f64 = 600.0;
const ORIGIN: Vec2 = Vec2::new(20.0, 20.0);
const VECTOR_X: f64 = 600.0;
const VECTOR_SIZE: f64 = 350.0;
const GLYPH_WIDTH: f64 = 6.5;
const CIRCLE_R: f64 = 8.0;

/// Number of internal steps the pipeline walks through.
pub const STEP_COUNT: usize = 6;
/// Delay before the first step's reveal starts.
pub const START_DELAY: Millis = Millis(1000);
const FIRST_HOLD: u64 = 1500;
const HOLD: u64 = 2500;
const FLY_MS: u64 = 1500;

const STAR: [(f64, f64); 10] = [
    (0.0, 8.0),
    (2.0, 2.0),
    (8.0, 2.0),
    (3.0, -2.0),
    (5.0, -8.0),
    (0.0, -4.0),
    (-5.0, -8.0),
    (-3.0, -2.0),
    (-8.0, 2.0),
    (-2.0, 2.0),
];

fn box_id(chunk: &PipelineChunk) -> String {
    chunk.id.to_string()
}

fn text_id(chunk: &PipelineChunk) -> String {
    format!("{}-text", chunk.id)
}

pub fn vec_id(chunk: &PipelineChunk) -> String {
    format!("{}-vec", chunk.id)
}

fn vec_label_id(chunk: &PipelineChunk) -> String {
    format!("{}-vec-label", chunk.id)
}

/// Document chunks and a query embedded into a small vector space, then retrieved.
///
/// Steps, each auto-advancing after its hold:
/// 0 title and chunks, 1 query, 2 chunks fly to vector space, 3 query flies in,
/// 4 retrieval line, 5 retrieved point highlighted.
#[derive(Debug)]
pub struct RagPipeline {
    id: DiagramId,
    x: LinearScale,
    y: LinearScale,
}

impl RagPipeline {
    pub fn new(id: DiagramId) -> Self {
        Self {
            id,
            x: LinearScale::new((0.0, 1.0), (0.0, VECTOR_SIZE)),
            y: LinearScale::new((0.0, 1.0), (VECTOR_SIZE, 0.0)),
        }
    }

    /// Where a chunk lands in vector space, in scene coordinates.
    pub fn vector_point(&self, chunk: &PipelineChunk) -> Point {
        Point::new(
            ORIGIN.x + VECTOR_X + self.x.apply(chunk.vec_x),
            ORIGIN.y + self.y.apply(chunk.vec_y),
        )
    }

    fn doc_origin(chunk: &PipelineChunk) -> Transform2D {
        Transform2D::translate(ORIGIN.x + PIPELINE_DOC_X, ORIGIN.y + chunk.doc_y)
    }

    fn draw_chunk(&self, scene: &mut Scene, chunk: &PipelineChunk) {
        let color = pipeline_color(chunk.category);
        let at = Self::doc_origin(chunk);
        scene.add(
            Element::rect(
                box_id(chunk),
                Rect::new(0.0, 0.0, PIPELINE_DOC_WIDTH, chunk.doc_height),
                8.0,
            )
            .class("chunk")
            .fill("#fff")
            .stroke(color, 2.0)
            .transform(at)
            .opacity(0.0),
        );
        let lines = wrap_text(chunk.text, PIPELINE_DOC_WIDTH, GLYPH_WIDTH);
        scene.add(
            Element::text(text_id(chunk), Point::new(10.0, 20.0), lines.join("\n"))
                .class("chunk-text")
                .transform(at)
                .opacity(0.0),
        );
    }

    fn draw_vector(&self, scene: &mut Scene, chunk: &PipelineChunk) {
        let p = self.vector_point(chunk);
        let mut text: String = chunk.text.chars().take(100).collect();
        text.push_str("...");
        scene.add(
            Element::circle(vec_id(chunk), Point::ZERO, CIRCLE_R)
                .class("vector")
                .fill(pipeline_color(chunk.category))
                .stroke("#333", 2.0)
                .transform(Transform2D {
                    translate: p.to_vec2(),
                    scale: 0.0,
                })
                .opacity(0.0)
                .tooltip(Tooltip::new(chunk.category.to_uppercase()).row("Text", text)),
        );
        scene.add(
            Element::text(vec_label_id(chunk), Point::new(p.x + 15.0, p.y + 4.0), chunk.id)
                .class("vector-label")
                .opacity(0.0),
        );
    }

    fn fly(&self, chunk: &PipelineChunk) -> Vec<RevealAction> {
        let to = self.vector_point(chunk);
        let mut out = Vec::new();
        for target in [box_id(chunk), text_id(chunk)] {
            out.push(
                RevealAction::move_to(target.clone(), to.x, to.y)
                    .duration(FLY_MS)
                    .ease(Ease::OutCubic),
            );
            out.push(
                RevealAction::scale(target.clone(), 0.3)
                    .duration(FLY_MS)
                    .ease(Ease::OutCubic),
            );
            out.push(
                RevealAction::fade_to(target, 0.2)
                    .duration(FLY_MS)
                    .ease(Ease::OutCubic),
            );
        }
        out
    }

    fn pop(target: String) -> [RevealAction; 2] {
        [
            RevealAction::fade_in(target.clone())
                .delay(FLY_MS)
                .duration(300)
                .ease(Ease::OutBack),
            RevealAction::scale(target, 1.0)
                .delay(FLY_MS)
                .duration(800)
                .ease(Ease::OutBack),
        ]
    }
}

impl Diagram for RagPipeline {
    fn id(&self) -> &DiagramId {
        &self.id
    }

    fn kind(&self) -> DiagramKind {
        DiagramKind::RagPipeline
    }

    fn size(&self) -> (f64, f64) {
        (WIDTH, HEIGHT)
    }

    fn render(&mut self, scene: &mut Scene) {
        scene.clear();
        scene.add(
            Element::text("title", Point::new(ORIGIN.x, ORIGIN.y + 30.0), PIPELINE_TITLE)
                .class("title")
                .opacity(0.0),
        );
        for chunk in PIPELINE_CHUNKS {
            self.draw_chunk(scene, chunk);
        }
        self.draw_chunk(scene, &PIPELINE_QUERY);

        let left = ORIGIN.x + VECTOR_X;
        scene.add(
            Element::rect(
                "vector-space",
                Rect::new(left, ORIGIN.y, left + VECTOR_SIZE, ORIGIN.y + VECTOR_SIZE),
                0.0,
            )
            .class("vector-space")
            .fill("#f8f9fa")
            .stroke("#ddd", 1.0),
        );
        scene.add(
            Element::text(
                "vector-title",
                Point::new(left + VECTOR_SIZE / 2.0, ORIGIN.y - 5.0),
                "Vector Space",
            )
            .class("title"),
        );
        for chunk in PIPELINE_CHUNKS {
            self.draw_vector(scene, chunk);
        }

        let q = self.vector_point(&PIPELINE_QUERY);
        let star = STAR.iter().map(|&(x, y)| Point::new(x, y)).collect();
        scene.add(
            Element::polygon("query-star", star)
                .class("query")
                .fill(pipeline_color(PIPELINE_QUERY.category))
                .stroke("#333", 2.0)
                .transform(Transform2D {
                    translate: q.to_vec2(),
                    scale: 0.0,
                })
                .opacity(0.0)
                .tooltip(Tooltip::new("QUERY").row("Text", PIPELINE_QUERY.text)),
        );

        if let Some(hit) = PIPELINE_CHUNKS.get(PIPELINE_RETRIEVED) {
            scene.add(
                Element::line("retrieval-line", q, self.vector_point(hit))
                    .class("retrieval")
                    .stroke("#ff5722", 3.0)
                    .opacity(0.0),
            );
        }
    }

    fn reveal_plan(&self, step: StepIndex) -> Option<RevealPlan> {
        let plan = match step.0 {
            0 => {
                let mut plan = RevealPlan::new()
                    .with(RevealAction::fade_in("title"))
                    .hold(FIRST_HOLD);
                for chunk in PIPELINE_CHUNKS {
                    plan.push(RevealAction::fade_in(box_id(chunk)));
                    plan.push(RevealAction::fade_in(text_id(chunk)));
                }
                return Some(plan.offset(START_DELAY));
            }
            1 => RevealPlan::new()
                .with(RevealAction::fade_in(box_id(&PIPELINE_QUERY)))
                .with(RevealAction::fade_in(text_id(&PIPELINE_QUERY))),
            2 => {
                let mut plan = RevealPlan::new();
                for chunk in PIPELINE_CHUNKS {
                    plan.extend(self.fly(chunk));
                    plan.extend(Self::pop(vec_id(chunk)));
                    plan.push(
                        RevealAction::fade_in(vec_label_id(chunk))
                            .delay(FLY_MS)
                            .duration(500),
                    );
                }
                plan
            }
            3 => {
                let mut plan = RevealPlan::new();
                plan.extend(self.fly(&PIPELINE_QUERY));
                plan.extend(Self::pop("query-star".to_string()));
                plan
            }
            4 => RevealPlan::new().with(RevealAction::fade_in("retrieval-line").duration(1000)),
            5 => {
                let hit = PIPELINE_CHUNKS.get(PIPELINE_RETRIEVED)?;
                return Some(
                    RevealPlan::new()
                        .with(RevealAction::highlight(vec_id(hit), 12.0, 4.0).duration(500)),
                );
            }
            _ => return None,
        };
        Some(plan.hold(HOLD))
    }

    fn controls(&self) -> &'static [Control] {
        &[Control::PauseResume, Control::Restart]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/diagram/doc_vector.rs"]
mod tests;
