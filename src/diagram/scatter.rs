use crate::diagram::data::{SCATTER_CLUSTERS, SCATTER_TERMS, ScatterTerm, scatter_color};
use crate::diagram::{Diagram, DiagramKind, LinearScale};
use crate::foundation::core::Point;
use crate::foundation::ids::DiagramId;
use crate::scene::model::{Element, Scene, Tooltip};

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 500.0;
const MARGIN: f64 = 40.0;
const POINT_OPACITY: f64 = 0.8;

pub fn term_element(term: &str) -> String {
    format!("term-{}", slug(term))
}

fn slug(s: &str) -> String {
    s.to_lowercase().replace(' ', "-")
}

/// Medical terms placed by their (pre-computed) 2-D embedding.
#[derive(Debug)]
pub struct VectorScatter {
    id: DiagramId,
    x: LinearScale,
    y: LinearScale,
    r: LinearScale,
}

impl VectorScatter {
    pub fn new(id: DiagramId) -> Self {
        let inner_w = WIDTH - 2.0 * MARGIN;
        let inner_h = HEIGHT - 2.0 * MARGIN;
        let (lo, hi) = SCATTER_TERMS
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), t| {
                (lo.min(t.similarity), hi.max(t.similarity))
            });
        Self {
            id,
            x: LinearScale::new((0.0, 1.0), (MARGIN, MARGIN + inner_w)),
            y: LinearScale::new((0.0, 1.0), (MARGIN + inner_h, MARGIN)),
            r: LinearScale::new((lo, hi), (4.0, 12.0)),
        }
    }

    pub fn position(&self, term: &ScatterTerm) -> Point {
        Point::new(self.x.apply(term.x), self.y.apply(term.y))
    }

    fn draw_clusters(&self, scene: &mut Scene) {
        let sx = self.x.range.1 - self.x.range.0;
        let sy = self.y.range.0 - self.y.range.1;
        for cluster in SCATTER_CLUSTERS {
            let members: Vec<&ScatterTerm> = SCATTER_TERMS
                .iter()
                .filter(|t| cluster.members.contains(&t.term))
                .collect();
            if members.len() <= 2 {
                continue;
            }
            let span = |f: fn(&ScatterTerm) -> f64| {
                let (lo, hi) = members
                    .iter()
                    .map(|t| f(*t))
                    .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                        (lo.min(v), hi.max(v))
                    });
                hi - lo
            };
            let rx = span(|t| t.x) * sx * 0.8;
            let ry = span(|t| t.y) * sy * 0.8;
            let center = Point::new(self.x.apply(cluster.center.0), self.y.apply(cluster.center.1));
            let key = slug(cluster.name);
            scene.add(
                Element::ellipse(format!("cluster-{key}"), center, rx, ry)
                    .class("cluster")
                    .stroke("#ccc", 1.0)
                    .opacity(0.6),
            );
            scene.add(
                Element::text(
                    format!("cluster-label-{key}"),
                    Point::new(center.x, center.y - 20.0),
                    cluster.name,
                )
                .class("cluster-label")
                .fill("#666"),
            );
        }
    }
}

impl Diagram for VectorScatter {
    fn id(&self) -> &DiagramId {
        &self.id
    }

    fn kind(&self) -> DiagramKind {
        DiagramKind::VectorScatter
    }

    fn size(&self) -> (f64, f64) {
        (WIDTH, HEIGHT)
    }

    fn render(&mut self, scene: &mut Scene) {
        scene.clear();
        scene.add(
            Element::text("title", Point::new(WIDTH / 2.0, MARGIN - 10.0), "Medical Terms in Vector Space")
                .class("title"),
        );
        let (x0, x1) = self.x.range;
        let (y_bottom, y_top) = self.y.range;
        scene.add(
            Element::line("x-axis", Point::new(x0, y_bottom), Point::new(x1, y_bottom))
                .class("axis")
                .stroke("#333", 1.0),
        );
        scene.add(
            Element::line("y-axis", Point::new(x0, y_bottom), Point::new(x0, y_top))
                .class("axis")
                .stroke("#333", 1.0),
        );

        self.draw_clusters(scene);

        for t in SCATTER_TERMS {
            let at = self.position(t);
            let tooltip = Tooltip::new(t.term)
                .row("Category", t.category)
                .row("Similarity", format!("{:.2}", t.similarity))
                .row("Position", format!("({:.2}, {:.2})", t.x, t.y));
            scene.add(
                Element::circle(term_element(t.term), at, self.r.apply(t.similarity))
                    .class("term")
                    .fill(scatter_color(t.category))
                    .stroke("#333", 1.0)
                    .opacity(POINT_OPACITY)
                    .tooltip(tooltip),
            );
            scene.add(
                Element::text(
                    format!("term-label-{}", slug(t.term)),
                    Point::new(at.x + 15.0, at.y + 4.0),
                    t.term,
                )
                .class("term-label"),
            );
        }
    }

    fn hover(&mut self, scene: &mut Scene, element: &str) {
        if let Some(el) = scene.get_mut(element).filter(|el| el.class == "term") {
            el.state.stroke_width = 3.0;
            el.state.opacity = 1.0;
        }
    }

    fn unhover(&mut self, scene: &mut Scene, element: &str) {
        if let Some(el) = scene.get_mut(element).filter(|el| el.class == "term") {
            el.state.stroke_width = 1.0;
            el.state.opacity = POINT_OPACITY;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/diagram/scatter.rs"]
mod tests;
