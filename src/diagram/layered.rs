use std::f64::consts::TAU;

use crate::diagram::data::{CROSS_EDGES, LAYERS, Layer, LayerContent, OverviewNode, Subgraph, acronym};
use crate::diagram::{Control, Diagram, DiagramKind, LayerAction};
use crate::foundation::core::{Point, Rect};
use crate::foundation::error::{StoryError, StoryResult};
use crate::foundation::ids::DiagramId;
use crate::scene::model::{Element, Scene, Tooltip};

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 600.0;
const PLANE_OPACITY: f64 = 0.13;
const EDGE_OPACITY: f64 = 0.5;
const DIMMED: f64 = 0.18;

/// Geometry of one rendering mode.
struct Geometry {
    ring_x0: f64,
    ring_radius: f64,
    row_x0: f64,
    node_r: f64,
    labels: bool,
}

const OVERVIEW: Geometry = Geometry {
    ring_x0: 180.0,
    ring_radius: 28.0,
    row_x0: 120.0,
    node_r: 10.0,
    labels: false,
};

const ZOOMED: Geometry = Geometry {
    ring_x0: 220.0,
    ring_radius: 48.0,
    row_x0: 180.0,
    node_r: 16.0,
    labels: true,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Overview,
    Zoomed(usize),
}

/// Node positions of a layer's content around `y`.
fn place(content: &LayerContent, y: f64, g: &Geometry) -> Vec<(&'static OverviewNode, Point)> {
    let mut out = Vec::new();
    match *content {
        LayerContent::Rings(groups) => {
            for (gi, group) in groups.iter().enumerate() {
                let center = Point::new(g.ring_x0 + 220.0 * gi as f64, y);
                out.extend(ring(group, center, g.ring_radius));
            }
        }
        LayerContent::Row(nodes) => {
            for (i, node) in nodes.iter().enumerate() {
                out.push((node, Point::new(g.row_x0 + 90.0 * i as f64, y)));
            }
        }
    }
    out
}

/// First node at the center, the rest evenly on the ring.
fn ring(group: &'static Subgraph, center: Point, radius: f64) -> Vec<(&'static OverviewNode, Point)> {
    let Some((hub, rest)) = group.nodes.split_first() else {
        return Vec::new();
    };
    let n = rest.len().max(1) as f64;
    let mut out = vec![(hub, center)];
    for (j, node) in rest.iter().enumerate() {
        let angle = j as f64 / n * TAU;
        out.push((
            node,
            Point::new(center.x + radius * angle.cos(), center.y + radius * angle.sin()),
        ));
    }
    out
}

fn links(content: &LayerContent) -> Vec<(&'static str, &'static str, &'static str)> {
    match *content {
        LayerContent::Rings(groups) => groups.iter().flat_map(|g| g.links.iter().copied()).collect(),
        LayerContent::Row(_) => Vec::new(),
    }
}

fn node_tooltip(node: &OverviewNode) -> Tooltip {
    let tip = Tooltip::new(node.label).row("Type", node.kind);
    if node.context.is_empty() {
        tip
    } else {
        tip.row("Context", node.context)
    }
}

/// Three stacked knowledge sources (records, literature, vocabularies) and the edges
/// linking them. Layers can be focused or zoomed one at a time.
#[derive(Debug)]
pub struct LayeredOverview {
    id: DiagramId,
    mode: Mode,
    focus: Option<usize>,
    /// Element id, owning layer, base opacity.
    members: Vec<(String, usize, f64)>,
}

impl LayeredOverview {
    pub fn new(id: DiagramId) -> Self {
        Self {
            id,
            mode: Mode::Overview,
            focus: None,
            members: Vec::new(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn focused(&self) -> Option<&'static str> {
        self.focus.map(|i| LAYERS[i].id)
    }

    fn layer_index(layer: &str) -> StoryResult<usize> {
        LAYERS
            .iter()
            .position(|l| l.id == layer)
            .ok_or_else(|| StoryError::validation(format!("unknown layer '{layer}'")))
    }

    fn add_member(&mut self, scene: &mut Scene, layer: usize, el: Element) {
        self.members
            .push((el.id.to_string(), layer, el.state.opacity));
        scene.add(el);
    }

    fn draw_content(&mut self, scene: &mut Scene, li: usize, layer: &Layer, y: f64, g: &Geometry) {
        let placed = place(&layer.content, y, g);
        let at = |id: &str| placed.iter().find(|(n, _)| n.id == id).map(|(_, p)| *p);
        for (s, t, label) in links(&layer.content) {
            let (Some(a), Some(b)) = (at(s), at(t)) else {
                continue;
            };
            self.add_member(
                scene,
                li,
                Element::line(format!("edge-{s}-{t}"), a, b)
                    .class("intra-edge")
                    .label(label)
                    .stroke("#888", 1.0)
                    .opacity(EDGE_OPACITY),
            );
        }
        for (node, p) in &placed {
            self.add_member(
                scene,
                li,
                Element::circle(format!("node-{}", node.id), *p, g.node_r)
                    .class("layer-node")
                    .fill(layer.color)
                    .stroke("#fff", 1.5)
                    .tooltip(node_tooltip(node)),
            );
            if g.labels {
                self.add_member(
                    scene,
                    li,
                    Element::text(
                        format!("node-label-{}", node.id),
                        Point::new(p.x, p.y + 4.0),
                        acronym(node.label),
                    )
                    .class("node-label"),
                );
            }
        }
    }

    fn draw_overview(&mut self, scene: &mut Scene) {
        scene.clear();
        self.members.clear();
        for (li, layer) in LAYERS.iter().enumerate() {
            scene.add(
                Element::rect(
                    format!("plane-{}", layer.id),
                    Rect::new(60.0, layer.y - 60.0, 740.0, layer.y + 60.0),
                    28.0,
                )
                .class("plane")
                .fill(layer.color)
                .opacity(PLANE_OPACITY)
                .tooltip(Tooltip::new(layer.label)),
            );
            self.add_member(
                scene,
                li,
                Element::text(
                    format!("plane-label-{}", layer.id),
                    Point::new(WIDTH / 2.0, layer.y - 80.0),
                    layer.label,
                )
                .class("plane-label")
                .fill(layer.color),
            );
            self.draw_content(scene, li, layer, layer.y, &OVERVIEW);
        }

        let mut nodes = Vec::new();
        for layer in LAYERS {
            nodes.extend(place(&layer.content, layer.y, &OVERVIEW));
        }
        let at = |id: &str| nodes.iter().find(|(n, _)| n.id == id).map(|(_, p)| *p);
        for (a, b) in CROSS_EDGES {
            let (Some(pa), Some(pb)) = (at(a), at(b)) else {
                continue;
            };
            scene.add(
                Element::line(format!("cross-{a}-{b}"), pa, pb)
                    .class("cross-edge")
                    .stroke("#1976d2", 1.5),
            );
        }
        self.mode = Mode::Overview;
        self.focus = None;
    }

    fn draw_zoomed(&mut self, scene: &mut Scene, li: usize) {
        scene.clear();
        self.members.clear();
        let layer = &LAYERS[li];
        let y = 300.0;
        scene.add(
            Element::rect(
                format!("plane-{}", layer.id),
                Rect::new(60.0, 180.0, 740.0, 420.0),
                38.0,
            )
            .class("plane")
            .fill(layer.color)
            .opacity(PLANE_OPACITY),
        );
        scene.add(
            Element::text(
                format!("plane-label-{}", layer.id),
                Point::new(WIDTH / 2.0, 170.0),
                layer.label,
            )
            .class("plane-label")
            .fill(layer.color),
        );
        self.draw_content(scene, li, layer, y, &ZOOMED);
        scene.add(Element::text("back", Point::new(70.0, 40.0), "Back").class("button"));
        self.mode = Mode::Zoomed(li);
        self.focus = None;
    }

    /// Emphasize one layer and dim the rest. `None` restores the resting look.
    pub fn focus_layer(&mut self, scene: &mut Scene, layer: Option<&str>) -> StoryResult<()> {
        if self.mode != Mode::Overview {
            return Err(StoryError::validation("layer focus needs the overview"));
        }
        let focus = layer.map(Self::layer_index).transpose()?;
        for (li, l) in LAYERS.iter().enumerate() {
            let plane = match focus {
                None => PLANE_OPACITY,
                Some(f) if f == li => 0.18,
                Some(_) => 0.05,
            };
            if let Some(el) = scene.get_mut(&format!("plane-{}", l.id)) {
                el.state.opacity = plane;
            }
        }
        for (id, li, base) in &self.members {
            let opacity = match focus {
                None => *base,
                Some(f) if f == *li => 1.0,
                Some(_) => DIMMED,
            };
            if let Some(el) = scene.get_mut(id) {
                el.state.opacity = opacity;
            }
        }
        self.focus = focus;
        Ok(())
    }

    pub fn zoom_to_layer(&mut self, scene: &mut Scene, layer: &str) -> StoryResult<()> {
        let li = Self::layer_index(layer)?;
        self.draw_zoomed(scene, li);
        Ok(())
    }

    pub fn back(&mut self, scene: &mut Scene) {
        self.draw_overview(scene);
    }
}

impl Diagram for LayeredOverview {
    fn id(&self) -> &DiagramId {
        &self.id
    }

    fn kind(&self) -> DiagramKind {
        DiagramKind::LayeredOverview
    }

    fn size(&self) -> (f64, f64) {
        (WIDTH, HEIGHT)
    }

    fn render(&mut self, scene: &mut Scene) {
        self.draw_overview(scene);
    }

    fn teardown(&mut self, scene: &mut Scene) {
        scene.clear();
        self.members.clear();
        self.mode = Mode::Overview;
        self.focus = None;
    }

    fn hover(&mut self, scene: &mut Scene, element: &str) {
        let Some(layer) = element.strip_prefix("plane-") else {
            return;
        };
        if self.mode == Mode::Overview && self.focus_layer(scene, Some(layer)).is_err() {
            tracing::debug!(element, "hover on unknown plane");
        }
    }

    fn unhover(&mut self, scene: &mut Scene, element: &str) {
        if element.starts_with("plane-") && self.mode == Mode::Overview {
            // Clearing focus cannot fail in overview mode.
            let _ = self.focus_layer(scene, None);
        }
    }

    fn controls(&self) -> &'static [Control] {
        &[Control::Back]
    }

    fn interact(&mut self, scene: &mut Scene, action: &LayerAction) -> StoryResult<()> {
        match action {
            LayerAction::Focus { layer } => self.focus_layer(scene, layer.as_deref()),
            LayerAction::Zoom { layer } => self.zoom_to_layer(scene, layer),
            LayerAction::Back => {
                self.back(scene);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/diagram/layered.rs"]
mod tests;
