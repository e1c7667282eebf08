use crate::animation::ease::Ease;
use crate::animation::reveal::{RevealAction, RevealPlan, stagger};
use crate::diagram::data::{
    ENTITY_LINKS, ENTITY_NODES, KG_LINKS, KG_NODES, KgLink, entity_color, kg_node_color,
    kg_relation_color,
};
use crate::diagram::{Control, Diagram, DiagramKind};
use crate::foundation::core::{Point, StepIndex, Transform2D, Vec2};
use crate::foundation::ids::DiagramId;
use crate::scene::model::{Element, Scene, Tooltip};

/// Tuning for [`simulate`]. Defaults match a d3 simulation with link, charge, center and
/// collide forces.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForceParams {
    pub link_distance: f64,
    pub charge: f64,
    pub center: Point,
    pub collide_radius: f64,
    pub iterations: usize,
    pub velocity_decay: f64,
    pub alpha_min: f64,
}

impl ForceParams {
    pub fn centered(center: Point) -> Self {
        Self {
            link_distance: 100.0,
            charge: -300.0,
            center,
            collide_radius: 30.0,
            iterations: 300,
            velocity_decay: 0.4,
            alpha_min: 0.001,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Body {
    pub pos: Point,
    pub vel: Vec2,
}

impl Body {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            pos: Point::new(x, y),
            vel: Vec2::ZERO,
        }
    }
}

/// Run a fixed number of force ticks over `bodies` in place.
///
/// No randomness: coincident bodies are separated along a fixed offset derived from their
/// indices, so the same input always yields the same layout.
pub fn simulate(bodies: &mut [Body], links: &[(usize, usize)], params: &ForceParams) {
    let n = bodies.len();
    if n == 0 {
        return;
    }
    let mut degree = vec![0usize; n];
    for &(s, t) in links {
        degree[s] += 1;
        degree[t] += 1;
    }
    let alpha_decay = 1.0 - params.alpha_min.powf(1.0 / params.iterations.max(1) as f64);
    let mut alpha = 1.0;

    for _ in 0..params.iterations {
        alpha += (0.0 - alpha) * alpha_decay;

        for &(s, t) in links {
            let strength = 1.0 / degree[s].min(degree[t]).max(1) as f64;
            let bias = degree[s] as f64 / (degree[s] + degree[t]) as f64;
            let mut d = (bodies[t].pos + bodies[t].vel) - (bodies[s].pos + bodies[s].vel);
            if d.hypot2() == 0.0 {
                d = nudge(s, t);
            }
            let len = d.hypot();
            let k = (len - params.link_distance) / len * alpha * strength;
            let d = d * k;
            bodies[t].vel -= d * bias;
            bodies[s].vel += d * (1.0 - bias);
        }

        for i in 0..n {
            let mut push = Vec2::ZERO;
            for j in 0..n {
                if i == j {
                    continue;
                }
                let mut d = bodies[j].pos - bodies[i].pos;
                if d.hypot2() == 0.0 {
                    d = nudge(i, j);
                }
                let mut l = d.hypot2();
                if l < 1.0 {
                    l = l.sqrt();
                }
                push += d * (params.charge * alpha / l);
            }
            bodies[i].vel += push;
        }

        let mean = bodies.iter().fold(Vec2::ZERO, |acc, b| acc + b.pos.to_vec2()) / n as f64;
        let shift = mean - params.center.to_vec2();
        for b in bodies.iter_mut() {
            b.pos -= shift;
        }

        let r = 2.0 * params.collide_radius;
        for i in 0..n {
            for j in (i + 1)..n {
                let mut d = (bodies[i].pos + bodies[i].vel) - (bodies[j].pos + bodies[j].vel);
                if d.hypot2() == 0.0 {
                    d = nudge(i, j);
                }
                let l = d.hypot();
                if l < r {
                    let d = d * ((r - l) / l);
                    bodies[i].vel += d * 0.5;
                    bodies[j].vel -= d * 0.5;
                }
            }
        }

        for b in bodies.iter_mut() {
            b.vel *= 1.0 - params.velocity_decay;
            b.pos += b.vel;
        }
    }
}

fn nudge(a: usize, b: usize) -> Vec2 {
    let k = (a * 31 + b * 17) % 7;
    Vec2::new(1e-6 * (k as f64 + 1.0), -1e-6 * (7.0 - k as f64))
}

const KG_WIDTH: f64 = 800.0;
const KG_HEIGHT: f64 = 500.0;
const KG_MARGIN: f64 = 40.0;
const NODE_R: f64 = 20.0;
const NODE_OPACITY: f64 = 0.8;
const LINK_OPACITY: f64 = 0.6;

fn node_el(id: &str) -> String {
    format!("node-{id}")
}

pub fn link_el(link: &KgLink) -> String {
    format!("link-{}-{}", link.source, link.target)
}

fn link_label_el(link: &KgLink) -> String {
    format!("link-label-{}-{}", link.source, link.target)
}

fn node_name(id: &str) -> &str {
    KG_NODES
        .iter()
        .find(|n| n.id == id)
        .map(|n| n.name)
        .unwrap_or(id)
}

/// Force-directed medical knowledge graph with hover emphasis.
#[derive(Debug)]
pub struct KnowledgeGraph {
    id: DiagramId,
    positions: Vec<Point>,
}

impl KnowledgeGraph {
    pub fn new(id: DiagramId) -> Self {
        let inner_w = KG_WIDTH - 2.0 * KG_MARGIN;
        let inner_h = KG_HEIGHT - 2.0 * KG_MARGIN;
        let mut bodies: Vec<Body> = KG_NODES.iter().map(|n| Body::at(n.x, n.y)).collect();
        let links: Vec<(usize, usize)> = KG_LINKS
            .iter()
            .filter_map(|l| Some((node_index(l.source)?, node_index(l.target)?)))
            .collect();
        simulate(
            &mut bodies,
            &links,
            &ForceParams::centered(Point::new(inner_w / 2.0, inner_h / 2.0)),
        );
        let offset = Vec2::new(KG_MARGIN, KG_MARGIN);
        Self {
            id,
            positions: bodies.iter().map(|b| b.pos + offset).collect(),
        }
    }

    /// Settled position of a node in scene coordinates.
    pub fn position(&self, node: &str) -> Option<Point> {
        node_index(node).map(|i| self.positions[i])
    }

    fn connections(node: &str) -> usize {
        KG_LINKS
            .iter()
            .filter(|l| l.source == node || l.target == node)
            .count()
    }

    fn draw_legend(scene: &mut Scene) {
        let mut seen: Vec<&str> = Vec::new();
        for n in KG_NODES {
            if !seen.contains(&n.kind) {
                seen.push(n.kind);
            }
        }
        for (i, kind) in seen.iter().enumerate() {
            let y = KG_MARGIN + 20.0 * i as f64;
            let x = KG_WIDTH - 120.0;
            scene.add(
                Element::circle(format!("legend-{kind}"), Point::new(x, y), 6.0)
                    .class("legend")
                    .fill(kg_node_color(kind)),
            );
            scene.add(
                Element::text(format!("legend-label-{kind}"), Point::new(x + 12.0, y + 4.0), *kind)
                    .class("legend"),
            );
        }
    }

    fn set_link_emphasis(scene: &mut Scene, link: &KgLink, factor: f64, opacity: f64) {
        if let Some(el) = scene.get_mut(&link_el(link)) {
            el.state.stroke_width = link.strength * factor;
            el.state.opacity = opacity;
        }
    }
}

fn node_index(id: &str) -> Option<usize> {
    KG_NODES.iter().position(|n| n.id == id)
}

impl Diagram for KnowledgeGraph {
    fn id(&self) -> &DiagramId {
        &self.id
    }

    fn kind(&self) -> DiagramKind {
        DiagramKind::KnowledgeGraph
    }

    fn size(&self) -> (f64, f64) {
        (KG_WIDTH, KG_HEIGHT)
    }

    fn render(&mut self, scene: &mut Scene) {
        scene.clear();
        scene.add(
            Element::text("title", Point::new(KG_WIDTH / 2.0, 25.0), "Medical Knowledge Graph")
                .class("title"),
        );

        for link in KG_LINKS {
            let (Some(a), Some(b)) = (self.position(link.source), self.position(link.target))
            else {
                continue;
            };
            let mut tip = Tooltip::new(format!("{} ({})", link.label, link.acronym))
                .row("From", node_name(link.source))
                .row("To", node_name(link.target))
                .row("Strength", format!("{}", link.strength));
            for (k, v) in link.properties {
                tip = tip.row(*k, *v);
            }
            scene.add(
                Element::line(link_el(link), a, b)
                    .class("link")
                    .stroke(kg_relation_color(link.label), link.strength * 3.0)
                    .opacity(LINK_OPACITY)
                    .tooltip(tip),
            );
            scene.add(
                Element::text(link_label_el(link), a.midpoint(b), link.acronym)
                    .class("link-label")
                    .fill(kg_relation_color(link.label)),
            );
        }

        for (node, &at) in KG_NODES.iter().zip(&self.positions) {
            let mut tip = Tooltip::new(format!("{} ({})", node.name, node.acronym))
                .row("Type", node.kind)
                .row("Connections", Self::connections(node.id).to_string());
            for (k, v) in node.properties {
                tip = tip.row(*k, *v);
            }
            scene.add(
                Element::circle(node_el(node.id), at, NODE_R)
                    .class("node")
                    .fill(kg_node_color(node.kind))
                    .stroke("#fff", 2.0)
                    .opacity(NODE_OPACITY)
                    .tooltip(tip),
            );
            scene.add(
                Element::text(format!("node-label-{}", node.id), at, node.acronym)
                    .class("node-label")
                    .fill("#fff"),
            );
        }

        Self::draw_legend(scene);
    }

    fn hover(&mut self, scene: &mut Scene, element: &str) {
        if let Some(link) = KG_LINKS.iter().find(|l| link_el(l) == element) {
            Self::set_link_emphasis(scene, link, 5.0, 1.0);
            return;
        }
        let Some(node) = KG_NODES.iter().find(|n| node_el(n.id) == element) else {
            return;
        };
        if let Some(el) = scene.get_mut(element) {
            el.state.stroke_width = 4.0;
            el.state.opacity = 1.0;
        }
        for link in KG_LINKS {
            if link.source == node.id || link.target == node.id {
                continue;
            }
            if let Some(el) = scene.get_mut(&link_el(link)) {
                el.state.opacity = 0.2;
            }
            if let Some(el) = scene.get_mut(&link_label_el(link)) {
                el.state.opacity = 0.3;
            }
        }
    }

    fn unhover(&mut self, scene: &mut Scene, element: &str) {
        if let Some(link) = KG_LINKS.iter().find(|l| link_el(l) == element) {
            Self::set_link_emphasis(scene, link, 3.0, LINK_OPACITY);
            return;
        }
        if !KG_NODES.iter().any(|n| node_el(n.id) == element) {
            return;
        }
        if let Some(el) = scene.get_mut(element) {
            el.state.stroke_width = 2.0;
            el.state.opacity = NODE_OPACITY;
        }
        for link in KG_LINKS {
            Self::set_link_emphasis(scene, link, 3.0, LINK_OPACITY);
            if let Some(el) = scene.get_mut(&link_label_el(link)) {
                el.state.opacity = 1.0;
            }
        }
    }
}

const ENTITY_WIDTH: f64 = 400.0;
const ENTITY_HEIGHT: f64 = 400.0;
const ENTITY_R: f64 = 26.0;
const ENTER_X: f64 = -80.0;
const NODE_STAGGER: u64 = 300;
const NODE_FLY: u64 = 700;
const LINK_FADE: u64 = 400;
const LINK_STAGGER: u64 = 200;

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Entities and relations pulled out of two text chunks, flown in one by one.
#[derive(Debug)]
pub struct EntityExtraction {
    id: DiagramId,
}

impl EntityExtraction {
    pub fn new(id: DiagramId) -> Self {
        Self { id }
    }

    fn at(id: &str) -> Option<Point> {
        ENTITY_NODES
            .iter()
            .find(|n| n.id == id)
            .map(|n| Point::new(n.at.0, n.at.1))
    }
}

impl Diagram for EntityExtraction {
    fn id(&self) -> &DiagramId {
        &self.id
    }

    fn kind(&self) -> DiagramKind {
        DiagramKind::EntityExtraction
    }

    fn size(&self) -> (f64, f64) {
        (ENTITY_WIDTH, ENTITY_HEIGHT)
    }

    fn render(&mut self, scene: &mut Scene) {
        scene.clear();
        for (i, link) in ENTITY_LINKS.iter().enumerate() {
            let (Some(a), Some(b)) = (Self::at(link.source), Self::at(link.target)) else {
                continue;
            };
            scene.add(
                Element::line(format!("entity-link-{i}"), a, b)
                    .class("entity-link")
                    .stroke("#888", 2.0)
                    .opacity(0.0),
            );
            let mid = a.midpoint(b);
            scene.add(
                Element::text(
                    format!("entity-link-label-{i}"),
                    Point::new(mid.x, mid.y - 10.0),
                    link.label,
                )
                .class("entity-link-label")
                .opacity(0.0),
            );
        }
        for node in ENTITY_NODES {
            let start = Transform2D::translate(ENTER_X, node.at.1);
            let tip = Tooltip::new(node.label)
                .row("Type", capitalize(node.kind))
                .row("Context", node.context);
            scene.add(
                Element::circle(format!("entity-{}", node.id), Point::ZERO, ENTITY_R)
                    .class("entity")
                    .fill(entity_color(node.kind))
                    .stroke("#fff", 2.0)
                    .transform(start)
                    .opacity(0.0)
                    .tooltip(tip),
            );
            scene.add(
                Element::text(
                    format!("entity-label-{}", node.id),
                    Point::new(0.0, 5.0),
                    node.acronym,
                )
                .class("entity-label")
                .fill("#fff")
                .transform(start)
                .opacity(0.0),
            );
        }
    }

    fn reveal_plan(&self, step: StepIndex) -> Option<RevealPlan> {
        if step.0 != 0 {
            return None;
        }
        let mut plan = RevealPlan::new();
        for prefix in ["entity", "entity-label"] {
            plan.extend(stagger(ENTITY_NODES, 0, NODE_STAGGER, |node| {
                RevealAction::move_to(format!("{prefix}-{}", node.id), node.at.0, node.at.1)
                    .duration(NODE_FLY)
                    .ease(Ease::OutCubic)
            }));
            plan.extend(stagger(ENTITY_NODES, 0, NODE_STAGGER, |node| {
                RevealAction::fade_in(format!("{prefix}-{}", node.id)).duration(NODE_FLY)
            }));
        }
        let landed = plan.span().0;
        let links = 0..ENTITY_LINKS.len();
        plan.extend(stagger(links.clone(), landed + 800, LINK_STAGGER, |i| {
            RevealAction::fade_in(format!("entity-link-{i}")).duration(LINK_FADE)
        }));
        plan.extend(stagger(links, landed + 1000, LINK_STAGGER, |i| {
            RevealAction::fade_in(format!("entity-link-label-{i}")).duration(LINK_FADE)
        }));
        Some(plan)
    }

    fn controls(&self) -> &'static [Control] {
        &[Control::Play, Control::Pause, Control::Restart]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/diagram/force_graph.rs"]
mod tests;
