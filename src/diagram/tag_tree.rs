use crate::animation::reveal::{RevealAction, RevealPlan};
use crate::diagram::data::{
    ENTITY_LINKS, ENTITY_NODES, EntityNode, QA_FOUND, QA_FOUND_DETAIL, QA_QUESTION, QA_REFINEMENT,
    QA_SEARCH_PATH, TAG_NODES, TagLevel, TagNode, acronym, entity_color, wrap_text,
};
use crate::diagram::{Control, Diagram, DiagramKind};
use crate::foundation::core::{Point, StepIndex};
use crate::foundation::ids::DiagramId;
use crate::scene::model::{Element, Scene, Tooltip};

const WIDTH: f64 = 420.0;
const HEIGHT: f64 = 480.0;
const MARGIN: f64 = 20.0;
const NODE_SPACING: f64 = 120.0;
const NODE_R: f64 = 20.0;
const GLYPH_WIDTH: f64 = 6.5;

fn level_y(level: TagLevel) -> f64 {
    match level {
        TagLevel::Level2 => 60.0,
        TagLevel::Level1 => 140.0,
        TagLevel::Chunk => 220.0,
    }
}

/// Node centers for a layered tree: leaves evenly spaced around the middle, parents
/// centered over their children.
#[derive(Clone, Debug, PartialEq)]
pub struct TreeLayout {
    positions: Vec<(&'static str, Point)>,
}

impl TreeLayout {
    pub fn tidy(nodes: &'static [TagNode], width: f64, spacing: f64, origin: Point) -> Self {
        let is_child = |id: &str| nodes.iter().any(|n| n.children.contains(&id));
        let find = |id: &str| nodes.iter().find(|n| n.id == id);

        let mut leaves: Vec<&'static str> = Vec::new();
        let mut stack: Vec<&'static str> = nodes
            .iter()
            .filter(|n| !is_child(n.id))
            .map(|n| n.id)
            .rev()
            .collect();
        while let Some(id) = stack.pop() {
            match find(id) {
                Some(n) if !n.children.is_empty() => stack.extend(n.children.iter().rev()),
                Some(_) => leaves.push(id),
                None => {}
            }
        }

        let mid = (leaves.len() as f64 - 1.0) / 2.0;
        let mut x: Vec<(&'static str, f64)> = leaves
            .iter()
            .enumerate()
            .map(|(i, id)| (*id, width / 2.0 + (i as f64 - mid) * spacing))
            .collect();

        // Parents settle once every child has an x. Depth is tiny, so iterate to a fixpoint.
        loop {
            let mut placed = false;
            for n in nodes {
                if n.children.is_empty() || x.iter().any(|(id, _)| *id == n.id) {
                    continue;
                }
                let xs: Vec<f64> = n
                    .children
                    .iter()
                    .filter_map(|c| x.iter().find(|(id, _)| id == c).map(|(_, v)| *v))
                    .collect();
                if xs.len() == n.children.len() {
                    x.push((n.id, xs.iter().sum::<f64>() / xs.len() as f64));
                    placed = true;
                }
            }
            if !placed {
                break;
            }
        }

        let positions = nodes
            .iter()
            .filter_map(|n| {
                let (_, px) = x.iter().find(|(id, _)| *id == n.id)?;
                Some((n.id, Point::new(origin.x + px, origin.y + level_y(n.level))))
            })
            .collect();
        Self { positions }
    }

    pub fn get(&self, id: &str) -> Option<Point> {
        self.positions
            .iter()
            .find(|(n, _)| *n == id)
            .map(|(_, p)| *p)
    }
}

fn layout() -> TreeLayout {
    TreeLayout::tidy(
        TAG_NODES,
        WIDTH - 2.0 * MARGIN,
        NODE_SPACING,
        Point::new(MARGIN, MARGIN),
    )
}

fn tag_name(id: &str) -> &str {
    TAG_NODES
        .iter()
        .find(|n| n.id == id)
        .map(|n| n.name)
        .unwrap_or(id)
}

fn short_label(node: &TagNode) -> String {
    if node.id == "meta3" {
        "MT".to_string()
    } else {
        acronym(node.name)
    }
}

fn node_tooltip(node: &TagNode) -> Tooltip {
    let mut tip = Tooltip::new(node.name);
    for t in node.tags {
        tip = tip.row(t.kind, format!("{} ({})", t.value, t.description));
    }
    if !node.children.is_empty() {
        let names: Vec<&str> = node.children.iter().map(|c| tag_name(c)).collect();
        tip = tip.row("Children", names.join(", "));
    }
    tip
}

fn edge_id(parent: &str, child: &str) -> String {
    format!("edge-{parent}-{child}")
}

/// Draw edges, nodes and labels of the tag tree. Returns the ids it drew, in paint order.
fn draw_tree(scene: &mut Scene, layout: &TreeLayout, overlays: &[(&str, &str, &str)]) -> Vec<String> {
    let mut ids = Vec::new();
    for parent in TAG_NODES {
        for child in parent.children {
            let (Some(a), Some(b)) = (layout.get(parent.id), layout.get(child)) else {
                continue;
            };
            let id = edge_id(parent.id, child);
            scene.add(Element::line(id.clone(), a, b).class("tree-edge").stroke("#666", 2.0));
            ids.push(id);
        }
    }
    for node in TAG_NODES {
        let Some(at) = layout.get(node.id) else {
            continue;
        };
        let id = format!("tag-{}", node.id);
        scene.add(
            Element::circle(id.clone(), at, NODE_R)
                .class("tag")
                .fill(node.color)
                .stroke("#fff", 2.0)
                .tooltip(node_tooltip(node)),
        );
        ids.push(id);
        // Highlight overlays sit between the node and its label.
        for (prefix, fill, stroke) in overlays {
            scene.add(
                Element::circle(format!("{prefix}-{}", node.id), at, NODE_R)
                    .class(*prefix)
                    .fill(*fill)
                    .stroke(*stroke, 3.0)
                    .opacity(0.0),
            );
        }
        let label = format!("tag-label-{}", node.id);
        scene.add(
            Element::text(label.clone(), Point::new(at.x, at.y + 4.0), short_label(node))
                .class("tag-label")
                .fill("#fff"),
        );
        ids.push(label);
    }
    for (i, (level, text)) in [
        (TagLevel::Level2, "Level 2:"),
        (TagLevel::Level1, "Level 1:"),
        (TagLevel::Chunk, "Chunks:"),
    ]
    .into_iter()
    .enumerate()
    {
        let id = format!("level-label-{i}");
        scene.add(
            Element::text(id.clone(), Point::new(MARGIN + 10.0, MARGIN + level_y(level)), text)
                .class("level-label"),
        );
        ids.push(id);
    }
    ids
}

/// Two chunks tagged bottom-up into a small meta-tag hierarchy.
#[derive(Debug)]
pub struct TagHierarchy {
    id: DiagramId,
    layout: TreeLayout,
}

impl TagHierarchy {
    pub fn new(id: DiagramId) -> Self {
        Self {
            id,
            layout: layout(),
        }
    }

    pub fn layout(&self) -> &TreeLayout {
        &self.layout
    }
}

impl Diagram for TagHierarchy {
    fn id(&self) -> &DiagramId {
        &self.id
    }

    fn kind(&self) -> DiagramKind {
        DiagramKind::TagTree
    }

    fn size(&self) -> (f64, f64) {
        (WIDTH, HEIGHT)
    }

    fn render(&mut self, scene: &mut Scene) {
        scene.clear();
        scene.add(
            Element::text("title", Point::new(WIDTH / 2.0, 15.0), "Graph Tagging Hierarchy")
                .class("title"),
        );
        scene.add(
            Element::text(
                "instruction",
                Point::new(WIDTH / 2.0, HEIGHT - 10.0),
                "Hover over nodes to see extracted tags",
            )
            .class("instruction"),
        );
        draw_tree(scene, &self.layout, &[]);
    }
}

const SEARCH_INTERVAL: u64 = 1500;
const GRAPH_DELAY: u64 = 1000;
const REFINE_DELAY: u64 = 3000;
const REFINE_INTERVAL: u64 = 2000;

fn level_key(level: TagLevel) -> &'static str {
    match level {
        TagLevel::Chunk => "chunk",
        TagLevel::Level1 => "level1",
        TagLevel::Level2 => "level2",
    }
}

/// Phase start times of the walk, relative to the start of the search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QaTimeline {
    pub graph: u64,
    pub refine: u64,
}

impl QaTimeline {
    pub fn new() -> Self {
        let last_search = SEARCH_INTERVAL * QA_SEARCH_PATH.len().saturating_sub(1) as u64;
        let graph = last_search + SEARCH_INTERVAL + GRAPH_DELAY;
        Self {
            graph,
            refine: graph + REFINE_DELAY,
        }
    }
}

impl Default for QaTimeline {
    fn default() -> Self {
        Self::new()
    }
}

fn chunk_a_entities() -> impl Iterator<Item = (usize, &'static EntityNode)> {
    ENTITY_NODES.iter().filter(|n| n.chunk == "A").enumerate()
}

/// Question answering over the tag tree: search down, read the chunk graph, then refine
/// the answer back up the hierarchy.
#[derive(Debug)]
pub struct QaWalk {
    id: DiagramId,
    layout: TreeLayout,
    tree_ids: Vec<String>,
}

impl QaWalk {
    pub fn new(id: DiagramId) -> Self {
        let layout = layout();
        let mut scratch = Scene::new(id.clone(), WIDTH, HEIGHT);
        let tree_ids = draw_tree(&mut scratch, &layout, &[]);
        Self {
            id,
            layout,
            tree_ids,
        }
    }

    fn graph_point(i: usize) -> Point {
        let cx = WIDTH / 2.0;
        let cy = MARGIN + (HEIGHT - 2.0 * MARGIN) / 2.0;
        match i {
            0 => Point::new(cx, cy - 60.0),
            1 => Point::new(cx - 80.0, cy),
            _ => Point::new(cx + 80.0, cy),
        }
    }

    fn graph_ids() -> Vec<String> {
        let mut ids: Vec<String> = Vec::new();
        for (i, _) in chunk_a_entities() {
            ids.push(format!("graph-node-{i}"));
            ids.push(format!("graph-label-{i}"));
        }
        for (i, _) in Self::graph_links() {
            ids.push(format!("graph-link-{i}"));
        }
        ids.extend(["title-graph", "answer-heading", "answer-text"].map(String::from));
        ids
    }

    /// Links between chunk-A entities as (source, target, label).
    fn graph_links() -> impl Iterator<Item = (usize, (usize, usize, &'static str))> {
        let index = |id: &str| chunk_a_entities().find(|(_, n)| n.id == id).map(|(i, _)| i);
        ENTITY_LINKS
            .iter()
            .filter_map(move |l| Some((index(l.source)?, index(l.target)?, l.label)))
            .enumerate()
    }

    fn search_ids() -> Vec<String> {
        let mut ids = vec!["title-search".to_string(), "found".into(), "found-detail".into()];
        for (i, step) in QA_SEARCH_PATH.iter().enumerate() {
            ids.push(format!("match-{}", step.node));
            ids.push(format!("reason-{i}"));
        }
        for pair in QA_SEARCH_PATH.windows(2) {
            ids.push(format!("path-{}", edge_id(pair[0].node, pair[1].node)));
        }
        ids
    }

    fn text_block(scene: &mut Scene, id: &str, y: f64, text: &str, class: &str) {
        let lines = wrap_text(text, WIDTH - 2.0 * MARGIN, GLYPH_WIDTH);
        scene.add(
            Element::text(id, Point::new(MARGIN, y), lines.join("\n"))
                .class(class)
                .opacity(0.0),
        );
    }

    fn draw_search(&self, scene: &mut Scene) {
        scene.add(
            Element::text("title-search", Point::new(WIDTH / 2.0, 15.0), "Tag Tree Search Process")
                .class("title"),
        );
        draw_tree(
            scene,
            &self.layout,
            &[("match", "#ffc107", "#ff6f00"), ("refine", "#ff9800", "#e65100")],
        );
        for pair in QA_SEARCH_PATH.windows(2) {
            let (Some(a), Some(b)) = (self.layout.get(pair[0].node), self.layout.get(pair[1].node))
            else {
                continue;
            };
            scene.add(
                Element::line(format!("path-{}", edge_id(pair[0].node, pair[1].node)), a, b)
                    .class("search-path")
                    .stroke("#ff6f00", 3.0)
                    .opacity(0.0),
            );
        }
        scene.add(
            Element::text("question", Point::new(MARGIN, 280.0), format!("Q: {QA_QUESTION}"))
                .class("question"),
        );
        scene.add(
            Element::text(
                "extracted-tags",
                Point::new(MARGIN, 300.0),
                "Tags: DISEASE: Covid-19, TREATMENT_TYPE: Options, QUERY_TYPE: Treatment",
            )
            .class("question"),
        );
        for (i, step) in QA_SEARCH_PATH.iter().enumerate() {
            let id = format!("reason-{i}");
            Self::text_block(scene, &id, 330.0 + 20.0 * i as f64, step.reason, "reason");
        }
        Self::text_block(scene, "found", 400.0, &format!("\u{2713} {QA_FOUND}"), "found");
        Self::text_block(scene, "found-detail", 420.0, QA_FOUND_DETAIL, "found");
    }

    fn draw_graph(&self, scene: &mut Scene) {
        scene.add(
            Element::text("title-graph", Point::new(WIDTH / 2.0, 15.0), "Chunk Graph Analysis")
                .class("title")
                .opacity(0.0),
        );
        for (i, (s, t, label)) in Self::graph_links() {
            scene.add(
                Element::line(format!("graph-link-{i}"), Self::graph_point(s), Self::graph_point(t))
                    .class("graph-link")
                    .stroke("#888", 2.0)
                    .label(label)
                    .opacity(0.0),
            );
        }
        for (i, node) in chunk_a_entities() {
            let at = Self::graph_point(i);
            scene.add(
                Element::circle(format!("graph-node-{i}"), at, 25.0)
                    .class("graph-node")
                    .fill(entity_color(node.kind))
                    .stroke("#fff", 2.0)
                    .opacity(0.0),
            );
            scene.add(
                Element::text(format!("graph-label-{i}"), Point::new(at.x, at.y + 4.0), node.acronym)
                    .class("graph-label")
                    .fill("#fff")
                    .opacity(0.0),
            );
        }
        scene.add(
            Element::text("answer-heading", Point::new(MARGIN, 340.0), "Generated Answer:")
                .class("answer")
                .opacity(0.0),
        );
        if let Some(first) = QA_REFINEMENT.first() {
            Self::text_block(scene, "answer-text", 360.0, first.answer, "answer");
        }
    }

    fn draw_refinement(scene: &mut Scene) {
        scene.add(
            Element::text("title-refine", Point::new(WIDTH / 2.0, 15.0), "Answer Refinement Process")
                .class("title")
                .opacity(0.0),
        );
        scene.add(
            Element::text("refined-heading", Point::new(MARGIN, 380.0), "Refined Answer:")
                .class("answer")
                .opacity(0.0),
        );
        for r in QA_REFINEMENT {
            let id = format!("refined-{}", level_key(r.level));
            Self::text_block(scene, &id, 400.0, r.answer, "answer");
        }
    }

    fn node_at(level: TagLevel) -> Option<&'static str> {
        QA_SEARCH_PATH
            .iter()
            .find(|s| s.level == level)
            .map(|s| s.node)
    }
}

fn show(plan: &mut RevealPlan, id: impl Into<String>, at: u64) {
    plan.push(RevealAction::fade_in(id.into()).delay(at).duration(0));
}

fn hide(plan: &mut RevealPlan, id: impl Into<String>, at: u64) {
    plan.push(RevealAction::fade_to(id.into(), 0.0).delay(at).duration(0));
}

impl Diagram for QaWalk {
    fn id(&self) -> &DiagramId {
        &self.id
    }

    fn kind(&self) -> DiagramKind {
        DiagramKind::QaWalk
    }

    fn size(&self) -> (f64, f64) {
        (WIDTH, HEIGHT)
    }

    fn render(&mut self, scene: &mut Scene) {
        scene.clear();
        self.draw_search(scene);
        self.draw_graph(scene);
        Self::draw_refinement(scene);
    }

    fn reveal_plan(&self, step: StepIndex) -> Option<RevealPlan> {
        if step.0 != 0 {
            return None;
        }
        let times = QaTimeline::new();
        let mut plan = RevealPlan::new();

        for (i, s) in QA_SEARCH_PATH.iter().enumerate() {
            let at = SEARCH_INTERVAL * i as u64;
            show(&mut plan, format!("match-{}", s.node), at);
            show(&mut plan, format!("reason-{i}"), at);
            if i > 0 {
                let prev = QA_SEARCH_PATH[i - 1].node;
                show(&mut plan, format!("path-{}", edge_id(prev, s.node)), at);
            }
            if s.level == TagLevel::Chunk {
                show(&mut plan, "found", at);
                show(&mut plan, "found-detail", at);
            }
        }

        for id in self.tree_ids.iter().cloned().chain(Self::search_ids()) {
            hide(&mut plan, id, times.graph);
        }
        for id in Self::graph_ids() {
            show(&mut plan, id, times.graph);
        }

        for id in Self::graph_ids() {
            hide(&mut plan, id, times.refine);
        }
        for id in self.tree_ids.iter().cloned() {
            show(&mut plan, id, times.refine);
        }
        show(&mut plan, "title-refine", times.refine);
        show(&mut plan, "refined-heading", times.refine);

        // Only the current refinement level stays highlighted.
        let mut previous: Vec<String> = Vec::new();
        for (i, r) in QA_REFINEMENT.iter().enumerate() {
            let at = times.refine + REFINE_INTERVAL * i as u64;
            for prev in previous.drain(..) {
                hide(&mut plan, prev, at);
            }
            if let Some(node) = Self::node_at(r.level) {
                let id = format!("refine-{node}");
                show(&mut plan, id.clone(), at);
                previous.push(id);
            }
            let id = format!("refined-{}", level_key(r.level));
            show(&mut plan, id.clone(), at);
            previous.push(id);
        }
        Some(plan)
    }

    fn controls(&self) -> &'static [Control] {
        &[Control::StartSearch, Control::Reset]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/diagram/tag_tree.rs"]
mod tests;
