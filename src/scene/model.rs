use std::collections::HashMap;

use crate::foundation::core::{Point, Rect, Transform2D};
use crate::foundation::ids::{DiagramId, ElementId};

/// Animatable properties of one element.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VisualState {
    pub opacity: f64, // 0..1
    pub transform: Transform2D,
    pub radius: f64,
    pub stroke_width: f64,
}

impl Default for VisualState {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            transform: Transform2D::default(),
            radius: 0.0,
            stroke_width: 0.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Shape {
    Circle { center: Point },
    Ellipse { center: Point, rx: f64, ry: f64 },
    Line { from: Point, to: Point },
    Rect { rect: Rect, corner: f64 },
    Text { at: Point, text: String },
    Polygon { points: Vec<Point> },
}

/// Transient hover overlay content.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tooltip {
    pub title: String,
    pub rows: Vec<(String, String)>,
}

impl Tooltip {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            rows: Vec::new(),
        }
    }

    pub fn row(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.rows.push((key.into(), value.into()));
        self
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Element {
    pub id: ElementId,
    pub shape: Shape,
    pub class: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    pub state: VisualState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<Tooltip>,
}

impl Element {
    fn new(id: impl Into<ElementId>, shape: Shape) -> Self {
        Self {
            id: id.into(),
            shape,
            class: String::new(),
            label: None,
            fill: None,
            stroke: None,
            state: VisualState::default(),
            tooltip: None,
        }
    }

    pub fn circle(id: impl Into<ElementId>, center: Point, radius: f64) -> Self {
        let mut el = Self::new(id, Shape::Circle { center });
        el.state.radius = radius;
        el
    }

    pub fn ellipse(id: impl Into<ElementId>, center: Point, rx: f64, ry: f64) -> Self {
        Self::new(id, Shape::Ellipse { center, rx, ry })
    }

    pub fn line(id: impl Into<ElementId>, from: Point, to: Point) -> Self {
        Self::new(id, Shape::Line { from, to })
    }

    pub fn rect(id: impl Into<ElementId>, rect: Rect, corner: f64) -> Self {
        Self::new(id, Shape::Rect { rect, corner })
    }

    pub fn text(id: impl Into<ElementId>, at: Point, text: impl Into<String>) -> Self {
        Self::new(
            id,
            Shape::Text {
                at,
                text: text.into(),
            },
        )
    }

    pub fn polygon(id: impl Into<ElementId>, points: Vec<Point>) -> Self {
        Self::new(id, Shape::Polygon { points })
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn fill(mut self, color: impl Into<String>) -> Self {
        self.fill = Some(color.into());
        self
    }

    pub fn stroke(mut self, color: impl Into<String>, width: f64) -> Self {
        self.stroke = Some(color.into());
        self.state.stroke_width = width;
        self
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.state.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn transform(mut self, transform: Transform2D) -> Self {
        self.state.transform = transform;
        self
    }

    pub fn tooltip(mut self, tooltip: Tooltip) -> Self {
        self.tooltip = Some(tooltip);
        self
    }
}

/// Retained visual tree for one diagram container, in paint order.
#[derive(Clone, Debug, serde::Serialize)]
pub struct Scene {
    pub diagram: DiagramId,
    pub width: f64,
    pub height: f64,
    elements: Vec<Element>,
    #[serde(skip)]
    index: HashMap<ElementId, usize>,
}

impl Scene {
    pub fn new(diagram: impl Into<DiagramId>, width: f64, height: f64) -> Self {
        Self {
            diagram: diagram.into(),
            width,
            height,
            elements: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn clear(&mut self) {
        self.elements.clear();
        self.index.clear();
    }

    /// Insert an element, replacing any previous element with the same id in place.
    pub fn add(&mut self, element: Element) {
        if let Some(&i) = self.index.get(&element.id) {
            self.elements[i] = element;
            return;
        }
        self.index.insert(element.id.clone(), self.elements.len());
        self.elements.push(element);
    }

    pub fn get(&self, id: &str) -> Option<&Element> {
        self.index.get(id).map(|&i| &self.elements[i])
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.index.get(id).map(|&i| &mut self.elements[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn state(&self, id: &str) -> Option<VisualState> {
        self.get(id).map(|el| el.state)
    }

    /// Returns `false` when the element no longer exists.
    pub fn set_state(&mut self, id: &str, state: VisualState) -> bool {
        match self.get_mut(id) {
            Some(el) => {
                el.state = state;
                true
            }
            None => false,
        }
    }

    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    pub fn elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.elements.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
