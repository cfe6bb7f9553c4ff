/// Label the recognition service uses for trash. Matched exactly.
pub const TRASH_LABEL: &str = "Trash";

/// Axis-aligned rectangle in frame-pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl BoundingBox {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Smallest box containing every `(x, y)` point, or `None` for no points.
    pub fn enclosing<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = (i32, i32)>,
    {
        let mut points = points.into_iter();
        let (x0, y0) = points.next()?;
        let (min_x, min_y, max_x, max_y) = points.fold((x0, y0, x0, y0), |acc, (x, y)| {
            (acc.0.min(x), acc.1.min(y), acc.2.max(x), acc.3.max(y))
        });
        Some(Self::new(min_x, min_y, max_x - min_x, max_y - min_y))
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

/// One labelled object reported by the recognition service for a single frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedObject {
    pub name: String,
    pub score: f32,
    pub bounding_box: BoundingBox,
}

impl DetectedObject {
    pub fn new(name: impl Into<String>, bounding_box: BoundingBox) -> Self {
        Self {
            name: name.into(),
            score: 0.0,
            bounding_box,
        }
    }

    pub fn with_score(mut self, score: f32) -> Self {
        self.score = score;
        self
    }

    pub fn is_trash(&self) -> bool {
        self.name == TRASH_LABEL
    }
}

/// Boxes of every object labelled exactly [`TRASH_LABEL`], in input order.
pub fn trash_boxes(objects: &[DetectedObject]) -> Vec<BoundingBox> {
    objects
        .iter()
        .filter(|o| o.is_trash())
        .map(|o| o.bounding_box)
        .collect()
}
