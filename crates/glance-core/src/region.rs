use crate::geom::Rect;

/// A set of pixels stored as pairwise-disjoint rectangles.
///
/// Used for the pending-paint dedup sets (widget space) and for the valid
/// image area (image space). Adjacent rects that share a full edge are
/// coalesced, so a region grown band by band stays compact.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Region {
    rects: Vec<Rect>,
}

impl Region {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rect(rect: Rect) -> Self {
        let mut region = Self::new();
        region.add_rect(rect);
        region
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    pub fn clear(&mut self) {
        self.rects.clear();
    }

    /// Disjoint rects ordered top-to-bottom, then left-to-right.
    pub fn rects(&self) -> Vec<Rect> {
        let mut rects = self.rects.clone();
        rects.sort_by_key(|r| (r.y, r.x));
        rects
    }

    pub fn area(&self) -> u64 {
        self.rects.iter().map(Rect::area).sum()
    }

    pub fn bounding_rect(&self) -> Rect {
        self.rects
            .iter()
            .fold(Rect::default(), |acc, r| acc.united(r))
    }

    /// Union with `rect`.
    pub fn add_rect(&mut self, rect: Rect) {
        if rect.is_empty() {
            return;
        }
        let mut pieces = vec![rect];
        for existing in &self.rects {
            pieces = pieces
                .into_iter()
                .flat_map(|piece| subtract(piece, existing))
                .collect();
            if pieces.is_empty() {
                return;
            }
        }
        self.rects.extend(pieces);
        self.coalesce();
    }

    pub fn add_region(&mut self, other: &Region) {
        for rect in &other.rects {
            self.add_rect(*rect);
        }
    }

    /// Remove every pixel of `rect` from the region.
    pub fn subtract_rect(&mut self, rect: Rect) {
        if rect.is_empty() || self.rects.is_empty() {
            return;
        }
        self.rects = self
            .rects
            .iter()
            .flat_map(|existing| subtract(*existing, &rect))
            .collect();
        self.coalesce();
    }

    pub fn subtract_region(&mut self, other: &Region) {
        for rect in &other.rects {
            self.subtract_rect(*rect);
        }
    }

    /// The part of the region inside `rect`.
    pub fn intersect_rect(&self, rect: Rect) -> Region {
        let rects = self
            .rects
            .iter()
            .map(|r| r.intersect(&rect))
            .filter(|r| !r.is_empty())
            .collect();
        Region { rects }
    }

    /// True when every pixel of `rect` belongs to the region.
    pub fn contains_rect(&self, rect: Rect) -> bool {
        if rect.is_empty() {
            return false;
        }
        let mut rest = Region::from_rect(rect);
        rest.subtract_region(self);
        rest.is_empty()
    }

    pub fn intersects(&self, rect: Rect) -> bool {
        self.rects.iter().any(|r| r.intersects(&rect))
    }

    fn coalesce(&mut self) {
        loop {
            let mut merged = false;
            'outer: for i in 0..self.rects.len() {
                for j in (i + 1)..self.rects.len() {
                    if let Some(joined) = join(&self.rects[i], &self.rects[j]) {
                        self.rects[i] = joined;
                        self.rects.swap_remove(j);
                        merged = true;
                        break 'outer;
                    }
                }
            }
            if !merged {
                break;
            }
        }
    }
}

impl From<Rect> for Region {
    fn from(rect: Rect) -> Self {
        Region::from_rect(rect)
    }
}

/// `a - b` as up to four disjoint rects.
fn subtract(a: Rect, b: &Rect) -> Vec<Rect> {
    let overlap = a.intersect(b);
    if overlap.is_empty() {
        return vec![a];
    }
    let mut out = Vec::with_capacity(4);
    if overlap.y > a.y {
        out.push(Rect::new(a.x, a.y, a.width, overlap.y - a.y));
    }
    if overlap.bottom() < a.bottom() {
        out.push(Rect::new(
            a.x,
            overlap.bottom() + 1,
            a.width,
            a.bottom() - overlap.bottom(),
        ));
    }
    if overlap.x > a.x {
        out.push(Rect::new(a.x, overlap.y, overlap.x - a.x, overlap.height));
    }
    if overlap.right() < a.right() {
        out.push(Rect::new(
            overlap.right() + 1,
            overlap.y,
            a.right() - overlap.right(),
            overlap.height,
        ));
    }
    out
}

/// Merge two rects that share a complete edge.
fn join(a: &Rect, b: &Rect) -> Option<Rect> {
    if a.x == b.x && a.width == b.width && (a.bottom() + 1 == b.y || b.bottom() + 1 == a.y) {
        return Some(a.united(b));
    }
    if a.y == b.y && a.height == b.height && (a.right() + 1 == b.x || b.right() + 1 == a.x) {
        return Some(a.united(b));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtract_center_leaves_four_pieces() {
        let pieces = subtract(Rect::new(0, 0, 10, 10), &Rect::new(3, 3, 4, 4));
        assert_eq!(pieces.len(), 4);
        let area: u64 = pieces.iter().map(Rect::area).sum();
        assert_eq!(area, 100 - 16);
    }

    #[test]
    fn test_join_vertical_bands() {
        let joined = join(&Rect::new(0, 0, 10, 5), &Rect::new(0, 5, 10, 5));
        assert_eq!(joined, Some(Rect::new(0, 0, 10, 10)));
    }

    #[test]
    fn test_join_rejects_misaligned() {
        assert_eq!(join(&Rect::new(0, 0, 10, 5), &Rect::new(1, 5, 10, 5)), None);
    }
}
