//! Screen edges a window can be anchored to.

use std::fmt;

/// One screen edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    /// All edges, in the order they are applied to a surface
    pub const ALL: &'static [Edge] = &[Edge::Left, Edge::Right, Edge::Top, Edge::Bottom];

    pub fn as_str(&self) -> &'static str {
        match self {
            Edge::Left => "left",
            Edge::Right => "right",
            Edge::Top => "top",
            Edge::Bottom => "bottom",
        }
    }
}

/// Set of anchored edges. Empty means centred on the output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Anchors {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl Anchors {
    pub fn contains(&self, edge: Edge) -> bool {
        match edge {
            Edge::Left => self.left,
            Edge::Right => self.right,
            Edge::Top => self.top,
            Edge::Bottom => self.bottom,
        }
    }

    pub fn insert(&mut self, edge: Edge) {
        match edge {
            Edge::Left => self.left = true,
            Edge::Right => self.right = true,
            Edge::Top => self.top = true,
            Edge::Bottom => self.bottom = true,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.left || self.right || self.top || self.bottom)
    }

    pub fn iter(&self) -> impl Iterator<Item = Edge> + '_ {
        Edge::ALL.iter().copied().filter(|&e| self.contains(e))
    }
}

impl FromIterator<Edge> for Anchors {
    fn from_iter<I: IntoIterator<Item = Edge>>(iter: I) -> Self {
        let mut anchors = Anchors::default();
        for edge in iter {
            anchors.insert(edge);
        }
        anchors
    }
}

impl fmt::Display for Anchors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("center");
        }
        let names: Vec<&str> = self.iter().map(|e| e.as_str()).collect();
        f.write_str(&names.join("+"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_and_display() {
        let anchors: Anchors = [Edge::Top, Edge::Left, Edge::Top].into_iter().collect();
        assert!(anchors.contains(Edge::Top));
        assert!(anchors.contains(Edge::Left));
        assert!(!anchors.contains(Edge::Bottom));
        assert_eq!(anchors.to_string(), "left+top");
        assert_eq!(Anchors::default().to_string(), "center");
    }
}
