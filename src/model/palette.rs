//! Round-robin edge color palette.

use log::warn;

/// Graphviz color names handed out to entities in creation order.
pub const DEFAULT_COLORS: [&str; 17] = [
    "black",
    "coral4",
    "aquamarine4",
    "fuchsia",
    "darkgreen",
    "darkorchid3",
    "dimgrey",
    "darkorange3",
    "darkslateblue",
    "goldenrod4",
    "deepskyblue4",
    "darkmagenta",
    "cyan2",
    "blue2",
    "darkseagreen3",
    "firebrick4",
    "green4",
];

/// A finite list of colors with a cursor that wraps around.
///
/// Every run owns its own palette, so color assignment is a pure function
/// of entity creation order.
#[derive(Debug, Clone)]
pub struct Palette {
    colors: Vec<String>,
    cursor: usize,
}

impl Palette {
    /// Create a palette from a list of colors.
    ///
    /// An empty list falls back to [`DEFAULT_COLORS`].
    pub fn new(colors: Vec<String>) -> Self {
        if colors.is_empty() {
            warn!("empty color palette, using the default palette");
            return Self::default();
        }
        Self { colors, cursor: 0 }
    }

    /// Take the color under the cursor and advance it.
    pub fn next_color(&mut self) -> String {
        let color = self.colors[self.cursor].clone();
        self.cursor = (self.cursor + 1) % self.colors.len();
        color
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_COLORS.iter().map(|c| c.to_string()).collect(),
            cursor: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette_order() {
        let mut palette = Palette::default();
        assert_eq!(palette.next_color(), "black");
        assert_eq!(palette.next_color(), "coral4");
        assert_eq!(palette.next_color(), "aquamarine4");
    }

    #[test]
    fn test_cursor_wraps() {
        let mut palette = Palette::new(vec!["red".to_string(), "blue".to_string()]);
        assert_eq!(palette.next_color(), "red");
        assert_eq!(palette.next_color(), "blue");
        assert_eq!(palette.next_color(), "red");
    }

    #[test]
    fn test_independent_palettes() {
        let mut first = Palette::default();
        first.next_color();
        first.next_color();

        let mut second = Palette::default();
        assert_eq!(second.next_color(), "black");
    }

    #[test]
    fn test_empty_palette_falls_back() {
        let mut palette = Palette::new(Vec::new());
        let colors: Vec<String> = (0..=DEFAULT_COLORS.len()).map(|_| palette.next_color()).collect();
        assert_eq!(colors[0], "black");
        assert_eq!(colors[DEFAULT_COLORS.len() - 1], "green4");
        assert_eq!(colors[DEFAULT_COLORS.len()], "black");
    }
}
