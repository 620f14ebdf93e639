//! Static symbol vocabularies and the glyph classification used by the
//! renderer. Catalogs are process-wide and read-only.

/// Letter symbols, `A..Z`.
pub const LETTERS: [&str; 26] = [
    "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", "P", "Q", "R", "S",
    "T", "U", "V", "W", "X", "Y", "Z",
];

/// Digit symbols, `0..9`.
pub const NUMBERS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

/// Named geometric shapes.
pub const SHAPES: [&str; 8] = [
    "circle", "square", "triangle", "diamond", "star", "pentagon", "hexagon", "heart",
];

/// Named colors; RGB values live in [`color_rgb`].
pub const COLORS: [&str; 8] = [
    "red", "blue", "green", "yellow", "purple", "orange", "pink", "cyan",
];

/// Candidate pool for `mixed` tasks: the first three entries of the letter,
/// number, and shape catalogs.
pub const MIXED_POOL: [&str; 9] = ["A", "B", "C", "0", "1", "2", "circle", "square", "triangle"];

/// RGB triple for a named color, with a gray fallback for unmapped names.
pub fn color_rgb(name: &str) -> [u8; 3] {
    match name {
        "red" => [220, 50, 50],
        "blue" => [50, 120, 220],
        "green" => [50, 180, 50],
        "yellow" => [240, 200, 50],
        "purple" => [160, 50, 200],
        "orange" => [255, 140, 50],
        "pink" => [255, 120, 180],
        "cyan" => [50, 200, 200],
        _ => [128, 128, 128],
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolType {
    Letters,
    Numbers,
    Shapes,
    Colors,
    Mixed,
}

impl SymbolType {
    /// The catalog tasks of this type sample from.
    pub fn catalog(self) -> &'static [&'static str] {
        match self {
            Self::Letters => &LETTERS,
            Self::Numbers => &NUMBERS,
            Self::Shapes => &SHAPES,
            Self::Colors => &COLORS,
            Self::Mixed => &MIXED_POOL,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Circle,
    Square,
    Triangle,
    Diamond,
    Star,
    Pentagon,
    Hexagon,
    Heart,
}

impl ShapeKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "circle" => Some(Self::Circle),
            "square" => Some(Self::Square),
            "triangle" => Some(Self::Triangle),
            "diamond" => Some(Self::Diamond),
            "star" => Some(Self::Star),
            "pentagon" => Some(Self::Pentagon),
            "hexagon" => Some(Self::Hexagon),
            "heart" => Some(Self::Heart),
            _ => None,
        }
    }

    /// Fixed fill color for this shape.
    pub fn fill_rgb(self) -> [u8; 3] {
        match self {
            Self::Circle => [100, 200, 100],
            Self::Square => [200, 100, 100],
            Self::Triangle => [150, 100, 200],
            Self::Diamond => [200, 200, 100],
            Self::Star => [255, 200, 50],
            Self::Pentagon => [100, 150, 200],
            Self::Hexagon => [200, 150, 100],
            Self::Heart => [255, 100, 150],
        }
    }

    /// Fixed outline color for this shape.
    pub fn outline_rgb(self) -> [u8; 3] {
        match self {
            Self::Circle => [50, 150, 50],
            Self::Square => [150, 50, 50],
            Self::Triangle => [100, 50, 150],
            Self::Diamond => [150, 150, 50],
            Self::Star => [200, 150, 0],
            Self::Pentagon => [50, 100, 150],
            Self::Hexagon => [150, 100, 50],
            Self::Heart => [200, 50, 100],
        }
    }
}

/// Visual category of one symbol, resolved once from `(symbol_type, id)`.
///
/// This replaces per-draw string inspection: the `mixed` disambiguation rule
/// (single alphabetic char is a letter, digits are numbers, everything else
/// is a shape) lives here and nowhere else.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Glyph {
    /// Letter badge: filled disk with the character centered.
    Letter(char),
    /// Digit badge: filled square with the digit centered.
    Digit(char),
    /// Flat color swatch; carries the resolved RGB.
    ColorSwatch([u8; 3]),
    /// One of the eight geometric primitives.
    Shape(ShapeKind),
}

impl Glyph {
    /// Classify a symbol identifier under its task's symbol type.
    ///
    /// Returns `None` for identifiers with no visual representation (an
    /// unknown shape name); the renderer skips those slots.
    pub fn classify(symbol_type: SymbolType, symbol: &str) -> Option<Glyph> {
        let single_alpha = || {
            let mut chars = symbol.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_alphabetic() => Some(c),
                _ => None,
            }
        };
        let digit = || {
            (!symbol.is_empty() && symbol.chars().all(|c| c.is_ascii_digit()))
                .then(|| symbol.chars().next())
                .flatten()
        };

        match symbol_type {
            SymbolType::Letters => single_alpha().map(Glyph::Letter),
            SymbolType::Numbers => digit().map(Glyph::Digit),
            SymbolType::Colors => Some(Glyph::ColorSwatch(color_rgb(symbol))),
            SymbolType::Shapes => ShapeKind::from_name(symbol).map(Glyph::Shape),
            SymbolType::Mixed => {
                if let Some(c) = single_alpha() {
                    Some(Glyph::Letter(c))
                } else if let Some(c) = digit() {
                    Some(Glyph::Digit(c))
                } else {
                    ShapeKind::from_name(symbol).map(Glyph::Shape)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogs_have_no_duplicates() {
        for catalog in [
            &LETTERS[..],
            &NUMBERS[..],
            &SHAPES[..],
            &COLORS[..],
            &MIXED_POOL[..],
        ] {
            let mut seen = std::collections::HashSet::new();
            for s in catalog {
                assert!(seen.insert(*s), "duplicate catalog entry {s}");
            }
        }
    }

    #[test]
    fn mixed_pool_is_first_three_of_each() {
        assert_eq!(&MIXED_POOL[0..3], &LETTERS[0..3]);
        assert_eq!(&MIXED_POOL[3..6], &NUMBERS[0..3]);
        assert_eq!(&MIXED_POOL[6..9], &SHAPES[0..3]);
    }

    #[test]
    fn every_color_name_has_a_palette_entry() {
        for name in COLORS {
            assert_ne!(color_rgb(name), [128, 128, 128], "{name} fell back to gray");
        }
        assert_eq!(color_rgb("mauve"), [128, 128, 128]);
    }

    #[test]
    fn mixed_classification_follows_the_disambiguation_rule() {
        assert_eq!(
            Glyph::classify(SymbolType::Mixed, "A"),
            Some(Glyph::Letter('A'))
        );
        assert_eq!(
            Glyph::classify(SymbolType::Mixed, "2"),
            Some(Glyph::Digit('2'))
        );
        assert_eq!(
            Glyph::classify(SymbolType::Mixed, "circle"),
            Some(Glyph::Shape(ShapeKind::Circle))
        );
        assert_eq!(Glyph::classify(SymbolType::Mixed, "blob"), None);
    }

    #[test]
    fn every_shape_name_classifies() {
        for name in SHAPES {
            assert!(matches!(
                Glyph::classify(SymbolType::Shapes, name),
                Some(Glyph::Shape(_))
            ));
        }
    }

    #[test]
    fn color_symbols_resolve_their_palette() {
        assert_eq!(
            Glyph::classify(SymbolType::Colors, "red"),
            Some(Glyph::ColorSwatch([220, 50, 50]))
        );
    }
}
