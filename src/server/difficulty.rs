use crate::game::Dimensions;

const EASY: Dimensions = Dimensions::fixed(6, 7);
const NORMAL: Dimensions = Dimensions::fixed(6, 9);
const HARD: Dimensions = Dimensions::fixed(7, 8);

/// Board size presets offered on the start page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    /// Parse a form value. Anything unrecognized falls back to easy.
    pub fn from_form(value: &str) -> Self {
        match value.trim() {
            "easy" => Difficulty::Easy,
            "normal" => Difficulty::Normal,
            "hard" => Difficulty::Hard,
            _ => Difficulty::default(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }

    pub fn dimensions(self) -> Dimensions {
        match self {
            Difficulty::Easy => EASY,
            Difficulty::Normal => NORMAL,
            Difficulty::Hard => HARD,
        }
    }
}
