use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Cosmetic colour themes. Only the choice is stored; nothing here renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    Nord,
    Retro,
    Black,
    Lofi,
    Night,
    Cyberpunk,
    Aqua,
    Valentine,
}

impl Theme {
    pub const ALL: [Theme; 10] = [
        Theme::Light,
        Theme::Dark,
        Theme::Nord,
        Theme::Retro,
        Theme::Black,
        Theme::Lofi,
        Theme::Night,
        Theme::Cyberpunk,
        Theme::Aqua,
        Theme::Valentine,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::Nord => "nord",
            Theme::Retro => "retro",
            Theme::Black => "black",
            Theme::Lofi => "lofi",
            Theme::Night => "night",
            Theme::Cyberpunk => "cyberpunk",
            Theme::Aqua => "aqua",
            Theme::Valentine => "valentine",
        }
    }
}
