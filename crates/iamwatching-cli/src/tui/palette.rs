use media_track_models::Theme;
use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub border: Color,
    pub selection: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                background: Color::Rgb(0xf9, 0xfa, 0xfb),
                text: Color::Rgb(0x11, 0x18, 0x27),
                muted: Color::Rgb(0x6b, 0x72, 0x80),
                accent: Color::Rgb(0x25, 0x63, 0xeb),
                border: Color::Rgb(0xd1, 0xd5, 0xdb),
                selection: Color::Rgb(0xdb, 0xea, 0xfe),
            },
            Theme::Dark => Self {
                background: Color::Rgb(0x11, 0x18, 0x27),
                text: Color::Rgb(0xf3, 0xf4, 0xf6),
                muted: Color::Rgb(0x9c, 0xa3, 0xaf),
                accent: Color::Rgb(0x60, 0xa5, 0xfa),
                border: Color::Rgb(0x37, 0x41, 0x51),
                selection: Color::Rgb(0x1f, 0x29, 0x37),
            },
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn muted(&self) -> Style {
        self.base().fg(self.muted)
    }

    pub fn title(&self) -> Style {
        self.base().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn border(&self, focused: bool) -> Style {
        if focused {
            self.base().fg(self.accent)
        } else {
            self.base().fg(self.border)
        }
    }

    pub fn highlight(&self) -> Style {
        Style::default()
            .fg(self.text)
            .bg(self.selection)
            .add_modifier(Modifier::BOLD)
    }
}
