use clap::ValueEnum;
use color_eyre::Result;
use media_track_models::Theme;

use super::AppContext;
use crate::output::Output;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeAction {
    Show,
    Toggle,
    Dark,
    Light,
}

pub fn run_theme(context: &AppContext, action: ThemeAction, output: &Output) -> Result<()> {
    let mut controller = context.open_controller()?;

    let theme = match action {
        ThemeAction::Show => {
            output.info(format!("Theme: {}", describe(controller.theme())));
            return Ok(());
        }
        ThemeAction::Toggle => controller.toggle_theme()?,
        ThemeAction::Dark => {
            controller.set_theme(Theme::Dark)?;
            Theme::Dark
        }
        ThemeAction::Light => {
            controller.set_theme(Theme::Light)?;
            Theme::Light
        }
    };
    output.success(format!("Theme set to {}", describe(theme)));
    Ok(())
}

fn describe(theme: Theme) -> &'static str {
    if theme.is_dark() {
        "dark"
    } else {
        "light"
    }
}
