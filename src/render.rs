use crate::app::DisplayState;
use crate::countries::Country;

const BOLD: &str = "\x1b[1m";
const ITALIC: &str = "\x1b[3m";
const RESET: &str = "\x1b[0m";

pub const LOADING: &str = "Loading...";

/// Render the display region as terminal text
pub fn render(state: &DisplayState, color: bool) -> String {
    match state {
        DisplayState::Loading => LOADING.to_string(),
        DisplayState::Loaded(country) => render_country(country, color),
    }
}

/// Render without ANSI styling
pub fn render_plain(state: &DisplayState) -> String {
    render(state, false)
}

fn render_country(country: &Country, color: bool) -> String {
    let (bold, italic, reset) = if color { (BOLD, ITALIC, RESET) } else { ("", "", "") };

    format!(
        "{bold}{name}{reset}\n{italic}{native}{reset}\nFlag: {emoji}\n{label}: {languages}",
        name = country.name,
        native = country.native,
        emoji = country.emoji,
        label = language_label(country.languages.len()),
        languages = country
            .languages
            .iter()
            .map(|l| l.name.as_str())
            .collect::<Vec<_>>()
            .join(" "),
    )
}

fn language_label(count: usize) -> &'static str {
    if count > 1 {
        "Official languages"
    } else {
        "Official language"
    }
}
