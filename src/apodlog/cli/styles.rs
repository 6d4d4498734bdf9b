use console::Style;
use once_cell::sync::Lazy;

pub struct Theme {
    pub separator: Style,
    pub heading: Style,
    pub label: Style,
    pub link: Style,
    pub dim: Style,
    pub on: Style,
    pub off: Style,
    pub prompt: Style,
}

pub static APOD_THEME: Lazy<Theme> = Lazy::new(|| Theme {
    separator: Style::new().color256(61),
    heading: Style::new().bold().color256(141),
    label: Style::new().color256(111),
    link: Style::new().underlined().color256(117),
    dim: Style::new().color256(245).italic(),
    on: Style::new().green().bold(),
    off: Style::new().red(),
    prompt: Style::new().bold().color256(141),
});
