use console::Style;
use once_cell::sync::Lazy;

/// Styles for the chrome around engine output. Message levels are colored
/// at the print site instead.
pub struct TabulaTheme {
    pub header: Style,
    pub detail_index: Style,
    pub detail_title: Style,
    pub field_label: Style,
    pub muted: Style,
}

pub static TABULA_THEME: Lazy<TabulaTheme> = Lazy::new(|| TabulaTheme {
    header: Style::new().bold().underlined(),
    detail_index: Style::new().yellow(),
    detail_title: Style::new().bold(),
    field_label: Style::new().cyan(),
    muted: Style::new().color256(246).italic(),
});
