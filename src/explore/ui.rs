use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListState, Paragraph};
use ratatui::Frame;

use super::Explorer;
use crate::render::sanitize_terminal_text;
use crate::tree::Scanner;

const HEADER_STYLE: Style = Style::new().fg(Color::Magenta).add_modifier(Modifier::BOLD);
const HIGHLIGHT_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);
const HELP_STYLE: Style = Style::new().fg(Color::DarkGray);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const FILTER_STYLE: Style = Style::new().fg(Color::Yellow);

const HELP_TEXT: &str =
    " q: Quit  |  \u{2191}\u{2193}/jk: Move  |  Enter: Open  |  /: Filter  |  Esc/Backspace: Back  |  PgUp/PgDn  |  Home/End";

pub(super) fn draw<S: Scanner>(frame: &mut Frame, app: &Explorer<S>) {
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let title = format!(
        "\u{1f4c1} {} ({} items)",
        sanitize_terminal_text(&app.dir().to_string_lossy()),
        app.visible().len().saturating_sub(1)
    );
    frame.render_widget(Paragraph::new(Span::styled(title, HEADER_STYLE)), header);

    match app.preview() {
        Some(preview) => {
            let block = Block::bordered().title(format!(
                " \u{1f4c4} {} (Esc to go back) ",
                sanitize_terminal_text(&preview.title)
            ));
            let paragraph = Paragraph::new(preview.content.as_str())
                .block(block)
                .scroll((preview.scroll, 0));
            frame.render_widget(paragraph, body);
        }
        None => {
            let rows = app.visible().iter().map(|&i| app.lines()[i].clone());
            let list = List::new(rows)
                .highlight_style(HIGHLIGHT_STYLE)
                .highlight_symbol("> ");
            let mut state = ListState::default().with_selected(Some(app.selected()));
            frame.render_stateful_widget(list, body, &mut state);
        }
    }

    let footer_line = if app.is_filtering() {
        Line::from(vec![
            Span::styled("/", FILTER_STYLE),
            Span::raw(sanitize_terminal_text(app.filter())),
            Span::styled("_", HELP_STYLE),
        ])
    } else if let Some(err) = app.status() {
        Line::from(Span::styled(sanitize_terminal_text(err), ERROR_STYLE))
    } else if !app.filter().is_empty() {
        Line::from(Span::styled(
            format!(" filter: {}  (Esc to clear)", sanitize_terminal_text(app.filter())),
            FILTER_STYLE,
        ))
    } else {
        Line::from(Span::styled(HELP_TEXT, HELP_STYLE))
    };
    frame.render_widget(Paragraph::new(footer_line), footer);
}
