use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use tracing::error;

use crate::ref_view::RefView;
use crate::window::{Highlight, Window};

use super::app::App;
use super::keymap::key_label;
use super::theme::{component_style, selected_style};

pub(super) fn draw(frame: &mut Frame, app: &App) {
    let [main, status, bottom] = Layout::vertical([
        Constraint::Min(3),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let mut win = Window::new(main.height as usize, main.width as usize);
    if let Err(err) = app.view.render(&mut win) {
        error!("render ref view: {:#}", err);
    }
    draw_window(frame, main, &win);

    let status_line = match &app.status {
        Some(entry) => {
            let style = if entry.is_error {
                Style::default().fg(Color::Red)
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::styled(entry.ts.clone(), Style::default().fg(Color::DarkGray)),
                Span::raw(" "),
                Span::styled(entry.text.clone(), style),
            ])
        }
        None => Line::from(""),
    };
    frame.render_widget(Paragraph::new(status_line), status);

    match app.prompt {
        Some(kind) => {
            let label = kind.label();
            let line = Line::from(vec![
                Span::styled(label, Style::default().fg(Color::Yellow)),
                Span::raw(app.input.as_str().to_string()),
            ]);
            frame.render_widget(Paragraph::new(line), bottom);
            let x = (label.chars().count() + app.input.cursor()) as u16;
            frame.set_cursor_position((bottom.x + x.min(bottom.width.saturating_sub(1)), bottom.y));
        }
        None => frame.render_widget(Paragraph::new(help_line()), bottom),
    }
}

fn help_line() -> Line<'static> {
    let mut spans = Vec::new();
    let extra = [
        ("/", "Search"),
        ("Tab", "Toggle Focus"),
        ("q", "Quit"),
    ];
    let entries = RefView::help_entries()
        .iter()
        .map(|(kind, desc)| (key_label(*kind), *desc))
        .chain(extra);
    for (key, desc) in entries {
        if !spans.is_empty() {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(key, Style::default().fg(Color::Cyan)));
        spans.push(Span::raw(format!(" {}", desc)));
    }
    Line::from(spans)
}

fn draw_window(frame: &mut Frame, area: Rect, win: &Window) {
    let mut block = Block::default();
    if win.has_border() {
        block = block.borders(Borders::ALL);
    }
    if let Some(title) = win.title() {
        block = block.title(Span::styled(
            format!(" {} ", title.text),
            component_style(title.component),
        ));
    }
    if let Some(footer) = win.footer() {
        block = block.title_bottom(
            Line::from(Span::styled(
                format!(" {} ", footer.text),
                component_style(footer.component),
            ))
            .alignment(Alignment::Right),
        );
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let selection = win.selection();
    let highlight = win.highlight_pattern();
    let lines: Vec<Line> = win
        .content()
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let line = styled_line(&row.text, component_style(row.component), highlight);
            match selection {
                Some(sel) if sel.row_index == i + 1 => line.style(selected_style(sel.active)),
                _ => line,
            }
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

fn styled_line(text: &str, style: Style, highlight: Option<&Highlight>) -> Line<'static> {
    let lower = text.to_lowercase();
    let Some(highlight) = highlight.filter(|_| lower.len() == text.len()) else {
        return Line::from(Span::styled(text.to_string(), style));
    };

    let needle = highlight.pattern.to_lowercase();
    let match_style = style.patch(component_style(highlight.component));
    let mut spans = Vec::new();
    let mut rest = 0;
    for (start, _) in lower.match_indices(&needle) {
        let end = start + needle.len();
        if start < rest || !text.is_char_boundary(start) || !text.is_char_boundary(end) {
            continue;
        }
        spans.push(Span::styled(text[rest..start].to_string(), style));
        spans.push(Span::styled(text[start..end].to_string(), match_style));
        rest = end;
    }
    spans.push(Span::styled(text[rest..].to_string(), style));
    Line::from(spans)
}
