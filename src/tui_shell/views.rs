use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use crate::explorer::{ListRow, Tile, format_size};
use crate::model::ViewMode;

use super::app::App;
use super::modal::Modal;

pub(super) fn draw(frame: &mut Frame, app: &App) {
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(frame.area());

    draw_main(frame, app, parts[0]);
    draw_footer(frame, app, parts[1]);
}

fn draw_main(frame: &mut Frame, app: &App, area: Rect) {
    let mode = match app.explorer.mode() {
        ViewMode::Grid => "grid",
        ViewMode::List => "list",
    };
    let outer = Block::default()
        .borders(Borders::ALL)
        .title(Line::from(vec![
            Span::styled("blobdock", Style::default().fg(Color::Yellow)),
            Span::raw(format!("  [{}]", mode)),
        ]));
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    if let Some(err) = &app.load_err {
        frame.render_widget(Paragraph::new(err.as_str()), inner);
        return;
    }
    if !app.explorer.has_listing() {
        // Only shown when there has never been a successful listing; after
        // that a failed refresh keeps rendering the last-known-good tree.
        frame.render_widget(Paragraph::new("(no listing yet; press r to refresh)"), inner);
        return;
    }

    match app.explorer.mode() {
        ViewMode::Grid => draw_grid(frame, app, inner),
        ViewMode::List => draw_list(frame, app, inner),
    }
}

fn draw_grid(frame: &mut Frame, app: &App, area: Rect) {
    let model = app.explorer.grid_model();

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let mut spans = Vec::new();
    for (i, crumb) in model.crumbs.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" / "));
        }
        let style = if crumb.current {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };
        spans.push(Span::styled(crumb.label.clone(), style));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), parts[0]);

    let rows: Vec<ListItem> = model
        .tiles
        .iter()
        .map(|tile| match tile {
            Tile::Folder { name, count, .. } => {
                ListItem::new(format!("{}/ ({})", name, count))
                    .style(Style::default().fg(Color::Blue))
            }
            Tile::File { object, is_image } => {
                let marker = if *is_image { "img" } else { "   " };
                ListItem::new(format!(
                    "{} {}  {}",
                    marker,
                    object.display_name(),
                    format_size(object.size)
                ))
            }
        })
        .collect();

    let empty = rows.is_empty();
    let list = List::new(rows).highlight_style(Style::default().bg(Color::DarkGray));
    let mut state = ListState::default();
    if !empty {
        state.select(Some(app.selected));
    }
    frame.render_stateful_widget(list, parts[1], &mut state);
}

fn draw_list(frame: &mut Frame, app: &App, area: Rect) {
    let model = app.explorer.list_model();

    let rows: Vec<ListItem> = model
        .rows
        .iter()
        .map(|row| match row {
            ListRow::Folder {
                name,
                depth,
                count,
                expanded,
                ..
            } => {
                let marker = if *expanded { "v" } else { ">" };
                ListItem::new(format!(
                    "{}{} {}/ ({})",
                    "  ".repeat(*depth),
                    marker,
                    name,
                    count
                ))
                .style(Style::default().fg(Color::Blue))
            }
            ListRow::File { object, depth } => ListItem::new(format!(
                "{}  {}  {}",
                "  ".repeat(*depth),
                object.display_name(),
                format_size(object.size)
            )),
        })
        .collect();

    let empty = rows.is_empty();
    let list = List::new(rows).highlight_style(Style::default().bg(Color::DarkGray));
    let mut state = ListState::default();
    if !empty {
        state.select(Some(app.selected));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let line = match &app.modal {
        Some(Modal::Confirm { message, .. }) => Line::from(Span::styled(
            format!("{} [y/n]", message),
            Style::default().fg(Color::Yellow),
        )),
        Some(Modal::Input { prompt, buf, .. }) => Line::from(Span::styled(
            format!("{} {}_", prompt, buf),
            Style::default().fg(Color::Yellow),
        )),
        None => match &app.status {
            Some(status) if status.is_error => Line::from(Span::styled(
                status.text.clone(),
                Style::default().fg(Color::Red),
            )),
            Some(status) => Line::from(Span::styled(
                status.text.clone(),
                Style::default().fg(Color::Gray),
            )),
            None => Line::from(Span::styled(
                "enter open · v view · r refresh · u upload · d delete · y url · m markdown · q quit",
                Style::default().fg(Color::DarkGray),
            )),
        },
    };
    frame.render_widget(Paragraph::new(line), area);
}
