//! Budget screen
//!
//! Table of budget items, either the full sequence or the favorites-only
//! view, with the selected row highlighted.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::tui::app::App;

/// Render the budget screen
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let title = if app.show_favorites {
        format!(
            " Budget Items - Favorites ({}) ",
            app.store.filtered_view(true).count()
        )
    } else {
        format!(" Budget Items ({}) ", app.store.len())
    };

    let block = Block::default()
        .title(title)
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));

    let header = Row::new(vec![
        Cell::from("Date"),
        Cell::from("Category"),
        Cell::from("Subcategory"),
        Cell::from("Payment"),
        Cell::from("Amount"),
        Cell::from("Fav"),
    ])
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = app
        .store
        .filtered_view(app.show_favorites)
        .enumerate()
        .map(|(i, item)| {
            let fav = if item.favorite { "★" } else { "" };
            let pending = if item.is_confirmed() { "" } else { " (pending)" };

            let style = if i == app.selected_index {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            Row::new(vec![
                Cell::from(item.creation_date.format("%Y-%m-%d").to_string()),
                Cell::from(item.category.as_str()),
                Cell::from(format!("{}{}", item.subcategory, pending)),
                Cell::from(item.payment_type.as_str()),
                Cell::from(format!("{:.2}", item.amount)),
                Cell::from(fav),
            ])
            .style(style)
        })
        .collect();

    let empty = rows.is_empty();

    let table = Table::new(
        rows,
        [
            Constraint::Length(10),
            Constraint::Length(8),
            Constraint::Min(20),
            Constraint::Length(7),
            Constraint::Length(10),
            Constraint::Length(3),
        ],
    )
    .header(header)
    .block(block);

    frame.render_widget(table, area);

    if empty {
        let message = if app.show_favorites {
            "No favorite items yet"
        } else {
            "No budget items yet - press 'a' to add one"
        };
        let inner = Rect {
            x: area.x + 2,
            y: area.y + 2,
            width: area.width.saturating_sub(4),
            height: 1,
        };
        let line = Line::from(Span::styled(
            message,
            Style::default().fg(Color::DarkGray),
        ));
        frame.render_widget(Paragraph::new(line), inner);
    }
}
