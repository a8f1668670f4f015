use crate::app::{App, Pane};
use crate::selection::{BillType, Congress};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

const SELECTOR_HEIGHT: u16 = 10;

pub fn draw(frame: &mut Frame, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(SELECTOR_HEIGHT),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_header(frame, rows[0]);
    draw_selectors(frame, rows[1], app);
    draw_status(frame, rows[2], app);
    draw_report(frame, rows[3], app);
    draw_footer(frame, rows[4]);
}

fn draw_header(frame: &mut Frame, area: Rect) {
    let header = Paragraph::new("capitol · browse bills")
        .style(Style::default().add_modifier(Modifier::BOLD));
    frame.render_widget(header, area);
}

fn draw_selectors(frame: &mut Frame, area: Rect, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(33),
            Constraint::Percentage(34),
        ])
        .split(area);

    let congress_items: Vec<ListItem> = Congress::ALL
        .iter()
        .map(|c| ListItem::new(c.as_str()))
        .collect();
    draw_list(
        frame,
        columns[0],
        app,
        Pane::Congress,
        format!("Congress: {}", app.selection.congress()),
        congress_items,
        app.congress_cursor,
    );

    let type_items: Vec<ListItem> = BillType::ALL
        .iter()
        .map(|t| ListItem::new(t.as_str()))
        .collect();
    let type_label = app
        .selection
        .bill_type()
        .map(|t| t.to_string())
        .unwrap_or_else(|| "-".to_string());
    draw_list(
        frame,
        columns[1],
        app,
        Pane::BillType,
        format!("Bill Type: {type_label}"),
        type_items,
        app.type_cursor,
    );

    let number_items: Vec<ListItem> = app
        .bill_numbers
        .iter()
        .map(|entry| ListItem::new(entry.label.clone()))
        .collect();
    let number_label = if !app.number_input.is_empty() {
        format!("{}_", app.number_input)
    } else {
        app.selection
            .bill_number()
            .unwrap_or("-")
            .to_string()
    };
    draw_list(
        frame,
        columns[2],
        app,
        Pane::BillNumber,
        format!("Bill Number: {number_label}"),
        number_items,
        app.number_cursor,
    );
}

fn draw_list(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    pane: Pane,
    title: String,
    items: Vec<ListItem>,
    cursor: usize,
) {
    let border_style = if app.focus == pane {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(title),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut state = ListState::default().with_selected(Some(cursor));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_status(frame: &mut Frame, area: Rect, app: &App) {
    let line = if app.busy() {
        Line::styled("fetching…", Style::default().fg(Color::Yellow))
    } else if let Some(status) = &app.status {
        Line::styled(status.as_str(), Style::default().fg(Color::Red))
    } else {
        Line::raw("")
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_report(frame: &mut Frame, area: Rect, app: &App) {
    let report = Paragraph::new(app.report.as_str())
        .block(Block::default().borders(Borders::ALL).title("Results"))
        .wrap(Wrap { trim: false })
        .scroll((app.scroll, 0));
    frame.render_widget(report, area);
}

fn draw_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new(
        "Tab focus · ↑/↓ move · Enter select · digits type a number · PgUp/PgDn scroll · q quit",
    )
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, area);
}
