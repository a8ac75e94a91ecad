use ratatui::{prelude::*, widgets::*};

use super::state::{Focus, ViewerState};
use crate::model::Insurer;
use crate::table::{Cell as BenefitCell, EMPTY_CELL};

mod colors {
    use ratatui::style::Color;

    pub const ACCENT: Color = Color::Rgb(19, 91, 236);
    pub const TEXT: Color = Color::Rgb(241, 245, 249);
    pub const MUTED: Color = Color::Rgb(148, 163, 184);
    pub const PANEL: Color = Color::Rgb(15, 23, 42);
}

pub fn draw(frame: &mut Frame, state: &ViewerState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Controls
            Constraint::Min(5),    // Table
            Constraint::Length(1), // Footer
        ])
        .split(frame.area());

    draw_header(frame, chunks[0], state);
    draw_controls(frame, chunks[1], state);
    draw_table(frame, chunks[2], state);
    draw_footer(frame, chunks[3]);
}

fn draw_header(frame: &mut Frame, area: Rect, state: &ViewerState) {
    let controller = &state.controller;
    let title = Line::from(vec![
        Span::styled(
            " POISŤOVNE ",
            Style::default().fg(colors::TEXT).bg(colors::ACCENT).bold(),
        ),
        Span::raw("  "),
        Span::styled(
            format!(
                "{} riadkov / {} záznamov",
                controller.table().len(),
                controller.dataset().len()
            ),
            Style::default().fg(colors::MUTED),
        ),
    ]);
    let header = Paragraph::new(title).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(colors::MUTED)),
    );
    frame.render_widget(header, area);
}

fn control_block(title: &str, focused: bool) -> Block<'static> {
    let border = if focused { colors::ACCENT } else { colors::MUTED };
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
}

fn draw_controls(frame: &mut Frame, area: Rect, state: &ViewerState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(area);

    let category = match state.controller.category() {
        "" => "Všetky".to_string(),
        value => value.to_string(),
    };
    let filter = Paragraph::new(format!("◀ {category} ▶"))
        .block(control_block("Kategória", state.focus == Focus::Category));
    frame.render_widget(filter, chunks[0]);

    let mut search = state.controller.search().to_string();
    if state.focus == Focus::Search {
        search.push('_');
    }
    let input = Paragraph::new(search).block(control_block("Hľadať", state.focus == Focus::Search));
    frame.render_widget(input, chunks[1]);
}

fn cell_text(cell: &BenefitCell) -> Text<'static> {
    match cell {
        BenefitCell::Empty => Text::styled(EMPTY_CELL, Style::default().fg(colors::MUTED)),
        BenefitCell::List(items) => Text::from(
            items
                .iter()
                .map(|item| Line::from(format!("• {item}")))
                .collect::<Vec<_>>(),
        ),
    }
}

fn draw_table(frame: &mut Frame, area: Rect, state: &ViewerState) {
    let rows: Vec<Row> = state
        .controller
        .table()
        .rows()
        .iter()
        .skip(state.scroll)
        .map(|row| {
            let height = row
                .cells
                .iter()
                .map(|c| c.items().len().max(1))
                .max()
                .unwrap_or(1);
            let mut cells = vec![Cell::from(Span::styled(
                row.popis.clone(),
                Style::default().fg(colors::TEXT).bold(),
            ))];
            cells.extend(row.cells.iter().map(|c| Cell::from(cell_text(c))));
            Row::new(cells).height(height as u16).bottom_margin(1)
        })
        .collect();

    let mut header = vec![Cell::from("Popis")];
    header.extend(Insurer::ALL.iter().map(|i| Cell::from(i.label())));

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(22),
            Constraint::Percentage(26),
            Constraint::Percentage(26),
            Constraint::Percentage(26),
        ],
    )
    .header(
        Row::new(header)
            .style(Style::default().fg(colors::ACCENT).bold())
            .bottom_margin(1),
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(colors::MUTED))
            .style(Style::default().bg(colors::PANEL)),
    );
    frame.render_widget(table, area);
}

fn draw_footer(frame: &mut Frame, area: Rect) {
    let help = Line::from(vec![
        Span::styled("Tab", Style::default().fg(colors::ACCENT).bold()),
        Span::raw(" prepnúť  "),
        Span::styled("←/→", Style::default().fg(colors::ACCENT).bold()),
        Span::raw(" kategória  "),
        Span::styled("PgUp/PgDn", Style::default().fg(colors::ACCENT).bold()),
        Span::raw(" posun  "),
        Span::styled("Esc", Style::default().fg(colors::ACCENT).bold()),
        Span::raw(" koniec"),
    ]);
    frame.render_widget(Paragraph::new(help), area);
}
