//! TUI layout and widget rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Circle, Points, Rectangle};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

use super::runtime::{App, Screen};
use super::style;
use crate::geometry::Primitive;
use crate::model::Category;
use crate::reporting;
use crate::scene::Scene;

/// Width of the side panel on the viewer page.
const SIDE_PANEL_WIDTH: u16 = 36;

/// Renders the full TUI frame.
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(8),    // page body
            Constraint::Length(3), // status line
            Constraint::Length(1), // footer
        ])
        .split(frame.area());

    let scene = app.scene();
    render_header(frame, app, &scene, chunks[0]);
    match app.screen {
        Screen::Landing => render_library(frame, app, chunks[1]),
        Screen::Viewer => render_viewer(frame, app, &scene, chunks[1]),
    }
    render_status(frame, app, chunks[2]);
    render_footer(frame, app, chunks[3]);
}

/// Header bar: title, current document, drawable counts.
fn render_header(frame: &mut Frame, app: &App, scene: &Scene, area: Rect) {
    let mut spans = vec![
        Span::styled(
            " PLANT-VIEWER ",
            Style::default()
                .fg(style::HEADER_FG)
                .bg(style::HEADER_BG)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
    ];
    match app.session.current() {
        Some(loaded) => {
            spans.push(Span::styled(
                loaded.label.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::raw(format!(" │ {}", scene.summary())));
        }
        None => spans.push(Span::raw("no plant loaded")),
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Landing page: the JSON library with the highlighted entry.
fn render_library(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(format!(" JSON library ({} files) ", app.files.len()))
        .borders(Borders::ALL);

    if app.files.is_empty() {
        let empty = Paragraph::new("  No JSON files found. Press o to open a local file.")
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = app
        .files
        .iter()
        .map(|f| ListItem::new(f.name.clone()))
        .collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(style::SELECTED_FG)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    let mut state = ListState::default().with_selected(Some(app.selected));
    frame.render_stateful_widget(list, area, &mut state);
}

/// Viewer page: plan view on the left, controls and metadata on the right.
fn render_viewer(frame: &mut Frame, app: &App, scene: &Scene, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(SIDE_PANEL_WIDTH)])
        .split(area);

    render_plan(frame, scene, chunks[0]);

    let controls_height = if app.controls_collapsed { 2 } else { 6 };
    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(controls_height), Constraint::Min(0)])
        .split(chunks[1]);
    render_controls(frame, app, side[0]);
    if app.show_metadata {
        render_metadata(frame, app, side[1]);
    }
}

/// Top-down plan of the drawable set: boxes as rectangles, silos as
/// circles, markers as points. Labels sit at the far edge of each footprint.
fn render_plan(frame: &mut Frame, scene: &Scene, area: Rect) {
    let (x_bounds, y_bounds) = style::fit_bounds(scene.bounds());

    let canvas = Canvas::default()
        .block(Block::default().title(" Plan (x/z) ").borders(Borders::ALL))
        .marker(symbols::Marker::Braille)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(|ctx| {
            for d in &scene.drawables {
                let c = d.center();
                let color = style::rgb_color(d.rgb());
                match d.primitive {
                    Primitive::Box { width, depth, .. } => ctx.draw(&Rectangle {
                        x: c.x - width / 2.0,
                        y: c.z - depth / 2.0,
                        width,
                        height: depth,
                        color,
                    }),
                    Primitive::Cylinder { radius, .. } => ctx.draw(&Circle {
                        x: c.x,
                        y: c.z,
                        radius,
                        color,
                    }),
                    Primitive::Sphere { .. } => ctx.draw(&Points {
                        coords: &[(c.x, c.z)],
                        color,
                    }),
                }
            }
            ctx.layer();
            for d in &scene.drawables {
                let c = d.center();
                let (_, hz) = d.primitive.half_extent_xz();
                ctx.print(
                    c.x,
                    c.z + hz,
                    Span::styled(d.name.clone(), Style::default().fg(style::LABEL_FG)),
                );
            }
        });
    frame.render_widget(canvas, area);
}

/// Visibility toggles with per-category entity counts.
fn render_controls(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().title(" Controls ").borders(Borders::ALL);
    if app.controls_collapsed {
        frame.render_widget(block.borders(Borders::TOP), area);
        return;
    }

    let lines: Vec<Line> = Category::ALL
        .iter()
        .enumerate()
        .map(|(i, &category)| {
            let visible = app.session.visibility.is_visible(category);
            let (mark, color) = if visible {
                ("[x]", style::ON_FG)
            } else {
                ("[ ]", style::OFF_FG)
            };
            let count = app
                .session
                .current()
                .map_or(0, |loaded| loaded.plant.count(category));
            Line::from(vec![
                Span::raw(format!(" {} ", i + 1)),
                Span::styled(mark, Style::default().fg(color)),
                Span::raw(format!(" {category} ({count})")),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Document metadata panel.
fn render_metadata(frame: &mut Frame, app: &App, area: Rect) {
    let meta = app
        .session
        .current()
        .and_then(|loaded| loaded.plant.metadata.as_ref())
        .filter(|m| !m.is_empty());
    let lines: Vec<Line> = match meta {
        Some(meta) => reporting::metadata_lines(meta)
            .into_iter()
            .map(Line::from)
            .collect(),
        None => vec![Line::from("No metadata")],
    };
    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().title(" Metadata ").borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

/// Path prompt when open, else last error, else last status message.
fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(input) = &app.upload_input {
        let prompt = Paragraph::new(Line::from(vec![
            Span::styled("  Open file: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!("{input}_")),
        ]))
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(prompt, area);
        return;
    }
    let line = match (&app.error, &app.status) {
        (Some(error), _) => Line::from(Span::styled(
            format!("  {error}"),
            Style::default().fg(style::ERROR_FG),
        )),
        (None, Some(status)) => Line::from(format!("  {status}")),
        (None, None) => Line::from(""),
    };
    let paragraph = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

/// Footer with keybinding hints.
fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let hints = match app.screen {
        _ if app.upload_input.is_some() => " Enter:Load  Esc:Cancel  Backspace:Delete",
        Screen::Landing => {
            " q:Quit  ↑/↓:Select  Enter:Open  o:Open file  v:View current  r:Refresh"
        }
        Screen::Viewer => " q:Quit  b:Back  1-4:Toggle  m:Metadata  c:Controls  e:Export",
    };
    let footer = Paragraph::new(Line::from(Span::styled(
        hints,
        Style::default().fg(style::FOOTER_FG),
    )));
    frame.render_widget(footer, area);
}
