//! Terminal UI rendering with ratatui
//!
//! The voxel well is drawn as three flat projections: front (x/y), side (z/y) and a
//! top-down height map (x/z). Everything is built from a `GameSnapshot`.

use crate::settings::Settings;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use voxtris::{
    BOARD_DEPTH, BOARD_HEIGHT, BOARD_WIDTH, BlockColor, Game, GameSnapshot, Position, Shape,
    ShapeKind,
};

const EMPTY: &str = "  ";

/// Three projections (22 wide each) plus the stats column
const GAME_WIDTH: u16 = 22 * 3 + 18;
/// Board height plus borders
const GAME_HEIGHT: u16 = BOARD_HEIGHT as u16 + 2;

/// What a projected cell shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Voxel {
    Settled(BlockColor),
    Falling(BlockColor),
    Preview(BlockColor),
}

/// The nearest voxel along the viewing axis, with its depth
type Column = Option<(i32, Voxel)>;

#[derive(Debug, Clone, Copy)]
enum View {
    /// Looking along +z: columns are x, rows are y
    Front,
    /// Looking along +x: columns are z, rows are y
    Side,
}

impl View {
    fn title(&self) -> &'static str {
        match self {
            View::Front => " FRONT ",
            View::Side => " SIDE ",
        }
    }

    fn columns(&self) -> usize {
        match self {
            View::Front => BOARD_WIDTH,
            View::Side => BOARD_DEPTH,
        }
    }

    /// (column, depth) of a board position in this view
    fn project(&self, pos: Position) -> (i32, i32) {
        match self {
            View::Front => (pos.x, pos.z),
            View::Side => (pos.z, pos.x),
        }
    }
}

/// Render the in-game screen
pub fn render_game(frame: &mut Frame, game: &Game, settings: &Settings) {
    let area = frame.area();
    let snapshot = game.snapshot();
    let preview = if settings.visual.show_drop_preview {
        game.drop_preview().map(|piece| piece.cells())
    } else {
        None
    };
    let voxels = collect_voxels(&snapshot, preview.as_ref());

    // Center the game area
    let game_area = center_rect(area, GAME_WIDTH, GAME_HEIGHT);

    // front | side | top | stats
    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(22),
            Constraint::Length(22),
            Constraint::Length(22),
            Constraint::Length(18),
        ])
        .split(game_area);

    render_projection(frame, main_layout[0], View::Front, &voxels, settings);
    render_projection(frame, main_layout[1], View::Side, &voxels, settings);
    render_top(frame, main_layout[2], &voxels, settings);

    let right_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(6)])
        .split(main_layout[3]);

    let (block_char, _) = settings.visual.block_chars();
    render_next(frame, right_layout[0], snapshot.next_shape, block_char);
    render_stats(frame, right_layout[1], &snapshot);

    // Overlays
    if snapshot.is_game_over {
        render_overlay(frame, area, "GAME OVER", "R to restart, Esc to quit");
    } else if snapshot.is_paused {
        render_overlay(frame, area, "PAUSED", "Press P to resume");
    }
}

/// Every voxel worth drawing: settled cells, the falling piece and its landing spot
fn collect_voxels(snapshot: &GameSnapshot, preview: Option<&[Position; 4]>) -> Vec<(Position, Voxel)> {
    let mut voxels: Vec<_> = snapshot
        .filled
        .iter()
        .map(|cell| (cell.position, Voxel::Settled(cell.color)))
        .collect();

    if let Some(active) = &snapshot.current {
        if let Some(cells) = preview {
            voxels.extend(cells.iter().map(|&pos| (pos, Voxel::Preview(active.color))));
        }
        voxels.extend(active.cells.iter().map(|&pos| (pos, Voxel::Falling(active.color))));
    }
    voxels
}

/// Keep the nearest voxel per projected cell; the falling piece always wins over the
/// preview, and both win over settled blocks so the player never loses sight of them.
fn nearer(current: Column, depth: i32, voxel: Voxel) -> Column {
    let rank = |v: &Voxel| match v {
        Voxel::Falling(_) => 0,
        Voxel::Preview(_) => 1,
        Voxel::Settled(_) => 2,
    };
    match current {
        Some((d, existing)) if (rank(&existing), d) <= (rank(&voxel), depth) => current,
        _ => Some((depth, voxel)),
    }
}

fn voxel_span(voxel: Voxel, depth: i32, max_depth: usize, settings: &Settings) -> Span<'static> {
    let (block_char, preview_char) = settings.visual.block_chars();
    match voxel {
        Voxel::Falling(color) => Span::styled(block_char, Style::default().fg(rgb(color)).bold()),
        Voxel::Preview(color) => Span::styled(preview_char, Style::default().fg(rgb(color)).dim()),
        Voxel::Settled(color) => {
            let style = Style::default().fg(rgb(color));
            // Far half of the well is drawn dimmer to hint at depth
            if depth as usize >= max_depth / 2 {
                Span::styled(block_char, style.dim())
            } else {
                Span::styled(block_char, style)
            }
        }
    }
}

/// Render a side-on projection of the well
fn render_projection(
    frame: &mut Frame,
    area: Rect,
    view: View,
    voxels: &[(Position, Voxel)],
    settings: &Settings,
) {
    let block = Block::default()
        .title(view.title())
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = view.columns();
    let max_depth = match view {
        View::Front => BOARD_DEPTH,
        View::Side => BOARD_WIDTH,
    };
    let mut grid: Vec<Vec<Column>> = vec![vec![None; columns]; BOARD_HEIGHT];
    for &(pos, voxel) in voxels {
        let (col, depth) = view.project(pos);
        if let Some(cell) = grid
            .get_mut(pos.y as usize)
            .and_then(|row| row.get_mut(col as usize))
        {
            *cell = nearer(*cell, depth, voxel);
        }
    }

    let lines: Vec<Line> = grid
        .into_iter()
        .map(|row| {
            Line::from(
                row.into_iter()
                    .map(|cell| match cell {
                        Some((depth, voxel)) => voxel_span(voxel, depth, max_depth, settings),
                        None => Span::raw(EMPTY),
                    })
                    .collect::<Vec<_>>(),
            )
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render the top-down view: x across, z down, nearest voxel from above
fn render_top(frame: &mut Frame, area: Rect, voxels: &[(Position, Voxel)], settings: &Settings) {
    let block = Block::default()
        .title(" TOP ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut grid: Vec<Vec<Column>> = vec![vec![None; BOARD_WIDTH]; BOARD_DEPTH];
    for &(pos, voxel) in voxels {
        if let Some(cell) = grid
            .get_mut(pos.z as usize)
            .and_then(|row| row.get_mut(pos.x as usize))
        {
            *cell = nearer(*cell, pos.y, voxel);
        }
    }

    let mut lines: Vec<Line> = grid
        .into_iter()
        .map(|row| {
            Line::from(
                row.into_iter()
                    .map(|cell| match cell {
                        Some((y, voxel)) => voxel_span(voxel, y, BOARD_HEIGHT, settings),
                        None => Span::styled("··", Style::default().fg(Color::DarkGray)),
                    })
                    .collect::<Vec<_>>(),
            )
        })
        .collect();

    lines.push(Line::raw(""));
    lines.push(Line::styled("A/D  left/right", Style::default().fg(Color::DarkGray)));
    lines.push(Line::styled("W/S  fwd/back", Style::default().fg(Color::DarkGray)));
    lines.push(Line::styled("Q/E  rotate", Style::default().fg(Color::DarkGray)));
    lines.push(Line::styled("SPC  drop  \u{2193} soft", Style::default().fg(Color::DarkGray)));
    lines.push(Line::styled("P pause  R restart", Style::default().fg(Color::DarkGray)));

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render the next-shape preview
fn render_next(frame: &mut Frame, area: Rect, kind: ShapeKind, block_char: &str) {
    let block = Block::default()
        .title(" NEXT ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height < 2 || inner.width < 8 {
        return;
    }

    let shape = Shape::new(kind);
    let color = rgb(kind.color());
    let lines: Vec<Line> = (0..2)
        .map(|y| {
            let spans: Vec<Span> = (0..4)
                .map(|x| {
                    if shape.blocks.contains(&Position::new(x, y, 0)) {
                        Span::styled(block_char.to_string(), Style::default().fg(color))
                    } else {
                        Span::raw(EMPTY)
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

/// Render stats panel
fn render_stats(frame: &mut Frame, area: Rect, snapshot: &GameSnapshot) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let label = |text: &'static str| Line::from(Span::styled(text, Style::default().fg(Color::Gray)));
    let lines = vec![
        label("SCORE"),
        Line::from(Span::styled(
            format!("{}", snapshot.score),
            Style::default().fg(Color::Yellow).bold(),
        )),
        Line::raw(""),
        label("LEVEL"),
        Line::from(Span::styled(
            format!("{}", snapshot.level),
            Style::default().fg(Color::Cyan),
        )),
        Line::raw(""),
        label("LINES"),
        Line::from(Span::styled(
            format!("{}", snapshot.lines),
            Style::default().fg(Color::Green),
        )),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render an overlay (for pause/game over)
fn render_overlay(frame: &mut Frame, area: Rect, title: &str, subtitle: &str) {
    let popup_area = center_rect(area, 30, 5);

    // Clear the background
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let text = vec![
        Line::styled(title.to_string(), Style::default().fg(Color::Yellow).bold()),
        Line::raw(""),
        Line::styled(subtitle.to_string(), Style::default().fg(Color::Gray)),
    ];

    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), inner);
}

/// Center a rect within another rect
fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

fn rgb(color: BlockColor) -> Color {
    let (r, g, b) = color.rgb();
    Color::Rgb(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: BlockColor = BlockColor::new("#f00000");
    const BLUE: BlockColor = BlockColor::new("#0000f0");

    #[test]
    fn test_nearer_prefers_front_settled_block() {
        let cell = nearer(None, 7, Voxel::Settled(RED));
        let cell = nearer(cell, 2, Voxel::Settled(BLUE));
        assert_eq!(cell, Some((2, Voxel::Settled(BLUE))));
        let cell = nearer(cell, 9, Voxel::Settled(RED));
        assert_eq!(cell, Some((2, Voxel::Settled(BLUE))));
    }

    #[test]
    fn test_falling_piece_shows_through_stack() {
        let cell = nearer(None, 0, Voxel::Settled(RED));
        let cell = nearer(cell, 8, Voxel::Preview(BLUE));
        assert_eq!(cell, Some((8, Voxel::Preview(BLUE))));
        let cell = nearer(cell, 9, Voxel::Falling(BLUE));
        assert_eq!(cell, Some((9, Voxel::Falling(BLUE))));
    }

    #[test]
    fn test_projection_axes() {
        let pos = Position::new(1, 2, 3);
        assert_eq!(View::Front.project(pos), (1, 3));
        assert_eq!(View::Side.project(pos), (3, 1));
    }

    #[test]
    fn test_center_rect_clamps() {
        let area = Rect::new(0, 0, 40, 10);
        assert_eq!(center_rect(area, 20, 4), Rect::new(10, 3, 20, 4));
        assert_eq!(center_rect(area, 80, 40), Rect::new(0, 0, 40, 10));
    }

    #[test]
    fn test_rgb_conversion() {
        assert_eq!(rgb(ShapeKind::O.color()), Color::Rgb(255, 255, 0));
    }
}
