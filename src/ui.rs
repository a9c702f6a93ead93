#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation when casting board sizes into terminal cell math
    clippy::cast_possible_truncation
)]

use crate::app::App;
use crate::components::MatchState;
use crate::game::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::roster::Roster;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub fn render(f: &mut Frame, app: &mut App) {
    let cell_width = 2; // Each cell is 2 characters wide
    let board_width = BOARD_WIDTH as u16 * cell_width + 2; // +2 for borders
    let board_height = BOARD_HEIGHT as u16 + 2; // +2 for borders
    let min_info_width = 24u16;
    let min_total_width = board_width + min_info_width;
    let min_total_height = board_height + 3;

    // Check if the terminal is too small to render the room properly
    if f.area().width < min_total_width || f.area().height < min_total_height {
        let warning_text = Paragraph::new(
            "Terminal too small!\nPlease resize your terminal\nto continue playing.",
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("TetriX"));

        let warning_area = centered_rect(50, 30, f.area());
        f.render_widget(warning_text, warning_area);
        return;
    }

    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(board_width + 2),
            Constraint::Min(min_info_width),
        ])
        .split(f.area());

    let game_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),            // Room title
            Constraint::Length(board_height), // Game board
            Constraint::Fill(1),
        ])
        .split(main_layout[0]);

    let info_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title
            Constraint::Length(6), // Score / level / lines / clock
            Constraint::Length(6), // Next piece
            Constraint::Length(9), // Controls
            Constraint::Min(4),    // Players
        ])
        .split(main_layout[1]);

    // Room header
    let title = Paragraph::new(format!("TETRIX ROOM  {}", app.room_name))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(title, game_layout[0]);

    render_game_board(f, app, game_layout[1]);

    let info_title = Paragraph::new("INFO")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(info_title, info_layout[0]);

    // Match stats
    let state = app.world.resource::<MatchState>();
    let stats = format!(
        "Score: {}\nLevel: {}\nLines: {}\nTime: {:02}:{:02}  Speed: x{}",
        state.score,
        state.level,
        state.lines,
        state.elapsed_seconds / 60,
        state.elapsed_seconds % 60,
        state.speed_multiplier,
    );
    let stats_widget = Paragraph::new(stats)
        .block(Block::default().borders(Borders::NONE))
        .wrap(Wrap { trim: true });
    f.render_widget(stats_widget, info_layout[1]);

    render_next_piece(f, app, info_layout[2]);

    let controls = Paragraph::new(
        "Controls:\n\
        ←/→: Move left/right\n\
        ↓: Soft drop\n\
        ↑: Rotate\n\
        Space: Hard drop\n\
        P: Pause  R: Restart\n\
        Q: Quit\n\
        ",
    )
    .block(Block::default().borders(Borders::TOP))
    .wrap(Wrap { trim: true });
    f.render_widget(controls, info_layout[3]);

    render_players(f, app, info_layout[4]);
}

fn render_game_board(f: &mut Frame, app: &mut App, area: Rect) {
    let cell_width = 2;
    let inner_area = Block::default().borders(Borders::ALL).inner(area);
    f.render_widget(Block::default().borders(Borders::ALL), area);

    let paint = |f: &mut Frame, x: usize, y: usize, symbol: &str, color: Color| {
        let block_x = inner_area.left() + x as u16 * cell_width;
        let block_y = inner_area.top() + y as u16;
        if block_x + 1 < inner_area.right() && block_y < inner_area.bottom() {
            for dx in 0..cell_width {
                if let Some(cell) = f.buffer_mut().cell_mut((block_x + dx, block_y)) {
                    cell.set_symbol(symbol);
                    cell.set_fg(color);
                    cell.set_bg(Color::Black);
                }
            }
        }
    };

    // Ghost first so the active piece paints over it where they overlap
    for (x, y, kind) in app.ghost_cells() {
        paint(f, x, y, "░", kind.get_color());
    }
    for (x, y, kind) in app.render_cells() {
        paint(f, x, y, "█", kind.get_color());
    }

    let state = app.world.resource::<MatchState>();
    let overlay = if state.game_over {
        Some(("GAME OVER", "Press R to restart"))
    } else if state.paused {
        Some(("PAUSED", "Press P to resume"))
    } else {
        None
    };

    if let Some((headline, hint)) = overlay {
        let overlay_widget = Paragraph::new(format!("{headline}\n{hint}"))
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD));
        let overlay_area = Rect {
            x: inner_area.x,
            y: inner_area.y + inner_area.height / 2,
            width: inner_area.width,
            height: 2,
        };
        f.render_widget(overlay_widget, overlay_area);
    }
}

fn render_next_piece(f: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default().borders(Borders::TOP).title("Next Piece");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let state = app.world.resource::<MatchState>();
    let next = &state.next;
    let color = next.kind.get_color();

    for (row_idx, row) in next.shape.iter().enumerate() {
        for (col_idx, &cell) in row.iter().enumerate() {
            if cell == 0 {
                continue;
            }
            let x = inner.left() + 1 + col_idx as u16 * 2;
            let y = inner.top() + 1 + row_idx as u16;
            if x + 1 < inner.right() && y < inner.bottom() {
                for dx in 0..2 {
                    if let Some(buf_cell) = f.buffer_mut().cell_mut((x + dx, y)) {
                        buf_cell.set_symbol("█");
                        buf_cell.set_fg(color);
                    }
                }
            }
        }
    }
}

fn render_players(f: &mut Frame, app: &mut App, area: Rect) {
    let roster = app.world.resource::<Roster>();
    let lines: Vec<Line> = roster
        .standings()
        .into_iter()
        .map(|player| {
            let text = format!(
                "{:<12} {:>6}  {}",
                player.name,
                player.score,
                player.rank.label()
            );
            if player.is_current {
                Line::styled(text, Style::default().fg(Color::Cyan))
            } else {
                Line::raw(text)
            }
        })
        .collect();

    let players_widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::TOP).title("Players"))
        .wrap(Wrap { trim: true });
    f.render_widget(players_widget, area);
}

/// Helper function to create a centered rect using up certain percentage of the available rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
