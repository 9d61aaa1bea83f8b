//! Renders the match into a framebuffer: the grid, the cursor, target
//! highlights and the side panel with wallets and the action menu.

use crate::core::{Game, Occupant, Phase, UnitKind};
use crate::term::fb::{FrameBuffer, Glyph, Rgb};
use crate::types::{Team, Vec3, CELL_WORLD_SIZE, GRID_SIZE};

const WATER: Rgb = Rgb::new(8, 36, 77);
const WATER_ALT: Rgb = Rgb::new(10, 42, 88);
const HIGHLIGHT: Rgb = Rgb::new(96, 128, 24);
const SELECTED: Rgb = Rgb::new(179, 230, 51);
const CURSOR: Rgb = Rgb::new(230, 230, 230);
const TEAM_ONE: Rgb = Rgb::new(26, 179, 26);
const TEAM_TWO: Rgb = Rgb::new(179, 26, 179);
const NEUTRAL: Rgb = Rgb::new(204, 204, 178);
const PANEL_FG: Rgb = Rgb::new(220, 220, 220);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);
const DIM_FG: Rgb = Rgb::new(130, 130, 130);

/// Each board cell spans two terminal columns.
const CELL_W: u16 = 2;
const BOARD_X: u16 = 1;
const BOARD_Y: u16 = 1;
const PANEL_X: u16 = BOARD_X + GRID_SIZE as u16 * CELL_W + 2;

#[derive(Debug, Default)]
pub struct BoardView;

impl BoardView {
    pub fn render(
        &self,
        game: &Game,
        cursor: (u8, u8),
        status: Option<&str>,
        width: u16,
        height: u16,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(width, height);
        self.draw_board(game, cursor, &mut fb);
        self.draw_panel(game, status, &mut fb);
        if game.phase() == Phase::GameOver {
            self.draw_banner(game, &mut fb);
        }
        fb
    }

    fn draw_board(&self, game: &Game, cursor: (u8, u8), fb: &mut FrameBuffer) {
        for y in 0..GRID_SIZE {
            for x in 0..GRID_SIZE {
                let bg = self.cell_background(game, cursor, x, y);
                let tx = BOARD_X + x as u16 * CELL_W;
                let ty = BOARD_Y + y as u16;
                fb.set(tx, ty, Glyph::new(' ', PANEL_FG, bg));
                fb.set(tx + 1, ty, Glyph::new(' ', PANEL_FG, bg));
            }
        }
        // Units are drawn at the cell nearest their world transform, so
        // in-flight moves glide across the grid.
        for occupant in game.board().occupants() {
            self.draw_occupant(game, cursor, occupant, fb);
        }
    }

    fn cell_background(&self, game: &Game, cursor: (u8, u8), x: u8, y: u8) -> Rgb {
        if (x, y) == cursor {
            CURSOR
        } else if game.selected_cell() == Some((x, y)) {
            SELECTED
        } else if game.highlights().contains(x, y) {
            HIGHLIGHT
        } else if (x + y) % 2 == 0 {
            WATER
        } else {
            WATER_ALT
        }
    }

    fn draw_occupant(&self, game: &Game, cursor: (u8, u8), occupant: &Occupant, fb: &mut FrameBuffer) {
        let fg = match occupant.team {
            Some(Team::One) => TEAM_ONE,
            Some(Team::Two) => TEAM_TWO,
            None => NEUTRAL,
        };
        let ch = unit_glyph(occupant.kind);
        if occupant.is_large() {
            let (ax, ay) = occupant.anchor;
            for (cx, cy) in [(ax, ay), (ax + 1, ay), (ax, ay + 1), (ax + 1, ay + 1)] {
                let bg = self.cell_background(game, cursor, cx, cy);
                let tx = BOARD_X + cx as u16 * CELL_W;
                let ty = BOARD_Y + cy as u16;
                fb.set(tx, ty, Glyph::new(ch, fg, bg).bold());
                fb.set(tx + 1, ty, Glyph::new(ch, fg, bg).bold());
            }
        } else {
            let (cx, cy) = world_to_cell(occupant.transform.position);
            let bg = self.cell_background(game, cursor, cx, cy);
            let tx = BOARD_X + cx as u16 * CELL_W;
            let ty = BOARD_Y + cy as u16;
            fb.set(tx, ty, Glyph::new(ch, fg, bg).bold());
            fb.set(tx + 1, ty, Glyph::new(' ', fg, bg));
        }
    }

    fn draw_panel(&self, game: &Game, status: Option<&str>, fb: &mut FrameBuffer) {
        let x = PANEL_X;
        fb.put_str_bold(x, 1, "FLOTILLA", PANEL_FG, PANEL_BG);

        let turn = format!("TURN {}", game.turn());
        fb.put_str(x, 3, &turn, PANEL_FG, PANEL_BG);
        let active = game.active_player();
        fb.put_str_bold(x, 4, active.as_str(), team_color(active), PANEL_BG);

        for (row, team) in [(6, Team::One), (7, Team::Two)] {
            let line = format!(
                "{:<10} {:>5}$  moves {}/{}",
                team.as_str(),
                game.money(team),
                game.moves_left(team),
                game.moves_cap(team),
            );
            fb.put_str(x, row, &line, team_color(team), PANEL_BG);
        }

        if let Some(occupant) = game.selected_occupant() {
            fb.put_str_bold(x, 9, occupant.kind.name(), PANEL_FG, PANEL_BG);
            if let Some((hp, max)) = occupant.health_display() {
                let line = format!("HP {}/{}", hp, max);
                fb.put_str(x, 10, &line, PANEL_FG, PANEL_BG);
            }
            let pending = game.pending_action();
            for (i, action) in game.action_menu().iter().enumerate() {
                let marker = if pending.as_ref() == Some(action) { '>' } else { ' ' };
                let line = format!("{}{} {} {}", marker, i + 1, action.name(), action.info_text());
                let affordable = action.price() <= game.money(active);
                let fg = if affordable { PANEL_FG } else { DIM_FG };
                fb.put_str(x, 11 + i as u16, &line, fg, PANEL_BG);
            }
        } else {
            fb.put_str(x, 9, "pick a unit", DIM_FG, PANEL_BG);
        }

        if let Some(status) = status {
            fb.put_str(x, 16, status, Rgb::new(230, 179, 26), PANEL_BG);
        }
        fb.put_str(
            x,
            18,
            "arrows move - enter pick - 1-4 act",
            DIM_FG,
            PANEL_BG,
        );
        fb.put_str(x, 19, "esc back - e end turn - q quit", DIM_FG, PANEL_BG);
    }

    fn draw_banner(&self, game: &Game, fb: &mut FrameBuffer) {
        if let Some(winner) = game.winner() {
            let text = format!("  {} WINS  ", winner.as_str());
            let x = BOARD_X + (GRID_SIZE as u16 * CELL_W).saturating_sub(text.len() as u16) / 2;
            let y = BOARD_Y + GRID_SIZE as u16 / 2;
            fb.put_str_bold(x, y, &text, PANEL_BG, team_color(winner));
        }
    }
}

fn team_color(team: Team) -> Rgb {
    match team {
        Team::One => TEAM_ONE,
        Team::Two => TEAM_TWO,
    }
}

fn unit_glyph(kind: UnitKind) -> char {
    match kind {
        UnitKind::Base | UnitKind::BaseUpgrade1 | UnitKind::BaseUpgrade2 => 'B',
        UnitKind::Submarine => 's',
        UnitKind::AircraftCarrier => 'c',
        UnitKind::AircraftCarrierUpgrade1 => 'C',
        UnitKind::Island => '^',
    }
}

/// Nearest grid cell to a world position, clamped to the board.
fn world_to_cell(position: Vec3) -> (u8, u8) {
    let to_axis = |v: f32| -> u8 {
        let cell = ((v + 1.0) / CELL_WORLD_SIZE - 0.5).round();
        cell.clamp(0.0, GRID_SIZE as f32 - 1.0) as u8
    };
    (to_axis(position.x), to_axis(position.z))
}
