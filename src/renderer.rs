use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::entities::{AssetResolver, CELL_HEIGHT, RenderSurface, SpriteSize, sprites};
use crate::world::{Phase, World};

/// Size of the canvas the world coordinates are laid out on.
pub const CANVAS_WIDTH: f64 = 505.0;
pub const CANVAS_HEIGHT: f64 = 606.0;

/// Every sprite in the game is drawn on a tile of this size.
const TILE: SpriteSize = SpriteSize {
    width: 101.0,
    height: 171.0,
};
/// Transparent band at the top of each tile.
const TILE_TOP_MARGIN: f64 = 50.0;

/// Resolves sprite ids to tile dimensions and terminal glyphs.
#[derive(Debug, Default)]
pub struct SpriteAtlas;

impl SpriteAtlas {
    pub fn new() -> Self {
        Self
    }

    pub fn glyph(&self, sprite: &str) -> Option<(&'static str, Color)> {
        let glyph = match sprite {
            sprites::ENEMY_BUG => ("=#>", Color::Red),
            sprites::ROCK => ("o", Color::Gray),
            sprites::HEART => ("♥", Color::LightRed),
            sprites::GEM_BLUE => ("◆", Color::LightBlue),
            sprites::GEM_GREEN => ("◆", Color::LightGreen),
            sprites::GEM_ORANGE => ("◆", Color::Yellow),
            sprites::SELECTOR => ("[ ]", Color::Yellow),
            sprites::CHAR_CAT_GIRL => ("@", Color::Magenta),
            sprites::CHAR_HORN_GIRL => ("@", Color::LightMagenta),
            sprites::CHAR_BOY => ("@", Color::White),
            sprites::CHAR_PINK_GIRL => ("@", Color::LightRed),
            sprites::CHAR_PRINCESS_GIRL => ("@", Color::LightYellow),
            _ => return None,
        };
        Some(glyph)
    }
}

impl AssetResolver for SpriteAtlas {
    fn size(&self, sprite: &str) -> Option<SpriteSize> {
        self.glyph(sprite).map(|_| TILE)
    }
}

/// Draws sprites as glyphs into a terminal buffer, scaling canvas
/// coordinates onto `area`.
pub struct TerminalSurface<'a> {
    buffer: &'a mut Buffer,
    area: Rect,
    atlas: &'a SpriteAtlas,
}

impl<'a> TerminalSurface<'a> {
    pub fn new(buffer: &'a mut Buffer, area: Rect, atlas: &'a SpriteAtlas) -> Self {
        Self {
            buffer,
            area,
            atlas,
        }
    }

    /// Map a canvas point to a terminal cell inside the area.
    fn cell(&self, x: f64, y: f64) -> Option<(u16, u16)> {
        if x < 0.0 || y < 0.0 || x >= CANVAS_WIDTH || y >= CANVAS_HEIGHT {
            return None;
        }
        let col = (x / CANVAS_WIDTH * self.area.width as f64) as u16;
        let row = (y / CANVAS_HEIGHT * self.area.height as f64) as u16;
        Some((self.area.x + col, self.area.y + row))
    }

    fn put(&mut self, sprite: &str, center_x: f64, center_y: f64) {
        let Some((text, color)) = self.atlas.glyph(sprite) else {
            return;
        };
        let Some((col, row)) = self.cell(center_x, center_y) else {
            return;
        };
        let half = text.chars().count() as u16 / 2;
        let col = col.saturating_sub(half).max(self.area.x);
        let max_width = (self.area.x + self.area.width).saturating_sub(col) as usize;
        self.buffer.set_stringn(
            col,
            row,
            text,
            max_width,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        );
    }
}

impl RenderSurface for TerminalSurface<'_> {
    fn draw(&mut self, sprite: &str, x: f64, y: f64) {
        let size = self.atlas.size(sprite).unwrap_or(TILE);
        // Sprite content sits in the lower part of the tile
        let center_y = y + TILE_TOP_MARGIN + (size.height - TILE_TOP_MARGIN) * 0.4;
        self.put(sprite, x + size.width / 2.0, center_y);
    }

    fn draw_scaled(&mut self, sprite: &str, x: f64, y: f64, width: f64, height: f64) {
        self.put(sprite, x + width / 2.0, y + height / 2.0);
    }
}

/// Handles all rendering responsibilities for the game
pub struct GameRenderer {
    atlas: SpriteAtlas,
}

impl Default for GameRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl GameRenderer {
    pub fn new() -> Self {
        Self {
            atlas: SpriteAtlas::new(),
        }
    }

    pub fn render(&self, frame: &mut Frame, world: &World) {
        let area = frame.area();
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Gem Crossing ")
            .border_style(Style::default().fg(Color::DarkGray));
        let field = block.inner(Rect {
            height: area.height.saturating_sub(1),
            ..area
        });
        frame.render_widget(block, Rect {
            height: area.height.saturating_sub(1),
            ..area
        });

        self.render_field(frame.buffer_mut(), field);
        let mut surface = TerminalSurface::new(frame.buffer_mut(), field, &self.atlas);
        world.render(&mut surface, &self.atlas);

        self.render_status(frame, world, area);
        if world.phase() == Phase::GameOver {
            self.render_game_over(frame, field);
        }
    }

    /// Water on top, three stone lanes, two grass rows.
    fn render_field(&self, buffer: &mut Buffer, field: Rect) {
        for row in 0..field.height {
            let canvas_y = (row as f64 + 0.5) / field.height as f64 * CANVAS_HEIGHT;
            let tile_row = ((canvas_y - TILE_TOP_MARGIN) / CELL_HEIGHT).floor();
            let color = match tile_row as i32 {
                i32::MIN..=0 => Color::Blue,
                1..=3 => Color::DarkGray,
                _ => Color::Green,
            };
            let line = Rect {
                x: field.x,
                y: field.y + row,
                width: field.width,
                height: 1,
            };
            buffer.set_style(line, Style::default().bg(color));
        }
    }

    fn render_status(&self, frame: &mut Frame, world: &World, area: Rect) {
        let status = match (world.phase(), world.player()) {
            (Phase::Selecting, _) | (_, None) => Line::from(vec![Span::styled(
                "Choose your character  [←/→: Pick] [Enter: Start] [Q: Quit]",
                Style::default().fg(Color::DarkGray),
            )]),
            (_, Some(player)) => Line::from(vec![
                Span::styled("Lives: ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    format!("{}", player.lives()),
                    Style::default()
                        .fg(Color::LightRed)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled("  Gems: ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    format!("{}", player.gems().len()),
                    Style::default()
                        .fg(Color::LightGreen)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    "  [Arrows: Move] [A/S/D: Throw] [Q: Quit]",
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
        };

        let status_area = Rect {
            x: area.x + 1,
            y: area.y + area.height.saturating_sub(1),
            width: area.width.saturating_sub(2),
            height: 1,
        };
        frame.render_widget(Paragraph::new(status).centered(), status_area);
    }

    fn render_game_over(&self, frame: &mut Frame, field: Rect) {
        let text = vec![
            Line::from(""),
            Line::from("GAME OVER").centered().bold().red(),
            Line::from(""),
            Line::from("Press Q to quit").centered().white(),
        ];
        let width = 30.min(field.width);
        let height = 6.min(field.height);
        let popup = Rect {
            x: field.x + (field.width - width) / 2,
            y: field.y + (field.height - height) / 2,
            width,
            height,
        };
        frame.render_widget(
            Paragraph::new(text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Red)),
                )
                .alignment(Alignment::Center),
            popup,
        );
    }
}
