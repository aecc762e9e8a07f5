/// Sprite identifiers understood by the asset resolver.
pub mod sprites {
    pub const ENEMY_BUG: &str = "images/enemy-bug.png";
    pub const ROCK: &str = "images/Rock.png";
    pub const HEART: &str = "images/Heart.png";
    pub const GEM_BLUE: &str = "images/GemBlue.png";
    pub const GEM_GREEN: &str = "images/GemGreen.png";
    pub const GEM_ORANGE: &str = "images/GemOrange.png";
    pub const SELECTOR: &str = "images/Selector.png";
    pub const CHAR_CAT_GIRL: &str = "images/char-cat-girl.png";
    pub const CHAR_HORN_GIRL: &str = "images/char-horn-girl.png";
    pub const CHAR_BOY: &str = "images/char-boy.png";
    pub const CHAR_PINK_GIRL: &str = "images/char-pink-girl.png";
    pub const CHAR_PRINCESS_GIRL: &str = "images/char-princess-girl.png";
}

/// Width of one lane column in world units.
pub const CELL_WIDTH: f64 = 101.0;
/// Height of one lane row in world units.
pub const CELL_HEIGHT: f64 = 83.0;
/// Horizontal extent of the playfield.
pub const FIELD_WIDTH: f64 = 505.0;
/// Vertical extent of the playfield.
pub const FIELD_HEIGHT: f64 = 475.0;

/// The y positions of the three stone lanes enemies and bonuses live on.
pub const LANES: [f64; 3] = [60.0, 143.0, 226.0];

/// Pixel dimensions of a resolved sprite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteSize {
    pub width: f64,
    pub height: f64,
}

/// Anything that can draw sprites. The core only ever writes to it.
pub trait RenderSurface {
    fn draw(&mut self, sprite: &str, x: f64, y: f64);

    fn draw_scaled(&mut self, sprite: &str, x: f64, y: f64, width: f64, height: f64);
}

/// Maps sprite identifiers to their pixel dimensions.
pub trait AssetResolver {
    fn size(&self, sprite: &str) -> Option<SpriteSize>;
}

/// Position and sprite shared by every drawable object in the game.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub x: f64,
    pub y: f64,
    sprite: &'static str,
}

impl Entity {
    pub fn new(x: f64, y: f64, sprite: &'static str) -> Self {
        assert!(!sprite.is_empty(), "entity sprite must not be empty");
        Self { x, y, sprite }
    }

    pub fn sprite(&self) -> &'static str {
        self.sprite
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Strictly inside the playfield on both axes.
    pub fn is_inside_field(&self) -> bool {
        self.x > 0.0 && self.x < FIELD_WIDTH && self.y > 0.0 && self.y < FIELD_HEIGHT
    }

    /// Draw the sprite at the entity position.
    pub fn render(&self, surface: &mut dyn RenderSurface) {
        surface.draw(self.sprite, self.x, self.y);
    }
}

/// Per-frame behaviour of a game object.
///
/// `update` defaults to doing nothing, `render` defaults to drawing the
/// entity sprite where it stands.
pub trait GameObject {
    fn entity(&self) -> &Entity;

    fn update(&mut self, _dt: f64) {}

    fn render(&self, surface: &mut dyn RenderSurface, _assets: &dyn AssetResolver) {
        self.entity().render(surface);
    }
}
