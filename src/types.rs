//! Core types shared across the application
//! This module contains pure data types with no external dependencies

/// Board dimensions (the grid is square and its side is even).
pub const GRID_SIZE: u8 = 16;
pub const CELL_COUNT: usize = (GRID_SIZE as usize) * (GRID_SIZE as usize);

/// Game timing constants (in milliseconds)
pub const TICK_MS: u32 = 16;

/// Animated move speed, in cells per second.
pub const MOVE_SPEED: f32 = 2.0;

/// Economy and turn constants
pub const STARTING_MONEY: i32 = 1000;
pub const BASE_INCOME: i32 = 200;
pub const BASE_MOVES_CAP: u32 = 2;

/// The board spans [-1, 1] in normalized world space on both horizontal axes.
pub const CELL_WORLD_SIZE: f32 = 2.0 / GRID_SIZE as f32;

/// Linear cell index for in-bounds coordinates.
#[inline]
pub fn cell_index(x: i16, y: i16) -> Option<usize> {
    if x < 0 || y < 0 || x >= GRID_SIZE as i16 || y >= GRID_SIZE as i16 {
        return None;
    }
    Some(x as usize + y as usize * GRID_SIZE as usize)
}

/// Inverse of [`cell_index`].
#[inline]
pub fn index_to_cell(index: usize) -> (u8, u8) {
    debug_assert!(index < CELL_COUNT);
    ((index % GRID_SIZE as usize) as u8, (index / GRID_SIZE as usize) as u8)
}

/// World-space center of a cell. The grid lies in the XZ plane.
#[inline]
pub fn cell_center(x: u8, y: u8) -> Vec3 {
    Vec3::new(
        -1.0 + CELL_WORLD_SIZE * x as f32 + CELL_WORLD_SIZE / 2.0,
        0.0,
        -1.0 + CELL_WORLD_SIZE * y as f32 + CELL_WORLD_SIZE / 2.0,
    )
}

/// The two sides of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Team {
    One,
    Two,
}

impl Team {
    pub fn opponent(&self) -> Team {
        match self {
            Team::One => Team::Two,
            Team::Two => Team::One,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Team::One => "PLAYER ONE",
            Team::Two => "PLAYER TWO",
        }
    }

    /// Index into per-player arrays.
    #[inline]
    pub fn ix(&self) -> usize {
        match self {
            Team::One => 0,
            Team::Two => 1,
        }
    }
}

/// Minimal 3-component vector for world transforms.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn distance(self, other: Vec3) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Linear interpolation, `t` in [0, 1].
    pub fn lerp(self, other: Vec3, t: f32) -> Vec3 {
        Vec3::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
            self.z + (other.z - self.z) * t,
        )
    }
}

/// World transform of an occupant, consumed by the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Heading around the vertical axis, radians.
    pub rotation_y: f32,
    pub scale: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::default(),
            rotation_y: 0.0,
            scale: 1.0 / GRID_SIZE as f32,
        }
    }
}
