//! Solid-color wallpapers.

use xlos_render::Color;

/// The fixed wallpaper list, as 8-bit RGB.
pub const WALLPAPERS: [(u8, u8, u8); 5] = [
    (18, 22, 36),
    (38, 42, 60),
    (255, 204, 0),
    (10, 40, 20),
    (60, 10, 30),
];

/// Number of available wallpapers.
pub const WALLPAPER_COUNT: usize = WALLPAPERS.len();

/// Wallpaper color for `index`. Out-of-range indices wrap around.
pub fn wallpaper(index: usize) -> Color {
    let (r, g, b) = WALLPAPERS[index % WALLPAPER_COUNT];
    Color::from_rgb8(r, g, b)
}
