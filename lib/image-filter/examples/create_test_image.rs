//! Writes a sample photo-like image for the filter demos.
//! Usage: create_test_image [output, default data/test.png]

use image::{Rgb, RgbImage};
use std::path::PathBuf;

const WIDTH: u32 = 640;
const HEIGHT: u32 = 480;

fn main() -> anyhow::Result<()> {
    let output = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data/test.png"));

    // Sky-to-ground backdrop, a sun disc and a row of fence posts give the
    // edge and emboss filters hard boundaries to work on.
    let (cx, cy, radius) = (WIDTH as f32 * 0.7, HEIGHT as f32 * 0.3, 60.0f32);
    let horizon = HEIGHT * 2 / 3;

    let img = RgbImage::from_fn(WIDTH, HEIGHT, |x, y| {
        let (fx, fy) = (x as f32, y as f32);

        if (fx - cx).powi(2) + (fy - cy).powi(2) <= radius * radius {
            return Rgb([250, 210, 90]);
        }

        if y >= horizon {
            if x % 48 < 10 && y < horizon + 70 {
                return Rgb([110, 70, 40]);
            }
            let shade = 160 - ((y - horizon) * 100 / (HEIGHT - horizon)) as u8;
            return Rgb([shade / 3, shade, shade / 4]);
        }

        let t = fy / horizon as f32;
        Rgb([(90.0 + 120.0 * t) as u8, (150.0 + 60.0 * t) as u8, (235.0 - 30.0 * t) as u8])
    });

    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }
    img.save(&output)?;
    println!("Created {}", output.display());

    Ok(())
}
