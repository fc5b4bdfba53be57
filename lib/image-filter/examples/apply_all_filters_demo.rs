//! Runs every filter on data/test.png at a few intensities
//! Run `create_test_image` first.

use image_filter::{FilterKind, try_apply_filter};
use std::path::Path;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let output_dir = Path::new("tmp");
    std::fs::create_dir_all(output_dir)?;

    let img_path = Path::new("data/test.png");

    for kind in FilterKind::all() {
        for intensity in [0.0, 0.5, 1.0] {
            let name = format!("filter{}_{:.1}.png", kind.id(), intensity);
            try_apply_filter(*kind, img_path, output_dir.join(&name), intensity)?;
            println!("✓ {} ({intensity}) -> tmp/{name}", kind.name());
        }
    }

    Ok(())
}
