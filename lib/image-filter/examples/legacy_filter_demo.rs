//! Calls the numbered C entry points the way a host application would
//! Usage: legacy_filter_demo <filter 1-12> <input> <output> <intensity>

use image_filter::ffi::apply_filter_checked;
use std::ffi::CString;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 5 {
        anyhow::bail!("usage: {} <filter 1-12> <input> <output> <intensity>", args[0]);
    }

    let filter_id: u8 = args[1].parse()?;
    let input = CString::new(args[2].as_str())?;
    let output = CString::new(args[3].as_str())?;
    let intensity: f32 = args[4].parse()?;

    let status = unsafe { apply_filter_checked(filter_id, input.as_ptr(), output.as_ptr(), intensity) };
    println!("status: {status}");

    Ok(())
}
