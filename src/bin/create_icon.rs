//! Writes the application icon to `todoapp.png` in the working directory.

use std::error::Error;
use std::path::Path;
use todoapp::icon;

fn main() -> Result<(), Box<dyn Error>> {
    icon::save_icon(Path::new(icon::OUTPUT_NAME))?;
    println!("Icon created: {}", icon::OUTPUT_NAME);
    Ok(())
}
