/// Basic example: Convert a simple test image to line art and dots
///
/// This creates a test image with some basic shapes and renders it with both
/// line presets and the dot renderer
use image::{GrayImage, Luma};
use lineart_rendr::{DotConfig, LuminosityField, RenderConfig, render_dots, render_lines};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Line-art Renderer - Basic Example");
    println!("=================================\n");

    // Create a 320x240 test image: horizontal gradient with a bright disc
    let width = 320;
    let height = 240;
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;
    let radius = 70.0;

    let img = GrayImage::from_fn(width, height, |x, y| {
        let dx = x as f32 - center_x;
        let dy = y as f32 - center_y;
        if (dx * dx + dy * dy).sqrt() < radius {
            Luma([240])
        } else {
            Luma([(x * 255 / width) as u8])
        }
    });
    img.save("basic_input.png")?;
    println!("Created test image: {}x{}", width, height);

    let source = LuminosityField::from_luma(img)?;

    let preset_a = RenderConfig {
        output_height: 800,
        density: 50,
        ..RenderConfig::preset_a()
    };
    let preset_b = RenderConfig {
        output_height: 800,
        density: 64,
        ..RenderConfig::preset_b()
    };
    let dots = DotConfig {
        density: 60,
        ..Default::default()
    };

    for (name, config) in [("a", &preset_a), ("b", &preset_b)] {
        println!(
            "Preset {name}: {} bands, thickness {}, angles {}..{}",
            config.density, config.thickness, config.angle_range.min, config.angle_range.max
        );
        let output = render_lines(&source, config)?;
        output.save(format!("basic_lines_{name}.png"))?;
        println!("✓ Saved basic_lines_{name}.png ({}x{})", output.width(), output.height());
    }

    let output = render_dots(&source, &dots)?;
    output.save("basic_dots.png")?;
    println!("✓ Saved basic_dots.png ({}x{})", output.width(), output.height());

    println!("\nLine-art conversion complete!");
    Ok(())
}
