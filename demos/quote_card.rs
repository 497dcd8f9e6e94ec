//! End-to-end card generation using whatever fonts the system provides.
//!
//! Writes a synthesized background plus the generated cards into `debug/`.

use tanzaku::{FontProvider, QuoteGenerator, TemplateStore};

const CANVAS_SIZE: u32 = 1080;
const TOP_COLOR: [u8; 3] = [0x1C, 0x1B, 0x1A];
const BOTTOM_COLOR: [u8; 3] = [0x2A, 0x29, 0x28];

fn main() {
    // 1. Synthesize a background so the demo needs no bundled assets
    std::fs::create_dir_all("debug/templates").expect("Failed to create debug directory");
    let mut background = image::RgbaImage::new(CANVAS_SIZE, CANVAS_SIZE);
    for (_, y, pixel) in background.enumerate_pixels_mut() {
        let t = y as f32 / (CANVAS_SIZE - 1) as f32;
        let mix = |top: u8, bottom: u8| {
            (top as f32 + (bottom as f32 - top as f32) * t).round() as u8
        };
        *pixel = image::Rgba([
            mix(TOP_COLOR[0], BOTTOM_COLOR[0]),
            mix(TOP_COLOR[1], BOTTOM_COLOR[1]),
            mix(TOP_COLOR[2], BOTTOM_COLOR[2]),
            255,
        ]);
    }
    background
        .save("debug/templates/theme-01.png")
        .expect("Failed to save the background");

    // 2. Register fonts
    let mut fonts = FontProvider::new();
    fonts.load_system_fonts();
    assert!(
        !fonts.is_empty(),
        "No system fonts found; this demo needs at least one installed font"
    );
    println!("Loaded {} font face(s)", fonts.len());

    // 3. Build the generator over the synthesized template
    let templates = TemplateStore::builtin().with_assets_dir("debug/templates");
    let generator =
        QuoteGenerator::new(fonts, templates).expect("Failed to build the quote generator");
    let keys: Vec<&str> = generator.templates().keys().collect();
    println!("Available templates: {}", keys.join(", "));

    // 4. Generate one image per segment
    let text = "The only way to do **great work** is to love what you do. \
                --- Stay hungry. Stay **foolish**.";
    let start = std::time::Instant::now();
    let images = generator
        .generate(text, "template1")
        .expect("Image generation failed");
    println!(
        "Generated {} image(s) in {:.2?}",
        images.len(),
        start.elapsed()
    );

    // 5. Save the results
    for (index, card) in images.iter().enumerate() {
        let path = format!("debug/quote_card_{:02}.png", index + 1);
        std::fs::write(&path, &card.data).expect("Failed to save the card");
        println!("Saved {}x{} card to {}", card.width, card.height, path);
    }
}
