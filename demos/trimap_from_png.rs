use std::env;

use trimap_ops::{
    FloodFillOptions, MorphologyVariant, ReferenceColor, TrimapConfig, TrimapExt, TrimapOptions,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 5 || args.len() > 6 {
        eprintln!(
            "Usage: {} <input_image> <threshold> <radius> <output_trimap> [naive]",
            args[0]
        );
        eprintln!("Example: {} photo.png 16 30 trimap.png", args[0]);
        std::process::exit(1);
    }

    let input_path = &args[1];
    let threshold: u8 = args[2].parse().map_err(|_| "Invalid threshold")?;
    let radius: u32 = args[3].parse().map_err(|_| "Invalid radius")?;
    let output_path = &args[4];
    let variant = if args.get(5).map(String::as_str) == Some("naive") {
        MorphologyVariant::Naive
    } else {
        MorphologyVariant::Separable
    };

    // Decode to RGBA8 regardless of the source layout
    let image = image::open(input_path)?.to_rgba8();
    println!("Processing image: {}x{}", image.width(), image.height());

    let config = TrimapConfig::default()
        .with_flood_fill(
            FloodFillOptions::default()
                .with_threshold(threshold)
                .with_reference(ReferenceColor::default()),
        )
        .with_trimap(TrimapOptions::new(radius).with_variant(variant));
    let result = image.generate_trimap(&config)?;

    let counts = result.trimap.counts();
    println!(
        "background: {}, unknown: {}, foreground: {}",
        counts.background, counts.unknown, counts.foreground
    );
    if result.trimap.is_degenerate() {
        eprintln!("Warning: no foreground or unknown pixels; check the threshold");
    }

    result.trimap.to_luma().save(output_path)?;
    println!("Trimap (radius={}, {:?}) saved to: {}", radius, variant, output_path);

    Ok(())
}
