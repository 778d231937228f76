//! ThumbHash Demo - Encode and decode example
//!
//! Run with: RUST_LOG=debug cargo run --example demo

use thumbhash_core::{approximate_aspect_ratio, average_rgba, decode, encode};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    println!("=== ThumbHash Demo ===\n");

    // Create a 60x40 image: a red-to-green gradient with a transparent
    // right-hand border.
    let width = 60;
    let height = 40;
    let mut pixels = Vec::with_capacity(width * height * 4);

    for y in 0..height {
        for x in 0..width {
            let r = ((1.0 - x as f32 / (width - 1) as f32) * 255.0) as u8;
            let g = ((y as f32 / (height - 1) as f32) * 255.0) as u8;
            let a = if x < width - 8 { 255 } else { 0 };
            pixels.extend_from_slice(&[r, g, 96, a]);
        }
    }

    println!("1. Created a {}x{} RGBA image", width, height);
    println!("   Pixels (first 8 bytes): {:?}...\n", &pixels[..8]);

    // Encode to ThumbHash
    let hash = encode(width as u32, height as u32, &pixels).expect("Failed to encode");

    let hex: String = hash.iter().map(|b| format!("{b:02x}")).collect();
    println!("2. Encoded to ThumbHash: {}", hex);
    println!("   Hash length: {} bytes\n", hash.len());

    // Header-only queries
    let avg = average_rgba(&hash).expect("Failed to read average color");
    let ratio = approximate_aspect_ratio(&hash).expect("Failed to read aspect ratio");
    println!(
        "3. Average color: ({:.3}, {:.3}, {:.3}, {:.3})",
        avg.r, avg.g, avg.b, avg.a
    );
    println!("   Approximate aspect ratio: {:.3}\n", ratio);

    // Decode back to pixels
    let image = decode(&hash).expect("Failed to decode");
    let rgba = &image.rgba;

    println!(
        "4. Decoded to {}x{} image ({} bytes)",
        image.width,
        image.height,
        rgba.len()
    );
    println!(
        "   First pixel RGBA: ({}, {}, {}, {})",
        rgba[0], rgba[1], rgba[2], rgba[3]
    );
    println!(
        "   Last pixel RGBA: ({}, {}, {}, {})",
        rgba[rgba.len() - 4],
        rgba[rgba.len() - 3],
        rgba[rgba.len() - 2],
        rgba[rgba.len() - 1]
    );

    println!("\n=== Demo Complete ===");
}
