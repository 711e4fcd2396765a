//! Convert a kanal/marle/sarsai triple to acres
//! Usage: cargo run --bin convert_area -- <kanal> [marle] [sarsai]

use lam::area::{format_land_area, TraditionalArea};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        eprintln!("Usage: convert_area <kanal> [marle] [sarsai]");
        std::process::exit(2);
    }

    let area = TraditionalArea::from_components(args.first(), args.get(1), args.get(2));
    let display = format_land_area(area.kanal, area.marle, area.sarsai);

    println!("Recorded:   {}", display.traditional_formatted);
    println!("Sarsai:     {}", area.total_sarsai());
    println!("Acres:      {}", display.acres_formatted);
    println!("Normalized: {}", display.normalized);
}
