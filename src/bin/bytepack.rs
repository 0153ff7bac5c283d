use std::{env, error::Error, ffi::OsString};

use bytepack::{huffman, lz77};

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<OsString> = env::args_os().collect();

    if args.len() < 4 {
        println!(
            "Usage: {} hc|hd|lc|ld input output",
            args[0].to_string_lossy()
        );
        println!("  hc/hd: huffman compress/decompress");
        println!("  lc/ld: lz77 compress/decompress");
        return Ok(());
    }

    let mode = &args[1];
    let input = &args[2];
    let output = &args[3];

    match mode.to_str() {
        Some("hc") => huffman::compress_file(input, output)?,
        Some("hd") => huffman::decompress_file(input, output)?,
        Some("lc") => lz77::compress_file(input, output)?,
        Some("ld") => lz77::decompress_file(input, output)?,
        _ => {
            println!("Invalid mode {}", mode.to_string_lossy());
            return Ok(());
        }
    }

    let in_size = std::fs::metadata(input)?.len();
    let out_size = std::fs::metadata(output)?.len();
    println!(
        "{} -> {}: {} bytes -> {} bytes",
        args[2].to_string_lossy(),
        args[3].to_string_lossy(),
        in_size,
        out_size
    );

    Ok(())
}
