use ascii_huffman::HuffmanCodec;
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dir = std::env::temp_dir().join("ascii_huffman_demo");
    std::fs::create_dir_all(&dir)?;
    let source = dir.join("sample.txt");
    let encoded = dir.join("sample.huff");
    let decoded = dir.join("decompressed.txt");

    let sample_text = "Hello, world! This is a sample text for Huffman compression. \
                      The quick brown fox jumps over the lazy dog. \
                      Huffman encoding is a greedy algorithm that builds optimal prefix codes.";
    std::fs::write(&source, sample_text)?;
    println!("Created sample file: {} bytes", sample_text.len());

    // the decoder rebuilds its tree from the same source text
    let codec = HuffmanCodec::from_file(&source)?;
    codec.encode_file(&source, &encoded)?;

    let compressed_size = std::fs::metadata(&encoded)?.len();
    println!(
        "Compressed to: {} bytes ({:.1}% of original)",
        compressed_size,
        compressed_size as f64 / sample_text.len() as f64 * 100.0
    );

    codec.decode_file(&encoded, &decoded)?;
    let decompressed_text = std::fs::read_to_string(&decoded)?;

    if sample_text != decompressed_text {
        return Err("Decompression verification failed".into());
    }
    println!("Decompression successful, data matches exactly.");

    cleanup(&dir)?;
    Ok(())
}

fn cleanup(dir: &Path) -> std::io::Result<()> {
    std::fs::remove_dir_all(dir)
}
