use cachesim_lib::generate::write_associativity_trace;
use cachesim_lib::generate::write_block_size_trace;
use std::env;
use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

fn main() -> Result<(), Box<dyn Error>> {
    let out_dir = env::args().nth(1).unwrap_or_else(|| ".".to_string());

    let block_path = Path::new(&out_dir).join("block.trace");
    eprintln!("Generating {}...", block_path.display());
    write_block_size_trace(&mut BufWriter::new(File::create(&block_path)?))?;

    let assoc_path = Path::new(&out_dir).join("associative.trace");
    eprintln!("Generating {}...", assoc_path.display());
    write_associativity_trace(&mut BufWriter::new(File::create(
        &assoc_path,
    )?))?;

    eprintln!("Done! File generation complete.");
    Ok(())
}
