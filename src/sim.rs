use cachesim_lib::run_wrapper::result_line;
use cachesim_lib::run_wrapper::sweep;
use cachesim_lib::run_wrapper::write_results;
use cachesim_lib::trace::read_trace_file;
use std::env;
use std::error::Error;
use std::fs::File;

fn main() -> Result<(), Box<dyn Error>> {
    let mut args = env::args().skip(1);
    let mut trace_path: Option<String> = None;
    let mut result_path: Option<String> = None;
    let mut verbose = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-v" => verbose = true,
            _ if arg.starts_with('-') => {
                return Err(format!("Unknown parameter: {}", arg).into())
            }
            _ if trace_path.is_none() => trace_path = Some(arg),
            _ if result_path.is_none() => result_path = Some(arg),
            _ => return Err(format!("Unexpected argument: {}", arg).into()),
        }
    }

    let trace_path =
        trace_path.ok_or("You should specify exactly one trace file")?;
    let result_path =
        result_path.unwrap_or_else(|| format!("{}.result.csv", trace_path));

    let accesses = read_trace_file(&trace_path)?;
    eprintln!(
        "Running simulation with trace file {} ({} accesses)...",
        trace_path,
        accesses.len()
    );

    let results = sweep(&accesses)?;
    if verbose {
        for (config, stats) in &results {
            eprintln!("[RESULT] {}", result_line(config, stats));
        }
    }

    write_results(File::create(&result_path)?, &results)?;
    eprintln!("Simulation complete. Results saved to {}", result_path);

    Ok(())
}
