use cachesim_lib::config::CacheConfig;
use cachesim_lib::config::Placement;
use cachesim_lib::config::WritePolicy;
use cachesim_lib::run_wrapper::run;
use cachesim_lib::run_wrapper::BLOCK_SIZES;
use cachesim_lib::run_wrapper::CACHE_SIZES;
use cachesim_lib::trace::read_trace_file;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let param_tokens: Vec<String> = std::env::args().collect();
    let trace_path =
        param_tokens.get(1).ok_or("You should specify exactly one trace file")?;
    let use_miss_rate = param_tokens.iter().any(|t| t == "--miss");

    let accesses = read_trace_file(trace_path)?;

    // Plot one line series per cache size; for a fixed cache size, vary the
    // block size. Direct-mapped with write-back is the reference setup.
    let mut data: Vec<Vec<(usize, f64)>> = vec![vec![]; CACHE_SIZES.len()];
    let mut y_max: f64 = 0.;
    for (i, cache_size) in CACHE_SIZES.iter().enumerate() {
        for block_size in BLOCK_SIZES.iter() {
            let config = CacheConfig::make(
                *cache_size,
                *block_size,
                Placement::DirectMapped,
                WritePolicy::WriteBack,
            )?;
            let stats = run(&config, &accesses)?;
            let rate = if use_miss_rate {
                stats.miss_rate()
            } else {
                stats.hit_rate()
            }
            .unwrap_or(0.);
            data[i].push((*block_size, rate));
            y_max = y_max.max(rate);
        }
    }

    // Plot the data
    use plotters::prelude::*;

    let trace_base_name = String::from(trace_path.split('/').last().unwrap());
    let rate_label = if use_miss_rate { "Miss rate" } else { "Hit rate" };
    let plot_title =
        format!("Effect of block size ({}): {}", rate_label, trace_base_name);
    let output_path = format!("eval/block_eval_{}.svg", trace_base_name);

    let root =
        SVGBackend::new(output_path.as_str(), (800, 600)).into_drawing_area();
    root.fill(&WHITE).unwrap();

    let mut ctx = ChartBuilder::on(&root)
        .caption(plot_title.as_str(), ("sans-serif", 40).into_font())
        .margin(5)
        .x_label_area_size(40)
        .y_label_area_size(40)
        .build_cartesian_2d(4..256, 0.0..y_max * 1.1)
        .unwrap();
    ctx.configure_mesh()
        .x_desc("Block size")
        .y_desc(rate_label)
        .draw()
        .unwrap();

    for (i, cache_size) in CACHE_SIZES.iter().enumerate() {
        let series = data[i].iter().map(|(x, y)| (*x as i32, *y));
        let label = format!("Cache size = {}", cache_size);
        let color = Palette99::pick(i).to_rgba();
        ctx.draw_series(LineSeries::new(series, color))
            .unwrap()
            .label(label)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color)
            });
    }

    ctx.configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .unwrap();

    Ok(())
}
