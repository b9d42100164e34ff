use cachesim_lib::config::CacheConfig;
use cachesim_lib::config::WritePolicy;
use cachesim_lib::run_wrapper::run;
use cachesim_lib::run_wrapper::PLACEMENTS;
use cachesim_lib::trace::read_trace_file;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let param_tokens: Vec<String> = std::env::args().collect();
    let trace_path =
        param_tokens.get(1).ok_or("You should specify exactly one trace file")?;
    let use_miss_rate = param_tokens.iter().any(|t| t == "--miss");

    let accesses = read_trace_file(trace_path)?;

    // Fixed 1 KiB cache with 8-byte blocks, write-back; vary the placement
    let mut labels = Vec::new();
    let mut rates = Vec::new();
    for placement in PLACEMENTS {
        let config =
            CacheConfig::make(1024, 8, placement, WritePolicy::WriteBack)?;
        let stats = run(&config, &accesses)?;
        let rate = if use_miss_rate {
            stats.miss_rate()
        } else {
            stats.hit_rate()
        }
        .unwrap_or(0.);
        labels.push(placement.label());
        rates.push(rate);
    }

    // Plot the data as one bar per placement
    use plotters::prelude::*;

    let trace_base_name = String::from(trace_path.split('/').last().unwrap());
    let rate_label = if use_miss_rate { "Miss rate" } else { "Hit rate" };
    let plot_title = format!(
        "Effect of associativity ({}): {}",
        rate_label, trace_base_name
    );
    let output_path = format!("eval/assoc_eval_{}.svg", trace_base_name);

    let y_max = rates.iter().cloned().fold(0., f64::max);

    let root =
        SVGBackend::new(output_path.as_str(), (800, 600)).into_drawing_area();
    root.fill(&WHITE).unwrap();

    let mut ctx = ChartBuilder::on(&root)
        .caption(plot_title.as_str(), ("sans-serif", 40).into_font())
        .margin(5)
        .x_label_area_size(40)
        .y_label_area_size(40)
        .build_cartesian_2d(
            (0u32..rates.len() as u32).into_segmented(),
            0.0..y_max * 1.1,
        )
        .unwrap();
    ctx.configure_mesh()
        .x_desc("Placement")
        .y_desc(rate_label)
        .x_label_formatter(&|x| match x {
            SegmentValue::CenterOf(i) => {
                labels.get(*i as usize).cloned().unwrap_or_default()
            }
            _ => String::new(),
        })
        .draw()
        .unwrap();

    ctx.draw_series(
        Histogram::vertical(&ctx)
            .style(BLUE.mix(0.6).filled())
            .margin(30)
            .data(rates.iter().enumerate().map(|(i, rate)| (i as u32, *rate))),
    )
    .unwrap();

    Ok(())
}
