use spillover::prelude::*;
use std::env;

/// Sand sill eroded under the Shields law.  Optional arguments override the grain size (m) and
/// the erosion coefficient, e.g. `cargo run --example grain_size -- 0.002 5e-9`.
fn main() -> Result<(), SpillError> {
    pretty_env_logger::init();

    let args: Vec<f64> = env::args().skip(1).filter_map(|x| x.parse().ok()).collect();
    let grain_size = args.get(0).cloned().unwrap_or(0.001);
    let coefficient = args.get(1).cloned().unwrap_or(1e-9);

    let mut params = Params::grain_size();
    params.connections[0].erosion = ErosionModel::shields(coefficient, grain_size);
    println!(
        "critical shear stress: {:.3} Pa",
        params.connections[0].erosion.critical_stress()
    );

    let out = simulate(&params)?;
    let s = &out.series;
    println!("peak discharge: {:.2} m³/s", s.peak_discharge(0));
    println!("sill lowered by: {:.4} m", s.total_drop(0));
    println!("final levels: {:?}", out.levels);

    s.write_csv("grain_size.csv")?;
    plot::levels(s, "grain_size_levels.png")?;
    plot::flows(s, "grain_size_flows.png")?;
    Ok(())
}
