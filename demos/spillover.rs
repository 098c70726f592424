use spillover::prelude::*;

/// Two lakes behind a 9 m sill, eroded by the slope-depth-velocity law.  Writes the series to csv
/// and draws both figures.
fn main() -> Result<(), SpillError> {
    pretty_env_logger::init();

    let params = Params::spillover();
    let out = simulate(&params)?;

    let s = &out.series;
    println!("peak discharge: {:.2} m³/s", s.peak_discharge(0));
    println!("sill lowered by: {:.3} m", s.total_drop(0));
    println!("volume moved: {:.0} m³", s.volume_transferred(0));
    println!("final levels: {:?}", out.levels);

    s.write_csv("spillover.csv")?;
    plot::levels(s, "spillover_levels.png")?;
    plot::flows(s, "spillover_flows.png")?;
    Ok(())
}
