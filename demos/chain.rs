use spillover::prelude::*;

/// Four lakes in a line.  The third sill stands above both of its lakes, so water reaches the
/// last lake only once the third lake has filled past it.
fn main() -> Result<(), SpillError> {
    pretty_env_logger::init();

    let params = Params::new()
        .reservoir(5e6, 12.0)
        .reservoir(1e6, 8.0)
        .reservoir(0.5e6, 4.0)
        .reservoir(2e6, 5.0)
        .connection(ConnectionParams::new(800.0, 10.0).erosion(ErosionModel::shear_power(2e-8)))
        .connection(ConnectionParams::new(1200.0, 7.0).erosion(ErosionModel::shear_power(2e-8)))
        .connection(
            ConnectionParams::new(600.0, 6.0)
                .erosion(ErosionModel::shields(1e-9, 0.0005))
                .width_factor(8.0),
        )
        .total_time(5.0 * 86400.0)
        .step_size(30.0);

    let out = simulate(&params)?;
    let s = &out.series;
    for j in 0..s.connections() {
        println!(
            "sill {}: peak {:.2} m³/s, lowered {:.3} m, net volume {:.0} m³",
            j + 1,
            s.peak_discharge(j),
            s.total_drop(j),
            s.volume_transferred(j)
        );
    }
    println!("final levels: {:?}", out.levels);

    s.write_csv("chain.csv")?;
    plot::levels(s, "chain_levels.png")?;
    plot::flows(s, "chain_flows.png")?;
    Ok(())
}
