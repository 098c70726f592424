use spillover::prelude::*;

fn pair(upper: f64, lower: f64, sill: f64) -> Params {
    Params::new()
        .reservoir(1e6, upper)
        .reservoir(1e6, lower)
        .connection(ConnectionParams::new(100.0, sill))
}

fn chain(erosion: f64) -> Params {
    Params::new()
        .reservoir(1e7, 10.0)
        .reservoir(1e6, 8.0)
        .reservoir(1e5, 4.0)
        .reservoir(2e5, 5.0)
        .connection(ConnectionParams::new(1000.0, 9.0).erosion(ErosionModel::product(erosion)))
        .connection(ConnectionParams::new(1000.0, 6.0).erosion(ErosionModel::product(erosion)))
        .connection(ConnectionParams::new(1000.0, 6.0).erosion(ErosionModel::product(erosion)))
        .total_time(86400.0)
        .step_size(10.0)
}

#[test]
fn upper_lake_drains_to_its_sill() {
    let params = pair(10.0, 0.0, 9.5).total_time(864_000.0).step_size(60.0);
    let out = simulate(&params).unwrap();
    let s = &out.series;

    for k in 0..s.steps() {
        assert_eq!(s.discharge[0][k] > 0.0, s.levels[0][k] > 9.5);
        let lost = (10.0 - s.levels[0][k]) * 1e6;
        let gained = s.levels[1][k] * 1e6;
        assert!((lost - gained).abs() < 1e-6 * lost.max(1.0));
        if k > 0 {
            assert!(s.levels[1][k] >= s.levels[1][k - 1]);
            assert!(s.discharge[0][k] <= s.discharge[0][k - 1]);
        }
    }
    assert!(s.discharge[0][0] > 0.0);
    assert!(s.discharge[0][s.steps() - 1] < 0.05 * s.discharge[0][0]);
    assert!(out.levels[0] >= 9.5);
    assert_eq!(out.thresholds[0], 9.5);
}

#[test]
fn sill_above_both_lakes_holds_still() {
    let mut params = pair(5.0, 3.0, 8.0).total_time(3600.0).steps(100);
    params.connections[0].erosion = ErosionModel::shear_power(1.0);
    let out = simulate(&params).unwrap();
    let s = &out.series;
    assert!(s.discharge[0].iter().all(|x| *x == 0.0));
    assert!(s.velocity[0].iter().all(|x| *x == 0.0));
    assert!(s.erosion_rate[0].iter().all(|x| *x == 0.0));
    assert!(s.threshold[0].iter().all(|x| *x == 8.0));
    assert!(s.levels[0].iter().all(|x| *x == 5.0));
    assert!(s.levels[1].iter().all(|x| *x == 3.0));
    assert_eq!(out.levels, vec![5.0, 3.0]);
}

#[test]
fn sill_gates_flow_from_a_higher_neighbour() {
    let out = simulate(&chain(0.0)).unwrap();
    let s = &out.series;
    let mut opened = false;
    for k in 0..s.steps() {
        if !opened && s.levels[2][k] <= 6.0 {
            assert_eq!(s.discharge[2][k], 0.0);
            assert_eq!(s.levels[3][k], 5.0);
        }
        if s.levels[2][k] > 6.0 && s.levels[2][k] > s.levels[3][k] {
            assert!(s.discharge[2][k] > 0.0);
            opened = true;
        }
    }
    assert!(opened);
}

#[test]
fn water_is_conserved_along_the_chain() {
    let params = chain(0.01);
    let areas: Vec<f64> = params.reservoirs.iter().map(|r| r.area).collect();
    let out = simulate(&params).unwrap();
    let s = &out.series;
    for k in 1..s.steps() {
        let changes: Vec<f64> = (0..areas.len())
            .map(|i| areas[i] * (s.levels[i][k] - s.levels[i][k - 1]))
            .collect();
        let net: f64 = changes.iter().sum();
        let scale: f64 = changes.iter().map(|x| x.abs()).sum();
        assert!(net.abs() <= 1e-9 * scale + 1e-6);
    }
}

#[test]
fn sills_never_rise() {
    let params = chain(0.01);
    let out = simulate(&params).unwrap();
    let s = &out.series;
    for j in 0..s.connections() {
        assert!(s.threshold[j][0] <= params.connections[j].initial_threshold);
        for k in 1..s.steps() {
            assert!(s.threshold[j][k] <= s.threshold[j][k - 1]);
        }
    }
    assert!(s.total_drop(0) > 0.0);
}

#[test]
fn inactive_connections_report_zeros() {
    let params = chain(0.01);
    let out = simulate(&params).unwrap();
    let s = &out.series;
    for j in 0..s.connections() {
        for k in 0..s.steps() {
            if s.discharge[j][k] == 0.0 {
                let before = if k == 0 {
                    params.connections[j].initial_threshold
                } else {
                    s.threshold[j][k - 1]
                };
                assert_eq!(s.velocity[j][k], 0.0);
                assert_eq!(s.erosion_rate[j][k], 0.0);
                assert_eq!(s.threshold[j][k], before);
            }
        }
    }
}

#[test]
fn stronger_erosion_cuts_deeper() {
    let base = Params::spillover().total_time(7200.0);
    let mut last = -1.0;
    for c in &[0.0, 0.001, 0.002, 0.005, 0.01] {
        let out = simulate(&base.clone().erosion_coefficient(*c)).unwrap();
        let drop = out.series.total_drop(0);
        assert!(drop >= last);
        last = drop;
    }
}

#[test]
fn identical_inputs_repeat_exactly() {
    let a = simulate(&chain(0.01)).unwrap();
    let b = simulate(&chain(0.01)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn parallel_sweep_matches_serial_runs() {
    let params = chain(0.0);
    let coefficients = [0.0, 0.002, 0.02];
    let scan = sweep::erosion_scan(&params, &coefficients).unwrap();
    for (i, c) in coefficients.iter().enumerate() {
        let out = simulate(&params.clone().erosion_coefficient(*c)).unwrap();
        for j in 0..3 {
            let row = scan[i * 3 + j];
            assert_eq!(row.total_drop, out.series.total_drop(j));
            assert_eq!(row.final_threshold, out.thresholds[j]);
        }
    }
}

#[test]
fn floor_holds_sill_at_lower_lake() {
    let mut params = Params::spillover().erosion_coefficient(1.0);
    params.connections[0].floor = SillFloor::LowerInitialLevel;
    let out = simulate(&params).unwrap();
    assert!(out.series.threshold[0].iter().all(|z| *z >= 5.0));

    params.connections[0].floor = SillFloor::Unbounded;
    let free = simulate(&params).unwrap();
    assert!(free.thresholds[0] <= out.thresholds[0]);
}

#[test]
fn bad_records_never_run() {
    assert_eq!(
        simulate(&pair(10.0, 0.0, 9.5).steps(0)).unwrap_err(),
        SpillError::ZeroSteps
    );
    let mut params = pair(10.0, 0.0, 9.5);
    params.reservoirs[0].area = 0.0;
    assert_eq!(simulate(&params).unwrap_err(), SpillError::NonPositiveArea(0));
    assert_eq!(
        simulate(&pair(10.0, 0.0, 9.5).total_time(1e300).step_size(1e-10)).unwrap_err(),
        SpillError::TooManySteps
    );
}
