use float_cmp::approx_eq;
use plotkit_datatypes::plots::{BinRange, HistogramSeries, HistogramType};
use plotkit_datatypes::primitives::RgbaColor;
use plotkit_operators::plot::{HistogramBinner, HistogramParams, HistogramPlot};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::thread;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

#[test]
fn chart_from_json_params() {
    init_tracing();

    let params: HistogramParams = serde_json::from_str(
        r#"{
            "bounds": { "min": 40.0, "max": 160.0 },
            "bins": 4
        }"#,
    )
    .unwrap();

    let series = HistogramSeries::builder([40_u32, 50, 100, 159, 160, 200], 4)
        .label("scores")
        .color(RgbaColor::from_name("dark_green").unwrap().with_alpha(0.5))
        .histogram_type(HistogramType::Step)
        .build()
        .unwrap();

    let plot = HistogramPlot::new(series, params).unwrap();
    let bin_sets = plot.recalculate().unwrap();

    assert_eq!(bin_sets.len(), 1);
    assert_eq!(bin_sets[0].counts(), vec![2, 0, 1, 2]);
    assert_eq!(bin_sets[0].excluded_count(), 1);
    assert_eq!(
        plot.series().next().map(HistogramSeries::color),
        Some(RgbaColor::new(0., 0.39, 0., 0.5))
    );
}

#[test]
fn concurrent_recalculations_are_independent() {
    init_tracing();

    let mut rng = StdRng::seed_from_u64(1337);
    let data: Vec<f64> = (0..10_000).map(|_| rng.random_range(0.0..100.0)).collect();
    let series = HistogramSeries::builder(data, 10).build().unwrap();
    let binner = HistogramBinner::new(true);

    let expected = binner
        .recalculate_bins(&series, &BinRange::new(0., 100., 10).unwrap())
        .unwrap();

    let results: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    binner.recalculate_bins(&series, &BinRange::new(0., 100., 10).unwrap())
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().unwrap().unwrap())
            .collect()
    });

    for result in results {
        assert_eq!(result, expected);
    }

    assert_eq!(expected.in_range_count(), 10_000);
    assert!(approx_eq!(
        f64,
        expected.frequencies().iter().sum::<f64>(),
        1.,
        ulps = 4
    ));
}

#[test]
fn zoomed_ranges_do_not_influence_each_other() {
    init_tracing();

    let series = HistogramSeries::builder((0..100).map(f64::from), 5)
        .build()
        .unwrap();
    let binner = HistogramBinner::default();

    let zoomed = binner
        .recalculate_bins(&series, &BinRange::new(10., 19., 5).unwrap())
        .unwrap();
    let full = binner
        .recalculate_bins(&series, &BinRange::new(0., 99., 5).unwrap())
        .unwrap();

    assert_eq!(zoomed.in_range_count(), 10);
    assert_eq!(zoomed.excluded_count(), 90);
    assert_eq!(full.in_range_count(), 100);
    assert_eq!(full.counts().iter().sum::<u64>(), 100);
}
