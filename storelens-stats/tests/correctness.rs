//! Cross-module correctness checks for the numeric kernel.

use storelens_stats::{describe, pearson, percentile, weighted_ratio, PercentileScale};

#[test]
fn describe_percentiles_match_standalone_percentile() {
    let values = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0];
    let s = describe(&values);
    assert_eq!(s.p25, percentile(&values, 25.0));
    assert_eq!(s.p50, percentile(&values, 50.0));
    assert_eq!(s.p75, percentile(&values, 75.0));
    assert_eq!(s.p90, percentile(&values, 90.0));
    assert_eq!(s.median, s.p50);
}

#[test]
fn weighted_ratio_equals_ratio_of_sums() {
    // Two stores: 300/1000 and 50/1000. Weighted margin is 350/2000 = 17.5%,
    // not the 17.5-vs-mean-of-ratios coincidence — use asymmetric revenue to
    // prove it.
    let profits = [300.0, 50.0];
    let revenues = [1000.0, 3000.0];
    let weighted = weighted_ratio(profits.iter().sum(), revenues.iter().sum());
    assert!((weighted - 350.0 / 4000.0 * 100.0).abs() < 1e-12);

    let mean_of_ratios =
        (profits[0] / revenues[0] * 100.0 + profits[1] / revenues[1] * 100.0) / 2.0;
    assert!((weighted - mean_of_ratios).abs() > 1.0);
}

#[test]
fn pearson_is_symmetric() {
    let xs = [1.0, 3.0, 2.0, 5.0, 4.0];
    let ys = [2.0, 5.0, 3.0, 9.0, 7.0];
    let r_xy = pearson(&xs, &ys).unwrap();
    let r_yx = pearson(&ys, &xs).unwrap();
    assert!((r_xy - r_yx).abs() < 1e-12);
}

#[test]
fn pearson_is_scale_invariant() {
    let xs = [1.0, 3.0, 2.0, 5.0, 4.0];
    let ys = [2.0, 5.0, 3.0, 9.0, 7.0];
    let scaled: Vec<f64> = ys.iter().map(|y| y * 40.0 + 7.0).collect();
    let r = pearson(&xs, &ys).unwrap();
    let r_scaled = pearson(&xs, &scaled).unwrap();
    assert!((r - r_scaled).abs() < 1e-12);
}

#[test]
fn scale_scores_are_always_in_range() {
    let values = [-50.0, 0.0, 10.0, 10.0, 25.0, 300.0];
    let scale = PercentileScale::fit(&values);
    for v in [-1e9, -50.0, 0.0, 17.0, 300.0, 1e9] {
        let score = scale.apply(v);
        assert!((0.0..=100.0).contains(&score), "score {} for {}", score, v);
    }
}

#[test]
fn scale_is_monotone() {
    let values = [1.0, 2.0, 5.0, 9.0, 14.0, 20.0];
    let scale = PercentileScale::fit(&values);
    let mut last = f64::NEG_INFINITY;
    for v in [0.0, 1.0, 3.0, 8.0, 15.0, 25.0] {
        let score = scale.apply(v);
        assert!(score >= last, "{} scored {} after {}", v, score, last);
        last = score;
    }
}
