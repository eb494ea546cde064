//! Peak search over an autocorrelation window.
//!
//! Three strategies, tried in order until one returns a peak. Each works on
//! the window of autocorrelation values for lags
//! `[min_cell_size, max_cell_size]` and returns an index into that window.

/// Minimum distance between two accepted peaks, in lags.
pub const PEAK_MIN_DISTANCE: usize = 5;

/// Minimum prominence as a fraction of the window's standard deviation.
pub const PEAK_PROMINENCE_FACTOR: f64 = 0.1;

/// Fallback strategies ignore the first few window positions.
pub const FALLBACK_MIN_INDEX: usize = 5;

/// Curvature fallback needs strictly more samples than this.
pub const CURVATURE_MIN_LEN: usize = 10;

/// A peak-finding strategy: given the window and the lag of its first
/// sample, return the window index of the detected period.
pub type PeakStrategy = fn(window: &[f64], first_lag: usize) -> Option<usize>;

/// Strategies in escalating order.
pub const STRATEGIES: [(&str, PeakStrategy); 3] = [
    ("prominence", prominent_peak),
    ("local-maximum", first_local_maximum),
    ("curvature", max_curvature),
];

/// Run the strategies in order; the first hit wins.
///
/// Returns the detected lag together with the name of the strategy that
/// produced it.
pub fn find_period(window: &[f64], first_lag: usize) -> Option<(usize, &'static str)> {
    STRATEGIES
        .iter()
        .find_map(|(name, strategy)| strategy(window, first_lag).map(|i| (first_lag + i, *name)))
}

/// Smallest-index local maximum that survives minimum-distance thinning and
/// has prominence of at least `0.1 × std(window)`.
pub fn prominent_peak(window: &[f64], _first_lag: usize) -> Option<usize> {
    let peaks = thin_by_distance(window, local_maxima(window), PEAK_MIN_DISTANCE);
    let min_prominence = PEAK_PROMINENCE_FACTOR * std_dev(window);

    peaks
        .into_iter()
        .find(|&p| prominence(window, p) >= min_prominence)
}

/// First strict local maximum at index 5 or later.
pub fn first_local_maximum(window: &[f64], _first_lag: usize) -> Option<usize> {
    (FALLBACK_MIN_INDEX.max(1)..window.len().saturating_sub(1))
        .find(|&i| window[i] > window[i - 1] && window[i] > window[i + 1])
}

/// Position of the largest positive second difference, for lags of 5 or
/// more. The second difference `w[i] - 2w[i+1] + w[i+2]` is attributed to
/// index `i + 1`.
pub fn max_curvature(window: &[f64], first_lag: usize) -> Option<usize> {
    if window.len() <= CURVATURE_MIN_LEN {
        return None;
    }

    let mut best: Option<(usize, f64)> = None;
    for (i, w) in window.windows(3).enumerate() {
        let center = i + 1;
        if first_lag + center < FALLBACK_MIN_INDEX {
            continue;
        }
        let curvature = w[0] - 2.0 * w[1] + w[2];
        if curvature > best.map_or(0.0, |(_, c)| c) {
            best = Some((center, curvature));
        }
    }
    best.map(|(center, _)| center)
}

/// Local maxima in ascending order. A flat top counts once, at its middle
/// (lower middle for even widths); the window edges never count.
fn local_maxima(x: &[f64]) -> Vec<usize> {
    let mut peaks = Vec::new();
    let n = x.len();
    let mut i = 1;

    while i + 1 < n {
        if x[i] > x[i - 1] {
            let mut ahead = i + 1;
            while ahead + 1 < n && x[ahead] == x[i] {
                ahead += 1;
            }
            if x[ahead] < x[i] {
                peaks.push((i + ahead - 1) / 2);
                i = ahead;
                continue;
            }
        }
        i += 1;
    }
    peaks
}

/// Drop peaks closer than `distance` to a higher peak. Higher peaks are
/// kept first; among equal heights the earlier peak wins.
fn thin_by_distance(x: &[f64], peaks: Vec<usize>, distance: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..peaks.len()).collect();
    order.sort_by(|&a, &b| x[peaks[b]].total_cmp(&x[peaks[a]]));

    let mut keep = vec![true; peaks.len()];
    for &k in &order {
        if !keep[k] {
            continue;
        }
        for (j, kept) in keep.iter_mut().enumerate() {
            if j != k && peaks[j].abs_diff(peaks[k]) < distance {
                *kept = false;
            }
        }
    }

    peaks
        .into_iter()
        .zip(keep)
        .filter_map(|(p, k)| k.then_some(p))
        .collect()
}

/// Height of a peak above the higher of its two bases. A base is the lowest
/// point between the peak and the nearest strictly higher sample on that
/// side (or the window edge).
fn prominence(x: &[f64], peak: usize) -> f64 {
    let height = x[peak];

    let mut left_min = height;
    for &v in x[..peak].iter().rev() {
        if v > height {
            break;
        }
        left_min = left_min.min(v);
    }

    let mut right_min = height;
    for &v in &x[peak + 1..] {
        if v > height {
            break;
        }
        right_min = right_min.min(v);
    }

    height - left_min.max(right_min)
}

/// Population standard deviation.
fn std_dev(x: &[f64]) -> f64 {
    if x.is_empty() {
        return 0.0;
    }
    let n = x.len() as f64;
    let mean = x.iter().sum::<f64>() / n;
    (x.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n).sqrt()
}
