/// Source indices and normalized weights contributing to each destination index along one axis.
pub(crate) type AxisWeights = Vec<Vec<(usize, f32)>>;

/// Compute the pixel area relation between a source and a destination axis.
///
/// Destination pixel `i` covers the source interval `[i * s, (i + 1) * s)` with
/// `s = src_len / dst_len`. Every source pixel overlapping the interval
/// contributes proportionally to the overlap, the weights sum up to one.
pub(crate) fn area_weights(src_len: usize, dst_len: usize) -> AxisWeights {
    let scale = src_len as f64 / dst_len as f64;

    (0..dst_len)
        .map(|i| {
            let start = i as f64 * scale;
            let end = ((i + 1) as f64 * scale).min(src_len as f64);

            let first = (start.floor() as usize).min(src_len - 1);
            let last = (end.ceil() as usize).clamp(first + 1, src_len);

            let mut weights = (first..last)
                .filter_map(|j| {
                    let overlap = end.min((j + 1) as f64) - start.max(j as f64);
                    (overlap > 0.0).then_some((j, overlap))
                })
                .collect::<Vec<_>>();

            // guard against intervals thinner than the float resolution
            if weights.is_empty() {
                weights.push((first, 1.0));
            }

            let total: f64 = weights.iter().map(|(_, w)| w).sum();
            weights
                .into_iter()
                .map(|(j, w)| (j, (w / total) as f32))
                .collect()
        })
        .collect()
}
