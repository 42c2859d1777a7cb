use std::f64::consts::PI;

/// Evenly spaced values between start and stop (inclusive).
pub fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            (0..num)
                .map(|i| if i == num - 1 { stop } else { start + i as f64 * step })
                .collect()
        }
    }
}

/// `num` angles covering [0, 2π) with the endpoint left out, so no direction
/// is sampled twice.
pub fn angles(num: usize) -> Vec<f64> {
    let step = 2.0 * PI / num.max(1) as f64;
    (0..num).map(|i| i as f64 * step).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn linspace_hits_both_ends() {
        let xs = linspace(0.0, 3.0, 7);
        assert_eq!(xs.len(), 7);
        assert_eq!(xs[0], 0.0);
        assert_eq!(*xs.last().unwrap(), 3.0);
        assert_relative_eq!(xs[1], 0.5);
        assert!(xs.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn linspace_degenerate_counts() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(2.0, 5.0, 1), vec![2.0]);
    }

    #[test]
    fn angles_stop_short_of_full_turn() {
        let phis = angles(4);
        assert_eq!(phis.len(), 4);
        assert_relative_eq!(phis[1], PI / 2.0);
        assert!(*phis.last().unwrap() < 2.0 * PI);
        assert!(angles(0).is_empty());
    }
}
