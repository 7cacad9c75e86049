/// Correctly rounded floating-point sum.
///
/// Uses Shewchuk's exact partials: the running sum is kept as a list of
/// non-overlapping partials, so no rounding error accumulates however many
/// values are added. The final rounding is half-even. Because the result is
/// the exact sum rounded once, it does not depend on the order of `values`.
///
/// Non-finite values are summed apart from the finite ones and take
/// precedence (`inf + -inf` is NaN).
pub fn fsum<I: IntoIterator<Item = f64>>(values: I) -> f64 {
    let mut partials: Vec<f64> = Vec::new();
    let mut special = 0.0_f64;
    let mut has_special = false;

    for value in values {
        if !value.is_finite() {
            special += value;
            has_special = true;
            continue;
        }

        let mut x = value;
        let mut i = 0;
        for j in 0..partials.len() {
            let mut y = partials[j];
            if x.abs() < y.abs() {
                core::mem::swap(&mut x, &mut y);
            }
            let hi = x + y;
            let lo = y - (hi - x);
            if lo != 0.0 {
                partials[i] = lo;
                i += 1;
            }
            x = hi;
        }
        partials.truncate(i);

        if !x.is_finite() {
            // Finite values overflowed.
            special += x;
            has_special = true;
        } else if x != 0.0 {
            partials.push(x);
        }
    }

    if has_special {
        return special;
    }
    round_partials(&partials)
}

fn round_partials(partials: &[f64]) -> f64 {
    let Some((&last, _)) = partials.split_last() else {
        return 0.0;
    };

    let mut n = partials.len() - 1;
    let mut hi = last;
    let mut lo = 0.0;
    while n > 0 {
        let x = hi;
        n -= 1;
        let y = partials[n];
        hi = x + y;
        let yr = hi - x;
        lo = y - yr;
        if lo != 0.0 {
            break;
        }
    }

    // Round half-even when the remaining partials push the discarded low
    // part past the halfway point.
    if n > 0
        && ((lo < 0.0 && partials[n - 1] < 0.0) || (lo > 0.0 && partials[n - 1] > 0.0))
    {
        let y = lo * 2.0;
        let x = hi + y;
        let yr = x - hi;
        if y == yr {
            hi = x;
        }
    }
    hi
}
