// src/domain/price.rs

/// Short Egyptian-pound label used on listing cards.
///
/// `£ 1.2 M` from a million up, `£ 850 K` from a thousand up, the plain
/// number below that.
pub fn format_price(price: f64) -> String {
    if !price.is_finite() || price <= 0.0 {
        return "Price not available".to_string();
    }

    if price >= 1_000_000.0 {
        let millions = price / 1_000_000.0;
        return format!("£ {} M", compact(millions, 2));
    }

    if price >= 1000.0 {
        let thousands = price / 1000.0;
        return format!("£ {} K", compact(thousands, 1));
    }

    format!("£ {}", compact(price, 3))
}

/// Whole numbers print without decimals; others with at most `places`
/// decimals and no trailing zeros.
fn compact(value: f64, places: usize) -> String {
    if value.fract() == 0.0 {
        return format!("{value:.0}");
    }
    let fixed = format!("{value:.places$}");
    fixed
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}
