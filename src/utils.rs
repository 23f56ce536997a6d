use std::str::FromStr;

use rust_decimal::Decimal;

use crate::types::{CartTableRow, LineItem};

/// Formats an amount in dollars with two decimals, e.g. `$30.00`.
pub fn format_price(amount: Decimal) -> String {
    format!("${:.2}", amount.round_dp(2))
}

/// Parses a non-negative price such as `10`, `10.5` or `$19.99`.
pub fn parse_price(s: &str) -> Result<Decimal, String> {
    let trimmed = s.trim().trim_start_matches('$');
    let price = Decimal::from_str(trimmed).map_err(|e| format!("invalid price {s:?}: {e}"))?;
    if price.is_sign_negative() {
        return Err(format!("price must not be negative: {s}"));
    }
    Ok(price)
}

/// Trims a size label. Case is kept since sizes are matched exactly.
pub fn parse_size(s: &str) -> Result<String, String> {
    let size = s.trim().to_string();
    if size.is_empty() {
        return Err("size must not be empty".to_string());
    }
    Ok(size)
}

/// Normalizes a favorites bucket name to lowercase.
pub fn parse_bucket(s: &str) -> Result<String, String> {
    let bucket = s.trim().to_lowercase();
    if bucket.is_empty() {
        return Err("bucket must not be empty".to_string());
    }
    if !bucket
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(format!("invalid bucket name: {s}"));
    }
    Ok(bucket)
}

pub fn cart_table_rows(items: &[LineItem]) -> Vec<CartTableRow> {
    items
        .iter()
        .map(|item| CartTableRow {
            id: item.id,
            name: item.name.clone(),
            size: item.size.clone(),
            quantity: item.quantity,
            price: format_price(item.unit_price),
            total: item
                .line_total()
                .map(format_price)
                .unwrap_or_else(|| "overflow".to_string()),
        })
        .collect()
}

/// Joins ids for compact display, e.g. `3, 7, 12`.
pub fn join_ids(ids: &[i64]) -> String {
    ids.iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
