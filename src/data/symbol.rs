//! Trading pair symbol handling

/// Normalize a symbol to an upper-case USDT-quoted pair.
///
/// `"btc"` and `"BTCUSDT"` both normalize to `"BTCUSDT"`.
pub fn normalize_symbol(symbol: &str) -> String {
    let symbol = symbol.to_uppercase();
    if symbol.ends_with("USDT") {
        symbol
    } else {
        format!("{symbol}USDT")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_quote_asset() {
        assert_eq!(normalize_symbol("btc"), "BTCUSDT");
        assert_eq!(normalize_symbol("ETH"), "ETHUSDT");
    }

    #[test]
    fn already_quoted_is_untouched() {
        assert_eq!(normalize_symbol("BTCUSDT"), "BTCUSDT");
        assert_eq!(normalize_symbol("btcusdt"), "BTCUSDT");
    }
}
