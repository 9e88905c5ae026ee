//! Human/LLM-readable snapshot rendering

use crate::data::Timeframe;
use crate::levels::PriceLevel;
use crate::snapshot::MarketSnapshot;

/// Levels printed per side per timeframe.
const RENDERED_LEVELS_PER_SIDE: usize = 3;

/// Render a snapshot as the deterministic multi-section text block fed to
/// the downstream reasoning model.
pub fn render(data: &MarketSnapshot) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "current price = {:.2}, EMA20 = {:.3}, MACD = {:.3}, RSI(7) = {:.3}\n\n",
        data.current_price, data.current_ema20, data.current_macd, data.current_rsi7
    ));

    out.push_str(&format!(
        "Open interest and funding for {}:\n\n",
        data.symbol
    ));

    let oi_value_usd = data.open_interest.latest * data.current_price;
    out.push_str(&format!(
        "Open interest: latest {:.2} (contracts) | value {:.2} USD | average {:.2}\n\n",
        data.open_interest.latest, oi_value_usd, data.open_interest.average
    ));

    out.push_str(&format!("Funding rate: {:.2e}\n\n", data.funding_rate));

    if !data.intraday.closes.is_empty() {
        out.push_str("3-minute series (oldest to newest):\n\n");
        push_series(&mut out, "Close series", &data.intraday.closes);
        push_series(&mut out, "EMA(20)", &data.intraday.ema20);
        push_series(&mut out, "MACD series", &data.intraday.macd);
        push_series(&mut out, "RSI(7)", &data.intraday.rsi7);
        push_series(&mut out, "RSI(14)", &data.intraday.rsi14);
    }

    out.push_str("4-hour context:\n\n");
    out.push_str(&format!(
        "EMA: 20-period {:.3} vs. 50-period {:.3}\n\n",
        data.longer_term.ema20, data.longer_term.ema50
    ));
    out.push_str(&format!(
        "ATR: 3-period {:.3} vs. 14-period {:.3}\n\n",
        data.longer_term.atr3, data.longer_term.atr14
    ));
    out.push_str(&format!(
        "Volume: current {:.3} vs. average {:.3}\n\n",
        data.longer_term.current_volume, data.longer_term.average_volume
    ));
    push_series(&mut out, "MACD series", &data.longer_term.macd);
    push_series(&mut out, "RSI(14)", &data.longer_term.rsi14);

    if !data.support_resistance.timeframes.is_empty() {
        out.push_str("Support/resistance structure:\n\n");

        for timeframe in Timeframe::ALL {
            let Some(levels) = data.support_resistance.timeframes.get(&timeframe) else {
                continue;
            };
            out.push_str(&format!(
                "[{timeframe}] supports: {}\n",
                format_levels(&levels.supports)
            ));
            out.push_str(&format!(
                "[{timeframe}] resistances: {}\n\n",
                format_levels(&levels.resistances)
            ));
        }

        if let Some(confluence) = &data.support_resistance.confluence {
            out.push_str("Multi-timeframe confluence (short timeframe corroborated by longer ones):\n");
            out.push_str(&format!(
                "Confluent supports: {}\n",
                format_levels(&confluence.supports)
            ));
            out.push_str(&format!(
                "Confluent resistances: {}\n\n",
                format_levels(&confluence.resistances)
            ));
        }

        out.push_str(
            "⚠️ Trading principle: never chase longs into resistance or shorts into support.\n\n",
        );
    }

    out
}

fn push_series(out: &mut String, label: &str, values: &[f64]) {
    if values.is_empty() {
        return;
    }
    let parts: Vec<String> = values.iter().map(|v| format!("{v:.3}")).collect();
    out.push_str(&format!("{label}: [{}]\n\n", parts.join(", ")));
}

fn format_levels(levels: &[PriceLevel]) -> String {
    if levels.is_empty() {
        return "-".to_string();
    }

    levels
        .iter()
        .take(RENDERED_LEVELS_PER_SIDE)
        .map(|level| {
            format!(
                "{:.2} (strength {}, score {:.2}, distance {:.2}%)",
                level.price, level.strength, level.score, level.distance
            )
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_levels_render_as_dash() {
        assert_eq!(format_levels(&[]), "-");
    }

    #[test]
    fn levels_render_capped_at_three() {
        let levels: Vec<PriceLevel> = (0..5)
            .map(|i| PriceLevel {
                price: 100.0 + i as f64,
                strength: 2,
                score: 1.5,
                distance: i as f64,
                is_support: true,
            })
            .collect();

        let rendered = format_levels(&levels);
        assert_eq!(rendered.matches(" | ").count(), 2);
        assert!(rendered.starts_with("100.00 (strength 2, score 1.50, distance 0.00%)"));
    }
}
