//! Context aggregation.
//!
//! Merges the realtime quote and the news headlines into the ordered text
//! context handed to the judge. When both a realtime price and a historical
//! close exist, the realtime block carries an explicit instruction that it
//! takes precedence.

use advisor_core::types::RealtimeQuote;

/// Build the judgment context. Deterministic given its inputs.
pub fn build_context(quote: Option<&RealtimeQuote>, headlines: &[String]) -> String {
    let mut context = String::new();

    match quote {
        Some(quote) => {
            context.push_str("[Realtime market data (authoritative)]\n");
            context.push_str(&format!("Price: {}\n", quote.price));
            context.push_str(&format!("Change: {}%\n", quote.rate));
            context.push_str(&format!("Volume: {}\n", quote.volume));
            context.push_str(&format!("Status: {}\n", quote.status));
            context.push_str(
                "Note: this block is live data. Prefer it over the historical closing price.\n",
            );
        }
        None => {
            context
                .push_str("[Realtime quote unavailable. Rely on the historical closing price.]\n");
        }
    }

    context.push_str("\n[Recent news headlines]\n");
    if headlines.is_empty() {
        context.push_str("No notable news.\n");
    } else {
        for headline in headlines {
            context.push_str(&format!("- {headline}\n"));
        }
    }

    context
}
