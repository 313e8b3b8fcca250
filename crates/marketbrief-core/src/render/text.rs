//! Human-readable briefing.
//!
//! Section order is fixed: header, market status, Fear & Greed, indices,
//! watchlist group, headlines (unless brief), watchlist sentiment (when
//! ticker annotations are supplied), spotlight, footer.

use time::macros::format_description;

use super::RenderOptions;
use crate::adapters::market_clock::exchange_local_time;
use crate::{
    AggregateSnapshot, FearGreedReading, Fetch, MarketStatus, NewsItem, Priority, Quote,
    SentimentLabel, SessionState, TickerRecord,
};

const MAX_NEWS_LINES: usize = 4;
const MAX_TICKER_HEADLINES: usize = 3;

pub fn render_text(
    snapshot: &AggregateSnapshot,
    tickers: Option<&[TickerRecord]>,
    options: &RenderOptions,
) -> String {
    let mut lines = Vec::new();

    lines.push(String::from("🎯 **MARKET INTELLIGENCE BRIEFING**"));
    lines.push(format!("📅 {}", date_header(snapshot)));
    lines.push(String::new());

    lines.push(status_line(&snapshot.market_status));
    lines.push(fear_greed_line(&snapshot.fear_greed));
    lines.push(String::new());

    lines.push(String::from("**📊 Major Indices**"));
    lines.extend(snapshot.indices.iter().map(quote_line));
    lines.push(String::new());

    lines.push(format!("**🔬 {}**", options.group_label));
    lines.extend(snapshot.watchlist.iter().map(quote_line));
    lines.push(String::new());

    if !options.brief {
        lines.push(format!("**📰 {} News**", options.group_label));
        lines.extend(snapshot.news.iter().take(MAX_NEWS_LINES).map(news_line));
        lines.push(String::new());
    }

    if let Some(tickers) = tickers.filter(|tickers| !tickers.is_empty()) {
        push_sentiment_section(&mut lines, tickers, options.brief);
    }

    if let Some(spotlight) = spotlight_line(snapshot, options) {
        lines.push(spotlight);
        lines.push(String::new());
    }

    lines.push(String::from("_Generated by marketbrief_"));
    lines.join("\n")
}

/// Long-form date at the exchange, e.g. `Friday, October 16, 2026`.
fn date_header(snapshot: &AggregateSnapshot) -> String {
    exchange_local_time(snapshot.timestamp)
        .format(format_description!(
            "[weekday repr:long], [month repr:long] [day padding:none], [year]"
        ))
        .unwrap_or_else(|_| snapshot.timestamp.format_rfc3339())
}

fn status_line(status: &MarketStatus) -> String {
    let label = &status.local_time_label;
    match status.state {
        SessionState::Open => format!("🟢 Market OPEN ({label} NY)"),
        SessionState::PreMarket => format!("🟡 Pre-Market ({label} NY)"),
        SessionState::AfterHours => format!("🟠 After Hours ({label} NY)"),
        SessionState::Weekend => format!("⚫ Weekend ({label} NY)"),
        SessionState::Closed => format!("🔴 Market Closed ({label} NY)"),
    }
}

fn fear_greed_line(slot: &Fetch<FearGreedReading>) -> String {
    let Some(reading) = slot.ready() else {
        return String::from("Fear & Greed: ⚠️ unavailable");
    };

    let mood = match reading.score {
        0..=25 => "😨",
        26..=45 => "😟",
        46..=55 => "😐",
        56..=75 => "😊",
        _ => "🤑",
    };
    let trend = match reading.score.cmp(&reading.previous_score) {
        std::cmp::Ordering::Greater => "↑",
        std::cmp::Ordering::Less => "↓",
        std::cmp::Ordering::Equal => "→",
    };

    format!(
        "Fear & Greed: {mood} {}/100 ({}) {trend}",
        reading.score, reading.rating
    )
}

fn quote_line(slot: &Fetch<Quote>) -> String {
    match slot {
        Fetch::Ready(quote) => {
            let arrow = if quote.change_percent >= 0.0 { "📈" } else { "📉" };
            format!(
                "{}: ${:.2} {arrow} {}%",
                quote.symbol,
                quote.price,
                signed(quote.change_percent)
            )
        }
        Fetch::Failed(failure) => match &failure.symbol {
            Some(symbol) => format!("{symbol}: ⚠️ {}", failure.error),
            None => format!("⚠️ {}", failure.error),
        },
    }
}

fn news_line(slot: &Fetch<NewsItem>) -> String {
    match slot {
        Fetch::Ready(item) => format!("• {}", item.title),
        Fetch::Failed(_) => String::from("• ⚠️ News unavailable"),
    }
}

fn push_sentiment_section(lines: &mut Vec<String>, tickers: &[TickerRecord], brief: bool) {
    let with_label = |label: SentimentLabel| {
        tickers
            .iter()
            .filter(|ticker| ticker.sentiment.is_some_and(|s| s.label == label))
            .map(|ticker| ticker.symbol.as_str())
            .collect::<Vec<_>>()
    };

    lines.push(String::from("**📈 Watchlist Sentiment**"));
    let bullish = with_label(SentimentLabel::Bullish);
    if !bullish.is_empty() {
        lines.push(format!("🟢 Bullish: {}", bullish.join(", ")));
    }
    let bearish = with_label(SentimentLabel::Bearish);
    if !bearish.is_empty() {
        lines.push(format!("🔴 Bearish: {}", bearish.join(", ")));
    }

    for ticker in tickers {
        let marker = match ticker.priority {
            Priority::High => "⭐",
            Priority::Normal => "○",
        };
        lines.push(format!("{marker} {} — {}", ticker.symbol, ticker.name));

        match ticker.sentiment {
            Some(score) => {
                let dot = match score.label {
                    SentimentLabel::Bullish => "🟢",
                    SentimentLabel::Bearish => "🔴",
                    SentimentLabel::Neutral => "⚪",
                };
                lines.push(format!(
                    "  Sentiment: {dot} {} (score: {})",
                    score.label.as_str(),
                    score.raw_score
                ));
            }
            None => lines.push(String::from("  Sentiment: pending")),
        }

        if !brief && !ticker.headlines.is_empty() {
            lines.extend(
                ticker
                    .headlines
                    .iter()
                    .take(MAX_TICKER_HEADLINES)
                    .map(|headline| format!("    • {headline}")),
            );
        }
    }
    lines.push(String::new());
}

/// `None` when the spotlight symbol has no quote slot at all.
fn spotlight_line(snapshot: &AggregateSnapshot, options: &RenderOptions) -> Option<String> {
    let symbol = options.spotlight.as_ref()?;
    let prefix = format!("**🎮 {symbol} Spotlight:**");

    if let Some(quote) = snapshot.quote(symbol.as_str()) {
        let pct = quote.change_percent;
        let marker = if pct > 1.0 {
            "🚀"
        } else if pct > 0.0 {
            "✅"
        } else if pct > -1.0 {
            "⚠️"
        } else {
            "🔻"
        };
        return Some(format!(
            "{prefix} ${:.2} ({}%) {marker}",
            quote.price,
            signed(pct)
        ));
    }

    let has_failed_slot = snapshot
        .watchlist
        .iter()
        .chain(&snapshot.indices)
        .filter_map(Fetch::failure)
        .any(|failure| failure.symbol.as_ref() == Some(symbol));
    has_failed_slot.then(|| format!("{prefix} ⚠️ unavailable"))
}

/// Two decimals with an explicit `+` for non-negative values.
fn signed(value: f64) -> String {
    if value >= 0.0 {
        format!("+{:.2}", value.abs())
    } else {
        format!("{value:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FetchFailure, SentimentScore, Symbol, UtcDateTime};

    fn symbol(raw: &str) -> Symbol {
        Symbol::parse(raw).expect("valid symbol")
    }

    fn quote(raw: &str, price: f64, previous_close: f64) -> Fetch<Quote> {
        Fetch::Ready(
            Quote::from_close(symbol(raw), price, previous_close, None, crate::QuoteSession::Regular)
                .expect("valid quote"),
        )
    }

    fn snapshot() -> AggregateSnapshot {
        AggregateSnapshot {
            timestamp: UtcDateTime::parse("2026-10-16T14:30:00Z").expect("valid timestamp"),
            market_status: MarketStatus {
                state: SessionState::Open,
                local_time_label: String::from("Fri 10:30 AM"),
            },
            fear_greed: Fetch::Ready(FearGreedReading::from_raw(62.0, "greed", 58.0, 44.0)),
            indices: vec![quote("SPY", 99.5, 100.0)],
            watchlist: vec![
                quote("NVDA", 120.0, 100.0),
                Fetch::Failed(FetchFailure::for_symbol(symbol("AMD"), "HTTP 500: boom")),
            ],
            news: (1..=6)
                .map(|n| {
                    Fetch::Ready(NewsItem {
                        title: format!("Headline {n}"),
                        url: format!("https://news.example/{n}"),
                    })
                })
                .collect(),
        }
    }

    fn options() -> RenderOptions {
        RenderOptions {
            spotlight: Some(symbol("NVDA")),
            ..RenderOptions::default()
        }
    }

    #[test]
    fn sections_appear_in_fixed_order() {
        let text = render_text(&snapshot(), None, &options());

        let positions: Vec<usize> = [
            "MARKET INTELLIGENCE BRIEFING",
            "📅 Friday, October 16, 2026",
            "🟢 Market OPEN (Fri 10:30 AM NY)",
            "Fear & Greed: 😊 62/100 (greed) ↑",
            "**📊 Major Indices**",
            "**🔬 Semiconductors**",
            "**📰 Semiconductors News**",
            "**🎮 NVDA Spotlight:**",
            "_Generated by marketbrief_",
        ]
        .iter()
        .map(|needle| text.find(needle).unwrap_or_else(|| panic!("missing {needle:?}")))
        .collect();

        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]), "{text}");
    }

    #[test]
    fn quotes_show_price_and_signed_percent() {
        let text = render_text(&snapshot(), None, &options());

        assert!(text.contains("NVDA: $120.00 📈 +20.00%"));
        assert!(text.contains("SPY: $99.50 📉 -0.50%"));
        assert!(text.contains("AMD: ⚠️ HTTP 500: boom"));
        assert!(text.contains("**🎮 NVDA Spotlight:** $120.00 (+20.00%) 🚀"));
    }

    #[test]
    fn news_is_capped_and_failures_are_visible() {
        let text = render_text(&snapshot(), None, &options());
        assert!(text.contains("• Headline 4"));
        assert!(!text.contains("• Headline 5"));

        let mut failed = snapshot();
        failed.news = vec![Fetch::Failed(FetchFailure::new("request timeout"))];
        let text = render_text(&failed, None, &options());
        assert!(text.contains("• ⚠️ News unavailable"));
    }

    #[test]
    fn brief_mode_omits_headlines() {
        let brief = RenderOptions {
            brief: true,
            ..options()
        };
        let text = render_text(&snapshot(), None, &brief);

        assert!(!text.contains("News**"));
        assert!(!text.contains("Headline 1"));
        assert!(text.contains("Spotlight"));
    }

    #[test]
    fn fear_greed_bands_and_trend() {
        let line = |score: f64, previous: f64| {
            fear_greed_line(&Fetch::Ready(FearGreedReading::from_raw(score, "x", previous, 0.0)))
        };

        assert!(line(25.0, 30.0).contains("😨 25/100 (x) ↓"));
        assert!(line(26.0, 26.0).contains("😟 26/100 (x) →"));
        assert!(line(55.0, 50.0).contains("😐"));
        assert!(line(75.0, 50.0).contains("😊"));
        assert!(line(76.0, 50.0).contains("🤑"));
        assert_eq!(
            fear_greed_line(&Fetch::Failed(FetchFailure::new("down"))),
            "Fear & Greed: ⚠️ unavailable"
        );
    }

    #[test]
    fn spotlight_bands() {
        let marker_for = |price: f64| {
            let mut snap = snapshot();
            snap.watchlist = vec![quote("NVDA", price, 100.0)];
            spotlight_line(&snap, &options()).expect("spotlight present")
        };

        assert!(marker_for(101.5).ends_with("🚀"));
        assert!(marker_for(100.5).ends_with("✅"));
        assert!(marker_for(100.0).ends_with("⚠️"));
        assert!(marker_for(99.5).ends_with("⚠️"));
        assert!(marker_for(99.0).ends_with("🔻"));
    }

    #[test]
    fn failed_spotlight_renders_placeholder_and_missing_one_is_omitted() {
        let mut failed = snapshot();
        failed.watchlist = vec![Fetch::Failed(FetchFailure::for_symbol(symbol("NVDA"), "boom"))];
        assert_eq!(
            spotlight_line(&failed, &options()).as_deref(),
            Some("**🎮 NVDA Spotlight:** ⚠️ unavailable")
        );

        let mut absent = snapshot();
        absent.watchlist.clear();
        assert!(spotlight_line(&absent, &options()).is_none());
    }

    #[test]
    fn sentiment_section_lists_tickers() {
        let mut nvda = TickerRecord::pending(symbol("NVDA"), "NVIDIA", Priority::High);
        nvda.sentiment = Some(SentimentScore {
            raw_score: 0.5,
            label: SentimentLabel::Bullish,
            confidence: 0.8,
        });
        nvda.headlines = (1..=5).map(|n| format!("nvda story {n}")).collect();
        nvda.needs_fetch = false;
        let amd = TickerRecord::pending(symbol("AMD"), "Advanced Micro Devices", Priority::Normal);
        let tickers = [nvda, amd];

        let text = render_text(&snapshot(), Some(&tickers[..]), &options());

        assert!(text.contains("🟢 Bullish: NVDA"));
        assert!(!text.contains("🔴 Bearish"));
        assert!(text.contains("⭐ NVDA — NVIDIA\n  Sentiment: 🟢 bullish (score: 0.5)"));
        assert!(text.contains("○ AMD — Advanced Micro Devices\n  Sentiment: pending"));
        assert!(text.contains("    • nvda story 3"));
        assert!(!text.contains("nvda story 4"));

        let brief = RenderOptions {
            brief: true,
            ..options()
        };
        assert!(!render_text(&snapshot(), Some(&tickers[..]), &brief).contains("nvda story 1"));
    }

    #[test]
    fn identical_input_renders_identically() {
        assert_eq!(
            render_text(&snapshot(), None, &options()),
            render_text(&snapshot(), None, &options())
        );
    }
}
