//! Human-readable descriptions for openings and routes.

use crate::types::{Coins, TradeRoute};

/// Tiered one-liner for a buy-here/sell-there opening.
pub fn opening_description(item: &str, buy_location: &str, sell_location: &str, net_profit: Coins) -> String {
    if net_profit > 20 {
        format!("Excellent opening: Buy {item} in {buy_location} and sell in {sell_location} for {net_profit} coin profit!")
    } else if net_profit > 10 {
        format!("Good trade: {item} from {buy_location} to {sell_location} yields {net_profit} coins")
    } else {
        format!("Modest profit: {item} trade between {buy_location} and {sell_location} for {net_profit} coins")
    }
}

/// One-liner for carrying a good the player already holds.
pub fn inventory_description(item: &str, sell_location: &str, net_profit: Coins) -> String {
    format!("Sell {item} in {sell_location} for {net_profit} coin profit")
}

/// Itinerary for a planned route.
pub fn route_description(route: &TradeRoute) -> String {
    if route.trades.is_empty() {
        return "No profitable trades found".to_string();
    }

    let legs: Vec<String> = route
        .trades
        .iter()
        .map(|t| format!("{} ({} → {})", t.item.name, t.buy_location.name, t.sell_location.name))
        .collect();

    format!(
        "Trade route with {} total profit: {}",
        route.total_profit,
        legs.join(" → ")
    )
}
