//! Profit evaluation and opportunity search.

use caravan::types::ArbitrageError;
use caravan::world::HexCoord;

use crate::mock_market::MarketFixture;

// ---------------------------------------------------------------------------
// find_best_opening
// ---------------------------------------------------------------------------

#[test]
fn best_opening_no_locations_is_none() {
    let m = MarketFixture::new().item("silk").build();
    assert!(m.calculator().find_best_opening(m.item("silk")).is_none());
}

#[test]
fn best_opening_item_unavailable_everywhere_is_none() {
    let m = MarketFixture::new()
        .item("silk")
        .location("market", 0, 0)
        .location("city", 3, 0)
        .price("silk", "market", -1, -1)
        .build();
    assert!(m.calculator().find_best_opening(m.item("silk")).is_none());
}

#[test]
fn best_opening_single_profitable_pair() {
    // Buy 10, sell 30, distance 5, travel 10, net 10
    let m = MarketFixture::new()
        .item("silk")
        .location("cheap", 0, 0)
        .location("dear", 5, 0)
        .price("silk", "cheap", 10, 5)
        .price("silk", "dear", 35, 30)
        .build();

    let o = m.calculator().find_best_opening(m.item("silk")).unwrap();
    assert_eq!(&o.buy_location, m.location("cheap"));
    assert_eq!(&o.sell_location, m.location("dear"));
    assert_eq!(o.buy_price, 10);
    assert_eq!(o.sell_price, 30);
    assert_eq!(o.gross_profit, 20);
    assert_eq!(o.travel_cost, 10);
    assert_eq!(o.net_profit, 10);
    assert_eq!(o.required_capital, 10);
    assert!(o.is_currently_profitable);
}

#[test]
fn best_opening_highest_net_profit_wins() {
    // near: 25 - 10 - 4 = 11; far: 50 - 10 - 18 = 22
    let m = MarketFixture::new()
        .item("silk")
        .location("market", 0, 0)
        .location("near", 2, 0)
        .location("far", 9, 0)
        .price("silk", "market", 10, 5)
        .price("silk", "near", 30, 25)
        .price("silk", "far", 55, 50)
        .build();

    let o = m.calculator().find_best_opening(m.item("silk")).unwrap();
    assert_eq!(o.sell_location.id, "far");
    assert_eq!(o.net_profit, 22);
}

#[test]
fn best_opening_travel_cost_reduces_net() {
    let m = MarketFixture::new()
        .item("silk")
        .location("market", 0, 0)
        .location("distant", 7, 0)
        .price("silk", "market", 10, 5)
        .price("silk", "distant", 55, 50)
        .build();

    let o = m.calculator().find_best_opening(m.item("silk")).unwrap();
    assert_eq!(o.gross_profit, 40);
    assert_eq!(o.travel_cost, 14);
    assert_eq!(o.net_profit, 26);
}

#[test]
fn best_opening_none_when_travel_exceeds_spread() {
    // Gross 5 over 9 hexes: 25 - 20 - 18 = -13 in the only profitable direction.
    let m = MarketFixture::new()
        .item("salt")
        .location("a", 0, 0)
        .location("b", 9, 0)
        .price("salt", "a", 20, 15)
        .price("salt", "b", 30, 25)
        .build();

    let calc = m.calculator();
    assert_eq!(
        calc.calculate_profit(m.item("salt"), Some(m.location("a")), Some(m.location("b"))),
        Some(-13)
    );
    assert!(calc.find_best_opening(m.item("salt")).is_none());
    assert!(calc.find_all_opportunities().is_empty());
}

#[test]
fn best_opening_never_same_location() {
    // Locally profitable (buy 10, sell 50) but only one location.
    let m = MarketFixture::new()
        .item("silk")
        .location("market", 0, 0)
        .price("silk", "market", 10, 50)
        .build();
    assert!(m.calculator().find_best_opening(m.item("silk")).is_none());
    assert!(m.calculator().find_all_opportunities().is_empty());
}

#[test]
fn best_opening_distinct_locations_sharing_a_cell() {
    let m = MarketFixture::new()
        .item("silk")
        .location("stall", 0, 0)
        .location("guildhall", 0, 0)
        .price("silk", "stall", 10, -1)
        .price("silk", "guildhall", -1, 30)
        .build();

    let o = m.calculator().find_best_opening(m.item("silk")).unwrap();
    assert_eq!(o.distance_between_locations, 0);
    assert_eq!(o.travel_cost, 0);
    assert_eq!(o.net_profit, 20);
}

#[test]
fn best_opening_negative_gross_both_directions_excluded() {
    let m = MarketFixture::new()
        .item("silk")
        .location("a", 0, 0)
        .location("b", 5, 0)
        .price("silk", "a", 50, 20)
        .price("silk", "b", 60, 10)
        .build();
    assert!(m.calculator().find_best_opening(m.item("silk")).is_none());
}

#[test]
fn best_opening_zero_gross_excluded() {
    let m = MarketFixture::new()
        .item("silk")
        .location("a", 0, 0)
        .location("b", 5, 0)
        .price("silk", "a", 20, 15)
        .price("silk", "b", 25, 20)
        .build();
    assert!(m.calculator().find_best_opening(m.item("silk")).is_none());
}

#[test]
fn best_opening_uses_hex_distance() {
    let m = MarketFixture::new()
        .item("silk")
        .location("origin", 0, 0)
        .location("destination", 3, 4)
        .price("silk", "origin", 10, 5)
        .price("silk", "destination", 40, 35)
        .build();

    let o = m.calculator().find_best_opening(m.item("silk")).unwrap();
    assert_eq!(o.distance_between_locations, 7);
    assert_eq!(o.travel_cost, 14);
}

#[test]
fn best_opening_profit_margin() {
    // Buy 20, sell 30, travel 4, net 6, margin 6 / 20
    let m = MarketFixture::new()
        .item("silk")
        .location("market", 0, 0)
        .location("city", 2, 0)
        .price("silk", "market", 20, 15)
        .price("silk", "city", 35, 30)
        .build();

    let o = m.calculator().find_best_opening(m.item("silk")).unwrap();
    assert!((o.profit_margin - 0.3).abs() < 0.01);
    assert!((o.profit_per_distance - 3.0).abs() < 1e-9);
}

#[test]
fn best_opening_description_names_item_and_locations() {
    let m = MarketFixture::new()
        .named_item("silk", "Silk")
        .location("Market", 0, 0)
        .location("City", 2, 0)
        .price("silk", "Market", 10, 5)
        .price("silk", "City", 40, 35)
        .build();

    let o = m.calculator().find_best_opening(m.item("silk")).unwrap();
    assert!(o.opening_description.contains("Silk"));
    assert!(o.opening_description.contains("Market"));
    assert!(o.opening_description.contains("City"));
}

#[test]
fn opening_for_item_by_id() {
    let m = MarketFixture::new()
        .item("silk")
        .location("a", 0, 0)
        .location("b", 1, 0)
        .price("silk", "a", 10, 5)
        .price("silk", "b", 20, 18)
        .build();
    let calc = m.calculator();

    assert_eq!(calc.opening_for_item("silk").unwrap().map(|o| o.net_profit), Some(6));
    assert_eq!(
        calc.opening_for_item("spice"),
        Err(ArbitrageError::UnknownItem("spice".to_string()))
    );
}

// ---------------------------------------------------------------------------
// find_all_opportunities
// ---------------------------------------------------------------------------

#[test]
fn all_opportunities_no_items() {
    let m = MarketFixture::new().location("a", 0, 0).location("b", 1, 0).build();
    assert!(m.calculator().find_all_opportunities().is_empty());
}

#[test]
fn all_opportunities_flat_prices() {
    let m = MarketFixture::new()
        .item("silk")
        .item("salt")
        .location("a", 0, 0)
        .location("b", 1, 0)
        .price("silk", "a", 10, 10)
        .price("silk", "b", 10, 10)
        .price("salt", "a", 20, 20)
        .price("salt", "b", 20, 20)
        .build();
    assert!(m.calculator().find_all_opportunities().is_empty());
}

#[test]
fn all_opportunities_sorted_by_net_profit() {
    let m = MarketFixture::new()
        .item("item1")
        .item("item2")
        .item("item3")
        .location("buy", 0, 0)
        .location("sell", 2, 0)
        .price("item1", "buy", 10, 5)
        .price("item1", "sell", 25, 20)
        .price("item2", "buy", 10, 5)
        .price("item2", "sell", 35, 30)
        .price("item3", "buy", 10, 5)
        .price("item3", "sell", 30, 25)
        .build();

    let all = m.calculator().find_all_opportunities();
    let ranked: Vec<(&str, i64)> = all.iter().map(|o| (o.item.id.as_str(), o.net_profit)).collect();
    assert_eq!(ranked, vec![("item2", 16), ("item3", 11), ("item1", 6)]);
}

#[test]
fn all_opportunities_drop_net_losses() {
    // unprofitable: 25 - 20 - 18 = -13
    let m = MarketFixture::new()
        .item("good")
        .item("bad")
        .location("buy", 0, 0)
        .location("sell", 9, 0)
        .price("good", "buy", 10, 5)
        .price("good", "sell", 65, 60)
        .price("bad", "buy", 20, 15)
        .price("bad", "sell", 30, 25)
        .build();

    let all = m.calculator().find_all_opportunities();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].item.id, "good");
    assert!(all.iter().all(|o| o.net_profit > 0 && o.buy_location != o.sell_location));
}

// ---------------------------------------------------------------------------
// calculate_profit
// ---------------------------------------------------------------------------

fn profit_market() -> crate::mock_market::Market {
    MarketFixture::new()
        .item("silk")
        .location("buy", 0, 0)
        .location("sell", 3, 0)
        .price("silk", "buy", 15, 10)
        .price("silk", "sell", 35, 30)
        .build()
}

#[test]
fn calculate_profit_valid_trade() {
    let m = profit_market();
    // 30 - 15 - 6
    let profit = m
        .calculator()
        .calculate_profit(m.item("silk"), Some(m.location("buy")), Some(m.location("sell")));
    assert_eq!(profit, Some(9));
}

#[test]
fn calculate_profit_can_be_negative() {
    let m = profit_market();
    // reverse direction: 10 - 35 - 6
    let profit = m
        .calculator()
        .calculate_profit(m.item("silk"), Some(m.location("sell")), Some(m.location("buy")));
    assert_eq!(profit, Some(-31));
}

#[test]
fn calculate_profit_unavailable_buy() {
    let m = MarketFixture::new()
        .item("silk")
        .location("buy", 0, 0)
        .location("sell", 3, 0)
        .price("silk", "buy", -1, 10)
        .price("silk", "sell", 35, 30)
        .build();
    let profit = m
        .calculator()
        .calculate_profit(m.item("silk"), Some(m.location("buy")), Some(m.location("sell")));
    assert_eq!(profit, None);
}

#[test]
fn calculate_profit_unavailable_sell() {
    let m = MarketFixture::new()
        .item("silk")
        .location("buy", 0, 0)
        .location("sell", 3, 0)
        .price("silk", "buy", 15, 10)
        .price("silk", "sell", 35, -1)
        .build();
    let profit = m
        .calculator()
        .calculate_profit(m.item("silk"), Some(m.location("buy")), Some(m.location("sell")));
    assert_eq!(profit, None);
}

#[test]
fn calculate_profit_includes_travel() {
    let m = MarketFixture::new()
        .item("silk")
        .location("buy", 0, 0)
        .location("sell", 9, 0)
        .price("silk", "buy", 10, 5)
        .price("silk", "sell", 55, 50)
        .build();
    let profit = m
        .calculator()
        .calculate_profit(m.item("silk"), Some(m.location("buy")), Some(m.location("sell")));
    assert_eq!(profit, Some(22));
}

#[test]
fn calculate_profit_same_location() {
    let m = MarketFixture::new()
        .item("silk")
        .location("market", 0, 0)
        .price("silk", "market", 10, 30)
        .build();
    let market = m.location("market");
    assert_eq!(m.calculator().calculate_profit(m.item("silk"), Some(market), Some(market)), Some(20));
}

#[test]
fn calculate_profit_missing_locations() {
    let m = profit_market();
    let calc = m.calculator();
    assert_eq!(calc.calculate_profit(m.item("silk"), None, Some(m.location("sell"))), None);
    assert_eq!(calc.calculate_profit(m.item("silk"), Some(m.location("buy")), None), None);
}

// ---------------------------------------------------------------------------
// find_affordable_opportunities
// ---------------------------------------------------------------------------

fn affordable_market(coins: i64) -> crate::mock_market::Market {
    MarketFixture::new()
        .item("cheap")
        .item("mid")
        .item("dear")
        .location("buy", 0, 0)
        .location("sell", 2, 0)
        .price("cheap", "buy", 10, 5)
        .price("cheap", "sell", 30, 25)
        .price("mid", "buy", 30, 25)
        .price("mid", "sell", 50, 45)
        .price("dear", "buy", 100, 95)
        .price("dear", "sell", 130, 125)
        .coins(coins)
        .build()
}

#[test]
fn affordable_rich_player_gets_everything() {
    let m = affordable_market(1000);
    assert_eq!(m.calculator().find_affordable_opportunities().len(), 3);
}

#[test]
fn affordable_excludes_buy_price_above_coins() {
    // "dear" nets the most (21) but costs 100.
    let m = affordable_market(50);
    let calc = m.calculator();
    assert_eq!(calc.find_all_opportunities()[0].item.id, "dear");

    let affordable = calc.find_affordable_opportunities();
    let ids: Vec<&str> = affordable.iter().map(|o| o.item.id.as_str()).collect();
    assert_eq!(ids, vec!["cheap", "mid"]);
    assert!(affordable.iter().all(|o| o.buy_price <= 50));
}

#[test]
fn affordable_exact_balance_counts() {
    let m = affordable_market(30);
    let ids: Vec<String> = m
        .calculator()
        .find_affordable_opportunities()
        .into_iter()
        .map(|o| o.item.id)
        .collect();
    assert_eq!(ids, vec!["cheap".to_string(), "mid".to_string()]);
}

#[test]
fn affordable_poor_player_gets_nothing() {
    let m = affordable_market(5);
    assert!(m.calculator().find_affordable_opportunities().is_empty());
}

// ---------------------------------------------------------------------------
// find_opportunities_from_current_location
// ---------------------------------------------------------------------------

#[test]
fn local_scan_requires_current_location() {
    let m = MarketFixture::new()
        .item("silk")
        .location("elsewhere", 4, 4)
        .player_at(1, 1)
        .build();
    assert_eq!(
        m.calculator().find_opportunities_from_current_location(),
        Err(ArbitrageError::NoCurrentLocation { position: HexCoord::new(1, 1) })
    );
}

#[test]
fn local_scan_no_items() {
    let m = MarketFixture::new().location("here", 0, 0).location("there", 2, 0).build();
    assert!(m.calculator().find_opportunities_from_current_location().unwrap().is_empty());
}

#[test]
fn local_scan_no_profitable_sells() {
    // 10 - 10 - 10
    let m = MarketFixture::new()
        .item("silk")
        .location("here", 0, 0)
        .location("there", 5, 0)
        .price("silk", "here", 10, 5)
        .price("silk", "there", 15, 10)
        .build();
    assert!(m.calculator().find_opportunities_from_current_location().unwrap().is_empty());
}

#[test]
fn local_scan_sorted_by_net_profit() {
    let m = MarketFixture::new()
        .item("item1")
        .item("item2")
        .location("here", 0, 0)
        .location("near", 2, 0)
        .location("far", 5, 0)
        .price("item1", "here", 10, 5)
        .price("item1", "near", 30, 25)
        .price("item2", "here", 10, 5)
        .price("item2", "far", 45, 40)
        .build();

    let local = m.calculator().find_opportunities_from_current_location().unwrap();
    assert_eq!(local.len(), 2);
    assert_eq!(local[0].item.id, "item2");
    assert_eq!(local[0].net_profit, 20);
    assert_eq!(local[1].item.id, "item1");
    assert_eq!(local[1].net_profit, 11);
    assert!(local.iter().all(|o| o.buy_location.id == "here"));
}

#[test]
fn local_scan_only_buys_here() {
    // The better trade starts at "there" and must not appear.
    let m = MarketFixture::new()
        .item("silk")
        .location("here", 0, 0)
        .location("there", 1, 0)
        .location("city", 2, 0)
        .price("silk", "here", 20, 15)
        .price("silk", "there", 5, 4)
        .price("silk", "city", 60, 40)
        .build();

    let local = m.calculator().find_opportunities_from_current_location().unwrap();
    assert_eq!(local.len(), 1);
    assert_eq!(local[0].sell_location.id, "city");
    assert_eq!(local[0].net_profit, 16);
    assert_eq!(m.calculator().find_all_opportunities()[0].buy_location.id, "there");
}

#[test]
fn local_scan_excludes_same_location() {
    let m = MarketFixture::new()
        .item("silk")
        .location("here", 0, 0)
        .price("silk", "here", 10, 50)
        .build();
    assert!(m.calculator().find_opportunities_from_current_location().unwrap().is_empty());
}

#[test]
fn local_scan_ignores_wealth() {
    let m = MarketFixture::new()
        .item("gold")
        .location("here", 0, 0)
        .location("there", 1, 0)
        .price("gold", "here", 500, 450)
        .price("gold", "there", 600, 560)
        .coins(5)
        .build();
    let local = m.calculator().find_opportunities_from_current_location().unwrap();
    assert_eq!(local.len(), 1);
    assert_eq!(local[0].net_profit, 58);
}

// ---------------------------------------------------------------------------
// find_opportunities_for_inventory
// ---------------------------------------------------------------------------

#[test]
fn inventory_scan_requires_current_location() {
    let m = MarketFixture::new().item("salt").holding("salt", 1).player_at(3, 3).build();
    assert!(matches!(
        m.calculator().find_opportunities_for_inventory(),
        Err(ArbitrageError::NoCurrentLocation { .. })
    ));
}

#[test]
fn inventory_scan_empty_inventory() {
    let m = MarketFixture::new()
        .item("salt")
        .location("here", 0, 0)
        .location("there", 3, 0)
        .price("salt", "here", 15, 10)
        .price("salt", "there", 35, 30)
        .build();
    assert!(m.calculator().find_opportunities_for_inventory().unwrap().is_empty());
}

#[test]
fn inventory_scan_better_price_elsewhere() {
    // 30 - 10 - 6
    let m = MarketFixture::new()
        .item("salt")
        .location("here", 0, 0)
        .location("better", 3, 0)
        .price("salt", "here", 15, 10)
        .price("salt", "better", 35, 30)
        .holding("salt", 1)
        .build();

    let held = m.calculator().find_opportunities_for_inventory().unwrap();
    assert_eq!(held.len(), 1);
    assert_eq!(held[0].item.id, "salt");
    assert_eq!(&held[0].buy_location, m.location("here"));
    assert_eq!(&held[0].sell_location, m.location("better"));
    assert_eq!(held[0].gross_profit, 20);
    assert_eq!(held[0].net_profit, 14);
    assert_eq!(held[0].required_capital, 0);
    assert_eq!(held[0].opening_description, "Sell salt in better for 14 coin profit");
}

#[test]
fn inventory_scan_worse_price_elsewhere() {
    let m = MarketFixture::new()
        .item("salt")
        .location("here", 0, 0)
        .location("worse", 3, 0)
        .price("salt", "here", 35, 30)
        .price("salt", "worse", 25, 20)
        .holding("salt", 1)
        .build();
    assert!(m.calculator().find_opportunities_for_inventory().unwrap().is_empty());
}

#[test]
fn inventory_scan_ignores_zero_quantity() {
    let m = MarketFixture::new()
        .item("salt")
        .location("here", 0, 0)
        .location("better", 3, 0)
        .price("salt", "here", 15, 10)
        .price("salt", "better", 35, 30)
        .holding("salt", 0)
        .build();
    assert!(m.calculator().find_opportunities_for_inventory().unwrap().is_empty());
}

#[test]
fn inventory_scan_sorted_across_items() {
    let m = MarketFixture::new()
        .item("salt")
        .item("wine")
        .location("here", 0, 0)
        .location("port", 1, 0)
        .location("inn", 2, 0)
        .price("salt", "here", 15, 10)
        .price("salt", "port", 20, 18)
        .price("wine", "here", 30, 20)
        .price("wine", "inn", 60, 50)
        .holding("salt", 2)
        .holding("wine", 1)
        .build();

    let held = m.calculator().find_opportunities_for_inventory().unwrap();
    let nets: Vec<(&str, i64)> = held.iter().map(|o| (o.item.id.as_str(), o.net_profit)).collect();
    // wine: 50 - 20 - 4; salt: 18 - 10 - 2
    assert_eq!(nets, vec![("wine", 26), ("salt", 6)]);
}
