// Structured cache key builders for the storefront entities

/// Product list/detail key prefix
const PRODUCTS_PREFIX: &str = "products:";

/// Order key prefix
const ORDERS_PREFIX: &str = "orders:";

/// Aggregated stats key prefix
const STATS_PREFIX: &str = "stats:";

/// Key for the full product catalogue
pub fn all_products() -> String {
    format!("{}all", PRODUCTS_PREFIX)
}

/// Key for one product
pub fn product(id: i64) -> String {
    format!("{}{}", PRODUCTS_PREFIX, id)
}

/// Key for the products of one category
pub fn products_by_category(category: &str) -> String {
    format!("{}category:{}", PRODUCTS_PREFIX, category)
}

/// Key for the products of one country
pub fn products_by_country(country: &str) -> String {
    format!("{}country:{}", PRODUCTS_PREFIX, country)
}

/// Key for one order
pub fn order(id: i64) -> String {
    format!("{}{}", ORDERS_PREFIX, id)
}

/// Key for the recent orders list
pub fn recent_orders() -> String {
    format!("{}recent", ORDERS_PREFIX)
}

/// Key for one day's stats, date formatted YYYY-MM-DD
pub fn daily_stats(date: &str) -> String {
    format!("{}daily:{}", STATS_PREFIX, date)
}

/// Key for one month's stats, month formatted YYYY-MM
pub fn monthly_stats(month: &str) -> String {
    format!("{}monthly:{}", STATS_PREFIX, month)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_keys() {
        assert_eq!(all_products(), "products:all");
        assert_eq!(product(42), "products:42");
        assert_eq!(products_by_category("brut"), "products:category:brut");
        assert_eq!(products_by_country("FR"), "products:country:FR");
    }

    #[test]
    fn test_order_and_stats_keys() {
        assert_eq!(order(7), "orders:7");
        assert_eq!(recent_orders(), "orders:recent");
        assert_eq!(daily_stats("2024-03-01"), "stats:daily:2024-03-01");
        assert_eq!(monthly_stats("2024-03"), "stats:monthly:2024-03");
    }
}
