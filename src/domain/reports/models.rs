//! Report Models

use serde::Serialize;

use crate::receipts::format_minor;

/// Aggregate store statistics for the admin dashboard and the weekly
/// digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub user_count: u64,
    pub order_count: u64,
    pub product_count: u64,
    /// Sum of completed orders' snapshot totals, in minor units.
    pub revenue: u64,
}

impl StoreStats {
    /// Plain-text digest body sent to administrators.
    #[must_use]
    pub fn digest(&self) -> String {
        format!(
            "Weekly store statistics:\n\
             - Users: {}\n\
             - Orders: {}\n\
             - Products: {}\n\
             - Revenue: {}\n",
            self.user_count,
            self.order_count,
            self.product_count,
            format_minor(self.revenue),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_lists_counts_and_formatted_revenue() {
        let stats = StoreStats {
            user_count: 12,
            order_count: 3,
            product_count: 40,
            revenue: 150_000,
        };

        let digest = stats.digest();

        assert!(digest.contains("- Users: 12"));
        assert!(digest.contains("- Orders: 3"));
        assert!(digest.contains("- Products: 40"));
        assert!(digest.contains("- Revenue: 1500.00"));
    }
}
