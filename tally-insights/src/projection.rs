//! Savings projection from observed monthly net flow.

use tally_core::transaction::TransactionTable;

use crate::trends::monthly_totals;

/// Cumulative savings projection.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    /// Net position accumulated over the observed data
    pub current_savings: f64,
    /// Mean of the observed per-month nets
    pub avg_monthly_net: f64,
    /// `months + 1` points starting at `current_savings`
    pub projected: Vec<f64>,
}

/// Project savings `months` ahead by repeating the average monthly net.
///
/// An empty table projects flat zeros.
pub fn savings_projection(table: &TransactionTable, months: usize) -> Projection {
    let observed = monthly_totals(table);
    let current_savings: f64 = observed.iter().map(|m| m.total).sum();
    let avg_monthly_net = if observed.is_empty() {
        0.0
    } else {
        current_savings / observed.len() as f64
    };

    let mut projected = Vec::with_capacity(months + 1);
    projected.push(current_savings);
    for i in 0..months {
        projected.push(projected[i] + avg_monthly_net);
    }

    Projection {
        current_savings,
        avg_monthly_net,
        projected,
    }
}

/// Months until `goal` at the projected rate.
///
/// `None` when the average monthly net is not positive — the goal is
/// unreachable at the current rate rather than a division fault. An already
/// reached goal is zero months.
pub fn months_to_goal(goal: f64, projection: &Projection) -> Option<f64> {
    if projection.avg_monthly_net <= 0.0 {
        return None;
    }
    let months = (goal - projection.current_savings) / projection.avg_monthly_net;
    Some(months.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tally_core::transaction::Transaction;

    fn txn(date: (i32, u32, u32), amount: f64) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            "X",
            amount,
        )
    }

    fn two_months() -> TransactionTable {
        // Jan net +300, Feb net +500
        TransactionTable::new(vec![
            txn((2024, 1, 25), 1000.0),
            txn((2024, 1, 28), -700.0),
            txn((2024, 2, 25), 1000.0),
            txn((2024, 2, 28), -500.0),
        ])
    }

    #[test]
    fn test_projection_average_and_points() {
        let p = savings_projection(&two_months(), 12);
        assert_eq!(p.current_savings, 800.0);
        assert_eq!(p.avg_monthly_net, 400.0);
        assert_eq!(p.projected.len(), 13);
        assert_eq!(p.projected[0], 800.0);
        assert_eq!(p.projected[1], 1200.0);
        assert_eq!(p.projected[12], 800.0 + 12.0 * 400.0);
    }

    #[test]
    fn test_empty_table_projects_zero() {
        let p = savings_projection(&TransactionTable::default(), 12);
        assert_eq!(p.current_savings, 0.0);
        assert_eq!(p.avg_monthly_net, 0.0);
        assert_eq!(p.projected, vec![0.0; 13]);
    }

    #[test]
    fn test_months_to_goal() {
        let p = savings_projection(&two_months(), 12);
        // (2800 - 800) / 400 = 5 months
        assert_eq!(months_to_goal(2800.0, &p), Some(5.0));
    }

    #[test]
    fn test_goal_already_reached_is_zero_months() {
        let p = savings_projection(&two_months(), 12);
        assert_eq!(months_to_goal(100.0, &p), Some(0.0));
    }

    #[test]
    fn test_non_positive_rate_has_no_eta() {
        // Spending more than earning: the denominator guard, not a crash.
        let table = TransactionTable::new(vec![txn((2024, 1, 10), -250.0)]);
        let p = savings_projection(&table, 12);
        assert!(p.avg_monthly_net < 0.0);
        assert_eq!(months_to_goal(1000.0, &p), None);

        let empty = savings_projection(&TransactionTable::default(), 12);
        assert_eq!(months_to_goal(1000.0, &empty), None);
    }
}
