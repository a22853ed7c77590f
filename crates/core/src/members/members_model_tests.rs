//! Tests for member domain models.

#[cfg(test)]
mod tests {
    use crate::members::{MemberEquitySnapshot, MemberStatus, NewMember};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn snapshot(member_id: &str, fiscal_year: i32) -> MemberEquitySnapshot {
        MemberEquitySnapshot {
            member_id: member_id.to_string(),
            fiscal_year,
            estimated_percentage: dec!(25),
            final_percentage: None,
            capital_balance: dec!(100000),
            is_finalized: false,
        }
    }

    #[test]
    fn test_effective_percentage_uses_estimate_until_finalized() {
        let mut snap = snapshot("m-1", 2024);
        snap.final_percentage = Some(dec!(30));

        // Not finalized yet: the estimate still drives calculations.
        assert_eq!(snap.effective_percentage(), dec!(25));

        snap.is_finalized = true;
        assert_eq!(snap.effective_percentage(), dec!(30));
    }

    #[test]
    fn test_effective_percentage_finalized_without_final_falls_back() {
        let mut snap = snapshot("m-1", 2024);
        snap.is_finalized = true;
        assert_eq!(snap.effective_percentage(), dec!(25));
    }

    #[test]
    fn test_snapshot_validate_rejects_negative_percentages() {
        let mut snap = snapshot("m-1", 2024);
        snap.estimated_percentage = dec!(-1);
        assert!(snap.validate().is_err());

        let mut snap = snapshot("m-1", 2024);
        snap.final_percentage = Some(dec!(-0.5));
        assert!(snap.validate().is_err());
    }

    #[test]
    fn test_snapshot_validate_requires_member_id() {
        let snap = snapshot("  ", 2024);
        assert!(snap.validate().is_err());
    }

    #[test]
    fn test_new_member_validate() {
        let valid = NewMember {
            id: None,
            name: "Avery Chen".to_string(),
            status: MemberStatus::Active,
            joined_on: NaiveDate::from_ymd_opt(2020, 1, 6).unwrap(),
            initial_equity_percentage: dec!(10),
        };
        assert!(valid.validate().is_ok());

        let empty_name = NewMember {
            name: "   ".to_string(),
            ..valid.clone()
        };
        assert!(empty_name.validate().is_err());

        let negative_equity = NewMember {
            initial_equity_percentage: dec!(-5),
            ..valid
        };
        assert!(negative_equity.validate().is_err());
    }
}
