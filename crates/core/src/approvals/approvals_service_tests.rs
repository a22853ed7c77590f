//! Tests for the board-approval workflow.

#[cfg(test)]
mod tests {
    use crate::approvals::{
        ApprovalAuthorizerTrait, ApprovalError, ApprovalRepositoryTrait, ApprovalStatus,
        ApprovalType, BoardApproval, BoardApprovalService, BoardApprovalServiceTrait,
        EquityUpdate, NewBoardApproval,
    };
    use crate::errors::{Error, Result};
    use crate::members::{Member, MemberEquitySnapshot, MemberRepositoryTrait, NewMember};
    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    // --- Mock ApprovalRepository ---
    #[derive(Clone, Default)]
    struct MockApprovalRepository {
        approvals: Arc<Mutex<HashMap<String, BoardApproval>>>,
    }

    #[async_trait]
    impl ApprovalRepositoryTrait for MockApprovalRepository {
        async fn save(&self, approval: BoardApproval) -> Result<BoardApproval> {
            self.approvals
                .lock()
                .unwrap()
                .insert(approval.id.clone(), approval.clone());
            Ok(approval)
        }

        fn get_by_id(&self, approval_id: &str) -> Result<BoardApproval> {
            self.approvals
                .lock()
                .unwrap()
                .get(approval_id)
                .cloned()
                .ok_or_else(|| {
                    Error::Approval(ApprovalError::NotFound(approval_id.to_string()))
                })
        }

        fn list_by_year(&self, fiscal_year: i32) -> Result<Vec<BoardApproval>> {
            Ok(self
                .approvals
                .lock()
                .unwrap()
                .values()
                .filter(|a| a.fiscal_year == fiscal_year)
                .cloned()
                .collect())
        }
    }

    // --- Mock MemberRepository (snapshots only) ---
    #[derive(Clone, Default)]
    struct MockMemberRepository {
        snapshots: Arc<Mutex<HashMap<(String, i32), MemberEquitySnapshot>>>,
    }

    impl MockMemberRepository {
        fn add_snapshot(&self, member_id: &str, fiscal_year: i32, percentage: Decimal) {
            self.snapshots.lock().unwrap().insert(
                (member_id.to_string(), fiscal_year),
                MemberEquitySnapshot {
                    member_id: member_id.to_string(),
                    fiscal_year,
                    estimated_percentage: percentage,
                    final_percentage: None,
                    capital_balance: dec!(100000),
                    is_finalized: false,
                },
            );
        }

        fn percentage_of(&self, member_id: &str, fiscal_year: i32) -> Decimal {
            self.snapshots
                .lock()
                .unwrap()
                .get(&(member_id.to_string(), fiscal_year))
                .unwrap()
                .estimated_percentage
        }
    }

    #[async_trait]
    impl MemberRepositoryTrait for MockMemberRepository {
        async fn create(&self, _new_member: NewMember, _fiscal_year: i32) -> Result<Member> {
            unimplemented!("Not needed for these tests")
        }

        fn get_by_id(&self, _member_id: &str) -> Result<Member> {
            unimplemented!("Not needed for these tests")
        }

        fn get_active_members(&self, _fiscal_year: i32) -> Result<Vec<Member>> {
            unimplemented!("Not needed for these tests")
        }

        fn get_equity_snapshots(&self, fiscal_year: i32) -> Result<Vec<MemberEquitySnapshot>> {
            Ok(self
                .snapshots
                .lock()
                .unwrap()
                .values()
                .filter(|s| s.fiscal_year == fiscal_year)
                .cloned()
                .collect())
        }

        fn get_equity_snapshot(
            &self,
            member_id: &str,
            fiscal_year: i32,
        ) -> Result<MemberEquitySnapshot> {
            self.snapshots
                .lock()
                .unwrap()
                .get(&(member_id.to_string(), fiscal_year))
                .cloned()
                .ok_or_else(|| Error::NotFound(member_id.to_string()))
        }

        fn get_capital_balance(&self, member_id: &str, fiscal_year: i32) -> Result<Decimal> {
            Ok(self.get_equity_snapshot(member_id, fiscal_year)?.capital_balance)
        }

        fn get_total_distributions(&self, _member_id: &str, _fiscal_year: i32) -> Result<Decimal> {
            Ok(Decimal::ZERO)
        }

        async fn apply_equity_updates(
            &self,
            fiscal_year: i32,
            updates: &[EquityUpdate],
        ) -> Result<Vec<MemberEquitySnapshot>> {
            let mut snapshots = self.snapshots.lock().unwrap();

            // Validate everything before the first write.
            for update in updates {
                update.validate()?;
                if !snapshots.contains_key(&(update.member_id.clone(), fiscal_year)) {
                    return Err(Error::NotFound(update.member_id.clone()));
                }
            }

            let mut changed = Vec::with_capacity(updates.len());
            for update in updates {
                let snapshot = snapshots
                    .get_mut(&(update.member_id.clone(), fiscal_year))
                    .expect("validated above");
                snapshot.estimated_percentage = update.new_percentage;
                if snapshot.final_percentage.is_some() {
                    snapshot.final_percentage = Some(update.new_percentage);
                }
                changed.push(snapshot.clone());
            }
            Ok(changed)
        }

        async fn finalize_snapshots(&self, _fiscal_year: i32) -> Result<()> {
            Ok(())
        }

        async fn unfinalize_snapshots(&self, _fiscal_year: i32) -> Result<()> {
            Ok(())
        }
    }

    // --- Mock Authorizer ---
    struct MockAuthorizer {
        approvers: Vec<String>,
    }

    impl ApprovalAuthorizerTrait for MockAuthorizer {
        fn can_approve(&self, actor: &str) -> bool {
            self.approvers.iter().any(|a| a == actor)
        }
    }

    struct Fixture {
        service: BoardApprovalService,
        member_repository: MockMemberRepository,
    }

    fn fixture() -> Fixture {
        let member_repository = MockMemberRepository::default();
        member_repository.add_snapshot("A", 2024, dec!(60));
        member_repository.add_snapshot("B", 2024, dec!(40));

        let service = BoardApprovalService::new(
            Arc::new(MockApprovalRepository::default()),
            Arc::new(member_repository.clone()),
            Arc::new(MockAuthorizer {
                approvers: vec!["board-chair@firm.test".to_string()],
            }),
        );
        Fixture {
            service,
            member_repository,
        }
    }

    fn annual_update(updates: Vec<EquityUpdate>) -> NewBoardApproval {
        NewBoardApproval {
            approval_type: ApprovalType::AnnualEquityUpdate,
            fiscal_year: 2024,
            updates,
            effective_date: None,
        }
    }

    fn shift_five_points() -> Vec<EquityUpdate> {
        vec![
            EquityUpdate {
                member_id: "A".to_string(),
                current_percentage: dec!(60),
                new_percentage: dec!(55),
            },
            EquityUpdate {
                member_id: "B".to_string(),
                current_percentage: dec!(40),
                new_percentage: dec!(45),
            },
        ]
    }

    #[tokio::test]
    async fn test_full_lifecycle_draft_to_applied() {
        let fixture = fixture();

        let draft = fixture
            .service
            .create_draft(annual_update(shift_five_points()))
            .await
            .unwrap();
        assert_eq!(draft.status, ApprovalStatus::Draft);
        assert_eq!(draft.total_equity_before, dec!(100));
        assert_eq!(draft.total_equity_after, dec!(100));

        let submitted = fixture
            .service
            .submit(&draft.id, "cfo@firm.test")
            .await
            .unwrap();
        assert_eq!(submitted.approval.status, ApprovalStatus::PendingApproval);
        assert!(submitted.warnings.is_empty());

        let approved = fixture
            .service
            .approve(&draft.id, "board-chair@firm.test")
            .await
            .unwrap();
        assert_eq!(approved.status, ApprovalStatus::Approved);

        let applied = fixture.service.apply(&draft.id).await.unwrap();
        assert_eq!(applied.status, ApprovalStatus::Applied);
        assert_eq!(fixture.member_repository.percentage_of("A", 2024), dec!(55));
        assert_eq!(fixture.member_repository.percentage_of("B", 2024), dec!(45));
    }

    #[tokio::test]
    async fn test_apply_from_draft_is_invalid() {
        let fixture = fixture();
        let draft = fixture
            .service
            .create_draft(annual_update(shift_five_points()))
            .await
            .unwrap();

        let result = fixture.service.apply(&draft.id).await;
        assert!(matches!(
            result,
            Err(Error::Approval(ApprovalError::InvalidTransition {
                current: ApprovalStatus::Draft,
                attempted: ApprovalStatus::Applied,
            }))
        ));
    }

    #[tokio::test]
    async fn test_applied_is_terminal() {
        let fixture = fixture();
        let draft = fixture
            .service
            .create_draft(annual_update(shift_five_points()))
            .await
            .unwrap();
        fixture.service.submit(&draft.id, "cfo@firm.test").await.unwrap();
        fixture
            .service
            .approve(&draft.id, "board-chair@firm.test")
            .await
            .unwrap();
        fixture.service.apply(&draft.id).await.unwrap();

        assert!(fixture.service.apply(&draft.id).await.is_err());
        assert!(fixture
            .service
            .submit(&draft.id, "cfo@firm.test")
            .await
            .is_err());
        assert!(fixture
            .service
            .approve(&draft.id, "board-chair@firm.test")
            .await
            .is_err());
        assert!(fixture
            .service
            .reject(&draft.id, "board-chair@firm.test")
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_rejected_is_terminal_and_mutates_nothing() {
        let fixture = fixture();
        let draft = fixture
            .service
            .create_draft(annual_update(shift_five_points()))
            .await
            .unwrap();
        fixture.service.submit(&draft.id, "cfo@firm.test").await.unwrap();

        let rejected = fixture
            .service
            .reject(&draft.id, "board-chair@firm.test")
            .await
            .unwrap();
        assert_eq!(rejected.status, ApprovalStatus::Rejected);
        assert_eq!(
            rejected.rejected_by.as_deref(),
            Some("board-chair@firm.test")
        );
        assert_eq!(fixture.member_repository.percentage_of("A", 2024), dec!(60));

        // A rejected approval is never revived.
        assert!(fixture
            .service
            .submit(&draft.id, "cfo@firm.test")
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_approve_requires_capability() {
        let fixture = fixture();
        let draft = fixture
            .service
            .create_draft(annual_update(shift_five_points()))
            .await
            .unwrap();
        fixture.service.submit(&draft.id, "cfo@firm.test").await.unwrap();

        let result = fixture.service.approve(&draft.id, "intern@firm.test").await;
        assert!(matches!(
            result,
            Err(Error::Approval(ApprovalError::Unauthorized(ref actor))) if actor == "intern@firm.test"
        ));
    }

    #[tokio::test]
    async fn test_submit_requires_updates() {
        let fixture = fixture();
        let draft = fixture
            .service
            .create_draft(annual_update(Vec::new()))
            .await
            .unwrap();

        let result = fixture.service.submit(&draft.id, "cfo@firm.test").await;
        assert!(matches!(
            result,
            Err(Error::Approval(ApprovalError::EmptyUpdates(_)))
        ));
    }

    #[tokio::test]
    async fn test_submit_warns_on_equity_drift_but_does_not_block() {
        let fixture = fixture();
        // A drops 5 points with no offsetting increase: total lands at 95%.
        let draft = fixture
            .service
            .create_draft(annual_update(vec![EquityUpdate {
                member_id: "A".to_string(),
                current_percentage: dec!(60),
                new_percentage: dec!(55),
            }]))
            .await
            .unwrap();
        assert_eq!(draft.total_equity_after, dec!(95));

        let outcome = fixture.service.submit(&draft.id, "cfo@firm.test").await.unwrap();
        assert_eq!(outcome.approval.status, ApprovalStatus::PendingApproval);
        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].contains("95"));
    }

    #[tokio::test]
    async fn test_apply_is_atomic_across_updates() {
        let member_repository = MockMemberRepository::default();
        member_repository.add_snapshot("A", 2024, dec!(60));
        member_repository.add_snapshot("B", 2024, dec!(40));

        // An already-approved record with one valid update and one that would
        // drive B's percentage negative.
        let now = chrono::Utc::now().naive_utc();
        let repository = MockApprovalRepository::default();
        repository
            .save(BoardApproval {
                id: "ap-1".to_string(),
                approval_type: ApprovalType::AnnualEquityUpdate,
                status: ApprovalStatus::Approved,
                fiscal_year: 2024,
                total_equity_before: dec!(100),
                total_equity_after: dec!(35),
                updates: vec![
                    EquityUpdate {
                        member_id: "A".to_string(),
                        current_percentage: dec!(60),
                        new_percentage: dec!(45),
                    },
                    EquityUpdate {
                        member_id: "B".to_string(),
                        current_percentage: dec!(40),
                        new_percentage: dec!(-10),
                    },
                ],
                submitted_by: Some("cfo@firm.test".to_string()),
                approved_by: Some("board-chair@firm.test".to_string()),
                rejected_by: None,
                effective_date: None,
                created_at: now,
                updated_at: now,
            })
            .await
            .unwrap();

        let service = BoardApprovalService::new(
            Arc::new(repository),
            Arc::new(member_repository.clone()),
            Arc::new(MockAuthorizer {
                approvers: vec!["board-chair@firm.test".to_string()],
            }),
        );

        let result = service.apply("ap-1").await;
        assert!(result.is_err());

        // No partial application: both members keep their prior percentages,
        // and the approval never advances to APPLIED.
        assert_eq!(member_repository.percentage_of("A", 2024), dec!(60));
        assert_eq!(member_repository.percentage_of("B", 2024), dec!(40));
        assert_eq!(
            service.get_approval("ap-1").unwrap().status,
            ApprovalStatus::Approved
        );
    }
}
