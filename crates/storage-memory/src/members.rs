//! In-memory member and equity-snapshot store.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

use equityledger_core::approvals::EquityUpdate;
use equityledger_core::errors::{Error, Result};
use equityledger_core::members::{
    Member, MemberEquitySnapshot, MemberRepositoryTrait, MembersError, NewMember,
};

/// Stores members, their per-year equity snapshots, and per-year distribution
/// totals.
///
/// Snapshots live behind one lock so `apply_equity_updates` can validate every
/// update and then mutate all of them without another writer interleaving.
#[derive(Default)]
pub struct InMemoryMemberRepository {
    members: DashMap<String, Member>,
    snapshots: RwLock<HashMap<(String, i32), MemberEquitySnapshot>>,
    distributions: DashMap<(String, i32), Decimal>,
}

impl InMemoryMemberRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn snapshots_write(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<(String, i32), MemberEquitySnapshot>>>
    {
        self.snapshots
            .write()
            .map_err(|e| Error::Repository(format!("Snapshot store lock poisoned: {}", e)))
    }

    fn snapshots_read(
        &self,
    ) -> Result<std::sync::RwLockReadGuard<'_, HashMap<(String, i32), MemberEquitySnapshot>>>
    {
        self.snapshots
            .read()
            .map_err(|e| Error::Repository(format!("Snapshot store lock poisoned: {}", e)))
    }

    /// Inserts or replaces a snapshot directly, bypassing the approval
    /// workflow. Intended for seeding fixtures and year-start rollover.
    pub fn upsert_snapshot(&self, snapshot: MemberEquitySnapshot) -> Result<()> {
        snapshot.validate()?;
        self.snapshots_write()?.insert(
            (snapshot.member_id.clone(), snapshot.fiscal_year),
            snapshot,
        );
        Ok(())
    }

    /// Adds to a member's distribution total for a fiscal year.
    pub fn record_distribution(
        &self,
        member_id: &str,
        fiscal_year: i32,
        amount: Decimal,
    ) -> Result<()> {
        if amount < Decimal::ZERO {
            return Err(Error::Repository(format!(
                "Distribution amount for member {} cannot be negative",
                member_id
            )));
        }
        *self
            .distributions
            .entry((member_id.to_string(), fiscal_year))
            .or_insert(Decimal::ZERO) += amount;
        Ok(())
    }

    /// Seeds the next fiscal year's snapshots from the prior year: ending
    /// percentages carry over as the new estimates, and the given capital
    /// balances replace the old ones.
    pub fn roll_forward(
        &self,
        from_year: i32,
        to_year: i32,
        capital_balances: &HashMap<String, Decimal>,
    ) -> Result<()> {
        let mut snapshots = self.snapshots_write()?;
        let prior: Vec<MemberEquitySnapshot> = snapshots
            .values()
            .filter(|s| s.fiscal_year == from_year)
            .cloned()
            .collect();

        for snapshot in prior {
            let capital = capital_balances
                .get(&snapshot.member_id)
                .copied()
                .unwrap_or(snapshot.capital_balance);
            snapshots.insert(
                (snapshot.member_id.clone(), to_year),
                MemberEquitySnapshot {
                    member_id: snapshot.member_id.clone(),
                    fiscal_year: to_year,
                    estimated_percentage: snapshot.effective_percentage(),
                    final_percentage: None,
                    capital_balance: capital,
                    is_finalized: false,
                },
            );
        }
        Ok(())
    }
}

#[async_trait]
impl MemberRepositoryTrait for InMemoryMemberRepository {
    async fn create(&self, new_member: NewMember, fiscal_year: i32) -> Result<Member> {
        let now = Utc::now().naive_utc();
        let member = Member {
            id: new_member
                .id
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            name: new_member.name,
            status: new_member.status,
            joined_on: new_member.joined_on,
            created_at: now,
            updated_at: now,
        };

        self.snapshots_write()?.insert(
            (member.id.clone(), fiscal_year),
            MemberEquitySnapshot {
                member_id: member.id.clone(),
                fiscal_year,
                estimated_percentage: new_member.initial_equity_percentage,
                final_percentage: None,
                capital_balance: Decimal::ZERO,
                is_finalized: false,
            },
        );
        self.members.insert(member.id.clone(), member.clone());
        Ok(member)
    }

    fn get_by_id(&self, member_id: &str) -> Result<Member> {
        self.members
            .get(member_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| Error::NotFound(format!("Member {}", member_id)))
    }

    fn get_active_members(&self, fiscal_year: i32) -> Result<Vec<Member>> {
        let snapshots = self.snapshots_read()?;
        let mut members: Vec<Member> = self
            .members
            .iter()
            .filter(|entry| {
                entry.value().is_active()
                    && snapshots.contains_key(&(entry.key().clone(), fiscal_year))
            })
            .map(|entry| entry.value().clone())
            .collect();
        members.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(members)
    }

    fn get_equity_snapshots(&self, fiscal_year: i32) -> Result<Vec<MemberEquitySnapshot>> {
        let mut snapshots: Vec<MemberEquitySnapshot> = self
            .snapshots_read()?
            .values()
            .filter(|s| s.fiscal_year == fiscal_year)
            .cloned()
            .collect();
        snapshots.sort_by(|a, b| a.member_id.cmp(&b.member_id));
        Ok(snapshots)
    }

    fn get_equity_snapshot(
        &self,
        member_id: &str,
        fiscal_year: i32,
    ) -> Result<MemberEquitySnapshot> {
        self.snapshots_read()?
            .get(&(member_id.to_string(), fiscal_year))
            .cloned()
            .ok_or_else(|| {
                Error::NotFound(format!(
                    "Equity snapshot for member {} in fiscal year {}",
                    member_id, fiscal_year
                ))
            })
    }

    fn get_capital_balance(&self, member_id: &str, fiscal_year: i32) -> Result<Decimal> {
        Ok(self.get_equity_snapshot(member_id, fiscal_year)?.capital_balance)
    }

    fn get_total_distributions(&self, member_id: &str, fiscal_year: i32) -> Result<Decimal> {
        Ok(self
            .distributions
            .get(&(member_id.to_string(), fiscal_year))
            .map(|entry| *entry.value())
            .unwrap_or(Decimal::ZERO))
    }

    async fn apply_equity_updates(
        &self,
        fiscal_year: i32,
        updates: &[EquityUpdate],
    ) -> Result<Vec<MemberEquitySnapshot>> {
        let mut snapshots = self.snapshots_write()?;

        // Validate every update before the first write.
        for update in updates {
            update.validate()?;
            match snapshots.get(&(update.member_id.clone(), fiscal_year)) {
                None => {
                    return Err(Error::NotFound(format!(
                        "Equity snapshot for member {} in fiscal year {}",
                        update.member_id, fiscal_year
                    )));
                }
                Some(snapshot) if snapshot.is_finalized => {
                    return Err(Error::Members(MembersError::SnapshotFinalized {
                        member_id: update.member_id.clone(),
                        fiscal_year,
                    }));
                }
                Some(_) => {}
            }
        }

        let mut changed = Vec::with_capacity(updates.len());
        for update in updates {
            if let Some(snapshot) = snapshots.get_mut(&(update.member_id.clone(), fiscal_year)) {
                snapshot.estimated_percentage = update.new_percentage;
                if snapshot.final_percentage.is_some() {
                    snapshot.final_percentage = Some(update.new_percentage);
                }
                changed.push(snapshot.clone());
            }
        }
        Ok(changed)
    }

    async fn finalize_snapshots(&self, fiscal_year: i32) -> Result<()> {
        let mut snapshots = self.snapshots_write()?;
        for snapshot in snapshots.values_mut() {
            if snapshot.fiscal_year == fiscal_year {
                if snapshot.final_percentage.is_none() {
                    snapshot.final_percentage = Some(snapshot.estimated_percentage);
                }
                snapshot.is_finalized = true;
            }
        }
        Ok(())
    }

    async fn unfinalize_snapshots(&self, fiscal_year: i32) -> Result<()> {
        let mut snapshots = self.snapshots_write()?;
        for snapshot in snapshots.values_mut() {
            if snapshot.fiscal_year == fiscal_year {
                snapshot.is_finalized = false;
                snapshot.final_percentage = None;
            }
        }
        Ok(())
    }
}
