use chrono::NaiveDateTime;

/// The two funding roles in the system. A record of one role is always
/// matched against the unsatisfied pool of the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FundingRole {
    Project,
    Donation,
}

impl FundingRole {
    /// Static role-to-counterpart table: projects draw from donations,
    /// donations draw from projects.
    pub fn counterpart(self) -> FundingRole {
        match self {
            FundingRole::Project => FundingRole::Donation,
            FundingRole::Donation => FundingRole::Project,
        }
    }
}

/// Capability set shared by both funding roles. The allocation engine only
/// ever sees records through this trait, so it never inspects the concrete
/// record type at runtime.
pub trait Fundable {
    /// Role of the implementing record kind.
    const ROLE: FundingRole;

    fn full_amount(&self) -> i64;
    fn invested_amount(&self) -> i64;
    fn set_invested_amount(&mut self, amount: i64);
    fn fully_invested(&self) -> bool;
    fn set_fully_invested(&mut self, value: bool);
    fn close_date(&self) -> Option<NaiveDateTime>;
    fn set_close_date(&mut self, date: Option<NaiveDateTime>);
    fn create_date(&self) -> NaiveDateTime;

    /// Capacity still waiting to be funded.
    fn remaining(&self) -> i64 {
        self.full_amount() - self.invested_amount()
    }
}
