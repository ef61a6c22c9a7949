use crate::error::SettlementError;
use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    ops::{AddAssign, SubAssign},
};

/// Number of sequential gatherings the attendance model tracks.
pub const ATTENDANCE_SLOTS: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(pub u64);

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VenueId(pub u64);

impl fmt::Display for VenueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whole currency units (e.g. yen). Sub-unit amounts are not modelled.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn from_i64(value: i64) -> Self {
        Self(value)
    }

    pub fn amount(self) -> i64 {
        self.0
    }

    pub fn abs(self) -> i64 {
        self.0.abs()
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    /// Sums amounts, failing with [`SettlementError::AmountOutOfRange`] on overflow.
    pub fn try_sum<I>(amounts: I) -> Result<Self, SettlementError>
    where
        I: IntoIterator<Item = Money>,
    {
        amounts.into_iter().try_fold(Money::ZERO, |acc, amount| {
            acc.checked_add(amount)
                .ok_or(SettlementError::AmountOutOfRange)
        })
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unspecified,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Unspecified => "unspecified",
        })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Senior,
    Junior,
    #[default]
    Flat,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::Senior => "senior",
            Role::Junior => "junior",
            Role::Flat => "flat",
        })
    }
}

/// Fraction of each gathering a participant was present for, indexed by venue order.
///
/// `1.0` means the whole gathering, `0.0` means absent.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attendance([f64; ATTENDANCE_SLOTS]);

impl Attendance {
    pub const fn new(slots: [f64; ATTENDANCE_SLOTS]) -> Self {
        Self(slots)
    }

    pub const fn absent() -> Self {
        Self([0.0; ATTENDANCE_SLOTS])
    }

    pub fn slots(&self) -> &[f64; ATTENDANCE_SLOTS] {
        &self.0
    }

    /// Attendance for the venue with the given order (1-based). `None` outside the tracked slots.
    pub fn for_order(&self, order: u32) -> Option<f64> {
        let slot = usize::try_from(order).ok()?.checked_sub(1)?;
        self.0.get(slot).copied()
    }

    pub fn is_absent_everywhere(&self) -> bool {
        self.0.iter().all(|rate| *rate == 0.0)
    }
}

impl Default for Attendance {
    fn default() -> Self {
        Self::absent()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub nickname: String,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub attendance: Attendance,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Venue {
    pub id: VenueId,
    pub order: u32,
    pub total_cost: Money,
    pub payer: ParticipantId,
}

/// A fully-formed event as handed over by the caller.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub participants: Vec<Participant>,
    pub venues: Vec<Venue>,
}

impl Event {
    pub fn total_cost(&self) -> Result<Money, SettlementError> {
        Money::try_sum(self.venues.iter().map(|venue| venue.total_cost))
    }
}

/// Multiplier tables by gender and by role. A missing key means `1.0`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiplierConfig {
    #[serde(default)]
    pub gender: FxHashMap<Gender, f64>,
    #[serde(default)]
    pub role: FxHashMap<Role, f64>,
}

impl MultiplierConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_gender(mut self, gender: Gender, multiplier: f64) -> Self {
        self.gender.insert(gender, multiplier);
        self
    }

    pub fn with_role(mut self, role: Role, multiplier: f64) -> Self {
        self.role.insert(role, multiplier);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MultiplierKey {
    Gender(Gender),
    Role(Role),
}

impl fmt::Display for MultiplierKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MultiplierKey::Gender(gender) => write!(f, "gender:{gender}"),
            MultiplierKey::Role(role) => write!(f, "role:{role}"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AllocationFactors {
    pub attendance: f64,
    pub gender_multiplier: f64,
    pub role_multiplier: f64,
}

/// One participant's share of one venue. Amounts are rounded for display only.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AllocationBreakdown {
    pub venue: VenueId,
    pub venue_order: u32,
    pub base_amount: Money,
    pub adjusted_amount: Money,
    pub factors: AllocationFactors,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ParticipantAllocation<'a> {
    pub participant: ParticipantId,
    pub nickname: &'a str,
    pub breakdown: Vec<AllocationBreakdown>,
    pub total_owed: Money,
}

/// Paid versus owed. Positive `balance` means the participant is owed money.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Balance<'a> {
    pub participant: ParticipantId,
    pub nickname: &'a str,
    pub total_paid: Money,
    pub total_owed: Money,
    pub balance: Money,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Transfer<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub amount: Money,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct OutstandingBalance<'a> {
    pub nickname: &'a str,
    pub amount: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settlement<'a> {
    pub new_balances: Vec<OutstandingBalance<'a>>,
    pub transfers: Vec<Transfer<'a>>,
}

/// Applies transfers to the signed balances and returns what each nickname is left with.
pub fn apply_transfers<'a>(
    balances: &[Balance<'a>],
    transfers: &[Transfer<'a>],
) -> FxHashMap<&'a str, Money> {
    let mut remaining: FxHashMap<&'a str, Money> = balances
        .iter()
        .map(|balance| (balance.nickname, balance.balance))
        .collect();

    for transfer in transfers {
        *remaining.entry(transfer.from).or_insert(Money::ZERO) += transfer.amount;
        *remaining.entry(transfer.to).or_insert(Money::ZERO) -= transfer.amount;
    }

    remaining
}
