//! Customer record: the typed input to one prediction.
//!
//! One struct field per form control, with a fixed enum per categorical
//! field. Numeric bounds match the form controls; `clamp` enforces them
//! (internet speed snaps to its choice set). Values outside bounds are
//! never rejected, only clamped.

use std::fmt;
use std::str::FromStr;

/// Device type choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceType {
    Android,
    Ios,
    Other,
}

/// Plan type choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanType {
    Prepaid,
    Postpaid,
}

/// Network type choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkType {
    ThreeG,
    FourG,
    FiveG,
}

/// Region choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    North,
    South,
    East,
    West,
}

/// Payment method choices (only some artifact variants model this field).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    Card,
    Cash,
    Upi,
    Wallet,
}

impl DeviceType {
    /// All values, in form order.
    pub const ALL: [DeviceType; 3] = [DeviceType::Android, DeviceType::Ios, DeviceType::Other];

    /// The display/indicator string for this value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceType::Android => "Android",
            DeviceType::Ios => "iOS",
            DeviceType::Other => "Other",
        }
    }
}

impl PlanType {
    /// All values, in form order.
    pub const ALL: [PlanType; 2] = [PlanType::Prepaid, PlanType::Postpaid];

    /// The display/indicator string for this value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanType::Prepaid => "Prepaid",
            PlanType::Postpaid => "Postpaid",
        }
    }
}

impl NetworkType {
    /// All values, in form order.
    pub const ALL: [NetworkType; 3] = [
        NetworkType::ThreeG,
        NetworkType::FourG,
        NetworkType::FiveG,
    ];

    /// The display/indicator string for this value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkType::ThreeG => "3G",
            NetworkType::FourG => "4G",
            NetworkType::FiveG => "5G",
        }
    }
}

impl Region {
    /// All values, in form order.
    pub const ALL: [Region; 4] = [Region::North, Region::South, Region::East, Region::West];

    /// The display/indicator string for this value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::North => "North",
            Region::South => "South",
            Region::East => "East",
            Region::West => "West",
        }
    }
}

impl PaymentMethod {
    /// All values, in form order.
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Upi,
        PaymentMethod::Card,
        PaymentMethod::Wallet,
        PaymentMethod::Cash,
    ];

    /// The display/indicator string for this value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "Card",
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Upi => "UPI",
            PaymentMethod::Wallet => "Wallet",
        }
    }
}

macro_rules! impl_display_fromstr {
    ($ty:ty, $label:expr) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .find(|v| v.as_str().eq_ignore_ascii_case(s))
                    .copied()
                    .ok_or_else(|| format!("Unknown {}: {}", $label, s))
            }
        }
    };
}

impl_display_fromstr!(DeviceType, "device type");
impl_display_fromstr!(PlanType, "plan type");
impl_display_fromstr!(NetworkType, "network type");
impl_display_fromstr!(Region, "region");
impl_display_fromstr!(PaymentMethod, "payment method");

/// Inclusive bounds for the numeric form fields.
pub mod bounds {
    /// Customer age range.
    pub const CUSTOMER_AGE: (f32, f32) = (18.0, 80.0);
    /// Tenure range in months.
    pub const TENURE_MONTHS: (f32, f32) = (1.0, 120.0);
    /// Monthly recharge range.
    pub const MONTHLY_RECHARGE: (f32, f32) = (100.0, 5000.0);
    /// Call minutes range.
    pub const CALL_MINUTES: (f32, f32) = (0.0, 3000.0);
    /// SMS count range.
    pub const SMS_COUNT: (f32, f32) = (0.0, 1000.0);
    /// Support calls range.
    pub const SUPPORT_CALLS: (f32, f32) = (0.0, 20.0);
    /// Roaming usage range in GB.
    pub const ROAMING_USAGE_GB: (f32, f32) = (0.0, 50.0);
    /// Internet speed is a choice control, not a free range.
    pub const INTERNET_SPEED_CHOICES: [f32; 5] = [10.0, 20.0, 40.0, 100.0, 200.0];
}

/// One customer's attributes, captured per prediction.
///
/// # Examples
///
/// ```
/// use consumo::record::CustomerRecord;
///
/// let record = CustomerRecord::default();
/// assert_eq!(record.customer_age, 30.0);
/// assert_eq!(record.monthly_recharge, 500.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerRecord {
    pub customer_age: f32,
    pub tenure_months: f32,
    pub monthly_recharge: f32,
    pub call_minutes: f32,
    pub sms_count: f32,
    pub support_calls: f32,
    pub internet_speed_mbps: f32,
    pub roaming_usage_gb: f32,
    pub device_type: DeviceType,
    pub plan_type: PlanType,
    pub network_type: NetworkType,
    pub region: Region,
    pub payment_method: PaymentMethod,
}

impl Default for CustomerRecord {
    /// The untouched-form defaults.
    fn default() -> Self {
        Self {
            customer_age: 30.0,
            tenure_months: 12.0,
            monthly_recharge: 500.0,
            call_minutes: 300.0,
            sms_count: 50.0,
            support_calls: 1.0,
            internet_speed_mbps: 10.0,
            roaming_usage_gb: 1.0,
            device_type: DeviceType::Android,
            plan_type: PlanType::Prepaid,
            network_type: NetworkType::ThreeG,
            region: Region::North,
            payment_method: PaymentMethod::Upi,
        }
    }
}

impl CustomerRecord {
    /// Returns a copy with every numeric field forced into bounds and the
    /// internet speed snapped to the nearest allowed choice.
    #[must_use]
    pub fn clamped(&self) -> Self {
        let mut r = self.clone();
        r.customer_age = clamp_to(r.customer_age, bounds::CUSTOMER_AGE);
        r.tenure_months = clamp_to(r.tenure_months, bounds::TENURE_MONTHS);
        r.monthly_recharge = clamp_to(r.monthly_recharge, bounds::MONTHLY_RECHARGE);
        r.call_minutes = clamp_to(r.call_minutes, bounds::CALL_MINUTES);
        r.sms_count = clamp_to(r.sms_count, bounds::SMS_COUNT);
        r.support_calls = clamp_to(r.support_calls, bounds::SUPPORT_CALLS);
        r.roaming_usage_gb = clamp_to(r.roaming_usage_gb, bounds::ROAMING_USAGE_GB);
        r.internet_speed_mbps = snap_to_choice(r.internet_speed_mbps);
        r
    }

    /// The numeric fields in canonical frame order, as (name, value) pairs.
    #[must_use]
    pub fn numeric_fields(&self) -> [(&'static str, f32); 8] {
        [
            ("customer_age", self.customer_age),
            ("monthly_recharge", self.monthly_recharge),
            ("call_minutes", self.call_minutes),
            ("sms_count", self.sms_count),
            ("support_calls", self.support_calls),
            ("internet_speed_mbps", self.internet_speed_mbps),
            ("roaming_usage_gb", self.roaming_usage_gb),
            ("tenure_months", self.tenure_months),
        ]
    }

    /// The categorical fields as (field name, selected value) pairs.
    #[must_use]
    pub fn categorical_fields(&self) -> [(&'static str, &'static str); 5] {
        [
            ("device_type", self.device_type.as_str()),
            ("plan_type", self.plan_type.as_str()),
            ("network_type", self.network_type.as_str()),
            ("region", self.region.as_str()),
            ("payment_method", self.payment_method.as_str()),
        ]
    }
}

fn clamp_to(value: f32, (lo, hi): (f32, f32)) -> f32 {
    value.clamp(lo, hi)
}

fn snap_to_choice(value: f32) -> f32 {
    let mut best = bounds::INTERNET_SPEED_CHOICES[0];
    let mut best_dist = (value - best).abs();
    for &choice in &bounds::INTERNET_SPEED_CHOICES[1..] {
        let dist = (value - choice).abs();
        if dist < best_dist {
            best = choice;
            best_dist = dist;
        }
    }
    best
}
