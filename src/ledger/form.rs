use anyhow::{Context, Result};
use base64::Engine;
use std::path::Path;
use std::str::FromStr;

use crate::models::DonationRecord;
use crate::utils::numerals::to_ascii_digits;

pub const MIN_AMOUNT: u32 = 10;
pub const MAX_AMOUNT: u32 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cause {
    Masjid,
    Orphan,
    Iftar,
    Winter,
    Quran,
    Sadaqah,
}

impl Cause {
    pub const ALL: [Cause; 6] = [
        Cause::Masjid,
        Cause::Orphan,
        Cause::Iftar,
        Cause::Winter,
        Cause::Quran,
        Cause::Sadaqah,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Cause::Masjid => "masjid",
            Cause::Orphan => "orphan",
            Cause::Iftar => "iftar",
            Cause::Winter => "winter",
            Cause::Quran => "quran",
            Cause::Sadaqah => "sadaqah",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Cause::Masjid => "মসজিদ",
            Cause::Orphan => "এতিম",
            Cause::Iftar => "ইফতার",
            Cause::Winter => "শীতবস্ত্র",
            Cause::Quran => "কুরআন",
            Cause::Sadaqah => "সদকাহ",
        }
    }
}

impl FromStr for Cause {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Cause::ALL
            .into_iter()
            .find(|c| c.id().eq_ignore_ascii_case(s) || c.label() == s)
            .ok_or_else(|| anyhow::anyhow!("Unknown cause: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    Bkash,
    Nagad,
    Rocket,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] =
        [PaymentMethod::Bkash, PaymentMethod::Nagad, PaymentMethod::Rocket];

    pub fn id(&self) -> &'static str {
        match self {
            PaymentMethod::Bkash => "bkash",
            PaymentMethod::Nagad => "nagad",
            PaymentMethod::Rocket => "rocket",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Bkash => "বিকাশ",
            PaymentMethod::Nagad => "নগদ",
            PaymentMethod::Rocket => "রকেট",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        PaymentMethod::ALL
            .into_iter()
            .find(|p| p.id().eq_ignore_ascii_case(s) || p.label() == s)
            .ok_or_else(|| anyhow::anyhow!("Unknown payment method: {}", s))
    }
}

/// Which fields failed validation. All problems are reported together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub name: bool,
    pub amount: bool,
    pub cause: bool,
    pub payment: bool,
    pub image: bool,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        !(self.name || self.amount || self.cause || self.payment || self.image)
    }

    pub fn messages(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.name {
            out.push("আপনার নাম (প্রয়োজন)");
        }
        if self.amount {
            out.push("টাকার পরিমাণ (১০ - ১০,০০০)");
        }
        if self.cause {
            out.push("দানের খাত নির্বাচন করুন");
        }
        if self.payment {
            out.push("পেমেন্ট মাধ্যম নির্বাচন করুন");
        }
        if self.image {
            out.push("ছবি যুক্ত করুন");
        }
        out
    }
}

impl std::fmt::Display for FormErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.messages().join(", "))
    }
}

impl std::error::Error for FormErrors {}

#[derive(Debug, Clone, Default)]
pub struct DonationForm {
    pub name: String,
    pub amount: String,
    pub cause: Option<Cause>,
    pub payment: Option<PaymentMethod>,
    pub image: Option<String>,
}

impl DonationForm {
    pub fn parsed_amount(&self) -> Option<u32> {
        let ascii = to_ascii_digits(self.amount.trim());
        if ascii.is_empty() || !ascii.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        ascii
            .parse::<u32>()
            .ok()
            .filter(|a| (MIN_AMOUNT..=MAX_AMOUNT).contains(a))
    }

    pub fn validate(&self) -> Result<DonationRecord, FormErrors> {
        let amount = self.parsed_amount();
        let errors = FormErrors {
            name: self.name.trim().is_empty(),
            amount: amount.is_none(),
            cause: self.cause.is_none(),
            payment: self.payment.is_none(),
            image: self.image.as_deref().map_or(true, |i| i.trim().is_empty()),
        };

        match (amount, self.cause, &self.image) {
            (Some(amount), Some(cause), Some(image)) if errors.is_empty() => Ok(DonationRecord {
                name: self.name.trim().to_string(),
                amount: amount.to_string(),
                image: image.clone(),
                message: format!("{} তহবিলে দান", cause.label()),
            }),
            _ => Err(errors),
        }
    }
}

fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Read an image file into a `data:` URI.
pub fn image_data_uri(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).with_context(|| format!("Reading {:?}", path))?;
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    Ok(format!("data:{};base64,{}", mime_for(path), encoded))
}
