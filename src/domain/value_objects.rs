use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 零小数位货币（金额本身即最小单位）
const ZERO_DECIMAL_CURRENCIES: &[&str] = &[
    "BIF", "CLP", "DJF", "GNF", "JPY", "KMF", "KRW", "MGA", "PYG", "RWF", "UGX", "VND", "VUV",
    "XAF", "XOF", "XPF",
];

/// 订单状态（与宿主商店一致）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    /// 待支付
    Pending,
    /// 处理中
    Processing,
    /// 保留
    OnHold,
    /// 已完成
    Completed,
    /// 已取消
    Cancelled,
    /// 已退款
    Refunded,
    /// 支付失败
    Failed,
    /// 结账草稿
    CheckoutDraft,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "pending"),
            OrderStatus::Processing => write!(f, "processing"),
            OrderStatus::OnHold => write!(f, "on-hold"),
            OrderStatus::Completed => write!(f, "completed"),
            OrderStatus::Cancelled => write!(f, "cancelled"),
            OrderStatus::Refunded => write!(f, "refunded"),
            OrderStatus::Failed => write!(f, "failed"),
            OrderStatus::CheckoutDraft => write!(f, "checkout-draft"),
        }
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    /// Accepts both `pending` and the stored `wc-pending` form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_prefix("wc-").unwrap_or(s) {
            "pending" => Ok(OrderStatus::Pending),
            "processing" => Ok(OrderStatus::Processing),
            "on-hold" => Ok(OrderStatus::OnHold),
            "completed" => Ok(OrderStatus::Completed),
            "cancelled" => Ok(OrderStatus::Cancelled),
            "refunded" => Ok(OrderStatus::Refunded),
            "failed" => Ok(OrderStatus::Failed),
            "checkout-draft" => Ok(OrderStatus::CheckoutDraft),
            other => Err(format!("unknown order status: {other}")),
        }
    }
}

/// ISO货币代码，统一为大写
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// RMB and CNY both denote renminbi.
    pub fn is_renminbi(&self) -> bool {
        matches!(self.0.as_str(), "RMB" | "CNY")
    }

    pub fn is_zero_decimal(&self) -> bool {
        ZERO_DECIMAL_CURRENCIES.contains(&self.0.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_lowercase(&self) -> String {
        self.0.to_lowercase()
    }
}

impl From<String> for CurrencyCode {
    fn from(code: String) -> Self {
        Self::new(code)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 最小货币单位金额（如美分）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MinorAmount(i64);

impl MinorAmount {
    pub fn from_minor(amount: i64) -> Self {
        Self(amount)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// Converts a store total to minor units for `currency`.
    ///
    /// Zero-decimal currencies are truncated, everything else is scaled by 100
    /// and rounded half away from zero. The sign is dropped.
    pub fn from_total(total: Decimal, currency: &CurrencyCode) -> Self {
        let scaled = if currency.is_zero_decimal() {
            total.trunc()
        } else {
            (total * Decimal::ONE_HUNDRED)
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        };
        let minor = scaled.abs().to_i64().unwrap_or(i64::MAX);
        Self(minor)
    }
}

impl fmt::Display for MinorAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_currency_normalization() {
        let currency = CurrencyCode::new(" cny ");
        assert_eq!(currency.as_str(), "CNY");
        assert!(currency.is_renminbi());
        assert!(CurrencyCode::new("rmb").is_renminbi());
        assert!(!CurrencyCode::new("usd").is_renminbi());
    }

    #[test]
    fn test_minor_amount_two_decimal() {
        let usd = CurrencyCode::new("USD");
        assert_eq!(MinorAmount::from_total(dec!(12.34), &usd).value(), 1234);
        assert_eq!(MinorAmount::from_total(dec!(0.5), &usd).value(), 50);
        assert_eq!(MinorAmount::from_total(dec!(19.999), &usd).value(), 2000);
        assert_eq!(MinorAmount::from_total(dec!(0.125), &usd).value(), 13);
    }

    #[test]
    fn test_minor_amount_zero_decimal() {
        let jpy = CurrencyCode::new("jpy");
        assert_eq!(MinorAmount::from_total(dec!(1500), &jpy).value(), 1500);
        assert_eq!(MinorAmount::from_total(dec!(1500.7), &jpy).value(), 1500);
    }

    #[test]
    fn test_minor_amount_drops_sign() {
        let usd = CurrencyCode::new("USD");
        assert_eq!(MinorAmount::from_total(dec!(-3.00), &usd).value(), 300);
    }

    #[test]
    fn test_order_status_parse() {
        assert_eq!("wc-pending".parse::<OrderStatus>(), Ok(OrderStatus::Pending));
        assert_eq!("on-hold".parse::<OrderStatus>(), Ok(OrderStatus::OnHold));
        assert!("bogus".parse::<OrderStatus>().is_err());
        assert_eq!(OrderStatus::CheckoutDraft.to_string(), "checkout-draft");
    }
}
