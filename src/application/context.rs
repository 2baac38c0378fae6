use rust_decimal::Decimal;
use serde::Deserialize;

/// 当前结账页面
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutPage {
    Cart,
    Checkout,
    /// 顾客为已有订单付款
    PayForOrder { order_key: String },
    /// 仅保存支付方式
    AddPaymentMethod,
}

/// 渲染支付字段所需的请求上下文
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutContext {
    pub page: CheckoutPage,
    pub cart_total: Option<Decimal>,
}

impl CheckoutContext {
    pub fn checkout(cart_total: Decimal) -> Self {
        Self {
            page: CheckoutPage::Checkout,
            cart_total: Some(cart_total),
        }
    }

    pub fn pay_for_order(order_key: impl Into<String>, cart_total: Option<Decimal>) -> Self {
        Self {
            page: CheckoutPage::PayForOrder {
                order_key: order_key.into(),
            },
            cart_total,
        }
    }

    pub fn add_payment_method() -> Self {
        Self {
            page: CheckoutPage::AddPaymentMethod,
            cart_total: None,
        }
    }
}

/// 支付字段查询参数
#[derive(Debug, Default, Deserialize)]
pub struct FieldsQuery {
    pub cart_total: Option<Decimal>,
    pub pay_for_order: Option<String>,
    pub key: Option<String>,
    pub add_payment_method: Option<String>,
}

impl From<FieldsQuery> for CheckoutContext {
    /// `pay_for_order` only counts together with a non-empty `key`.
    fn from(query: FieldsQuery) -> Self {
        let page = if query.add_payment_method.is_some() {
            CheckoutPage::AddPaymentMethod
        } else {
            match (query.pay_for_order, query.key) {
                (Some(_), Some(key)) if !key.trim().is_empty() => CheckoutPage::PayForOrder {
                    order_key: key.trim().to_string(),
                },
                _ => CheckoutPage::Checkout,
            }
        };

        Self {
            page,
            cart_total: query.cart_total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_query_pay_for_order_requires_key() {
        let ctx: CheckoutContext = FieldsQuery {
            pay_for_order: Some("true".to_string()),
            key: Some(" ".to_string()),
            cart_total: Some(dec!(3)),
            ..Default::default()
        }
        .into();
        assert_eq!(ctx.page, CheckoutPage::Checkout);

        let ctx: CheckoutContext = FieldsQuery {
            pay_for_order: Some("true".to_string()),
            key: Some("wc_order_1".to_string()),
            ..Default::default()
        }
        .into();
        assert_eq!(
            ctx.page,
            CheckoutPage::PayForOrder {
                order_key: "wc_order_1".to_string()
            }
        );
    }

    #[test]
    fn test_query_add_payment_method_wins() {
        let ctx: CheckoutContext = FieldsQuery {
            add_payment_method: Some("1".to_string()),
            pay_for_order: Some("true".to_string()),
            key: Some("wc_order_1".to_string()),
            cart_total: Some(dec!(3)),
        }
        .into();
        assert_eq!(ctx.page, CheckoutPage::AddPaymentMethod);
    }
}
