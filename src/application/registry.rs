use crate::application::payment_method::PaymentMethodAdapter;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

/// 支付方式注册表，启动时构建
#[derive(Default, Clone)]
pub struct PaymentMethodRegistry {
    methods: BTreeMap<String, Arc<dyn PaymentMethodAdapter>>,
}

impl PaymentMethodRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registering an id twice replaces the earlier adapter.
    pub fn register(&mut self, method: Arc<dyn PaymentMethodAdapter>) {
        info!("Registering payment method: {}", method.id());
        self.methods.insert(method.id().to_string(), method);
    }

    pub fn get(&self, id: &str) -> Option<Arc<dyn PaymentMethodAdapter>> {
        self.methods.get(id).cloned()
    }

    /// Enabled methods in id order.
    pub fn available(&self) -> Vec<Arc<dyn PaymentMethodAdapter>> {
        self.methods
            .values()
            .filter(|m| m.is_available())
            .cloned()
            .collect()
    }
}
