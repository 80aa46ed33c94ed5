//! Outbound SMS gateway.
//!
//! No real provider is wired up: when disabled (the default) a send is
//! logged and considered delivered. The message log in the database is the
//! system of record either way.

use crate::config::SmsConfig;

/// Outbound SMS gateway handle.
#[derive(Debug, Clone)]
pub struct SmsGateway {
    enabled: bool,
}

impl SmsGateway {
    pub fn new(config: &SmsConfig) -> Self {
        Self {
            enabled: config.enabled,
        }
    }

    /// Hands a message to the gateway.
    ///
    /// With no provider configured this only logs; the caller records the
    /// message in the log regardless.
    pub fn send(&self, phone: &str, body: &str) {
        if self.enabled {
            tracing::warn!(
                phone = %phone,
                "SMS gateway enabled but no provider is configured; message logged only"
            );
        } else {
            tracing::info!(
                phone = %phone,
                body_len = body.len(),
                "Simulated SMS send"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_from_config() {
        let gateway = SmsGateway::new(&SmsConfig::default());
        assert!(!gateway.enabled);
        // A send never fails in simulation.
        gateway.send("5551234567", "Hi!");
    }
}
