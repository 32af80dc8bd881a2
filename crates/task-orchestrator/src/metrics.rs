use prometheus::{Encoder, IntCounter, Registry, TextEncoder};

/// Prometheus counters for orchestrated sessions
#[derive(Clone)]
pub struct SessionMetrics {
    pub registry: Registry,
    pub tasks_completed: IntCounter,
    pub tasks_failed: IntCounter,
    pub sync_timeouts: IntCounter,
    pub inventory_claims: IntCounter,
}

impl SessionMetrics {
    pub fn new() -> Result<Self, String> {
        let registry = Registry::new();
        let counter = |name: &str, help: &str| {
            let c = IntCounter::new(name, help).map_err(|e| format!("metrics init error: {e}"))?;
            registry
                .register(Box::new(c.clone()))
                .map_err(|e| format!("metrics register error: {e}"))?;
            Ok::<_, String>(c)
        };
        let tasks_completed = counter("pnp_tasks_completed", "Tasks that reached Done")?;
        let tasks_failed = counter("pnp_tasks_failed", "Tasks that ended Failed")?;
        let sync_timeouts = counter("pnp_sync_timeouts", "Scene sync waits that timed out")?;
        let inventory_claims = counter("pnp_inventory_claims", "Objects claimed from inventory")?;
        Ok(Self {
            registry,
            tasks_completed,
            tasks_failed,
            sync_timeouts,
            inventory_claims,
        })
    }

    pub fn encode_text(&self) -> String {
        let mut buf = Vec::new();
        let encoder = TextEncoder::new();
        if let Err(e) = encoder.encode(&self.registry.gather(), &mut buf) {
            return format!("error encoding metrics: {e}");
        }
        String::from_utf8(buf).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode() {
        let m = SessionMetrics::new().unwrap();
        m.tasks_completed.inc();
        m.inventory_claims.inc_by(2);
        let text = m.encode_text();
        assert!(text.contains("pnp_tasks_completed 1"));
        assert!(text.contains("pnp_inventory_claims 2"));
        assert!(text.contains("pnp_sync_timeouts 0"));
    }
}
