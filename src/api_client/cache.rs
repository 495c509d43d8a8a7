// src/api_client/cache.rs

use std::collections::HashMap;
use std::time::{Duration, Instant};

use serde_json::Value;

// Cache de listagens com validade fixa. Objeto explícito do chamador,
// nada de estado global: quem quer compartilhar passa a mesma instância.
#[derive(Debug)]
pub struct TtlCache {
    ttl: Duration,
    entries: HashMap<String, (Instant, Value)>,
}

impl TtlCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        let (stored_at, value) = self.entries.get(key)?;
        if stored_at.elapsed() >= self.ttl {
            return None;
        }
        Some(value.clone())
    }

    pub fn put(&mut self, key: impl Into<String>, value: Value) {
        self.entries.insert(key.into(), (Instant::now(), value));
    }

    // Mutação em uma entidade derruba a listagem guardada dela
    pub fn invalidate(&mut self, key: &str) {
        self.entries.remove(key);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn devolve_enquanto_valido() {
        let mut cache = TtlCache::new(Duration::from_secs(60));
        cache.put("clients", json!([{"name": "Ana"}]));

        assert_eq!(cache.get("clients"), Some(json!([{"name": "Ana"}])));
        assert_eq!(cache.get("cases"), None);
    }

    #[test]
    fn expira_depois_do_ttl() {
        let mut cache = TtlCache::new(Duration::from_millis(10));
        cache.put("clients", json!([]));

        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(cache.get("clients"), None);
    }

    #[test]
    fn invalidar_remove_somente_a_chave() {
        let mut cache = TtlCache::new(Duration::from_secs(60));
        cache.put("clients", json!(1));
        cache.put("cases", json!(2));

        cache.invalidate("clients");

        assert_eq!(cache.get("clients"), None);
        assert_eq!(cache.get("cases"), Some(json!(2)));
    }
}
