use std::sync::Arc;
use rookdb::LRUKReplacer;

// Create a shareable replacer for testing
pub fn create_test_replacer(capacity: usize, k: usize) -> Arc<LRUKReplacer> {
    Arc::new(LRUKReplacer::new(capacity, k))
}

// Drain every remaining victim in eviction order
pub fn drain_victims(replacer: &LRUKReplacer) -> Vec<u32> {
    let mut victims = Vec::new();
    while let Some(frame_id) = replacer.evict() {
        victims.push(frame_id);
    }
    victims
}
