use std::collections::VecDeque;

use boardroom_core::advisor::Advisor;

/// Advisors waiting to answer the current message, in activation order.
#[derive(Debug, Default)]
pub struct AdvisorQueue {
    pending: VecDeque<Advisor>,
}

impl AdvisorQueue {
    pub fn new(advisors: impl IntoIterator<Item = Advisor>) -> Self {
        Self {
            pending: advisors.into_iter().collect(),
        }
    }

    /// Takes the next advisor to ask.
    pub fn next_advisor(&mut self) -> Option<Advisor> {
        self.pending.pop_front()
    }

    /// Drops every remaining advisor and returns how many were dropped.
    pub fn abandon(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        dropped
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boardroom_core::advisor::get_default_advisors;

    #[test]
    fn test_queue_preserves_order() {
        let mut queue = AdvisorQueue::new(get_default_advisors());
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.next_advisor().unwrap().id, "host-001");
        assert_eq!(queue.next_advisor().unwrap().id, "ceo-coach-001");
        assert_eq!(queue.abandon(), 1);
        assert!(queue.is_empty());
        assert!(queue.next_advisor().is_none());
    }
}
