use crate::range::RangeState;
use std::fmt;
use std::rc::Rc;

pub(crate) type DateChangeCallback = Rc<dyn Fn(&RangeState)>;

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ListenerId(u64);

/// Callbacks to run after every change to the picked range, kept in
/// registration order
#[derive(Clone, Default)]
pub(crate) struct Observers {
    next_id: u64,
    listeners: Vec<(ListenerId, DateChangeCallback)>,
}

impl Observers {
    pub(crate) fn register<F>(&mut self, callback: F) -> ListenerId
    where
        F: Fn(&RangeState) + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Rc::new(callback)));
        id
    }

    /// Returns `false` if no listener with the given ID was registered
    pub(crate) fn unregister(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.len()
    }

    /// A copy of the current listener list, so that notifying does not hold
    /// on to the list itself
    pub(crate) fn snapshot(&self) -> Vec<DateChangeCallback> {
        self.listeners.iter().map(|(_, cb)| Rc::clone(cb)).collect()
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("next_id", &self.next_id)
            .field(
                "listeners",
                &self.listeners.iter().map(|(id, _)| id).collect::<Vec<_>>(),
            )
            .finish()
    }
}
