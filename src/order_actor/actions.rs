/// Custom actions for Order entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderAction {
    /// Moves the order one step along
    /// `placed → preparing → out-for-delivery → delivered`.
    ///
    /// Returns the status after the step. Past `delivered` this is a no-op.
    AdvanceStatus,
}
