use thiserror::Error;

/// Errors surfaced by range construction and range-set operations.
///
/// Every failure is a local precondition violation reported synchronously,
/// before any shared state changes.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum RangeError {
    #[error("lower cut is above upper cut")]
    InvertedBounds,
    #[error("ranges are not connected")]
    NotConnected,
    #[error("ranges overlap")]
    Overlap,
    #[error("range extends outside the view bound")]
    OutsideBound,
    #[error("ranges overlap or are adjacent")]
    ConnectedRanges,
    #[error("set is unbounded below and the domain has no minimum")]
    UnboundedBelow,
}
