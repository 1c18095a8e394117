//! Marker types.

/// Marker type describing an entity creation.
#[derive(Clone, Copy, Debug)]
pub struct Creation;

/// Marker type describing an entity update.
#[derive(Clone, Copy, Debug)]
pub struct Update;

/// Marker type describing an entity submission.
#[derive(Clone, Copy, Debug)]
pub struct Submission;

/// Marker type describing a start of a term.
#[derive(Clone, Copy, Debug)]
pub struct Start;

/// Marker type describing an end of a term.
#[derive(Clone, Copy, Debug)]
pub struct End;
