//! Splitting of a [`Unit`] into several ones.

use crate::domain::{unit, Unit};

use super::{Cardinality, Defaults, Error, MAX_SPLIT_TARGETS, MIN_SPLIT_TARGETS};

/// Customization of a single split [`Target`].
///
/// [`None`] fields fall back to the generated defaults.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Override {
    /// Custom [`unit::Number`] of the [`Target`].
    pub number: Option<unit::Number>,

    /// Custom size of the [`Target`] in square feet.
    pub size: Option<u32>,

    /// Custom [`unit::Kind`] of the [`Target`].
    pub kind: Option<unit::Kind>,

    /// Custom [`unit::Status`] of the [`Target`].
    pub status: Option<unit::Status>,
}

/// [`Unit`] to be produced by a split.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Target {
    /// [`unit::Number`] of this [`Target`].
    pub number: unit::Number,

    /// [`unit::Area`] of this [`Target`].
    pub size: unit::Area,

    /// [`unit::Kind`] of this [`Target`].
    pub kind: unit::Kind,

    /// [`unit::Status`] of this [`Target`].
    pub status: unit::Status,
}

/// Editable plan of splitting a source [`Unit`] into [`Target`]s.
///
/// Sizes may be adjusted freely while planning. Whether they fit into the
/// source is only enforced by [`SplitPlan::commit()`], so that a caller can
/// show the [`SplitPlan::remaining()`] space while the user edits.
#[derive(Clone, Debug)]
pub struct SplitPlan<'u> {
    /// [`Unit`] being split.
    source: &'u Unit,

    /// [`Target`]s the source is split into.
    targets: Vec<Target>,
}

impl<'u> SplitPlan<'u> {
    /// Plans splitting the `source` [`Unit`] into `count` default
    /// [`Target`]s.
    ///
    /// # Errors
    ///
    /// See [`SplitPlan::with_overrides()`].
    pub fn new(
        source: &'u Unit,
        count: usize,
        defaults: Defaults,
    ) -> Result<Self, Error> {
        Self::with_overrides(source, count, defaults, [])
    }

    /// Plans splitting the `source` [`Unit`] into `count` [`Target`]s, with
    /// the `i`-th [`Override`] applied to the `i`-th [`Target`].
    ///
    /// A default [`Target`] is numbered `{source}-{letter}` with letters
    /// going from `A`, and takes `floor(source size / count)` square feet.
    /// The remainder is left unallocated.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidCardinality`] if `count` is out of
    ///   [`MIN_SPLIT_TARGETS`]`..=`[`MAX_SPLIT_TARGETS`] bounds;
    /// - [`Error::UnknownTarget`] if there are more [`Override`]s than
    ///   [`Target`]s;
    /// - [`Error::NonPositiveSize`] if some [`Target`] ends up with no space
    ///   (either overridden to `0`, or the source is smaller than `count`);
    /// - [`Error::InvalidNumber`] if a generated [`unit::Number`] is invalid.
    pub fn with_overrides(
        source: &'u Unit,
        count: usize,
        defaults: Defaults,
        overrides: impl IntoIterator<Item = Override>,
    ) -> Result<Self, Error> {
        let invalid_count =
            || Error::InvalidCardinality(Cardinality::SplitTargets(count));

        if !(MIN_SPLIT_TARGETS..=MAX_SPLIT_TARGETS).contains(&count) {
            return Err(invalid_count());
        }
        let parts = u32::try_from(count).map_err(|_| invalid_count())?;
        let default_size = source.size.get() / parts;

        let mut overrides = overrides.into_iter().collect::<Vec<_>>();
        if overrides.len() > count {
            return Err(Error::UnknownTarget(count));
        }
        overrides.resize_with(count, Override::default);

        let targets = overrides
            .into_iter()
            .enumerate()
            .map(|(index, o)| {
                let number = match o.number {
                    Some(number) => number,
                    None => default_number(&source.number, index)?,
                };
                let size = unit::Area::new(o.size.unwrap_or(default_size))
                    .ok_or(Error::NonPositiveSize { index })?;
                Ok(Target {
                    number,
                    size,
                    kind: o.kind.unwrap_or(defaults.kind),
                    status: o.status.unwrap_or(defaults.status),
                })
            })
            .collect::<Result<Vec<_>, Error>>()?;

        Ok(Self { source, targets })
    }

    /// Returns the [`Unit`] being split.
    #[must_use]
    pub fn source(&self) -> &'u Unit {
        self.source
    }

    /// Returns the planned [`Target`]s.
    #[must_use]
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    /// Adjusts the size of the [`Target`] at `index` by the signed `delta`,
    /// never letting it go below `1` square foot.
    ///
    /// Returns the resulting [`unit::Area`] of the [`Target`].
    ///
    /// # Errors
    ///
    /// [`Error::UnknownTarget`] if there is no [`Target`] at `index`.
    pub fn adjust(
        &mut self,
        index: usize,
        delta: i64,
    ) -> Result<unit::Area, Error> {
        let target = self
            .targets
            .get_mut(index)
            .ok_or(Error::UnknownTarget(index))?;

        let size = i64::from(target.size.get())
            .saturating_add(delta)
            .clamp(1, i64::from(u32::MAX));
        target.size = u32::try_from(size)
            .ok()
            .and_then(unit::Area::new)
            .ok_or(Error::NonPositiveSize { index })?;

        Ok(target.size)
    }

    /// Sets the size of the [`Target`] at `index` to exactly `sq_ft`.
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownTarget`] if there is no [`Target`] at `index`;
    /// - [`Error::NonPositiveSize`] if `sq_ft` is `0`.
    pub fn resize(
        &mut self,
        index: usize,
        sq_ft: u32,
    ) -> Result<unit::Area, Error> {
        let target = self
            .targets
            .get_mut(index)
            .ok_or(Error::UnknownTarget(index))?;
        target.size =
            unit::Area::new(sq_ft).ok_or(Error::NonPositiveSize { index })?;

        Ok(target.size)
    }

    /// Returns the total square feet allocated to the [`Target`]s.
    #[must_use]
    pub fn allocated(&self) -> u64 {
        self.targets.iter().map(|t| u64::from(t.size.get())).sum()
    }

    /// Returns the source square feet not allocated to any [`Target`].
    ///
    /// Negative value means the [`Target`]s are over-allocated.
    #[must_use]
    pub fn remaining(&self) -> i64 {
        // Both operands fit into `i64`, as there are at most
        // `MAX_SPLIT_TARGETS` of `u32` sizes.
        i64::from(self.source.size.get())
            - i64::try_from(self.allocated()).unwrap_or(i64::MAX)
    }

    /// Indicates whether this [`SplitPlan`] can be [`commit`]ted.
    ///
    /// [`commit`]: SplitPlan::commit
    #[must_use]
    pub fn is_committable(&self) -> bool {
        self.remaining() >= 0
    }

    /// Validates this [`SplitPlan`] and produces the [`Split`] result.
    ///
    /// [`Target`]s inherit the building, floor and amenities of the source,
    /// and a share of its rent proportional to their size.
    ///
    /// # Errors
    ///
    /// [`Error::OverAllocated`] if the [`Target`]s take more space than the
    /// source has, or [`Error::RentOverflow`] if a prorated rent cannot be
    /// represented.
    pub fn commit(self) -> Result<Split, Error> {
        let remaining = self.remaining();
        let remaining = u32::try_from(remaining).map_err(|_| {
            Error::OverAllocated {
                excess: remaining.unsigned_abs(),
            }
        })?;

        let Self { source, targets } = self;
        let units = targets
            .into_iter()
            .map(|t| {
                Ok(unit::Draft {
                    building_id: source.building_id,
                    number: t.number,
                    floor: source.floor,
                    size: t.size,
                    kind: t.kind,
                    status: t.status,
                    monthly_rent: source
                        .monthly_rent
                        .prorate(t.size.get(), source.size.into())
                        .ok_or(Error::RentOverflow)?,
                    amenities: source.amenities.clone(),
                    notes: None,
                })
            })
            .collect::<Result<_, _>>()?;

        Ok(Split {
            source_id: source.id,
            units,
            remaining,
        })
    }
}

/// Result of a committed [`SplitPlan`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Split {
    /// ID of the [`Unit`] being split.
    pub source_id: unit::Id,

    /// New [`Unit`]s replacing the source one, in [`Target`]s order.
    pub units: Vec<unit::Draft>,

    /// Source square feet left unallocated.
    pub remaining: u32,
}

/// Generates a default [`unit::Number`] for the [`Target`] at `index`.
fn default_number(
    source: &unit::Number,
    index: usize,
) -> Result<unit::Number, Error> {
    let letter = (b'A'..=b'Z')
        .nth(index)
        .map(char::from)
        .ok_or(Error::UnknownTarget(index))?;
    let number = format!("{source}-{letter}");
    unit::Number::new(number.clone()).ok_or(Error::InvalidNumber(number))
}
