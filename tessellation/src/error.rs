//! Hand-rolled error enums for the tessellator and stroker (spec.md §7
//! "Error Handling Design"). No `thiserror`/`anyhow`: `Display` is written
//! by hand, matching the rest of this workspace.

/// Something wrong with the tessellator's input, caught before any
/// geometry is built.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InvalidInput {
    NonFiniteCoordinate,
    TooFewPoints,
    MalformedContourCounts,
}

impl std::fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidInput::NonFiniteCoordinate => write!(f, "a coordinate was NaN or infinite"),
            InvalidInput::TooFewPoints => write!(f, "a contour has fewer than 2 points"),
            InvalidInput::MalformedContourCounts => write!(f, "contour counts do not sum to the point count"),
        }
    }
}

impl std::error::Error for InvalidInput {}

/// A geometry builder rejected output (spec.md §7 "Allocation failure").
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GeometryBuilderError {
    InvalidVertex,
    TooManyVertices,
}

impl std::fmt::Display for GeometryBuilderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeometryBuilderError::InvalidVertex => write!(f, "invalid vertex"),
            GeometryBuilderError::TooManyVertices => write!(f, "too many vertices"),
        }
    }
}

impl std::error::Error for GeometryBuilderError {}

/// A broken internal invariant caught before it could corrupt output
/// (spec.md §7 "Fatal" — recovered here as an error rather than a panic,
/// since the mesh is locally owned by one `Tessellator::tessellate` call).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InternalError {
    IncorrectActiveRegionOrder,
    BrokenMeshInvariant,
    UnresolvedIntersection,
}

impl std::fmt::Display for InternalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InternalError::IncorrectActiveRegionOrder => write!(f, "active region order became inconsistent"),
            InternalError::BrokenMeshInvariant => write!(f, "mesh invariant violated"),
            InternalError::UnresolvedIntersection => write!(f, "could not resolve an edge intersection"),
        }
    }
}

impl std::error::Error for InternalError {}

#[derive(Clone, Debug, PartialEq)]
pub enum TessellationError {
    InvalidInput(InvalidInput),
    GeometryBuilder(GeometryBuilderError),
    Internal(InternalError),
}

impl std::fmt::Display for TessellationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TessellationError::InvalidInput(e) => write!(f, "invalid input: {e}"),
            TessellationError::GeometryBuilder(e) => write!(f, "geometry builder error: {e}"),
            TessellationError::Internal(e) => write!(f, "internal error: {e}"),
        }
    }
}

impl std::error::Error for TessellationError {}

impl From<InvalidInput> for TessellationError {
    fn from(e: InvalidInput) -> Self {
        TessellationError::InvalidInput(e)
    }
}

impl From<GeometryBuilderError> for TessellationError {
    fn from(e: GeometryBuilderError) -> Self {
        TessellationError::GeometryBuilder(e)
    }
}

impl From<InternalError> for TessellationError {
    fn from(e: InternalError) -> Self {
        TessellationError::Internal(e)
    }
}

pub type TessellationResult = Result<(), TessellationError>;

/// Stroker-specific failure (spec.md §4.6, §7 "Degenerate geometry" —
/// handled silently by producing nothing, this variant exists for the
/// rare genuinely-invalid paint configuration).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StrokerError {
    DegenerateInput,
    InvalidMiterLimit,
}

impl std::fmt::Display for StrokerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StrokerError::DegenerateInput => write!(f, "stroker input had no offsettable segments"),
            StrokerError::InvalidMiterLimit => write!(f, "miter limit must be >= 1"),
        }
    }
}

impl std::error::Error for StrokerError {}
