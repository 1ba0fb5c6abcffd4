// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Query descriptor construction.

use crate::models::{IdentityFilter, QueryDescriptor, ValidatedQuery};

/// Map a validated request onto the store's query interface.
///
/// Deterministic and total: the bounding box carries over unchanged, the
/// time predicate becomes the half-open interval `[start, end)`, and the
/// filter policy restricts results to reports with a valid vessel
/// identity. Construction cannot fail for an already-validated input.
pub fn build_descriptor(query: &ValidatedQuery) -> QueryDescriptor {
    QueryDescriptor {
        xmin: query.xmin,
        xmax: query.xmax,
        ymin: query.ymin,
        ymax: query.ymax,
        start: query.start,
        end: query.end,
        identity: IdentityFilter::ValidOnly,
    }
}
