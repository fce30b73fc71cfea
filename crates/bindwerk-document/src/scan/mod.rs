// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scan ingestion module — filename ordering, duplex pairing, ordered-file
// materialization, and scan-set discovery.

pub mod materialize;
pub mod order;
pub mod pairing;
pub mod sets;
