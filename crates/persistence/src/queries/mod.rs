// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries backing the transition guards.
//!
//! Every query is generated for both backends by `backend_fn!` and runs
//! inside the caller's transaction, so a guard and the procedure it
//! protects observe the same snapshot.

pub mod entities;
pub mod flights;
