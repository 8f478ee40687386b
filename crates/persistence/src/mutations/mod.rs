// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Writes issued by the front-end itself.
//!
//! Everything else is written by the stored procedures.

pub mod crew;
